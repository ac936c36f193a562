//! The finished, renderer-ready product.

use crate::geometry::Geometry;
use crate::material::Material;
use crate::skeleton::InertBone;
use crate::skinning::SkinAttributes;

/// A generated mesh with everything a skeletal-animation renderer needs:
/// composed geometry with fresh normals, two-bone skin buffers, the flat
/// bone hierarchy, and the material to draw with.
///
/// The mesh is immutable once built. Animation happens downstream by
/// posing the bone hierarchy (and rigid-transforming the whole mesh);
/// the geometry itself is never touched again.
#[derive(Clone, Debug)]
pub struct SkinnedMesh {
    /// Composed geometry: positions, recomputed normals, and the raw
    /// tunnel UVs the skin attributes were decoded from.
    pub geometry: Geometry,
    /// Decoded per-vertex bone indices and weights.
    pub skin: SkinAttributes,
    /// Flat bone records, parents by index.
    pub bones: Vec<InertBone>,
    /// Appearance to render with.
    pub material: Material,
}

impl SkinnedMesh {
    /// Number of vertices of the composed geometry.
    pub fn vertex_count(&self) -> usize {
        self.geometry.vertex_count()
    }

    /// Number of triangles of the composed geometry.
    pub fn triangle_count(&self) -> usize {
        self.geometry.triangle_count()
    }

    /// Number of bones in the hierarchy.
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }
}
