//! Structures for creating and storing generated geometry.

use cgmath::Transform as Transform_;
use cgmath::{InnerSpace, Point3, Vector3, Zero};

use crate::skinning::BlendedWeight;
use crate::Transform;

/// A collection of vertices, their attributes, and faces that defines the
/// shape of a polyhedral object.
///
/// Two attribute channels carry skinning data at different pipeline stages:
/// `weights` holds explicit blended bone weights on freshly extruded
/// geometry, while `tex_coords` holds the packed two-scalar form on
/// geometry recovered from a boolean solid. Exactly one of them is
/// populated at any stage.
#[derive(Clone, Debug)]
pub struct Geometry {
    /// Vertices.
    pub vertices: Vec<mint::Point3<f32>>,
    /// Normals.
    pub normals: Vec<mint::Vector3<f32>>,
    /// Texture co-ordinates, doubling as the packed bone-weight tunnel.
    pub tex_coords: Vec<mint::Point2<f32>>,
    /// Blended bone weights, parallel to `vertices`.
    pub weights: Vec<BlendedWeight>,
    /// Faces.
    pub faces: Vec<[u32; 3]>,
}

impl Geometry {
    /// Create new `Geometry` without any data in it.
    pub fn empty() -> Self {
        Geometry {
            vertices: Vec::new(),
            normals: Vec::new(),
            tex_coords: Vec::new(),
            weights: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create `Geometry` from a vector of vertices.
    pub fn with_vertices(vertices: Vec<mint::Point3<f32>>) -> Self {
        Geometry {
            vertices,
            ..Geometry::empty()
        }
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Apply a rigid transform to all positions and normals in place.
    pub fn apply_transform(&mut self, transform: &Transform) {
        for vertex in &mut self.vertices {
            let moved = transform.transform_point(Point3::from(*vertex));
            *vertex = moved.into();
        }
        for normal in &mut self.normals {
            let rotated = transform.rot * Vector3::from(*normal);
            *normal = rotated.into();
        }
    }

    /// Recompute vertex normals by area-weighted accumulation of face
    /// normals. Replaces whatever `normals` held before; boolean solid
    /// operations leave normals stale, so this runs on their output.
    pub fn compute_vertex_normals(&mut self) {
        let mut accumulated = vec![Vector3::zero(); self.vertices.len()];
        for face in &self.faces {
            let a = Point3::from(self.vertices[face[0] as usize]);
            let b = Point3::from(self.vertices[face[1] as usize]);
            let c = Point3::from(self.vertices[face[2] as usize]);
            // cross product length is twice the face area, which gives the
            // area weighting for free
            let normal = (b - a).cross(c - a);
            for &index in face {
                accumulated[index as usize] += normal;
            }
        }
        self.normals = accumulated
            .into_iter()
            .map(|sum| {
                if sum.magnitude2() > 0.0 {
                    sum.normalize().into()
                } else {
                    Vector3::unit_y().into()
                }
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::{Decomposed, Quaternion, Rad, Rotation3};
    use std::f32::consts::FRAC_PI_2;

    fn quad() -> Geometry {
        let mut geometry = Geometry::with_vertices(vec![
            [0.0, 0.0, 0.0].into(),
            [1.0, 0.0, 0.0].into(),
            [1.0, 1.0, 0.0].into(),
            [0.0, 1.0, 0.0].into(),
        ]);
        geometry.faces = vec![[0, 1, 2], [0, 2, 3]];
        geometry
    }

    #[test]
    fn normals_of_a_flat_quad_point_up_its_plane() {
        let mut geometry = quad();
        geometry.compute_vertex_normals();
        for normal in &geometry.normals {
            assert_relative_eq!(normal.z, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn transform_moves_points_and_rotates_normals() {
        let mut geometry = quad();
        geometry.compute_vertex_normals();
        let transform = Decomposed {
            scale: 1.0,
            rot: Quaternion::from_axis_angle(cgmath::Vector3::unit_x(), Rad(FRAC_PI_2)),
            disp: cgmath::Vector3::new(0.0, 0.0, 5.0),
        };
        geometry.apply_transform(&transform);
        // (1, 1, 0) rotates onto (1, 0, 1), then translates by z+5
        assert_relative_eq!(geometry.vertices[2].x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(geometry.vertices[2].y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(geometry.vertices[2].z, 6.0, epsilon = 1e-6);
        // +Z normals rotate onto -Y
        assert_relative_eq!(geometry.normals[0].y, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn identity_transform_is_a_noop() {
        let mut geometry = quad();
        let transform: Transform = <Transform as cgmath::One>::one();
        geometry.apply_transform(&transform);
        assert_relative_eq!(geometry.vertices[1].x, 1.0);
    }
}
