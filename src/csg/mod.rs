//! Boolean solid geometry over BSP trees.
//!
//! Solids keep only what survives boolean clipping: polygons of positioned,
//! UV-tagged vertices. Converting a [`Geometry`](../struct.Geometry.html)
//! into a solid packs its per-vertex bone weights into the UV channel;
//! converting back yields geometry whose `tex_coords` carry the packed data
//! for the unpacker.
//!
//! Boolean operations consume both operands: clipping rearranges the
//! operand trees in place, so a used solid must never be touched again.
//! Taking `self` and `other` by value makes that a compile-time rule.

mod bsp;
mod plane;
mod polygon;
mod vertex;

use cgmath::{InnerSpace, Point3, Vector2};
use log::debug;
use std::collections::HashMap;

use self::bsp::Node;
use self::plane::EPSILON;
use self::polygon::Polygon;
use self::vertex::Vertex;
use crate::error::Error;
use crate::geometry::Geometry;

/// A watertight boolean solid.
#[derive(Debug)]
pub struct Solid {
    polygons: Vec<Polygon>,
}

impl Solid {
    /// Convert triangle geometry into a solid.
    ///
    /// Every vertex must carry a blended bone weight; the weights are
    /// packed into the solid's UV channel here, at the boundary where the
    /// representation stops carrying real attributes. Zero-area faces are
    /// dropped, they have no splitting plane.
    pub fn from_geometry(geometry: &Geometry) -> Result<Solid, Error> {
        if geometry.weights.len() != geometry.vertices.len() {
            return Err(Error::MissingWeights);
        }
        let mut polygons = Vec::with_capacity(geometry.faces.len());
        for face in &geometry.faces {
            let corners: Vec<Vertex> = face
                .iter()
                .map(|&index| {
                    let position = geometry.vertices[index as usize];
                    let uv = geometry.weights[index as usize].pack();
                    Vertex {
                        position: Point3::new(position.x, position.y, position.z),
                        uv: Vector2::new(uv.x, uv.y),
                    }
                })
                .collect();
            let ab = corners[1].position - corners[0].position;
            let ac = corners[2].position - corners[0].position;
            if ab.cross(ac).magnitude2() <= EPSILON * EPSILON {
                continue;
            }
            polygons.push(Polygon::new(corners));
        }
        if polygons.is_empty() {
            return Err(Error::EmptySolid);
        }
        Ok(Solid { polygons })
    }

    /// Number of boundary polygons.
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// Boolean union, consuming both operands.
    pub fn union(self, other: Solid) -> Solid {
        debug!(
            "union of {} and {} polygons",
            self.polygons.len(),
            other.polygons.len(),
        );
        let mut a = Node::new(self.polygons);
        let mut b = Node::new(other.polygons);
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(b.all_polygons());
        Solid {
            polygons: a.all_polygons(),
        }
    }

    /// Boolean subtraction of `other` from `self`, consuming both operands.
    pub fn subtract(self, other: Solid) -> Solid {
        debug!(
            "subtracting {} polygons from {}",
            other.polygons.len(),
            self.polygons.len(),
        );
        let mut a = Node::new(self.polygons);
        let mut b = Node::new(other.polygons);
        a.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(b.all_polygons());
        a.invert();
        Solid {
            polygons: a.all_polygons(),
        }
    }

    /// Extract triangle geometry, welding vertices that agree in position
    /// and UV within epsilon. The polygons are convex, so each tessellates
    /// as a fan.
    pub fn to_geometry(&self) -> Result<Geometry, Error> {
        if self.polygons.is_empty() {
            return Err(Error::EmptySolid);
        }
        let quantize = |value: f32| (value / EPSILON).round() as i64;
        let mut lookup: HashMap<[i64; 5], u32> = HashMap::new();
        let mut geometry = Geometry::empty();
        for polygon in &self.polygons {
            let indices: Vec<u32> = polygon
                .vertices
                .iter()
                .map(|vertex| {
                    let key = [
                        quantize(vertex.position.x),
                        quantize(vertex.position.y),
                        quantize(vertex.position.z),
                        quantize(vertex.uv.x),
                        quantize(vertex.uv.y),
                    ];
                    *lookup.entry(key).or_insert_with(|| {
                        geometry.vertices.push(mint::Point3 {
                            x: vertex.position.x,
                            y: vertex.position.y,
                            z: vertex.position.z,
                        });
                        geometry.tex_coords.push(mint::Point2 {
                            x: vertex.uv.x,
                            y: vertex.uv.y,
                        });
                        geometry.vertices.len() as u32 - 1
                    })
                })
                .collect();
            for i in 1..indices.len() - 1 {
                let face = [indices[0], indices[i], indices[i + 1]];
                // welding can collapse sliver triangles; skip those
                if face[0] != face[1] && face[1] != face[2] && face[0] != face[2] {
                    geometry.faces.push(face);
                }
            }
        }
        debug!(
            "solid yielded {} vertices, {} triangles",
            geometry.vertex_count(),
            geometry.triangle_count(),
        );
        Ok(geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skinning::BlendedWeight;

    /// Axis-aligned cuboid with uniform weighting on one bone.
    fn cuboid(center: [f32; 3], size: f32, bone: usize) -> Geometry {
        let h = size / 2.0;
        let mut geometry = Geometry::empty();
        for dz in [-h, h] {
            for dy in [-h, h] {
                for dx in [-h, h] {
                    geometry.vertices.push(mint::Point3 {
                        x: center[0] + dx,
                        y: center[1] + dy,
                        z: center[2] + dz,
                    });
                    geometry.weights.push(BlendedWeight::single(bone));
                }
            }
        }
        // outward-facing quads, split into triangles
        let quads = [
            [0, 2, 3, 1], // -z
            [4, 5, 7, 6], // +z
            [0, 1, 5, 4], // -y
            [2, 6, 7, 3], // +y
            [0, 4, 6, 2], // -x
            [1, 3, 7, 5], // +x
        ];
        for quad in &quads {
            geometry.faces.push([quad[0], quad[1], quad[2]]);
            geometry.faces.push([quad[0], quad[2], quad[3]]);
        }
        geometry
    }

    #[test]
    fn from_geometry_requires_weights() {
        let mut geometry = cuboid([0.0; 3], 1.0, 0);
        geometry.weights.clear();
        assert!(matches!(
            Solid::from_geometry(&geometry),
            Err(Error::MissingWeights)
        ));
    }

    #[test]
    fn geometry_round_trips_through_a_solid() {
        let geometry = cuboid([0.0; 3], 1.0, 2);
        let solid = Solid::from_geometry(&geometry).unwrap();
        let back = solid.to_geometry().unwrap();
        assert_eq!(back.vertex_count(), 8);
        assert_eq!(back.triangle_count(), 12);
        // tunneled uv carries the bone index
        for uv in &back.tex_coords {
            assert_eq!(uv.x as usize, 2);
        }
    }

    #[test]
    fn union_of_disjoint_solids_keeps_both() {
        let a = Solid::from_geometry(&cuboid([0.0; 3], 1.0, 0)).unwrap();
        let b = Solid::from_geometry(&cuboid([5.0, 0.0, 0.0], 1.0, 1)).unwrap();
        let merged = a.union(b).to_geometry().unwrap();
        assert_eq!(merged.vertex_count(), 16);
    }

    #[test]
    fn union_merges_overlapping_volume() {
        let a = cuboid([0.0; 3], 1.0, 0);
        let b = cuboid([0.4, 0.3, 0.2], 1.0, 1);
        let merged = Solid::from_geometry(&a)
            .unwrap()
            .union(Solid::from_geometry(&b).unwrap())
            .to_geometry()
            .unwrap();
        // the merged box spans both operands and the buried corners are gone
        let min_x = merged.vertices.iter().map(|v| v.x).fold(f32::MAX, f32::min);
        let max_x = merged.vertices.iter().map(|v| v.x).fold(f32::MIN, f32::max);
        assert!((min_x + 0.5).abs() < 1e-4);
        assert!((max_x - 0.9).abs() < 1e-4);
        let interior = merged
            .vertices
            .iter()
            .filter(|v| {
                v.x.abs() < 0.5 - 1e-4
                    && v.y.abs() < 0.5 - 1e-4
                    && v.z.abs() < 0.5 - 1e-4
            })
            .count();
        assert_eq!(interior, 0);
    }

    #[test]
    fn subtract_carves_the_overlap_away() {
        let a = Solid::from_geometry(&cuboid([0.0; 3], 2.0, 0)).unwrap();
        let b = Solid::from_geometry(&cuboid([1.0, 0.0, 0.0], 2.0, 0)).unwrap();
        let carved = a.subtract(b).to_geometry().unwrap();
        let max_x = carved.vertices.iter().map(|v| v.x).fold(f32::MIN, f32::max);
        // everything past the cut plane at x = 0 is gone
        assert!(max_x <= 0.0 + 1e-4);
    }

    #[test]
    fn blended_uvs_survive_clipping() {
        // two boxes with different blends; the union must only ever
        // interpolate, never invent indices
        let mut a = cuboid([0.0; 3], 1.0, 0);
        for weight in &mut a.weights {
            *weight = BlendedWeight {
                bone_a: 0,
                weight_a: 0.75,
                bone_b: 1,
                weight_b: 0.25,
            };
        }
        let b = cuboid([0.5, 0.0, 0.0], 1.0, 1);
        let merged = Solid::from_geometry(&a)
            .unwrap()
            .union(Solid::from_geometry(&b).unwrap())
            .to_geometry()
            .unwrap();
        for uv in &merged.tex_coords {
            let blended = BlendedWeight::unpack(*uv);
            assert!(blended.bone_a <= 1 && blended.bone_b <= 1);
        }
    }
}
