//! Solid vertices.

use cgmath::{Point3, Vector2};

/// A vertex of a solid's polygon.
///
/// Deliberately minimal: a position and one UV pair are the only channels
/// that survive boolean operations, which is exactly why bone weights are
/// tunneled through the UV.
#[derive(Clone, Copy, Debug)]
pub struct Vertex {
    /// Position.
    pub position: Point3<f32>,
    /// Texture coordinate (carrying packed bone weights in this crate).
    pub uv: Vector2<f32>,
}

impl Vertex {
    /// Linear interpolation toward `other`, lerping both channels. Splitting
    /// a polygon along a plane goes through here, so whatever data the UV
    /// encodes keeps blending consistently.
    pub fn interpolate(&self, other: &Vertex, t: f32) -> Vertex {
        Vertex {
            position: self.position + (other.position - self.position) * t,
            uv: self.uv + (other.uv - self.uv) * t,
        }
    }
}
