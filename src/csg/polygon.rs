//! Solid polygons.

use super::plane::Plane;
use super::vertex::Vertex;

/// A convex planar polygon of a solid's boundary.
#[derive(Clone, Debug)]
pub struct Polygon {
    /// Vertices in winding order.
    pub vertices: Vec<Vertex>,
    /// The plane the polygon lies on, used for splitting.
    pub plane: Plane,
}

impl Polygon {
    /// Build a polygon from at least three vertices; the plane derives from
    /// the first three.
    pub fn new(vertices: Vec<Vertex>) -> Polygon {
        let plane = Plane::from_points(
            vertices[0].position,
            vertices[1].position,
            vertices[2].position,
        );
        Polygon { vertices, plane }
    }

    /// Reverse winding and plane orientation.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane.flip();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::{Point3, Vector2};

    #[test]
    fn flip_reverses_the_normal() {
        let mut polygon = Polygon::new(
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]
                .iter()
                .map(|p| Vertex {
                    position: Point3::new(p[0], p[1], p[2]),
                    uv: Vector2::new(0.0, 0.0),
                })
                .collect(),
        );
        assert_relative_eq!(polygon.plane.normal.z, 1.0);
        polygon.flip();
        assert_relative_eq!(polygon.plane.normal.z, -1.0);
    }
}
