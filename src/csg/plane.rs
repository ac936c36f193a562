//! Splitting planes.

use cgmath::{EuclideanSpace, InnerSpace, Point3, Vector3};

use super::polygon::Polygon;

/// Tolerance below which a point counts as lying on a plane.
pub const EPSILON: f32 = 1e-5;

const COPLANAR: u8 = 0;
const FRONT: u8 = 1;
const BACK: u8 = 2;
const SPANNING: u8 = FRONT | BACK;

/// An oriented plane in normal/offset form.
#[derive(Clone, Copy, Debug)]
pub struct Plane {
    /// Unit normal.
    pub normal: Vector3<f32>,
    /// Signed distance of the plane from the origin along `normal`.
    pub w: f32,
}

impl Plane {
    /// Plane through three points, normal by right-hand winding.
    pub fn from_points(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Plane {
        let normal = (b - a).cross(c - a).normalize();
        Plane {
            normal,
            w: normal.dot(a.to_vec()),
        }
    }

    /// Reverse orientation.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Classify `polygon` against this plane and route it, or its split
    /// halves, into the four output lists.
    pub fn split_polygon(
        &self,
        polygon: &Polygon,
        coplanar_front: &mut Vec<Polygon>,
        coplanar_back: &mut Vec<Polygon>,
        front: &mut Vec<Polygon>,
        back: &mut Vec<Polygon>,
    ) {
        let mut polygon_type = COPLANAR;
        let mut types = Vec::with_capacity(polygon.vertices.len());
        for vertex in &polygon.vertices {
            let distance = self.normal.dot(vertex.position.to_vec()) - self.w;
            let vertex_type = if distance < -EPSILON {
                BACK
            } else if distance > EPSILON {
                FRONT
            } else {
                COPLANAR
            };
            polygon_type |= vertex_type;
            types.push(vertex_type);
        }

        match polygon_type {
            COPLANAR => {
                if self.normal.dot(polygon.plane.normal) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            }
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                let count = polygon.vertices.len();
                let mut front_vertices = Vec::with_capacity(count + 1);
                let mut back_vertices = Vec::with_capacity(count + 1);
                for i in 0..count {
                    let j = (i + 1) % count;
                    let ti = types[i];
                    let tj = types[j];
                    let vi = polygon.vertices[i];
                    let vj = polygon.vertices[j];
                    if ti != BACK {
                        front_vertices.push(vi);
                    }
                    if ti != FRONT {
                        back_vertices.push(vi);
                    }
                    if (ti | tj) == SPANNING {
                        let t = (self.w - self.normal.dot(vi.position.to_vec()))
                            / self.normal.dot(vj.position - vi.position);
                        let split = vi.interpolate(&vj, t);
                        front_vertices.push(split);
                        back_vertices.push(split);
                    }
                }
                if front_vertices.len() >= 3 {
                    front.push(Polygon::new(front_vertices));
                }
                if back_vertices.len() >= 3 {
                    back.push(Polygon::new(back_vertices));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::vertex::Vertex;
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::Vector2;

    fn triangle(points: [[f32; 3]; 3]) -> Polygon {
        Polygon::new(
            points
                .iter()
                .map(|p| Vertex {
                    position: Point3::new(p[0], p[1], p[2]),
                    uv: Vector2::new(0.0, 0.0),
                })
                .collect(),
        )
    }

    #[test]
    fn plane_from_points_is_right_handed() {
        let plane = Plane::from_points(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        assert_relative_eq!(plane.normal.z, 1.0);
        assert_relative_eq!(plane.w, 0.0);
    }

    #[test]
    fn spanning_polygon_splits_on_the_plane() {
        let plane = Plane {
            normal: Vector3::unit_x(),
            w: 0.0,
        };
        let polygon = triangle([[-1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]]);
        let (mut cf, mut cb, mut front, mut back) =
            (Vec::new(), Vec::new(), Vec::new(), Vec::new());
        plane.split_polygon(&polygon, &mut cf, &mut cb, &mut front, &mut back);
        assert_eq!(front.len(), 1);
        assert_eq!(back.len(), 1);
        // split vertices land exactly on the plane
        for half in front.iter().chain(&back) {
            assert!(half
                .vertices
                .iter()
                .any(|v| v.position.x.abs() < EPSILON));
        }
    }

    #[test]
    fn fully_front_polygon_routes_to_front() {
        let plane = Plane {
            normal: Vector3::unit_x(),
            w: 0.0,
        };
        let polygon = triangle([[1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [1.0, 1.0, 0.0]]);
        let (mut cf, mut cb, mut front, mut back) =
            (Vec::new(), Vec::new(), Vec::new(), Vec::new());
        plane.split_polygon(&polygon, &mut cf, &mut cb, &mut front, &mut back);
        assert_eq!(front.len(), 1);
        assert!(back.is_empty() && cf.is_empty() && cb.is_empty());
    }
}
