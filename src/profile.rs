//! Closed 2D cross-sections for extrusion.

use crate::error::Error;

/// One quadratic Bezier arc of a closed contour.
#[derive(Clone, Copy, Debug)]
struct Arc {
    start: [f32; 2],
    control: [f32; 2],
    end: [f32; 2],
}

impl Arc {
    fn at(&self, t: f32) -> mint::Point2<f32> {
        let u = 1.0 - t;
        let weight = |a: f32, c: f32, b: f32| u * u * a + 2.0 * u * t * c + t * t * b;
        mint::Point2 {
            x: weight(self.start[0], self.control[0], self.end[0]),
            y: weight(self.start[1], self.control[1], self.end[1]),
        }
    }
}

/// A closed, convex 2D profile swept by the extruder.
///
/// Profiles are stitched from quadratic Bezier arcs; the only constructors
/// are ellipses (and their circular special case), which is all the body
/// parts cut. Convexity is what lets the end caps tessellate as fans.
#[derive(Clone, Debug)]
pub struct Profile {
    arcs: Vec<Arc>,
}

impl Profile {
    /// An ellipse around the origin with the given horizontal and vertical
    /// radii, drawn as four quadratic arcs.
    pub fn ellipse(h_rad: f32, v_rad: f32) -> Self {
        let corner = |x: f32, y: f32| [x, y];
        let arcs = vec![
            Arc { start: corner(0.0, v_rad), control: corner(h_rad, v_rad), end: corner(h_rad, 0.0) },
            Arc { start: corner(h_rad, 0.0), control: corner(h_rad, -v_rad), end: corner(0.0, -v_rad) },
            Arc { start: corner(0.0, -v_rad), control: corner(-h_rad, -v_rad), end: corner(-h_rad, 0.0) },
            Arc { start: corner(-h_rad, 0.0), control: corner(-h_rad, v_rad), end: corner(0.0, v_rad) },
        ];
        Profile { arcs }
    }

    /// A circle around the origin.
    pub fn circle(radius: f32) -> Self {
        Profile::ellipse(radius, radius)
    }

    /// Shift the whole profile within its plane.
    pub fn translate(mut self, dx: f32, dy: f32) -> Self {
        for arc in &mut self.arcs {
            for point in [&mut arc.start, &mut arc.control, &mut arc.end] {
                point[0] += dx;
                point[1] += dy;
            }
        }
        self
    }

    /// Sample the contour into a closed point loop, `curve_segments` points
    /// per arc. The loop is implicitly closed: the last point is not
    /// repeated.
    pub fn sample(&self, curve_segments: usize) -> Result<Vec<mint::Point2<f32>>, Error> {
        if curve_segments == 0 || self.arcs.is_empty() {
            return Err(Error::DegenerateExtrusion("profile has no contour points"));
        }
        let mut points = Vec::with_capacity(self.arcs.len() * curve_segments);
        for arc in &self.arcs {
            // each arc contributes its start; the next arc supplies its end
            for step in 0..curve_segments {
                points.push(arc.at(step as f32 / curve_segments as f32));
            }
        }
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ellipse_passes_through_its_extremes() {
        let contour = Profile::ellipse(2.0, 1.0).sample(4).unwrap();
        assert_eq!(contour.len(), 16);
        assert_relative_eq!(contour[0].x, 0.0);
        assert_relative_eq!(contour[0].y, 1.0);
        assert_relative_eq!(contour[4].x, 2.0);
        assert_relative_eq!(contour[4].y, 0.0);
        assert_relative_eq!(contour[8].y, -1.0);
        assert_relative_eq!(contour[12].x, -2.0);
    }

    #[test]
    fn circle_contour_hugs_its_radius() {
        let radius = 0.5;
        let contour = Profile::circle(radius).sample(8).unwrap();
        for point in contour {
            let distance = (point.x * point.x + point.y * point.y).sqrt();
            // quadratic arcs touch the circle at the axes and bulge up to
            // ~6% proud of it mid-arc
            assert!(distance >= radius - 1e-6);
            assert!(distance <= radius * 1.07);
        }
    }

    #[test]
    fn contour_winds_clockwise() {
        // shoelace sum is negative for clockwise loops, which the extruder
        // relies on for outward winding
        let contour = Profile::ellipse(1.0, 1.0).sample(8).unwrap();
        let mut doubled_area = 0.0;
        for (i, a) in contour.iter().enumerate() {
            let b = &contour[(i + 1) % contour.len()];
            doubled_area += a.x * b.y - b.x * a.y;
        }
        assert!(doubled_area < 0.0);
    }

    #[test]
    fn translate_offsets_every_point() {
        let contour = Profile::circle(1.0).translate(0.0, -3.0).sample(4).unwrap();
        for point in &contour {
            assert!(point.y <= -2.0 + 1e-6);
            assert!(point.y >= -4.0 - 1e-6);
        }
    }

    #[test]
    fn zero_segments_is_degenerate() {
        assert!(Profile::circle(1.0).sample(0).is_err());
    }
}
