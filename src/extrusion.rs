//! Boned extrusion of 2D profiles.
//!
//! Extrusion happens along +Z in its own local space. Bone-local space
//! points along +Y, so placement first rotates the raw mesh -90 degrees
//! about X and then applies the anchor bone's world transform.

use cgmath::Transform as Transform_;
use cgmath::{Decomposed, Quaternion, Rad, Rotation3, Vector3, Zero};
use itertools::Itertools;
use log::debug;
use std::f32::consts::FRAC_PI_2;

use crate::error::Error;
use crate::geometry::Geometry;
use crate::profile::Profile;
use crate::skeleton::{BoneId, Skeleton};
use crate::skinning::{Feather, StopSequence};
use crate::Transform;

/// Longitudinal spacing of extrusion sample rings.
///
/// Bones operate per vertex and weighting is interpolated linearly, so the
/// walls must carry enough rings for blends to read as smooth rather than
/// faceted. Denser is smoother but the BSP boolean stage multiplies
/// polygons alarmingly, so this is a quality/cost dial, not a correctness
/// requirement.
pub const SAMPLE_DENSITY: f32 = 0.1;

/// Tessellation parameters for one extrusion.
#[derive(Clone, Copy, Debug)]
pub struct ExtrudeOptions {
    /// Contour points generated per quarter arc of the profile.
    pub curve_segments: usize,
    /// Longitudinal distance between sample rings.
    pub sample_density: f32,
}

impl Default for ExtrudeOptions {
    fn default() -> Self {
        ExtrudeOptions {
            curve_segments: 16,
            sample_density: SAMPLE_DENSITY,
        }
    }
}

/// Extrude `profile` along +Z for `length`, weighting every vertex from
/// `stops`.
///
/// Wall rings are spaced by `options.sample_density`; each ring's vertices
/// share the blended weight at the ring's distance. Both end caps take the
/// weight at distance 0 and `length` respectively, computed once since it
/// is constant across the cap.
pub fn extrude(
    profile: &Profile,
    stops: &StopSequence,
    length: f32,
    options: &ExtrudeOptions,
) -> Result<Geometry, Error> {
    if length <= 0.0 {
        return Err(Error::DegenerateExtrusion("length must be positive"));
    }
    if options.sample_density <= 0.0 {
        return Err(Error::DegenerateExtrusion("sample density must be positive"));
    }
    let contour = profile.sample(options.curve_segments)?;
    let points = contour.len();
    if points < 3 {
        return Err(Error::DegenerateExtrusion("profile needs at least 3 contour points"));
    }
    let steps = ((length / options.sample_density).ceil() as usize).max(1);

    let mut geometry = Geometry::empty();
    geometry.vertices.reserve((steps + 1) * points);
    geometry.weights.reserve((steps + 1) * points);
    for step in 0..=steps {
        let distance = length * step as f32 / steps as f32;
        let weight = stops.weight_at(distance);
        for point in &contour {
            geometry.vertices.push(mint::Point3 {
                x: point.x,
                y: point.y,
                z: distance,
            });
            geometry.weights.push(weight);
        }
    }

    // side walls; the contour runs clockwise viewed from +Z, which makes
    // these windings face outward
    for step in 0..steps {
        let near = step * points;
        let far = (step + 1) * points;
        for (i, j) in (0..points).circular_tuple_windows() {
            let a = (near + i) as u32;
            let b = (near + j) as u32;
            let c = (far + j) as u32;
            let d = (far + i) as u32;
            geometry.faces.push([a, c, b]);
            geometry.faces.push([a, d, c]);
        }
    }

    // fan caps over the convex contour: bottom facing -Z, top facing +Z
    let top = (steps * points) as u32;
    for i in 1..points as u32 - 1 {
        geometry.faces.push([0, i, i + 1]);
        geometry.faces.push([top, top + i + 1, top + i]);
    }

    debug!(
        "extruded {} rings x {} points over length {}",
        steps + 1,
        points,
        length,
    );
    Ok(geometry)
}

/// Re-orient a raw extrusion from its +Z convention onto the +Y bone
/// convention, then move it into body space with the anchor bone's world
/// transform.
pub fn place_into_bone_space(geometry: &mut Geometry, skeleton: &Skeleton, anchor: BoneId) {
    let upright = Decomposed {
        scale: 1.0,
        rot: Quaternion::from_axis_angle(Vector3::unit_x(), Rad(-FRAC_PI_2)),
        disp: Vector3::zero(),
    };
    let transform: Transform = skeleton.world_transform(anchor).concat(&upright);
    geometry.apply_transform(&transform);
}

/// Extrude a skin over a chain of bones and place it in body space.
///
/// The chain's first bone anchors the placement. Stop layout comes from
/// the bones' `length`/`transition` spans, optionally feathered into an
/// outside bone at the start.
pub fn boned_extrusion(
    skeleton: &Skeleton,
    profile: &Profile,
    chain: &[BoneId],
    feather: Option<Feather>,
    length: f32,
    options: &ExtrudeOptions,
) -> Result<Geometry, Error> {
    let anchor = *chain.first().ok_or(Error::NoStops)?;
    let stops = StopSequence::from_bones(skeleton, chain, feather)?;
    let mut geometry = extrude(profile, &stops, length, options)?;
    place_into_bone_space(&mut geometry, skeleton, anchor);
    Ok(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::{no_rotation, BoneTemplate};
    use crate::skinning::Stop;
    use approx::assert_relative_eq;

    fn uniform_stops() -> StopSequence {
        StopSequence::new(vec![Stop { bone: 0, offset: 0.0 }]).unwrap()
    }

    fn two_bone_stops() -> StopSequence {
        StopSequence::new(vec![
            Stop { bone: 0, offset: 0.0 },
            Stop { bone: 0, offset: 0.4 },
            Stop { bone: 1, offset: 0.6 },
            Stop { bone: 1, offset: 1.0 },
        ])
        .unwrap()
    }

    #[test]
    fn ring_layout_matches_step_count() {
        let options = ExtrudeOptions { curve_segments: 4, sample_density: 0.25 };
        let geometry =
            extrude(&Profile::circle(0.5), &uniform_stops(), 1.0, &options).unwrap();
        // 4 steps -> 5 rings of 16 contour points
        assert_eq!(geometry.vertex_count(), 5 * 16);
        assert_eq!(geometry.weights.len(), geometry.vertex_count());
        // walls: 4 steps * 16 quads * 2 triangles; caps: 2 * 14 triangles
        assert_eq!(geometry.triangle_count(), 4 * 16 * 2 + 2 * 14);
    }

    #[test]
    fn wall_rings_take_the_weight_at_their_distance() {
        let options = ExtrudeOptions { curve_segments: 4, sample_density: 0.1 };
        let stops = two_bone_stops();
        let geometry = extrude(&Profile::circle(0.5), &stops, 1.0, &options).unwrap();
        let points = 16;
        for (index, vertex) in geometry.vertices.iter().enumerate() {
            let expected = stops.weight_at(vertex.z);
            let got = geometry.weights[index];
            assert_eq!(got.bone_a, expected.bone_a);
            assert_relative_eq!(got.weight_a, expected.weight_a, epsilon = 1e-6);
        }
        // halfway ring actually blends
        let mid = geometry.weights[5 * points];
        assert!(mid.weight_a < 1.0 && mid.weight_a > 0.0);
    }

    #[test]
    fn caps_are_pinned_to_the_boundary_weights() {
        let options = ExtrudeOptions { curve_segments: 4, sample_density: 0.5 };
        let stops = two_bone_stops();
        let geometry = extrude(&Profile::circle(0.5), &stops, 1.0, &options).unwrap();
        let first_ring = &geometry.weights[..16];
        for weight in first_ring {
            assert_eq!(weight.bone_a, 0);
            assert_relative_eq!(weight.weight_a, 1.0);
        }
        let last_ring = &geometry.weights[geometry.weights.len() - 16..];
        for weight in last_ring {
            assert_eq!(weight.bone_a, 1);
            assert_relative_eq!(weight.weight_a, 1.0);
        }
    }

    #[test]
    fn walls_face_away_from_the_axis() {
        let options = ExtrudeOptions { curve_segments: 8, sample_density: 0.5 };
        let mut geometry =
            extrude(&Profile::circle(1.0), &uniform_stops(), 1.0, &options).unwrap();
        geometry.compute_vertex_normals();
        // interior ring vertices carry pure wall normals; check they point
        // radially outward
        let points = 32;
        for (index, vertex) in geometry.vertices.iter().enumerate().skip(points).take(points) {
            let normal = geometry.normals[index];
            let outward = normal.x * vertex.x + normal.y * vertex.y;
            assert!(outward > 0.0, "inward normal at vertex {}", index);
        }
    }

    #[test]
    fn zero_length_is_degenerate() {
        let result = extrude(
            &Profile::circle(1.0),
            &uniform_stops(),
            0.0,
            &ExtrudeOptions::default(),
        );
        assert!(matches!(result, Err(Error::DegenerateExtrusion(_))));
    }

    #[test]
    fn placement_runs_the_mesh_along_the_bone_axis() {
        let mut skeleton = Skeleton::new();
        let root = skeleton
            .add_bone(BoneTemplate {
                name: "root".to_owned(),
                parent: None,
                position: [0.0, 1.0, 0.0].into(),
                orientation: no_rotation(),
                length: 1.0,
                transition: 0.0,
            })
            .unwrap();
        let options = ExtrudeOptions { curve_segments: 4, sample_density: 0.5 };
        let geometry = boned_extrusion(
            &skeleton,
            &Profile::circle(0.1),
            &[root],
            None,
            1.0,
            &options,
        )
        .unwrap();
        // extrusion-local z becomes +Y above the bone origin
        let max_y = geometry.vertices.iter().map(|v| v.y).fold(f32::MIN, f32::max);
        let min_y = geometry.vertices.iter().map(|v| v.y).fold(f32::MAX, f32::min);
        assert_relative_eq!(max_y, 2.0, epsilon = 1e-5);
        assert_relative_eq!(min_y, 1.0, epsilon = 1e-5);
    }
}
