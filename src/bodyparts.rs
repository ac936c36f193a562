//! Body-part builders: bone placement plus the solids skinned over them.
//!
//! The torso is the core of the hierarchy. Its bones mimic reality with a
//! spine just below the surface at the top of the torso: a root joint at
//! the withers, then one spine bone per leg pair chained down the length.
//! The torso computes where each pair's hip sockets sit but leaves creating
//! the leg bones to the legs themselves, handing over the spine bone as
//! parent so the leg can blend its top into the torso weighting.
//!
//! Bodies stand on the y = 0 ground plane and extend along +Z, bilaterally
//! symmetric about x = 0.

use cgmath::{Quaternion, Rad, Rotation3, Vector3};
use log::debug;
use std::f32::consts::FRAC_PI_2;

use crate::csg::Solid;
use crate::error::Error;
use crate::extrusion::{boned_extrusion, ExtrudeOptions};
use crate::profile::Profile;
use crate::skeleton::{no_rotation, BoneId, BoneTemplate, Skeleton};
use crate::skinning::Feather;

/// Per-pair leg parameters within a torso spec.
#[derive(Clone, Copy, Debug)]
pub struct LegPairSpec {
    /// Leg cross-section radius.
    pub radius: f32,
}

/// Dimensions of a quadruped torso and its legs.
#[derive(Clone, Debug)]
pub struct TorsoSpec {
    /// Torso length, nose-to-tail direction.
    pub length: f32,
    /// Torso height.
    pub height: f32,
    /// Torso width.
    pub width: f32,
    /// How far inside the surface the spine bones run.
    pub skin_depth: f32,
    /// Length of the legs below the torso.
    pub leg_length: f32,
    /// Length of each foot, taken out of the overall leg.
    pub foot_length: f32,
    /// Leg pairs from front to back.
    pub leg_pairs: Vec<LegPairSpec>,
}

/// Dimensions of a single leg.
#[derive(Clone, Copy, Debug)]
pub struct LegSpec {
    /// Cross-section radius.
    pub radius: f32,
    /// Overall length including the foot.
    pub overall_length: f32,
    /// Foot length.
    pub foot_length: f32,
}

struct LegPair {
    spine_offset: mint::Vector3<f32>,
    left_offset: mint::Vector3<f32>,
    right_offset: mint::Vector3<f32>,
    left: Leg,
    right: Leg,
}

/// Builder for an extruded oval torso with legs unioned on.
pub struct Torso {
    length: f32,
    height: f32,
    width: f32,
    skin_depth: f32,
    spine_top: f32,
    pairs: Vec<LegPair>,
}

impl Torso {
    /// Validate a spec and precompute bone placement.
    pub fn new(spec: TorsoSpec) -> Result<Self, Error> {
        if spec.leg_pairs.is_empty() {
            return Err(Error::InvalidSpec("a torso needs at least one leg pair"));
        }
        if spec.length <= 0.0 || spec.height <= 0.0 || spec.width <= 0.0 {
            return Err(Error::InvalidSpec("torso dimensions must be positive"));
        }
        if spec.skin_depth < 0.0 || spec.skin_depth * 2.0 >= spec.length {
            return Err(Error::InvalidSpec("skin depth must fit inside the torso"));
        }
        if spec.foot_length < 0.0 || spec.foot_length >= spec.leg_length {
            return Err(Error::InvalidSpec("foot length must fit inside the leg"));
        }

        let half_height = spec.height / 2.0;
        let half_width = spec.width / 2.0;
        let torso_top = spec.leg_length + spec.height;
        let spine_top = torso_top - spec.skin_depth;
        let spine_length = spec.length - spec.skin_depth * 2.0;
        let pair_count = spec.leg_pairs.len();
        let spine_step = if pair_count > 1 {
            spine_length / (pair_count - 1) as f32
        } else {
            0.0
        };

        let pairs = spec
            .leg_pairs
            .iter()
            .enumerate()
            .map(|(index, pair)| {
                // separate geometry per leg: bones ride the uv channel, so
                // every distinctly-weighted limb is its own extrusion
                let leg_spec = LegSpec {
                    radius: pair.radius,
                    overall_length: spec.leg_length + half_height,
                    foot_length: spec.foot_length,
                };
                let socket_x = half_width - pair.radius;
                // vertical drop from the spine to the torso's vertical
                // center, where the hip sockets sit; the spine is rotated
                // from +Y onto +Z, so in spine-local space the drop lands
                // on the Z coordinate
                let socket_drop = spine_top - (spec.leg_length + half_height);
                LegPair {
                    spine_offset: mint::Vector3 {
                        x: 0.0,
                        y: if index == 0 { 0.0 } else { spine_step },
                        z: 0.0,
                    },
                    left_offset: mint::Vector3 { x: -socket_x, y: 0.0, z: socket_drop },
                    right_offset: mint::Vector3 { x: socket_x, y: 0.0, z: socket_drop },
                    left: Leg::new(format!("legs{}-left", index), leg_spec),
                    right: Leg::new(format!("legs{}-right", index), leg_spec),
                }
            })
            .collect();

        Ok(Torso {
            length: spec.length,
            height: spec.height,
            width: spec.width,
            skin_depth: spec.skin_depth,
            spine_top,
            pairs,
        })
    }

    /// Register the torso bone chain: the root at the withers, rotated so
    /// bone-local +Y runs along the torso's +Z length, then one spine bone
    /// per leg pair. Returns the spine chain, which also anchors the torso
    /// extrusion.
    fn build_spine(&self, skeleton: &mut Skeleton) -> Result<Vec<BoneId>, Error> {
        let spine_rotation =
            Quaternion::from_axis_angle(Vector3::unit_x(), Rad(FRAC_PI_2));
        let root = skeleton.add_bone(BoneTemplate {
            name: "root".to_owned(),
            parent: None,
            position: mint::Vector3 {
                x: 0.0,
                y: self.spine_top,
                z: self.skin_depth,
            },
            orientation: spine_rotation.into(),
            // the root anchors the hierarchy and owns no skin of its own
            length: 0.0,
            transition: 0.0,
        })?;

        // each spine bone owns an even share of the extruded length, with a
        // fifth of the share handing off to the next link
        let share = self.length / self.pairs.len() as f32;
        let mut chain = Vec::with_capacity(self.pairs.len());
        let mut parent = root;
        for (index, pair) in self.pairs.iter().enumerate() {
            let last = index + 1 == self.pairs.len();
            let bone = skeleton.add_bone(BoneTemplate {
                name: format!("spine{}", index),
                parent: Some(parent),
                position: pair.spine_offset,
                // already pointed down the torso by the root
                orientation: no_rotation(),
                length: if last { share } else { share * 0.8 },
                transition: if last { 0.0 } else { share * 0.2 },
            })?;
            chain.push(bone);
            parent = bone;
        }
        Ok(chain)
    }

    /// Build the full body solid: the extruded torso with every leg
    /// unioned on, left fold in pair order for determinism.
    pub fn create_solid(
        &self,
        skeleton: &mut Skeleton,
        options: &ExtrudeOptions,
    ) -> Result<Solid, Error> {
        let chain = self.build_spine(skeleton)?;
        debug!("torso: {} spine links over length {}", chain.len(), self.length);

        let half_height = self.height / 2.0;
        let half_width = self.width / 2.0;
        // drop the oval so the spine sits skin-deep under its top edge
        let profile = Profile::ellipse(half_width, half_height)
            .translate(0.0, self.skin_depth - half_height);
        let torso_geometry =
            boned_extrusion(skeleton, &profile, &chain, None, self.length, options)?;
        let mut solid = Solid::from_geometry(&torso_geometry)?;

        for (pair, &spine_bone) in self.pairs.iter().zip(&chain) {
            let left = pair.left.create_solid(skeleton, spine_bone, pair.left_offset, options)?;
            solid = solid.union(left);
            let right =
                pair.right.create_solid(skeleton, spine_bone, pair.right_offset, options)?;
            solid = solid.union(right);
        }
        Ok(solid)
    }
}

/// Builder for one leg: two leg segments joined by a knee, plus a foot.
///
/// Legs hang vertically in their initial pose, perpendicular to the
/// ground, with every joint rotating around X. The walking direction
/// is -Z.
pub struct Leg {
    name: String,
    spec: LegSpec,
}

impl Leg {
    /// A named leg with the given dimensions.
    pub fn new(name: String, spec: LegSpec) -> Self {
        Leg { name, spec }
    }

    /// Register the leg's bone chain under `spine` and extrude its skin.
    ///
    /// The chain is upper leg (half the leg), knee transition, lower leg,
    /// ankle transition, then the foot with a hard terminal weighting. The
    /// top of the extrusion feathers into the spine bone so the leg blends
    /// into the torso instead of showing a seam. The returned solid is not
    /// yet composed with the torso; that is the torso's call.
    pub fn create_solid(
        &self,
        skeleton: &mut Skeleton,
        spine: BoneId,
        socket_offset: mint::Vector3<f32>,
        options: &ExtrudeOptions,
    ) -> Result<Solid, Error> {
        let leg_length = self.spec.overall_length - self.spec.foot_length;
        // the spine points along +Z; another +90 degrees about X points the
        // leg groundward
        let leg_down = Quaternion::from_axis_angle(Vector3::unit_x(), Rad(FRAC_PI_2));
        let upper = skeleton.add_bone(BoneTemplate {
            name: format!("{}-upper-leg", self.name),
            parent: Some(spine),
            position: socket_offset,
            orientation: leg_down.into(),
            length: leg_length * 0.5,
            transition: leg_length * 0.1,
        })?;
        let lower = skeleton.add_bone(BoneTemplate {
            name: format!("{}-lower-leg", self.name),
            parent: Some(upper),
            // knee joint: the upper span plus half its transition
            position: mint::Vector3 { x: 0.0, y: leg_length * 0.55, z: 0.0 },
            orientation: no_rotation(),
            length: leg_length * 0.3,
            transition: leg_length * 0.1,
        })?;
        let foot = skeleton.add_bone(BoneTemplate {
            name: format!("{}-foot", self.name),
            parent: Some(lower),
            position: mint::Vector3 { x: 0.0, y: leg_length * 0.35, z: 0.0 },
            // feet want to end up tangent to the ground eventually; they
            // hang straight for now
            orientation: no_rotation(),
            length: self.spec.foot_length,
            transition: 0.0,
        })?;

        let profile = Profile::circle(self.spec.radius);
        let geometry = boned_extrusion(
            skeleton,
            &profile,
            &[upper, lower, foot],
            Some(Feather { bone: spine, length: leg_length * 0.1 }),
            self.spec.overall_length,
            options,
        )?;
        Solid::from_geometry(&geometry)
    }
}
