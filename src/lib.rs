//! Procedural generation of skinned quadruped meshes.
//!
//! A body is assembled from anatomically placed bones and boolean-combined
//! extruded solids, then unpacked into the per-vertex two-bone index/weight
//! buffers a skeletal-animation renderer consumes.
//!
//! ## Overview
//!
//! The pipeline runs in four stages, all driven by a species factory such as
//! [`factory::horse`]:
//!
//! 1. Body-part builders ([`bodyparts::Torso`], [`bodyparts::Leg`]) register
//!    bones in a [`Skeleton`] and describe how skinning weight is distributed
//!    along each extrusion with a [`StopSequence`].
//! 2. The extrusion pipeline ([`extrusion`]) sweeps a 2D [`Profile`] along
//!    the bone axis, tagging every vertex with its blended bone weights, and
//!    places the result into body space via the anchor bone's world
//!    transform.
//! 3. Part solids are merged through boolean union ([`csg`]). The solid
//!    representation keeps only vertex positions and a single UV pair, so
//!    bone data crosses this stage packed into the UV channel.
//! 4. The final solid is converted back to a mesh; normals are regenerated
//!    and the tunneled UVs are decoded into skin attributes
//!    ([`skinning::unpack_skin`]), yielding a [`SkinnedMesh`].
//!
//! The whole build is synchronous and one-shot: a fresh [`Skeleton`] per
//! build, fail-fast error propagation, and an immutable mesh at the end.
//!
//! [`factory::horse`]: factory/fn.horse.html
//! [`bodyparts::Torso`]: bodyparts/struct.Torso.html
//! [`bodyparts::Leg`]: bodyparts/struct.Leg.html
//! [`Skeleton`]: struct.Skeleton.html
//! [`StopSequence`]: struct.StopSequence.html
//! [`extrusion`]: extrusion/index.html
//! [`Profile`]: struct.Profile.html
//! [`csg`]: csg/index.html
//! [`skinning::unpack_skin`]: skinning/fn.unpack_skin.html
//! [`SkinnedMesh`]: struct.SkinnedMesh.html

pub mod bodyparts;
pub mod color;
pub mod csg;
mod error;
pub mod extrusion;
pub mod factory;
mod geometry;
pub mod material;
mod mesh;
mod profile;
mod skeleton;
pub mod skinning;

pub use self::csg::Solid;
pub use self::error::Error;
pub use self::extrusion::ExtrudeOptions;
pub use self::geometry::Geometry;
pub use self::material::Material;
pub use self::mesh::SkinnedMesh;
pub use self::profile::Profile;
pub use self::skeleton::{Bone, BoneId, BoneTemplate, InertBone, Skeleton};
pub use self::skinning::{BlendedWeight, SkinAttributes, Stop, StopSequence};

/// Point in 3D space.
pub type Position = cgmath::Point3<f32>;
/// Vector in 3D space.
pub type Vector = cgmath::Vector3<f32>;
/// Unit quaternion describing an orientation.
pub type Orientation = cgmath::Quaternion<f32>;
/// Rotation + translation, with scale fixed at 1.
pub type Transform = cgmath::Decomposed<Vector, Orientation>;
