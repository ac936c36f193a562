//! Bone hierarchy used both for skinning and for placing extruded geometry.
//!
//! Bones here are really joints: a bone's position is the location of the
//! joint that drives it, relative to its parent joint. Un-transformed bones
//! point along +Y, so an upper leg in its own space runs from the origin to
//! `(0, length, 0)`.

use cgmath::Transform as Transform_;
use cgmath::Decomposed;
use log::trace;

use crate::error::Error;
use crate::{Orientation, Transform, Vector};

/// Stable handle for a bone within one [`Skeleton`](struct.Skeleton.html).
///
/// Handles are plain indices, assigned sequentially on insertion. They stay
/// valid for the lifetime of the build and double as the bone indices baked
/// into skin buffers.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct BoneId(pub(crate) usize);

impl BoneId {
    /// The bone's index in insertion order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Specification for registering a bone.
#[derive(Clone, Debug)]
pub struct BoneTemplate {
    /// Bone name, unique within a build.
    pub name: String,
    /// Parent bone, already registered with the same skeleton. `None` for
    /// the root.
    pub parent: Option<BoneId>,
    /// Joint position relative to the parent joint.
    pub position: mint::Vector3<f32>,
    /// Rotation mapping the local-space segment `(0,0,0)..(0,length,0)` to
    /// where the bone should lie relative to its parent.
    pub orientation: mint::Quaternion<f32>,
    /// Extent of pure, unblended weighting for this bone in extrusion terms.
    pub length: f32,
    /// Extent over which weighting blends into the next bone in sequence.
    pub transition: f32,
}

/// A registered bone.
#[derive(Clone, Debug)]
pub struct Bone {
    /// Bone name.
    pub name: String,
    /// Sequential insertion index.
    pub index: usize,
    /// Parent handle, `None` for the root.
    pub parent: Option<BoneId>,
    /// Extent of pure weighting along an extrusion.
    pub length: f32,
    /// Extent of blending toward the next bone along an extrusion.
    pub transition: f32,
    transform: Transform,
}

impl Bone {
    /// Transform relative to the parent bone (scale fixed at 1).
    pub fn local_transform(&self) -> Transform {
        self.transform
    }
}

/// Bone record in the flat, reference-free form a skinned-mesh renderer
/// consumes: parent by index with `-1` for the root.
#[derive(Clone, Debug)]
pub struct InertBone {
    /// Parent index, or `-1` for the root.
    pub parent: i32,
    /// Bone name.
    pub name: String,
    /// Joint position relative to the parent joint.
    pub position: mint::Vector3<f32>,
    /// Local orientation.
    pub orientation: mint::Quaternion<f32>,
}

/// Append-only store of the bones of one build.
///
/// The skeleton owns its bones exclusively; body-part builders share it by
/// mutable reference and hold onto [`BoneId`](struct.BoneId.html) handles
/// only.
#[derive(Debug, Default)]
pub struct Skeleton {
    bones: Vec<Bone>,
}

impl Skeleton {
    /// Create an empty skeleton.
    pub fn new() -> Self {
        Skeleton { bones: Vec::new() }
    }

    /// Register a bone, assigning it the next sequential index.
    ///
    /// Fails if the template names a parent that is not already in this
    /// skeleton or reuses a registered name.
    pub fn add_bone(&mut self, template: BoneTemplate) -> Result<BoneId, Error> {
        if let Some(parent) = template.parent {
            if parent.0 >= self.bones.len() {
                return Err(Error::UnknownParent(template.name));
            }
        }
        if self.bones.iter().any(|bone| bone.name == template.name) {
            return Err(Error::DuplicateBone(template.name));
        }
        let index = self.bones.len();
        trace!(
            "bone {} {:?} parent {:?} length {} transition {}",
            index, template.name, template.parent, template.length, template.transition,
        );
        self.bones.push(Bone {
            name: template.name,
            index,
            parent: template.parent,
            length: template.length,
            transition: template.transition,
            transform: Decomposed {
                scale: 1.0,
                rot: Orientation::from(template.orientation),
                disp: Vector::from(template.position),
            },
        });
        Ok(BoneId(index))
    }

    /// Look up a bone by handle.
    pub fn bone(&self, id: BoneId) -> &Bone {
        &self.bones[id.0]
    }

    /// All bones in insertion order.
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    /// Number of registered bones.
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    /// Whether no bones have been registered yet.
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// World transform of a bone: the parent chain's transforms composed
    /// parent-first with the bone's own local transform.
    ///
    /// Recomputed on every call, O(depth). Skeletons hold tens of bones and
    /// each body part queries its anchor once, so no caching is kept.
    pub fn world_transform(&self, id: BoneId) -> Transform {
        let bone = &self.bones[id.0];
        match bone.parent {
            Some(parent) => self.world_transform(parent).concat(&bone.transform),
            None => bone.transform,
        }
    }

    /// Flatten the hierarchy into renderer-ready bone records.
    pub fn inert_bones(&self) -> Vec<InertBone> {
        self.bones
            .iter()
            .map(|bone| InertBone {
                parent: bone.parent.map_or(-1, |id| id.0 as i32),
                name: bone.name.clone(),
                position: bone.transform.disp.into(),
                orientation: bone.transform.rot.into(),
            })
            .collect()
    }
}

/// Identity orientation.
pub(crate) fn no_rotation() -> mint::Quaternion<f32> {
    Orientation::new(1.0, 0.0, 0.0, 0.0).into()
}
