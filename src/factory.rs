//! Species factories: one call from a spec to a renderer-ready mesh.

use log::{debug, info};

use crate::bodyparts::{LegPairSpec, Torso, TorsoSpec};
use crate::error::Error;
use crate::extrusion::ExtrudeOptions;
use crate::material::Material;
use crate::mesh::SkinnedMesh;
use crate::skeleton::Skeleton;
use crate::skinning::unpack_skin;

/// Build a complete quadruped from a torso spec.
///
/// Runs the whole pipeline: a fresh skeleton, bone placement and extrusion
/// per body part, the boolean fold of all part solids, then mesh
/// extraction with normal regeneration and skin decoding. Any failure
/// aborts the build; nothing partial escapes.
pub fn quadruped(
    spec: TorsoSpec,
    material: Material,
    options: &ExtrudeOptions,
) -> Result<SkinnedMesh, Error> {
    info!(
        "building quadruped: torso {} x {} x {}, {} leg pairs",
        spec.length,
        spec.height,
        spec.width,
        spec.leg_pairs.len(),
    );
    let mut skeleton = Skeleton::new();
    let torso = Torso::new(spec)?;
    let solid = torso.create_solid(&mut skeleton, options)?;
    debug!("composed solid has {} polygons", solid.polygon_count());

    let mut geometry = solid.to_geometry()?;
    // boolean clipping leaves normals stale, regenerate from scratch
    geometry.compute_vertex_normals();
    let skin = unpack_skin(&geometry, skeleton.len())?;
    info!(
        "quadruped done: {} vertices, {} triangles, {} bones",
        geometry.vertex_count(),
        geometry.triangle_count(),
        skeleton.len(),
    );
    Ok(SkinnedMesh {
        geometry,
        skin,
        bones: skeleton.inert_bones(),
        material,
    })
}

/// Build a horse.
///
/// Base proportions: torso 1.5 m long, 0.75 m high, 0.4 m wide; legs
/// 0.75 m from the bottom of the torso with 0.1 m feet; slimmer front
/// legs than hind legs. The horse stands on the y = 0 ground plane with
/// its withers near z = 0, looking along -Z, and extends along +Z with
/// bilateral symmetry about x = 0. `scale` multiplies every dimension.
pub fn horse(material: Material, scale: f32) -> Result<SkinnedMesh, Error> {
    if scale <= 0.0 {
        return Err(Error::InvalidSpec("scale must be positive"));
    }
    let spec = TorsoSpec {
        length: 1.5 * scale,
        height: 0.75 * scale,
        width: 0.4 * scale,
        skin_depth: 0.01 * scale,
        leg_length: 0.75 * scale,
        foot_length: 0.1 * scale,
        leg_pairs: vec![
            LegPairSpec { radius: 0.05 * scale },
            LegPairSpec { radius: 0.1 * scale },
        ],
    };
    // scale the ring spacing too, so tessellation is scale-invariant
    let options = ExtrudeOptions {
        sample_density: crate::extrusion::SAMPLE_DENSITY * scale,
        ..ExtrudeOptions::default()
    };
    quadruped(spec, material, &options)
}
