//! Builds the stock horse and prints what a renderer would receive.
//!
//! Run with `RUST_LOG=debug cargo run --release --example horse` to watch
//! the build stages.

use mammalator::{color, factory, material};

fn main() {
    env_logger::init();

    let material = material::Lambert {
        color: color::CHESTNUT,
        flat: false,
    }
    .into();

    let mesh = match factory::horse(material, 1.0) {
        Ok(mesh) => mesh,
        Err(err) => {
            eprintln!("horse build failed: {}", err);
            std::process::exit(1);
        }
    };

    println!(
        "horse: {} vertices, {} triangles, {} bones",
        mesh.vertex_count(),
        mesh.triangle_count(),
        mesh.bone_count(),
    );
    for (index, bone) in mesh.bones.iter().enumerate() {
        println!(
            "  bone {:2} {:24} parent {:2} at ({:+.3}, {:+.3}, {:+.3})",
            index,
            bone.name,
            bone.parent,
            bone.position.x,
            bone.position.y,
            bone.position.z,
        );
    }
}
