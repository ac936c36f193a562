//! Material parameters for mesh rendering.
//!
//! Generated meshes carry their material through to the consuming renderer
//! untouched; only color-driven parameters make sense for procedural
//! geometry, since there is no authored UV layout to map textures onto
//! (the UV channel is spoken for anyway).

use crate::color::Color;

/// Parameters for a basic, unlit mesh material.
#[derive(Clone, Copy, Debug, Default)]
pub struct Basic {
    /// Solid color.
    ///
    /// Default: `0x000000` (black).
    pub color: Color,
}

/// Parameters for a Lambertian diffusion reflection model.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lambert {
    /// Solid color.
    ///
    /// Default: `0x000000` (black).
    pub color: Color,

    /// Specifies whether lighting should be constant over faces.
    ///
    /// Default: `false` (lighting is interpolated across faces).
    pub flat: bool,
}

/// Parameters for a Phong reflection model.
#[derive(Clone, Copy, Debug)]
pub struct Phong {
    /// Solid color.
    ///
    /// Default: `0x000000` (black).
    pub color: Color,

    /// Determines the sharpness of specular highlights.
    ///
    /// Higher values result in sharper highlights to produce a glossy
    /// effect.
    ///
    /// Default: `30.0`.
    pub glossiness: f32,
}

impl Default for Phong {
    fn default() -> Self {
        Phong {
            color: 0x000000,
            glossiness: 30.0,
        }
    }
}

/// Parameters for a wireframe rendition.
#[derive(Clone, Copy, Debug, Default)]
pub struct Wireframe {
    /// Line color.
    ///
    /// Default: `0x000000` (black).
    pub color: Color,
}

/// Specifies the appearance of a generated mesh.
#[derive(Clone, Copy, Debug)]
pub enum Material {
    /// Renders unlit with a solid color.
    Basic(Basic),
    /// Lambertian diffuse shading.
    Lambert(Lambert),
    /// Phong specular shading.
    Phong(Phong),
    /// Renders the mesh edges only.
    Wireframe(Wireframe),
}

impl From<Basic> for Material {
    fn from(params: Basic) -> Material {
        Material::Basic(params)
    }
}

impl From<Lambert> for Material {
    fn from(params: Lambert) -> Material {
        Material::Lambert(params)
    }
}

impl From<Phong> for Material {
    fn from(params: Phong) -> Material {
        Material::Phong(params)
    }
}

impl From<Wireframe> for Material {
    fn from(params: Wireframe) -> Material {
        Material::Wireframe(params)
    }
}
