//! sRGB colors.

/// sRGB color represented by a 4-byte hexadecimal number.
///
/// ```rust
/// # #![allow(unused)]
/// let chestnut = 0x954535;
/// ```
pub type Color = u32;

/// Black.
pub const BLACK: Color = 0x000000;

/// White.
pub const WHITE: Color = 0xFFFFFF;

/// Chestnut, the classic horse coat.
pub const CHESTNUT: Color = 0x954535;

/// sRGB to linear conversion, for renderers that want linear vertex
/// colors.
///
/// Implementation taken from https://www.khronos.org/registry/OpenGL/extensions/EXT/EXT_texture_sRGB_decode.txt
pub fn to_linear_rgb(c: Color) -> [f32; 3] {
    let f = |xu: u32| {
        let x = (xu & 0xFF) as f32 / 255.0;
        if x > 0.04045 {
            ((x + 0.055) / 1.055).powf(2.4)
        } else {
            x / 12.92
        }
    };
    [f(c >> 16), f(c >> 8), f(c)]
}
