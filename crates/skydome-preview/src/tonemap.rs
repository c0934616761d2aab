//! HDR to 8-bit sRGB conversion for the preview image.

use glam::Vec3;

use crate::render::HdrImage;

/// ACES filmic curve (Narkowicz fit), clamped to `[0, 1]`.
pub fn aces_film(hdr: Vec3) -> Vec3 {
    let a = 2.51;
    let b = 0.03;
    let c = 2.43;
    let d = 0.59;
    let e = 0.14;
    ((hdr * (a * hdr + b)) / (hdr * (c * hdr + d) + e)).clamp(Vec3::ZERO, Vec3::ONE)
}

/// sRGB transfer function for a linear value in `[0, 1]`.
pub fn linear_to_srgb(linear: f32) -> f32 {
    if linear <= 0.003_130_8 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Expose, tone map and encode to RGBA8. Non-finite radiance renders black.
pub fn to_rgba8(image: &HdrImage, exposure: f32) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(image.pixels.len() * 4);
    for pixel in &image.pixels {
        let exposed = *pixel * exposure;
        let mapped = if exposed.is_finite() {
            aces_film(exposed.max(Vec3::ZERO))
        } else {
            Vec3::ZERO
        };
        for channel in mapped.to_array() {
            rgba.push((linear_to_srgb(channel) * 255.0).round() as u8);
        }
        rgba.push(255);
    }
    rgba
}
