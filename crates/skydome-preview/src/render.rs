//! CPU rendering of the sky through the reference vertex and fragment stages.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{Vec2, Vec3};
use skydome_config::{PreviewConfig, ProjectionMode};
use skydome_model::{FragmentUniforms, VertexUniforms, fragment_stage, vertex_stage};
use skydome_render::SkyCamera;

use crate::error::PreviewError;

/// Linear HDR radiance, row-major from the top-left pixel.
#[derive(Debug, Clone)]
pub struct HdrImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Vec3>,
}

/// Direction for normalized image coordinates on an equirectangular map.
///
/// `u` spans longitude with the image center looking down -Z; `v` spans
/// latitude from the zenith (top row) to the nadir (bottom row).
pub fn equirectangular_direction(u: f32, v: f32) -> Vec3 {
    let longitude = u * TAU - PI;
    let latitude = FRAC_PI_2 - v * PI;
    Vec3::new(
        latitude.cos() * longitude.sin(),
        latitude.sin(),
        -latitude.cos() * longitude.cos(),
    )
}

/// Render the configured view of the sky.
pub fn render_hdr(
    preview: &PreviewConfig,
    uniforms: &FragmentUniforms,
) -> Result<HdrImage, PreviewError> {
    let (width, height) = (preview.width, preview.height);
    if width == 0 || height == 0 {
        return Err(PreviewError::InvalidSize { width, height });
    }

    let camera = SkyCamera::new(
        preview.yaw,
        preview.pitch,
        preview.fov_y_degrees.to_radians(),
        width as f32 / height as f32,
    );
    let vertex_uniforms = match preview.projection {
        ProjectionMode::Equirectangular => VertexUniforms::default(),
        ProjectionMode::Perspective => camera.vertex_uniforms(),
    };

    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            let uv = Vec2::new(
                (x as f32 + 0.5) / width as f32,
                (y as f32 + 0.5) / height as f32,
            );
            let direction = match preview.projection {
                ProjectionMode::Equirectangular => equirectangular_direction(uv.x, uv.y),
                ProjectionMode::Perspective => {
                    camera.ray_direction(Vec2::new(uv.x * 2.0 - 1.0, 1.0 - uv.y * 2.0))
                }
            };
            let vertex = vertex_stage(direction, &vertex_uniforms);
            pixels.push(fragment_stage(vertex.frag_pos, uniforms).truncate());
        }
    }

    tracing::debug!(width, height, ?preview.projection, "Rendered HDR sky");
    Ok(HdrImage {
        width,
        height,
        pixels,
    })
}
