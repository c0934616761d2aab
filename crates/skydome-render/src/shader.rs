//! The sky-dome WGSL shader pair and its loading.

use log::{debug, info};
use std::{borrow::Cow, path::PathBuf};
use thiserror::Error;
use wgpu::{ShaderModuleDescriptor, ShaderSource};

/// Vertex stage entry point in [`SKY_SHADER_SOURCE`].
pub const VERTEX_ENTRY_POINT: &str = "vs_sky";

/// Fragment stage entry point in [`SKY_SHADER_SOURCE`].
pub const FRAGMENT_ENTRY_POINT: &str = "fs_sky";

/// WGSL source of the sky-dome vertex and fragment stages.
///
/// Kept in lockstep with `skydome_model::stages`; every constant here has a
/// named counterpart on the CPU side.
pub const SKY_SHADER_SOURCE: &str = r#"
struct SkyVertexUniform {
    projection: mat4x4<f32>,
    orientation: mat4x4<f32>,
};

// params[0..9] = A, B, C, D, E, F, G, H, I, Z (rgb in xyz).
struct SkyFragmentUniform {
    params: array<vec4<f32>, 10>,
    sun_direction: vec3<f32>,
};

@group(0) @binding(0)
var<uniform> camera: SkyVertexUniform;

@group(0) @binding(1)
var<uniform> sky: SkyFragmentUniform;

struct VertexInput {
    @location(0) position: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) frag_pos: vec3<f32>,
};

@vertex
fn vs_sky(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.frag_pos = normalize(in.position);
    out.clip_position = camera.projection * camera.orientation * vec4<f32>(in.position, 1.0);
    return out;
}

fn hosek_wilkie(cos_theta: f32, gamma: f32, cos_gamma: f32) -> vec3<f32> {
    let a = sky.params[0].xyz;
    let b = sky.params[1].xyz;
    let c = sky.params[2].xyz;
    let d = sky.params[3].xyz;
    let e = sky.params[4].xyz;
    let f = sky.params[5].xyz;
    let g = sky.params[6].xyz;
    let h = sky.params[7].xyz;
    let i = sky.params[8].xyz;

    let chi = (1.0 + cos_gamma * cos_gamma)
        / pow(1.0 + h * h - 2.0 * cos_gamma * h, vec3<f32>(1.5));

    return (1.0 + a * exp(b / (cos_theta + 0.01)))
        * (c + d * exp(e * gamma) + f * (cos_gamma * cos_gamma) + g * chi + i * sqrt(cos_theta));
}

@fragment
fn fs_sky(in: VertexOutput) -> @location(0) vec4<f32> {
    let v = normalize(in.frag_pos);
    let cos_theta = clamp(v.y, 0.0, 1.0);
    let cos_gamma = dot(v, sky.sun_direction);
    let gamma = acos(clamp(cos_gamma, -1.0, 1.0));

    var radiance = sky.params[9].xyz * hosek_wilkie(cos_theta, gamma, cos_gamma);
    if (cos_gamma > 0.0) {
        radiance = radiance + pow(cos_gamma, 256.0) * 0.5;
    }

    // HDR: no clamping, tone mapping happens downstream.
    return vec4<f32>(radiance, 1.0);
}
"#;

/// Error types for sky shader loading.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("shader file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read shader file: {0}")]
    IoError(#[from] std::io::Error),
}

/// Where the sky shader source comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SkyShaderSource {
    /// The compiled-in [`SKY_SHADER_SOURCE`].
    #[default]
    Embedded,
    /// A `.wgsl` file on disk, for iterating on the shader without rebuilding.
    File(PathBuf),
}

impl SkyShaderSource {
    /// Read the WGSL text.
    pub fn read(&self) -> Result<Cow<'static, str>, ShaderError> {
        match self {
            SkyShaderSource::Embedded => Ok(Cow::Borrowed(SKY_SHADER_SOURCE)),
            SkyShaderSource::File(path) => {
                if !path.exists() {
                    return Err(ShaderError::FileNotFound { path: path.clone() });
                }
                debug!("Reading sky shader from {:?}", path);
                Ok(Cow::Owned(std::fs::read_to_string(path)?))
            }
        }
    }
}

/// Compile the sky shader module. Invalid WGSL is reported through the
/// device's validation error handler.
pub fn load_sky_shader(
    device: &wgpu::Device,
    source: &SkyShaderSource,
) -> Result<wgpu::ShaderModule, ShaderError> {
    let wgsl = source.read()?;
    let module = device.create_shader_module(ShaderModuleDescriptor {
        label: Some("sky-shader"),
        source: ShaderSource::Wgsl(wgsl),
    });
    info!("Loaded sky shader ({:?})", source);
    Ok(module)
}
