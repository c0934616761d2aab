//! GPU layouts of the sky uniforms and the dome vertex.

use bytemuck::{Pod, Zeroable};
use skydome_model::{FragmentUniforms, PARAM_COUNT, VertexUniforms};

/// Vertex-stage uniform: projection and orientation matrices (column-major).
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SkyVertexUniform {
    /// Perspective projection. (offset 0)
    pub projection: [[f32; 4]; 4],
    /// Rotation-only view matrix. (offset 64)
    pub orientation: [[f32; 4]; 4],
}

static_assertions::assert_eq_size!(SkyVertexUniform, [u8; 128]);

impl From<&VertexUniforms> for SkyVertexUniform {
    fn from(uniforms: &VertexUniforms) -> Self {
        Self {
            projection: uniforms.projection.to_cols_array_2d(),
            orientation: uniforms.orientation.to_cols_array_2d(),
        }
    }
}

/// Fragment-stage uniform. Matches the WGSL struct layout.
///
/// Each coefficient occupies a full 16-byte slot with the color in `xyz`,
/// which is the array stride WGSL requires in the uniform address space.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SkyFragmentUniform {
    /// Coefficients A..I and Z. (offset 0)
    pub params: [[f32; 4]; PARAM_COUNT],
    /// Unit vector towards the sun. (offset 160)
    pub sun_direction: [f32; 3],
    /// Padding to a 16-byte struct size. (offset 172)
    pub _padding: f32,
}

static_assertions::assert_eq_size!(SkyFragmentUniform, [u8; 176]);

impl From<&FragmentUniforms> for SkyFragmentUniform {
    fn from(uniforms: &FragmentUniforms) -> Self {
        Self {
            params: uniforms.params.values.map(|v| v.extend(0.0).to_array()),
            sun_direction: uniforms.sun_direction.to_array(),
            _padding: 0.0,
        }
    }
}

/// Dome mesh vertex: object-space position only.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SkyVertex {
    pub position: [f32; 3],
}

static_assertions::assert_eq_size!(SkyVertex, [u8; 12]);

impl SkyVertex {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<SkyVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: 0,
        }],
    };
}
