//! wgpu rendering of the Hosek-Wilkie sky dome: WGSL shader pair, uniform
//! layouts, the render pipeline and a rotation-only camera.

pub mod camera;
pub mod pipeline;
pub mod shader;
pub mod uniforms;

#[cfg(test)]
mod test_device;

pub use camera::{LOOK_SPEED, SkyCamera};
pub use pipeline::{SkyMesh, SkyPipeline, draw_sky};
pub use shader::{
    FRAGMENT_ENTRY_POINT, SKY_SHADER_SOURCE, ShaderError, SkyShaderSource, VERTEX_ENTRY_POINT,
    load_sky_shader,
};
pub use uniforms::{SkyFragmentUniform, SkyVertex, SkyVertexUniform};
