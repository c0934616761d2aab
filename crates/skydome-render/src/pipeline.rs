//! Render pipeline for the sky dome.

use std::num::NonZeroU64;

use crate::shader::{FRAGMENT_ENTRY_POINT, VERTEX_ENTRY_POINT};
use crate::uniforms::{SkyFragmentUniform, SkyVertex, SkyVertexUniform};

/// Caller-owned dome geometry. Vertices are [`SkyVertex`] positions.
pub struct SkyMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub index_format: wgpu::IndexFormat,
}

impl SkyMesh {
    /// Bind vertex and index buffers to a render pass.
    pub fn bind<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), self.index_format);
    }

    /// Draw the entire mesh using indexed rendering.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass) {
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Sky-dome pipeline: one bind group with the vertex uniforms at binding 0
/// and the fragment uniforms at binding 1.
pub struct SkyPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl SkyPipeline {
    /// Create the sky pipeline.
    ///
    /// The dome is seen from inside, so no faces are culled. With a depth
    /// format the sky neither tests against nor writes depth; it is drawn
    /// first and scene geometry covers it.
    pub fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        color_format: wgpu::TextureFormat,
        depth_format: Option<wgpu::TextureFormat>,
    ) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sky-bind-group-layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(
                            std::mem::size_of::<SkyVertexUniform>() as u64,
                        ),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(
                            std::mem::size_of::<SkyFragmentUniform>() as u64,
                        ),
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sky-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let depth_stencil = depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: false,
            depth_compare: wgpu::CompareFunction::Always,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sky-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some(VERTEX_ENTRY_POINT),
                buffers: &[SkyVertex::LAYOUT],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some(FRAGMENT_ENTRY_POINT),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        log::info!(
            "Sky pipeline created: color={:?}, depth={:?}",
            color_format,
            depth_format
        );

        Self {
            pipeline,
            bind_group_layout,
        }
    }

    /// Bind caller-owned uniform buffers holding a [`SkyVertexUniform`] and a
    /// [`SkyFragmentUniform`].
    pub fn bind_group(
        &self,
        device: &wgpu::Device,
        vertex_uniforms: &wgpu::Buffer,
        fragment_uniforms: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sky-bind-group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: vertex_uniforms.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: fragment_uniforms.as_entire_binding(),
                },
            ],
        })
    }
}

/// Draw the sky dome with the given pipeline and uniform bind group.
pub fn draw_sky<'a>(
    render_pass: &mut wgpu::RenderPass<'a>,
    pipeline: &SkyPipeline,
    bind_group: &'a wgpu::BindGroup,
    mesh: &'a SkyMesh,
) {
    render_pass.set_pipeline(&pipeline.pipeline);
    render_pass.set_bind_group(0, bind_group, &[]);
    mesh.bind(render_pass);
    mesh.draw(render_pass);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::{SkyShaderSource, load_sky_shader};
    use crate::test_device::create_test_device;
    use glam::Vec3;
    use skydome_model::{FragmentUniforms, HosekWilkieParams, VertexUniforms, fragment_stage};
    use wgpu::util::DeviceExt;

    const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba32Float;

    fn fixture_params() -> HosekWilkieParams {
        HosekWilkieParams::from_rgb_arrays([
            [-1.0, -1.1, -1.2],
            [-0.32, -0.28, -0.24],
            [0.8, 0.9, 1.0],
            [2.0, 1.6, 1.2],
            [-1.5, -1.7, -1.9],
            [0.25, 0.2, 0.15],
            [0.1, 0.12, 0.14],
            [0.6, 0.55, 0.5],
            [0.9, 0.8, 0.7],
            [1.8, 2.2, 2.8],
        ])
    }

    fn uniform_buffer(device: &wgpu::Device, label: &str, contents: &[u8]) -> wgpu::Buffer {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        })
    }

    fn mesh(device: &wgpu::Device, positions: &[[f32; 3]], indices: &[u16]) -> SkyMesh {
        let vertices: Vec<SkyVertex> = positions
            .iter()
            .map(|&position| SkyVertex { position })
            .collect();
        SkyMesh {
            vertex_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("test-sky-vertices"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            index_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("test-sky-indices"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            }),
            index_count: indices.len() as u32,
            index_format: wgpu::IndexFormat::Uint16,
        }
    }

    #[test]
    fn test_pipeline_creation_succeeds() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let shader = load_sky_shader(&device, &SkyShaderSource::Embedded).unwrap();
        let _pipeline = SkyPipeline::new(
            &device,
            &shader,
            wgpu::TextureFormat::Rgba16Float,
            Some(wgpu::TextureFormat::Depth32Float),
        );
    }

    #[test]
    fn test_pipeline_without_depth() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let shader = load_sky_shader(&device, &SkyShaderSource::Embedded).unwrap();
        let _pipeline = SkyPipeline::new(&device, &shader, wgpu::TextureFormat::Bgra8UnormSrgb, None);
    }

    #[test]
    fn test_bind_group_accepts_uniform_buffers() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let shader = load_sky_shader(&device, &SkyShaderSource::Embedded).unwrap();
        let pipeline = SkyPipeline::new(&device, &shader, TARGET_FORMAT, None);

        let vertex = SkyVertexUniform::from(&VertexUniforms::default());
        let fragment = SkyFragmentUniform::from(&FragmentUniforms {
            params: fixture_params(),
            sun_direction: Vec3::Y,
        });
        let vertex_buffer = uniform_buffer(&device, "test-sky-vertex", bytemuck::bytes_of(&vertex));
        let fragment_buffer =
            uniform_buffer(&device, "test-sky-fragment", bytemuck::bytes_of(&fragment));
        let _bind_group = pipeline.bind_group(&device, &vertex_buffer, &fragment_buffer);
    }

    /// Renders one pixel through the GPU stages and compares it with the CPU
    /// reference at the same interpolated direction.
    #[test]
    fn test_gpu_output_matches_cpu_reference() {
        let Some((device, queue)) = create_test_device() else {
            return;
        };
        let shader = load_sky_shader(&device, &SkyShaderSource::Embedded).unwrap();
        let pipeline = SkyPipeline::new(&device, &shader, TARGET_FORMAT, None);

        let sun = Vec3::new(0.2, 0.5, 0.8).normalize();
        let fragment_uniforms = FragmentUniforms {
            params: fixture_params(),
            sun_direction: sun,
        };
        let vertex = SkyVertexUniform::from(&VertexUniforms::default());
        let fragment = SkyFragmentUniform::from(&fragment_uniforms);
        let vertex_buffer = uniform_buffer(&device, "test-sky-vertex", bytemuck::bytes_of(&vertex));
        let fragment_buffer =
            uniform_buffer(&device, "test-sky-fragment", bytemuck::bytes_of(&fragment));
        let bind_group = pipeline.bind_group(&device, &vertex_buffer, &fragment_buffer);

        // Identity transforms: this triangle covers clip space and the single
        // pixel center at NDC (0, 0) has barycentrics (0.5, 0.25, 0.25).
        let positions = [[-1.0, -1.0, 0.5], [3.0, -1.0, 0.5], [-1.0, 3.0, 0.5]];
        let sky_mesh = mesh(&device, &positions, &[0, 1, 2]);
        let frag_pos = Vec3::from(positions[0]).normalize() * 0.5
            + Vec3::from(positions[1]).normalize() * 0.25
            + Vec3::from(positions[2]).normalize() * 0.25;
        let expected = fragment_stage(frag_pos, &fragment_uniforms);

        let target = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("test-sky-target"),
            size: wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = target.create_view(&wgpu::TextureViewDescriptor::default());

        let padded = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let readback = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("test-sky-readback"),
            size: u64::from(padded),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("test-sky-encoder"),
        });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("test-sky-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
            draw_sky(&mut render_pass, &pipeline, &bind_group, &sky_mesh);
        }
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &target,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &readback,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded),
                    rows_per_image: Some(1),
                },
            },
            wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
        );
        queue.submit(std::iter::once(encoder.finish()));

        let slice = readback.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        let _ = device.poll(wgpu::PollType::Wait {
            submission_index: None,
            timeout: None,
        });
        rx.recv().unwrap().unwrap();

        let mapped = slice.get_mapped_range();
        let pixel: &[f32] = bytemuck::cast_slice(&mapped[..16]);
        for channel in 0..3 {
            let gpu = pixel[channel];
            let cpu = expected[channel];
            assert!(
                (gpu - cpu).abs() <= cpu.abs() * 1e-2 + 1e-4,
                "channel {channel}: gpu {gpu} vs cpu {cpu}"
            );
        }
        assert_eq!(pixel[3], 1.0);
    }
}
