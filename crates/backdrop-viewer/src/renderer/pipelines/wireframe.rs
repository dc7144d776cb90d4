//! Renders the globe as a translucent line list over its sphere edges.

use super::{depth_state, multisample, uniform_binding, uniform_layout};
use crate::data::{types::rgba, LineMeshGpu, WireUniform};
use backdrop::Frame;

pub struct WireframePipeline {
    pipeline:       wgpu::RenderPipeline,
    bind_group:     wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    globe:          Option<LineMeshGpu>,
}

impl WireframePipeline {
    pub fn new(
        device:       &wgpu::Device,
        color_fmt:    wgpu::TextureFormat,
        depth_fmt:    wgpu::TextureFormat,
        sample_count: u32,
    ) -> Self {
        let size = std::mem::size_of::<WireUniform>();
        let layout = uniform_layout(device, "Wire BGL", size, wgpu::ShaderStages::VERTEX_FRAGMENT);
        let (uniform_buffer, bind_group) = uniform_binding(device, &layout, "Wire Uniform Buffer", size);

        // Shader module
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label:  Some("Wire WGSL"),
            source: wgpu::ShaderSource::Wgsl(WIRE_WGSL.into()),
        });

        // Pipeline layout
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label:               Some("Wire Pipeline Layout"),
            bind_group_layouts:  &[&layout],
            push_constant_ranges: &[],
        });

        // Render pipeline
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label:   Some("Globe Wireframe Pipeline"),
            layout:  Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module:            &shader,
                entry_point:       "vs_main",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 3]>() as u64,
                    step_mode:    wgpu::VertexStepMode::Vertex,
                    attributes:   &[wgpu::VertexAttribute {
                        shader_location: 0,
                        format:          wgpu::VertexFormat::Float32x3,
                        offset:          0,
                    }],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module:            &shader,
                entry_point:       "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format:     color_fmt,
                    blend:      Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: Some(depth_state(depth_fmt, false)), // Do not occlude bodies
            multisample:   multisample(sample_count),
            multiview:     None,
        });

        Self {
            pipeline,
            bind_group,
            uniform_buffer,
            globe: None,
        }
    }

    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, frame: &Frame<'_>) {
        let globe = &frame.scene.globe;
        if self.globe.is_none() {
            self.globe = Some(LineMeshGpu::upload(device, "Globe", &globe.mesh()));
        }

        let uniforms = WireUniform {
            mvp:   (frame.camera.view_projection() * globe.model_matrix()).to_cols_array_2d(),
            color: rgba(globe.material.color, globe.material.opacity),
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    pub fn draw<'a>(&'a self, rpass: &mut wgpu::RenderPass<'a>) {
        let Some(globe) = self.globe.as_ref() else {
            return;
        };

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, globe.vtx.slice(..));
        rpass.set_index_buffer(globe.idx.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..globe.index_count, 0, 0..1);
    }
}

pub const WIRE_WGSL: &str = r#"
struct WireUniform {
    mvp: mat4x4<f32>,
    color: vec4<f32>,
};
@group(0) @binding(0) var<uniform> U: WireUniform;

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return U.mvp * vec4<f32>(position, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return U.color;
}
"#;
