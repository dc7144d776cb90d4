use super::{depth_state, multisample, uniform_binding, uniform_layout};
use crate::data::{meshes::upload_particles, types::rgba, PointInstance, PointsUniform};
use backdrop::Frame;
use wgpu::util::DeviceExt;

/// Draws the particle field as camera-facing quads, one instance per point.
pub struct StarfieldPipeline {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    quad_vb: wgpu::Buffer,
    instances: Option<(wgpu::Buffer, u32)>,
}

impl StarfieldPipeline {
    pub fn new(
        device: &wgpu::Device,
        color_fmt: wgpu::TextureFormat,
        depth_fmt: wgpu::TextureFormat,
        sample_count: u32,
    ) -> Self {
        let size = std::mem::size_of::<PointsUniform>();
        let layout = uniform_layout(device, "Starfield UBO Layout", size, wgpu::ShaderStages::VERTEX_FRAGMENT);
        let (uniform_buffer, bind_group) = uniform_binding(device, &layout, "Starfield UBO", size);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Starfield WGSL"),
            source: wgpu::ShaderSource::Wgsl(STARFIELD_WGSL.into()),
        });

        // Sprite quad corners
        let quad_corners: [[f32; 2]; 6] = [
            [-1.0, -1.0],
            [1.0, -1.0],
            [1.0, 1.0],
            [-1.0, -1.0],
            [1.0, 1.0],
            [-1.0, 1.0],
        ];

        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Starfield Quad VB"),
            contents: bytemuck::cast_slice(&quad_corners),
            usage: wgpu::BufferUsages::VERTEX,
        });

        // Vertex buffer layouts: quad + per‑instance position
        let vbuf_layouts = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    shader_location: 0,
                    offset: 0,
                    format: wgpu::VertexFormat::Float32x2,
                }],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<PointInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[wgpu::VertexAttribute {
                    shader_location: 1,
                    offset: 0,
                    format: wgpu::VertexFormat::Float32x3,
                }],
            },
        ];

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Starfield PipelineLayout"),
            bind_group_layouts: &[&layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Starfield Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &vbuf_layouts,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            // Translucent sprites: test against depth, never write it.
            depth_stencil: Some(depth_state(depth_fmt, false)),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_fmt,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multisample: multisample(sample_count),
            multiview: None,
        });

        Self {
            pipeline,
            bind_group,
            uniform_buffer,
            quad_vb,
            instances: None,
        }
    }

    /// Uploads the point cloud on first use and refreshes the uniform.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        frame: &Frame<'_>,
        buffer_size: [f32; 2],
    ) {
        let field = &frame.scene.particles;
        if self.instances.is_none() {
            self.instances = Some(upload_particles(device, field));
        }

        let mvp = frame.camera.view_projection() * field.model_matrix();
        let uniform = PointsUniform {
            mvp: mvp.to_cols_array_2d(),
            color: rgba(field.material.color, field.material.opacity),
            params: [field.material.size, buffer_size[0], buffer_size[1], 0.0],
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniform));
    }

    pub fn draw<'a>(&'a self, rpass: &mut wgpu::RenderPass<'a>) {
        let Some((instances, count)) = self.instances.as_ref() else {
            return;
        };
        if *count == 0 {
            return;
        }

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
        rpass.set_vertex_buffer(1, instances.slice(..));
        rpass.draw(0..6, 0..*count);
    }
}

pub const STARFIELD_WGSL: &str = r#"
struct PointsUniform {
    mvp: mat4x4<f32>,
    color: vec4<f32>,
    params: vec4<f32>, // x = world size, yz = drawing buffer size (px)
};
@group(0) @binding(0) var<uniform> U: PointsUniform;

@vertex
fn vs_main(
    @location(0) corner: vec2<f32>,
    @location(1) center: vec3<f32>,
) -> @builtin(position) vec4<f32> {
    let clip = U.mvp * vec4<f32>(center, 1.0);
    let viewport = U.params.yz;

    // Size attenuation: world size projected at this depth, at least 1 px.
    let size_px = max(U.params.x * viewport.y * 0.5 / max(clip.w, 1e-4), 1.0);
    let offset = corner * size_px / viewport * clip.w;
    return vec4<f32>(clip.xy + offset, clip.zw);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return U.color;
}
"#;
