use super::{depth_state, multisample, uniform_binding, uniform_layout};
use crate::data::{types::back_to_front, BodyUniform, LitSceneUniform, MeshGpu, MeshVertex};
use backdrop::{Frame, Shape};
use std::collections::HashMap;

/// Per-body uniform slot, reused across frames.
struct BodySlot {
    ubo:  wgpu::Buffer,
    bind: wgpu::BindGroup,
}

/// Blinn-Phong shading of the floating bodies under the scene lights.
pub struct LitMeshPipeline {
    pipeline:    wgpu::RenderPipeline,
    scene_ubo:   wgpu::Buffer,
    scene_bind:  wgpu::BindGroup,
    body_layout: wgpu::BindGroupLayout,
    meshes:      HashMap<Shape, MeshGpu>,
    slots:       Vec<BodySlot>,
    /// Slot and shape of each body, back to front.
    draw_list:   Vec<(usize, Shape)>,
}

impl LitMeshPipeline {
    pub fn new(
        device:       &wgpu::Device,
        color_fmt:    wgpu::TextureFormat,
        depth_fmt:    wgpu::TextureFormat,
        sample_count: u32,
    ) -> Self {
        let scene_size = std::mem::size_of::<LitSceneUniform>();
        let scene_layout = uniform_layout(
            device,
            "Lit Scene BGL",
            scene_size,
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let (scene_ubo, scene_bind) = uniform_binding(device, &scene_layout, "Lit Scene UBO", scene_size);

        let body_layout = uniform_layout(
            device,
            "Body BGL",
            std::mem::size_of::<BodyUniform>(),
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label:  Some("Lit Mesh WGSL"),
            source: wgpu::ShaderSource::Wgsl(LIT_MESH_WGSL.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label:                Some("Lit Mesh PipelineLayout"),
            bind_group_layouts:   &[&scene_layout, &body_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label:  Some("Lit Mesh Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module:      &shader,
                entry_point: "vs_main",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<MeshVertex>() as u64,
                    step_mode:    wgpu::VertexStepMode::Vertex,
                    attributes:   &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology:   wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode:  Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(depth_state(depth_fmt, true)),
            fragment: Some(wgpu::FragmentState {
                module:      &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format:     color_fmt,
                    blend:      Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multisample: multisample(sample_count),
            multiview:   None,
        });

        Self {
            pipeline,
            scene_ubo,
            scene_bind,
            body_layout,
            meshes: HashMap::new(),
            slots: Vec::new(),
            draw_list: Vec::new(),
        }
    }

    /// Uploads any shape seen for the first time, grows the body slots, and
    /// writes this frame's uniforms in back-to-front order.
    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, frame: &Frame<'_>) {
        let scene = frame.scene;

        for body in &scene.bodies {
            self.meshes.entry(body.shape).or_insert_with(|| {
                log::debug!("Uploading {:?} mesh", body.shape);
                MeshGpu::upload(device, &format!("{:?}", body.shape), &body.shape.mesh())
            });
        }

        while self.slots.len() < scene.bodies.len() {
            let (ubo, bind) = uniform_binding(
                device,
                &self.body_layout,
                &format!("Body UBO {}", self.slots.len()),
                std::mem::size_of::<BodyUniform>(),
            );
            self.slots.push(BodySlot { ubo, bind });
        }

        queue.write_buffer(&self.scene_ubo, 0, bytemuck::bytes_of(&LitSceneUniform::new(frame)));

        self.draw_list.clear();
        for index in back_to_front(frame) {
            let body = &scene.bodies[index];
            let Some(material) = scene.materials.get(body.material) else {
                log::warn!("Body {} refers to missing material {}", index, body.material);
                continue;
            };

            let slot = self.draw_list.len();
            let uniform = BodyUniform::new(body.model_matrix(), material);
            queue.write_buffer(&self.slots[slot].ubo, 0, bytemuck::bytes_of(&uniform));
            self.draw_list.push((slot, body.shape));
        }
    }

    pub fn draw<'a>(&'a self, rpass: &mut wgpu::RenderPass<'a>) {
        if self.draw_list.is_empty() {
            return;
        }

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.scene_bind, &[]);

        for (slot, shape) in &self.draw_list {
            let Some(mesh) = self.meshes.get(shape) else {
                continue;
            };
            rpass.set_bind_group(1, &self.slots[*slot].bind, &[]);
            rpass.set_vertex_buffer(0, mesh.vtx.slice(..));
            rpass.set_index_buffer(mesh.idx.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }
}

pub const LIT_MESH_WGSL: &str = r#"
struct SceneUniform {
    view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    ambient: vec4<f32>,         // rgb * intensity
    dir_color: vec4<f32>,
    dir_direction: vec4<f32>,   // towards the light
    point_color: vec4<f32>,
    point_position: vec4<f32>,  // w = range, 0 = unbounded
};

struct BodyUniform {
    model: mat4x4<f32>,
    color: vec4<f32>,           // a = opacity
    specular: vec4<f32>,        // w = shininess
};

@group(0) @binding(0) var<uniform> S: SceneUniform;
@group(1) @binding(0) var<uniform> B: BodyUniform;

struct VSOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>, @location(1) normal: vec3<f32>) -> VSOut {
    var out: VSOut;
    let world = B.model * vec4<f32>(position, 1.0);
    out.clip = S.view_proj * world;
    out.world_pos = world.xyz;
    // Bodies are scaled uniformly, so the model matrix carries normals.
    out.normal = (B.model * vec4<f32>(normal, 0.0)).xyz;
    return out;
}

fn blinn(n: vec3<f32>, l: vec3<f32>, v: vec3<f32>) -> f32 {
    let h = normalize(l + v);
    return pow(max(dot(n, h), 0.0), B.specular.w);
}

fn falloff(distance: f32, range: f32) -> f32 {
    if (range <= 0.0) {
        return 1.0;
    }
    return clamp(1.0 - distance / range, 0.0, 1.0);
}

@fragment
fn fs_main(in: VSOut) -> @location(0) vec4<f32> {
    let n = normalize(in.normal);
    let v = normalize(S.camera_pos.xyz - in.world_pos);

    var diffuse = S.ambient.rgb;
    var spec = vec3<f32>(0.0);

    let ld = normalize(S.dir_direction.xyz);
    diffuse += S.dir_color.rgb * max(dot(n, ld), 0.0);
    spec += S.dir_color.rgb * blinn(n, ld, v);

    let to_light = S.point_position.xyz - in.world_pos;
    let dist = length(to_light);
    let lp = to_light / max(dist, 1e-4);
    let k = falloff(dist, S.point_position.w);
    diffuse += S.point_color.rgb * max(dot(n, lp), 0.0) * k;
    spec += S.point_color.rgb * blinn(n, lp, v) * k;

    return vec4<f32>(B.color.rgb * diffuse + B.specular.rgb * spec, B.color.a);
}
"#;
