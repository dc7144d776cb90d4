//! Vertex and uniform layouts. Each struct must match its WGSL counterpart.

use backdrop::{Color, Frame, Lighting, Material, Mesh};
use glam::{Mat4, Vec3};

/// Per-vertex data of the lit meshes.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    pub fn from_mesh(mesh: &Mesh) -> Vec<MeshVertex> {
        mesh.positions
            .iter()
            .zip(&mesh.normals)
            .map(|(p, n)| MeshVertex {
                position: p.to_array(),
                normal: n.to_array(),
            })
            .collect()
    }
}

/// Per-instance data of the starfield sprites.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct PointInstance {
    pub position: [f32; 3],
}

/// Frame-wide uniform of the lit mesh pipeline (group 0).
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LitSceneUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    /// Ambient colour premultiplied by intensity.
    pub ambient: [f32; 4],
    pub dir_color: [f32; 4],
    /// Unit vector towards the directional light.
    pub dir_direction: [f32; 4],
    pub point_color: [f32; 4],
    /// xyz = position, w = falloff range.
    pub point_position: [f32; 4],
}

const _: [(); 160] = [(); core::mem::size_of::<LitSceneUniform>()];

fn scaled(color: Color, intensity: f32) -> [f32; 4] {
    let [r, g, b] = color.to_linear();
    [r * intensity, g * intensity, b * intensity, 0.0]
}

impl LitSceneUniform {
    pub fn new(frame: &Frame<'_>) -> Self {
        let Lighting {
            ambient,
            directional,
            point,
        } = &frame.scene.lighting;
        let camera = frame.camera.position.as_vec3();

        Self {
            view_proj: frame.camera.view_projection().to_cols_array_2d(),
            camera_pos: camera.extend(1.0).to_array(),
            ambient: scaled(ambient.color, ambient.intensity),
            dir_color: scaled(directional.color, directional.intensity),
            dir_direction: directional.direction().extend(0.0).to_array(),
            point_color: scaled(point.color, point.intensity),
            point_position: point.position.extend(point.range).to_array(),
        }
    }
}

/// Per-body uniform of the lit mesh pipeline (group 1).
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BodyUniform {
    pub model: [[f32; 4]; 4],
    /// rgb = linear colour, a = opacity.
    pub color: [f32; 4],
    /// rgb = specular colour, w = shininess.
    pub specular: [f32; 4],
}

const _: [(); 96] = [(); core::mem::size_of::<BodyUniform>()];

impl BodyUniform {
    pub fn new(model: Mat4, material: &Material) -> Self {
        let [r, g, b] = material.color.to_linear();
        let [sr, sg, sb] = material.specular.to_linear();
        Self {
            model: model.to_cols_array_2d(),
            color: [r, g, b, material.opacity],
            specular: [sr, sg, sb, material.shininess],
        }
    }
}

/// Uniform of the starfield sprite pipeline.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointsUniform {
    pub mvp: [[f32; 4]; 4],
    /// rgb = linear colour, a = opacity.
    pub color: [f32; 4],
    /// x = world size, y/z = drawing buffer size in pixels.
    pub params: [f32; 4],
}

const _: [(); 96] = [(); core::mem::size_of::<PointsUniform>()];

/// Uniform of the wireframe pipeline.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WireUniform {
    pub mvp: [[f32; 4]; 4],
    pub color: [f32; 4],
}

const _: [(); 80] = [(); core::mem::size_of::<WireUniform>()];

/// Linear RGB plus alpha.
pub fn rgba(color: Color, alpha: f32) -> [f32; 4] {
    let [r, g, b] = color.to_linear();
    [r, g, b, alpha]
}

/// Body draw order: farthest first, so translucent bodies blend correctly.
pub fn back_to_front(frame: &Frame<'_>) -> Vec<usize> {
    let depth = |i: usize| {
        let p: Vec3 = frame.scene.bodies[i].position;
        frame.camera.view_depth(p)
    };
    let mut order: Vec<usize> = (0..frame.scene.bodies.len()).collect();
    order.sort_by(|&a, &b| depth(b).total_cmp(&depth(a)));
    order
}
