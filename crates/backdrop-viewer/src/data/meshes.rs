use crate::data::types::{MeshVertex, PointInstance};
use backdrop::{Mesh, ParticleField};
use wgpu::util::DeviceExt;

/// Indexed triangle mesh resident on the GPU.
#[derive(Debug)]
pub struct MeshGpu {
    pub vtx: wgpu::Buffer,
    pub idx: wgpu::Buffer,
    pub index_count: u32,
}

impl MeshGpu {
    pub fn upload(device: &wgpu::Device, label: &str, mesh: &Mesh) -> Self {
        let vertices = MeshVertex::from_mesh(mesh);

        let vtx = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertices")),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let idx = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Indices")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vtx,
            idx,
            index_count: mesh.indices.len() as u32,
        }
    }
}

/// Edge list of a mesh, drawn as a line list.
#[derive(Debug)]
pub struct LineMeshGpu {
    pub vtx: wgpu::Buffer,
    pub idx: wgpu::Buffer,
    pub index_count: u32,
}

impl LineMeshGpu {
    pub fn upload(device: &wgpu::Device, label: &str, mesh: &Mesh) -> Self {
        let positions: Vec<[f32; 3]> = mesh.positions.iter().map(|p| p.to_array()).collect();
        let edges = mesh.edges();

        let vtx = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Line Vertices")),
            contents: bytemuck::cast_slice(&positions),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let idx = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Line Indices")),
            contents: bytemuck::cast_slice(&edges),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!("{}: {} edges over {} vertices", label, edges.len(), positions.len());

        Self {
            vtx,
            idx,
            index_count: (edges.len() * 2) as u32,
        }
    }
}

/// Uploads the starfield as one instance per point.
pub fn upload_particles(device: &wgpu::Device, field: &ParticleField) -> (wgpu::Buffer, u32) {
    let instances: Vec<PointInstance> = field
        .positions()
        .iter()
        .map(|p| PointInstance {
            position: p.to_array(),
        })
        .collect();

    let vtx = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Starfield Instances"),
        contents: bytemuck::cast_slice(&instances),
        usage: wgpu::BufferUsages::VERTEX,
    });

    (vtx, instances.len() as u32)
}
