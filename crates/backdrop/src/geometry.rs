//! Procedural meshes for the floating bodies and the globe.
//!
//! All generators emit counter-clockwise triangles when viewed from outside,
//! so back-face culling can stay on.

use glam::Vec3;
use std::collections::BTreeSet;
use std::f32::consts::{PI, TAU};

/// Indexed triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl Mesh {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Unique undirected edges, for wireframe rendering.
    pub fn edges(&self) -> Vec<[u32; 2]> {
        let mut set = BTreeSet::new();
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                if a != b {
                    set.insert([a.min(b), a.max(b)]);
                }
            }
        }
        set.into_iter().collect()
    }

    /// Builds a flat-shaded mesh: every face gets its own three vertices.
    fn flat(vertices: &[Vec3], faces: &[[u32; 3]], radius: f32) -> Self {
        let mut mesh = Mesh::default();

        for face in faces {
            let [a, b, c] = face.map(|i| vertices[i as usize].normalize() * radius);
            let normal = (b - a).cross(c - a).normalize();
            let base = mesh.positions.len() as u32;

            mesh.positions.extend([a, b, c]);
            mesh.normals.extend([normal; 3]);
            mesh.indices.extend([base, base + 1, base + 2]);
        }

        mesh
    }

    /// Ring torus around the Z axis.
    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        let mut mesh = Mesh::default();

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * TAU;
            for i in 0..=tubular_segments {
                let u = i as f32 / tubular_segments as f32 * TAU;

                let position = Vec3::new(
                    (radius + tube * v.cos()) * u.cos(),
                    (radius + tube * v.cos()) * u.sin(),
                    tube * v.sin(),
                );
                let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);

                mesh.positions.push(position);
                mesh.normals.push((position - center).normalize());
            }
        }

        let row = tubular_segments + 1;
        for j in 1..=radial_segments {
            for i in 1..=tubular_segments {
                let a = row * j + i - 1;
                let b = row * (j - 1) + i - 1;
                let c = row * (j - 1) + i;
                let d = row * j + i;
                mesh.indices.extend([a, b, d, b, c, d]);
            }
        }

        mesh
    }

    pub fn octahedron(radius: f32) -> Self {
        let vertices = [
            Vec3::X,
            Vec3::NEG_X,
            Vec3::Y,
            Vec3::NEG_Y,
            Vec3::Z,
            Vec3::NEG_Z,
        ];
        let faces = [
            [0, 2, 4],
            [0, 4, 3],
            [0, 3, 5],
            [0, 5, 2],
            [1, 2, 5],
            [1, 5, 3],
            [1, 3, 4],
            [1, 4, 2],
        ];
        Self::flat(&vertices, &faces, radius)
    }

    pub fn icosahedron(radius: f32) -> Self {
        let t = (1.0 + 5f32.sqrt()) / 2.0;
        let vertices = [
            Vec3::new(-1.0, t, 0.0),
            Vec3::new(1.0, t, 0.0),
            Vec3::new(-1.0, -t, 0.0),
            Vec3::new(1.0, -t, 0.0),
            Vec3::new(0.0, -1.0, t),
            Vec3::new(0.0, 1.0, t),
            Vec3::new(0.0, -1.0, -t),
            Vec3::new(0.0, 1.0, -t),
            Vec3::new(t, 0.0, -1.0),
            Vec3::new(t, 0.0, 1.0),
            Vec3::new(-t, 0.0, -1.0),
            Vec3::new(-t, 0.0, 1.0),
        ];
        let faces = [
            [0, 11, 5],
            [0, 5, 1],
            [0, 1, 7],
            [0, 7, 10],
            [0, 10, 11],
            [1, 5, 9],
            [5, 11, 4],
            [11, 10, 2],
            [10, 7, 6],
            [7, 1, 8],
            [3, 9, 4],
            [3, 4, 2],
            [3, 2, 6],
            [3, 6, 8],
            [3, 8, 9],
            [4, 9, 5],
            [2, 4, 11],
            [6, 2, 10],
            [8, 6, 7],
            [9, 8, 1],
        ];
        Self::flat(&vertices, &faces, radius)
    }

    /// Cone with its apex on +Y, centered on the origin, with a closed base.
    pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Self {
        let mut mesh = Mesh::default();
        let half = height * 0.5;
        let slope = radius / height;

        // Side: an apex ring (collapsed) over a base ring, so each segment
        // gets its own apex normal.
        for (ring_radius, y) in [(0.0, half), (radius, -half)] {
            for x in 0..=radial_segments {
                let theta = x as f32 / radial_segments as f32 * TAU;
                let (sin, cos) = theta.sin_cos();
                mesh.positions.push(Vec3::new(ring_radius * sin, y, ring_radius * cos));
                mesh.normals.push(Vec3::new(sin, slope, cos).normalize());
            }
        }

        let row = radial_segments + 1;
        for x in 0..radial_segments {
            let b = row + x;
            let c = row + x + 1;
            let d = x + 1;
            mesh.indices.extend([b, c, d]);
        }

        // Base cap.
        let center = mesh.positions.len() as u32;
        mesh.positions.push(Vec3::new(0.0, -half, 0.0));
        mesh.normals.push(Vec3::NEG_Y);

        let rim = center + 1;
        for x in 0..=radial_segments {
            let theta = x as f32 / radial_segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            mesh.positions.push(Vec3::new(radius * sin, -half, radius * cos));
            mesh.normals.push(Vec3::NEG_Y);
        }
        for x in 0..radial_segments {
            let i = rim + x;
            mesh.indices.extend([i + 1, i, center]);
        }

        mesh
    }

    /// UV sphere with poles on the Y axis.
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let mut mesh = Mesh::default();
        let mut grid = Vec::with_capacity(height_segments as usize + 1);

        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            let mut row = Vec::with_capacity(width_segments as usize + 1);

            for ix in 0..=width_segments {
                let u = ix as f32 / width_segments as f32;
                let normal = Vec3::new(
                    -(u * TAU).cos() * (v * PI).sin(),
                    (v * PI).cos(),
                    (u * TAU).sin() * (v * PI).sin(),
                );

                row.push(mesh.positions.len() as u32);
                mesh.positions.push(normal * radius);
                mesh.normals.push(normal);
            }

            grid.push(row);
        }

        for iy in 0..height_segments as usize {
            for ix in 0..width_segments as usize {
                let a = grid[iy][ix + 1];
                let b = grid[iy][ix];
                let c = grid[iy + 1][ix];
                let d = grid[iy + 1][ix + 1];

                if iy != 0 {
                    mesh.indices.extend([a, b, d]);
                }
                if iy != height_segments as usize - 1 {
                    mesh.indices.extend([b, c, d]);
                }
            }
        }

        mesh
    }
}

/// Solid kinds a floating body can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shape {
    Torus,
    Octahedron,
    Icosahedron,
    Cone,
}

impl Shape {
    pub const ALL: [Shape; 4] = [
        Shape::Torus,
        Shape::Octahedron,
        Shape::Icosahedron,
        Shape::Cone,
    ];

    /// Unit-sized mesh for this shape; bodies scale it uniformly.
    pub fn mesh(self) -> Mesh {
        match self {
            Shape::Torus => Mesh::torus(1.0, 0.4, 16, 100),
            Shape::Octahedron => Mesh::octahedron(1.0),
            Shape::Icosahedron => Mesh::icosahedron(1.0),
            Shape::Cone => Mesh::cone(1.0, 2.0, 8),
        }
    }
}
