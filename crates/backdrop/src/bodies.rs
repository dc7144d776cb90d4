//! Floating solids that drift, spin and bounce inside an axis-aligned box.

use crate::geometry::Shape;
use crate::material::Material;
use glam::{DMat4, DQuat, DVec3, EulerRot, Mat4, Vec3};
use rand::Rng;
use std::f64::consts::PI;

/// Per-axis magnitude beyond which a body's velocity is reflected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub half_extents: Vec3,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            half_extents: Vec3::new(x, y, z),
        }
    }

    /// True when every coordinate of `p` lies within the bounds.
    pub fn contains(&self, p: Vec3) -> bool {
        p.abs().cmple(self.half_extents).all()
    }
}

#[derive(Debug, Clone)]
pub struct BodySettings {
    pub count: usize,
    pub bounds: Bounds,
    /// Initial positions are drawn from `[-spawn, spawn]` per axis.
    pub spawn: Vec3,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Velocity components are drawn from `[-max_speed, max_speed)`.
    pub max_speed: f32,
    /// Angular velocity components are drawn from `[-max_spin, max_spin)`.
    pub max_spin: f32,
}

impl Default for BodySettings {
    fn default() -> Self {
        Self {
            count: 15,
            bounds: Bounds::new(15.0, 15.0, 10.0),
            spawn: Vec3::new(15.0, 15.0, 10.0),
            min_scale: 0.5,
            max_scale: 1.3,
            max_speed: 0.0025,
            max_spin: 0.005,
        }
    }
}

/// One procedurally placed solid.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingBody {
    pub shape: Shape,
    /// Index into the material palette.
    pub material: usize,
    pub position: Vec3,
    /// Euler angles in radians, applied X then Y then Z. Unbounded.
    pub rotation: DVec3,
    pub scale: f32,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
}

impl FloatingBody {
    /// Integrates one frame.
    ///
    /// The bounce test runs after the position update, so a body may sit
    /// outside its bound by at most one step before heading back.
    pub fn step(&mut self, bounds: &Bounds) {
        self.position += self.velocity;

        let outside = self.position.abs().cmpgt(bounds.half_extents);
        self.velocity = Vec3::select(outside, -self.velocity, self.velocity);

        self.rotation += self.angular_velocity.as_dvec3();
    }

    pub fn model_matrix(&self) -> Mat4 {
        DMat4::from_scale_rotation_translation(
            DVec3::splat(self.scale as f64),
            DQuat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z),
            self.position.as_dvec3(),
        )
        .as_mat4()
    }
}

fn symmetric<R: Rng + ?Sized>(rng: &mut R, half: f32) -> f32 {
    if half <= 0.0 {
        return 0.0;
    }
    rng.gen_range(-half..half)
}

fn symmetric_vec3<R: Rng + ?Sized>(rng: &mut R, half: Vec3) -> Vec3 {
    Vec3::new(
        symmetric(rng, half.x),
        symmetric(rng, half.y),
        symmetric(rng, half.z),
    )
}

/// Creates `count` bodies with uniformly chosen shapes and materials.
///
/// Deterministic for a given `rng` state. Returns nothing when either
/// catalog is empty.
pub fn generate_bodies<R: Rng + ?Sized>(
    count: usize,
    shapes: &[Shape],
    materials: &[Material],
    settings: &BodySettings,
    rng: &mut R,
) -> Vec<FloatingBody> {
    if shapes.is_empty() || materials.is_empty() {
        log::warn!(
            "Cannot place bodies: {} shapes, {} materials",
            shapes.len(),
            materials.len()
        );
        return Vec::new();
    }

    (0..count)
        .map(|_| {
            let shape = shapes[rng.gen_range(0..shapes.len())];
            let material = rng.gen_range(0..materials.len());

            let position = Vec3::new(
                rng.gen_range(-settings.spawn.x..=settings.spawn.x),
                rng.gen_range(-settings.spawn.y..=settings.spawn.y),
                rng.gen_range(-settings.spawn.z..=settings.spawn.z),
            );
            let rotation = DVec3::new(rng.gen_range(0.0..PI), rng.gen_range(0.0..PI), 0.0);
            let scale = rng.gen_range(settings.min_scale..=settings.max_scale);

            FloatingBody {
                shape,
                material,
                position,
                rotation,
                scale,
                velocity: symmetric_vec3(rng, Vec3::splat(settings.max_speed)),
                angular_velocity: symmetric_vec3(rng, Vec3::splat(settings.max_spin)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn bodies(seed: u64, count: usize) -> Vec<FloatingBody> {
        let mut rng = StdRng::seed_from_u64(seed);
        generate_bodies(
            count,
            &Shape::ALL,
            &Material::palette(),
            &BodySettings::default(),
            &mut rng,
        )
    }

    #[test]
    fn test_generated_bodies_respect_ranges() {
        let settings = BodySettings::default();
        for body in bodies(1, 500) {
            assert!(settings.bounds.contains(body.position));
            assert!((0.0..PI).contains(&body.rotation.x));
            assert!((0.0..PI).contains(&body.rotation.y));
            assert_eq!(body.rotation.z, 0.0);
            assert!((0.5..=1.3).contains(&body.scale));
            assert!(body.velocity.abs().max_element() <= 0.0025);
            assert!(body.angular_velocity.abs().max_element() <= 0.005);
            assert!(body.material < 3);
        }
    }

    #[test]
    fn test_generation_is_reproducible() {
        assert_eq!(bodies(42, 15), bodies(42, 15));
        assert_ne!(bodies(42, 15), bodies(43, 15));
    }

    #[test]
    fn test_empty_catalog_yields_no_bodies() {
        let mut rng = StdRng::seed_from_u64(0);
        let out = generate_bodies(15, &[], &Material::palette(), &BodySettings::default(), &mut rng);
        assert!(out.is_empty());
    }

    #[test]
    fn test_velocity_flips_only_on_crossing_axes() {
        let bounds = Bounds::new(15.0, 15.0, 10.0);
        let mut body = FloatingBody {
            shape: Shape::Cone,
            material: 0,
            position: Vec3::new(14.999, 0.0, -9.999),
            rotation: DVec3::ZERO,
            scale: 1.0,
            velocity: Vec3::new(0.002, 0.001, -0.002),
            angular_velocity: Vec3::new(0.01, 0.0, 0.0),
        };

        body.step(&bounds);

        // Overshoot is kept; only the reflected axes change sign.
        assert!(body.position.x > 15.0);
        assert!(body.position.z < -10.0);
        assert_eq!(body.velocity, Vec3::new(-0.002, 0.001, 0.002));
        assert_eq!(body.rotation.x, 0.01f32 as f64);

        body.step(&bounds);
        assert!(body.position.x <= 15.0);
        assert_eq!(body.velocity, Vec3::new(-0.002, 0.001, 0.002));
    }

    #[test]
    fn test_bounce_rule_holds_over_many_frames() {
        let bounds = BodySettings::default().bounds;
        let mut all = bodies(9, 15);

        for _ in 0..20_000 {
            for body in &mut all {
                let before = body.clone();
                body.step(&bounds);

                let moved = before.position + before.velocity;
                for axis in 0..3 {
                    if moved[axis].abs() > bounds.half_extents[axis] {
                        assert_eq!(body.velocity[axis], -before.velocity[axis]);
                    } else {
                        assert_eq!(body.velocity[axis], before.velocity[axis]);
                    }
                    let limit = bounds.half_extents[axis] + before.velocity[axis].abs() + 1e-4;
                    assert!(body.position[axis].abs() <= limit);
                }
            }
        }
    }

    #[test]
    fn test_model_matrix_places_body() {
        let body = FloatingBody {
            shape: Shape::Torus,
            material: 1,
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: DVec3::ZERO,
            scale: 2.0,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
        };
        let p = body.model_matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(3.0, 2.0, 3.0)).length() < 1e-6);
    }

    #[test]
    fn test_rotation_keeps_advancing_after_long_uptime() {
        let bounds = BodySettings::default().bounds;
        let mut body = FloatingBody {
            shape: Shape::Octahedron,
            material: 0,
            position: Vec3::ZERO,
            rotation: DVec3::splat(70_000.0),
            scale: 1.0,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::new(0.001, -0.002, 0.003),
        };

        for _ in 0..1000 {
            body.step(&bounds);
        }

        let expected = DVec3::splat(70_000.0) + body.angular_velocity.as_dvec3() * 1000.0;
        assert!((body.rotation - expected).abs().max_element() < 1e-6);
    }
}
