//! Static starfield that only spins as a whole.

use crate::material::PointMaterial;
use glam::{DMat4, Mat4, Vec3};
use rand::Rng;

#[derive(Debug, Clone)]
pub struct ParticleSettings {
    pub count: usize,
    /// Each coordinate is drawn from `[-half_extent, half_extent]`.
    pub half_extent: f32,
    /// Radians added to the Y rotation every frame.
    pub spin: f64,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            count: 2000,
            half_extent: 25.0,
            spin: 0.001,
        }
    }
}

/// A single point cloud. Point positions are fixed after generation.
#[derive(Debug, Clone)]
pub struct ParticleField {
    positions: Vec<Vec3>,
    rotation_y: f64,
    spin: f64,
    pub material: PointMaterial,
}

impl ParticleField {
    pub fn generate<R: Rng + ?Sized>(settings: &ParticleSettings, rng: &mut R) -> Self {
        let e = settings.half_extent;
        let positions = (0..settings.count)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-e..=e),
                    rng.gen_range(-e..=e),
                    rng.gen_range(-e..=e),
                )
            })
            .collect();

        Self {
            positions,
            rotation_y: 0.0,
            spin: settings.spin,
            material: PointMaterial::default(),
        }
    }

    /// Advances the Y rotation by one frame's spin.
    #[inline]
    pub fn spin(&mut self) {
        self.rotation_y += self.spin;
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn rotation_y(&self) -> f64 {
        self.rotation_y
    }

    pub fn model_matrix(&self) -> Mat4 {
        DMat4::from_rotation_y(self.rotation_y).as_mat4()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_generates_bounded_cloud() {
        let mut rng = StdRng::seed_from_u64(7);
        let field = ParticleField::generate(&ParticleSettings::default(), &mut rng);

        assert_eq!(field.len(), 2000);
        assert!(field
            .positions()
            .iter()
            .all(|p| p.abs().max_element() <= 25.0));
    }

    #[test]
    fn test_spin_rotates_without_moving_points() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut field = ParticleField::generate(&ParticleSettings::default(), &mut rng);
        let before = field.positions().to_vec();

        for _ in 0..500 {
            field.spin();
        }

        assert_eq!(field.positions(), &before[..]);
        assert!((field.rotation_y() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_spin_keeps_full_step_after_long_uptime() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut field = ParticleField::generate(&ParticleSettings::default(), &mut rng);
        field.rotation_y = 16_000.0;

        for _ in 0..1000 {
            field.spin();
        }

        assert!((field.rotation_y() - 16_001.0).abs() < 1e-6);
    }
}
