//! Wireframe globe spinning at the center of the scene.

use crate::geometry::Mesh;
use crate::material::WireMaterial;
use glam::{DMat4, Mat4};

#[derive(Debug, Clone)]
pub struct GlobeSettings {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    /// Radians added to the Y rotation every frame.
    pub spin: f64,
}

impl Default for GlobeSettings {
    fn default() -> Self {
        Self {
            radius: 5.0,
            width_segments: 32,
            height_segments: 32,
            spin: 0.002,
        }
    }
}

/// Wireframe sphere spinning about the vertical axis.
#[derive(Debug, Clone)]
pub struct Globe {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub material: WireMaterial,
    rotation_y: f64,
    spin: f64,
}

impl Globe {
    pub fn new(settings: &GlobeSettings) -> Self {
        Self {
            radius: settings.radius,
            width_segments: settings.width_segments,
            height_segments: settings.height_segments,
            material: WireMaterial::default(),
            rotation_y: 0.0,
            spin: settings.spin,
        }
    }

    #[inline]
    pub fn spin(&mut self) {
        self.rotation_y += self.spin;
    }

    #[inline]
    pub fn rotation_y(&self) -> f64 {
        self.rotation_y
    }

    /// Sphere geometry; draw it with [`Mesh::edges`].
    pub fn mesh(&self) -> Mesh {
        Mesh::sphere(self.radius, self.width_segments, self.height_segments)
    }

    pub fn model_matrix(&self) -> Mat4 {
        DMat4::from_rotation_y(self.rotation_y).as_mat4()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_accumulates_without_wrapping() {
        let mut globe = Globe::new(&GlobeSettings::default());
        let mut last = globe.rotation_y();

        for _ in 0..5000 {
            globe.spin();
            assert!(globe.rotation_y() > last);
            last = globe.rotation_y();
        }

        // 10 rad is past 2π; no wraparound is applied.
        assert!((globe.rotation_y() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_spin_still_advances_at_large_angle() {
        let mut globe = Globe::new(&GlobeSettings::default());
        globe.rotation_y = 65_536.0;

        for _ in 0..1000 {
            globe.spin();
        }

        assert!((globe.rotation_y() - 65_538.0).abs() < 1e-6);
    }

    #[test]
    fn test_model_matrix_at_large_angle() {
        let mut globe = Globe::new(&GlobeSettings::default());
        globe.rotation_y = 1000.0 * std::f64::consts::TAU + std::f64::consts::FRAC_PI_2;

        // A quarter turn about Y takes +X to -Z.
        let p = globe.model_matrix().transform_point3(glam::Vec3::X);
        assert!((p - glam::Vec3::NEG_Z).length() < 1e-5);
    }
}
