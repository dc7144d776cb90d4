//! Scene lights.

use crate::material::Color;
use glam::Vec3;

#[derive(Debug, Clone, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

/// Parallel light shining from `position` towards the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
}

impl DirectionalLight {
    /// Unit vector pointing from the scene towards the light.
    pub fn direction(&self) -> Vec3 {
        self.position.normalize_or_zero()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
    /// Distance at which the light fades out. Zero disables falloff.
    pub range: f32,
}

impl PointLight {
    /// Linear falloff factor at `distance`. Must match the lit mesh shader.
    pub fn attenuation(&self, distance: f32) -> f32 {
        if self.range <= 0.0 {
            return 1.0;
        }
        (1.0 - distance / self.range).clamp(0.0, 1.0)
    }
}

/// The three lights of the backdrop.
#[derive(Debug, Clone, PartialEq)]
pub struct Lighting {
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
    pub point: PointLight,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                color: Color::WHITE,
                intensity: 0.5,
            },
            directional: DirectionalLight {
                color: Color::from_hex(0x2563eb),
                intensity: 0.8,
                position: Vec3::new(1.0, 1.0, 1.0),
            },
            point: PointLight {
                color: Color::from_hex(0x06d6a0),
                intensity: 0.5,
                position: Vec3::new(-2.0, -1.0, 3.0),
                range: 100.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_light_falloff() {
        let light = Lighting::default().point;
        assert_eq!(light.attenuation(0.0), 1.0);
        assert!((light.attenuation(50.0) - 0.5).abs() < 1e-6);
        assert_eq!(light.attenuation(250.0), 0.0);
    }

    #[test]
    fn test_zero_range_disables_falloff() {
        let light = PointLight {
            range: 0.0,
            ..Lighting::default().point
        };
        assert_eq!(light.attenuation(1e6), 1.0);
    }

    #[test]
    fn test_directional_light_points_towards_source() {
        let dir = Lighting::default().directional.direction();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.x > 0.0 && dir.y > 0.0 && dir.z > 0.0);
    }
}
