//! Everything that is simulated and drawn, minus the camera.

use crate::bodies::{generate_bodies, BodySettings, Bounds, FloatingBody};
use crate::camera::CameraSettings;
use crate::geometry::Shape;
use crate::globe::{Globe, GlobeSettings};
use crate::lights::Lighting;
use crate::material::Material;
use crate::particles::{ParticleField, ParticleSettings};
use rand::Rng;

/// All tunables of the backdrop. `Default` reproduces the stock look.
#[derive(Debug, Clone, Default)]
pub struct SceneSettings {
    pub particles: ParticleSettings,
    pub bodies: BodySettings,
    pub globe: GlobeSettings,
    pub camera: CameraSettings,
}

#[derive(Debug, Clone)]
pub struct Scene {
    pub lighting: Lighting,
    pub materials: Vec<Material>,
    pub particles: ParticleField,
    pub globe: Globe,
    pub bodies: Vec<FloatingBody>,
}

impl Scene {
    /// Builds lights, the starfield, the globe and the randomly placed bodies.
    pub fn populate<R: Rng + ?Sized>(settings: &SceneSettings, rng: &mut R) -> Self {
        let materials = Material::palette();
        let particles = ParticleField::generate(&settings.particles, rng);
        let globe = Globe::new(&settings.globe);
        let bodies = generate_bodies(
            settings.bodies.count,
            &Shape::ALL,
            &materials,
            &settings.bodies,
            rng,
        );

        Self {
            lighting: Lighting::default(),
            materials,
            particles,
            globe,
            bodies,
        }
    }

    /// Advances the starfield, every body, and the globe by one frame.
    pub fn advance(&mut self, bounds: &Bounds) {
        self.particles.spin();

        for body in &mut self.bodies {
            body.step(bounds);
        }

        self.globe.spin();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_populate_uses_settings() {
        let mut settings = SceneSettings::default();
        settings.bodies.count = 4;
        settings.particles.count = 100;

        let scene = Scene::populate(&settings, &mut StdRng::seed_from_u64(3));
        assert_eq!(scene.bodies.len(), 4);
        assert_eq!(scene.particles.len(), 100);
        assert_eq!(scene.materials.len(), 3);
    }

    #[test]
    fn test_advance_moves_every_entity() {
        let settings = SceneSettings::default();
        let mut scene = Scene::populate(&settings, &mut StdRng::seed_from_u64(3));
        let before = scene.bodies.clone();

        scene.advance(&settings.bodies.bounds);

        assert!(scene.particles.rotation_y() > 0.0);
        assert!(scene.globe.rotation_y() > 0.0);
        for (old, new) in before.iter().zip(&scene.bodies) {
            assert_eq!(new.position, old.position + old.velocity);
            assert_eq!(new.rotation, old.rotation + old.angular_velocity.as_dvec3());
        }
    }
}
