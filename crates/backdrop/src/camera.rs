//! Perspective camera that drifts towards the pointer.

use crate::viewport::Viewport;
use glam::{DVec2, DVec3, Mat4};

/// Fixed camera parameters.
#[derive(Debug, Clone)]
pub struct CameraSettings {
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Starting distance from the origin along +Z.
    pub distance: f64,
    /// Pointer-to-world scale for the easing target.
    pub parallax: f64,
    /// Fraction of the remaining distance covered per frame.
    pub damping: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_y_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            distance: 15.0,
            parallax: 5.0,
            damping: 0.05,
        }
    }
}

/// Perspective camera that always looks at a target point.
#[derive(Debug, Clone)]
pub struct Camera {
    /// World-space position. Kept in f64 so easing settles well below 1e-6.
    pub position: DVec3,
    /// Point the camera aims at.
    pub target: DVec3,
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    proj: Mat4,
    view: Mat4,
}

impl Camera {
    /// Creates a camera on the +Z axis looking at the origin.
    pub fn new(settings: &CameraSettings, viewport: Viewport) -> Self {
        let mut camera = Self {
            position: DVec3::new(0.0, 0.0, settings.distance),
            target: DVec3::ZERO,
            fov_y_deg: settings.fov_y_deg,
            aspect: viewport.aspect(),
            near: settings.near,
            far: settings.far,
            proj: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
        };

        camera.update_projection();
        camera.look_at(DVec3::ZERO);
        camera
    }

    /// Updates the aspect ratio from the viewport and rebuilds the projection.
    pub fn set_aspect(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
        self.update_projection();
    }

    /// Rebuilds the projection matrix. Call after changing fov, aspect or clip planes.
    pub fn update_projection(&mut self) {
        // Right-handed, depth in [0, 1].
        self.proj = Mat4::perspective_rh(
            self.fov_y_deg.to_radians(),
            self.aspect,
            self.near,
            self.far,
        );
    }

    /// Aims the camera at `target` with +Y as up.
    pub fn look_at(&mut self, target: DVec3) {
        self.target = target;
        self.view = Mat4::look_at_rh(
            self.position.as_vec3(),
            self.target.as_vec3(),
            glam::Vec3::Y,
        );
    }

    /// Moves x/y one step of a first-order low-pass filter towards `target`.
    ///
    /// `new = old + (target - old) * damping`. The view matrix is not
    /// refreshed; follow with [`look_at`](Self::look_at).
    pub fn ease_towards(&mut self, target: DVec2, damping: f64) {
        self.position.x += (target.x - self.position.x) * damping;
        self.position.y += (target.y - self.position.y) * damping;
    }

    #[inline]
    pub fn projection_matrix(&self) -> Mat4 {
        self.proj
    }

    #[inline]
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    /// Combined view-projection matrix.
    pub fn view_projection(&self) -> Mat4 {
        self.proj * self.view
    }

    /// Distance along the view direction; larger is farther away.
    pub fn view_depth(&self, world: glam::Vec3) -> f32 {
        -(self.view * world.extend(1.0)).z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn camera() -> Camera {
        Camera::new(&CameraSettings::default(), Viewport::new(800, 600))
    }

    #[test]
    fn test_starts_on_z_axis_looking_at_origin() {
        let cam = camera();
        assert_eq!(cam.position, DVec3::new(0.0, 0.0, 15.0));
        let clip = cam.view_projection() * Vec3::ZERO.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!((0.0..=1.0).contains(&ndc.z));
    }

    #[test]
    fn test_set_aspect_rebuilds_projection() {
        let mut cam = camera();
        let before = cam.projection_matrix();
        cam.set_aspect(Viewport::new(1600, 600));
        assert!((cam.aspect - 1600.0 / 600.0).abs() < 1e-6);
        assert_ne!(before, cam.projection_matrix());
    }

    #[test]
    fn test_easing_converges_monotonically() {
        let mut cam = camera();
        let target = DVec2::new(5.0, 5.0);
        let mut last_gap = (target.x - cam.position.x).abs();

        for _ in 0..200 {
            cam.ease_towards(target, 0.05);
            let gap = (target.x - cam.position.x).abs();
            assert!(gap < last_gap);
            last_gap = gap;
        }

        assert!(last_gap < 1e-3);
        assert!((target.y - cam.position.y).abs() < 1e-3);
        assert_eq!(cam.position.z, 15.0);
    }

    #[test]
    fn test_view_depth_grows_away_from_camera() {
        let cam = camera();
        assert!(cam.view_depth(Vec3::new(0.0, 0.0, -5.0)) > cam.view_depth(Vec3::ZERO));
        assert!((cam.view_depth(Vec3::ZERO) - 15.0).abs() < 1e-5);
    }
}
