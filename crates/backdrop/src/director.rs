//! Owns the whole backdrop and runs its per-frame update.

use crate::camera::Camera;
use crate::error::SceneError;
use crate::pointer::{PointerState, PointerTracker};
use crate::scene::{Scene, SceneSettings};
use crate::surface::{FrameTarget, MountPoint, RenderSurface};
use crate::viewport::Viewport;
use glam::{DVec2, DVec3};
use rand::Rng;

pub struct SceneDirector<T> {
    surface: RenderSurface<T>,
    scene: Scene,
    pointer: PointerTracker,
    settings: SceneSettings,
    frame: u64,
}

impl<T: FrameTarget> SceneDirector<T> {
    /// Attaches a drawing surface to `mount` and populates the scene.
    ///
    /// Fails with [`SceneError::MissingMountPoint`] when there is nowhere to
    /// attach, or with whatever the mount point reports when the surface
    /// cannot be created. No frame is drawn here.
    pub fn initialize<M, R>(
        mount: Option<M>,
        viewport: Viewport,
        settings: SceneSettings,
        rng: &mut R,
    ) -> Result<Self, SceneError>
    where
        M: MountPoint<Target = T>,
        R: Rng + ?Sized,
    {
        let mount = mount.ok_or(SceneError::MissingMountPoint)?;
        let target = mount.attach(viewport)?;

        let camera = Camera::new(&settings.camera, viewport);
        let surface = RenderSurface::new(target, camera, viewport);
        let scene = Scene::populate(&settings, rng);

        log::info!(
            "Scene initialized: {} bodies, {} particles, viewport {}x{}",
            scene.bodies.len(),
            scene.particles.len(),
            viewport.width,
            viewport.height
        );

        Ok(Self {
            surface,
            scene,
            pointer: PointerTracker::new(),
            settings,
            frame: 0,
        })
    }

    /// Resizes the surface and updates the camera aspect.
    pub fn on_resize(&mut self, viewport: Viewport) {
        self.surface.resize(viewport);
    }

    /// Records the pointer position given in viewport pixels.
    pub fn on_pointer_move(&mut self, raw_x: f64, raw_y: f64) -> PointerState {
        self.pointer.update(raw_x, raw_y, self.surface.viewport())
    }

    /// Advances the simulation by one frame without drawing.
    pub fn update(&mut self) {
        self.scene.advance(&self.settings.bodies.bounds);

        let cam = &self.settings.camera;
        let pointer = self.pointer.state();
        let target = DVec2::new(pointer.x as f64, pointer.y as f64) * cam.parallax;

        let camera = self.surface.camera_mut();
        camera.ease_towards(target, cam.damping);
        camera.look_at(DVec3::ZERO);

        self.frame += 1;
    }

    /// One frame: update everything, then draw once.
    pub fn tick(&mut self) -> Result<(), SceneError> {
        self.update();
        log::trace!("Frame {}", self.frame);
        self.surface.present(&self.scene)
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        self.surface.camera()
    }

    #[inline]
    pub fn pointer(&self) -> PointerState {
        self.pointer.state()
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.surface.viewport()
    }

    #[inline]
    pub fn surface(&self) -> &RenderSurface<T> {
        &self.surface
    }

    #[inline]
    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    /// Number of frames advanced so far.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}
