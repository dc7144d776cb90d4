//! The seam between the scene engine and whatever draws it.

use crate::camera::Camera;
use crate::error::SceneError;
use crate::scene::Scene;
use crate::viewport::Viewport;

/// Read-only view of one frame handed to the drawing backend.
pub struct Frame<'a> {
    pub camera: &'a Camera,
    pub viewport: Viewport,
    pub scene: &'a Scene,
}

/// A drawing backend sized to the viewport.
pub trait FrameTarget {
    /// Matches the drawing buffer to a new viewport. Never called with an
    /// empty viewport.
    fn resize(&mut self, viewport: Viewport);

    /// Draws one frame. Errors end the frame loop.
    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), SceneError>;
}

/// Host element that can carry a drawing surface.
pub trait MountPoint {
    type Target: FrameTarget;

    /// Creates the drawing surface and attaches it to the host.
    fn attach(self, viewport: Viewport) -> Result<Self::Target, SceneError>;
}

/// Drawing target plus the perspective camera looking through it.
pub struct RenderSurface<T> {
    target: T,
    camera: Camera,
    viewport: Viewport,
}

impl<T: FrameTarget> RenderSurface<T> {
    pub fn new(target: T, camera: Camera, viewport: Viewport) -> Self {
        Self {
            target,
            camera,
            viewport,
        }
    }

    /// Applies a new viewport to the camera and the target.
    ///
    /// Idempotent. Empty viewports are ignored so the last valid size stays.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport.is_empty() {
            log::debug!("Ignoring empty viewport {}x{}", viewport.width, viewport.height);
            return;
        }

        self.viewport = viewport;
        self.camera.set_aspect(viewport);
        self.target.resize(viewport);
        log::debug!(
            "Surface resized to {}x{} (aspect {:.3})",
            viewport.width,
            viewport.height,
            self.camera.aspect
        );
    }

    /// Draws `scene` through the current camera.
    pub fn present(&mut self, scene: &Scene) -> Result<(), SceneError> {
        let frame = Frame {
            camera: &self.camera,
            viewport: self.viewport,
            scene,
        };
        self.target.draw(&frame)
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn target(&self) -> &T {
        &self.target
    }
}
