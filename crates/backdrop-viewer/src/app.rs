//! Glue between the winit window and the scene director.

use crate::{config::Config, renderer::Renderer};
use backdrop::{MountPoint, SceneDirector, SceneError, Viewport};
use rand::Rng;
use std::sync::Arc;
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    window::Window,
};

/// Window size in logical pixels, the unit the scene works in.
pub fn logical_viewport(size: PhysicalSize<u32>, scale_factor: f64) -> Viewport {
    let logical: LogicalSize<f64> = size.to_logical(scale_factor);
    Viewport::new(logical.width.round() as u32, logical.height.round() as u32)
}

/// A native window that can carry the drawing surface.
pub struct WindowMount {
    pub window: Arc<Window>,
    pub config: Config,
}

impl MountPoint for WindowMount {
    type Target = Renderer;

    fn attach(self, viewport: Viewport) -> Result<Renderer, SceneError> {
        pollster::block_on(Renderer::new(self.window, viewport, &self.config))
            .map_err(SceneError::surface_creation)
    }
}

pub struct App {
    pub director: SceneDirector<Renderer>,
}

impl App {
    /// Mounts the backdrop on `window`. `None` means the window could not be
    /// created and fails with [`SceneError::MissingMountPoint`].
    pub fn new<R: Rng + ?Sized>(
        window: Option<Arc<Window>>,
        config: &Config,
        rng: &mut R,
    ) -> Result<Self, SceneError> {
        let viewport = window
            .as_deref()
            .map(|w| logical_viewport(w.inner_size(), w.scale_factor()))
            .unwrap_or_else(|| Viewport::new(config.width, config.height));

        let mount = window.map(|window| WindowMount {
            window,
            config: config.clone(),
        });

        let director = SceneDirector::initialize(mount, viewport, config.scene_settings(), rng)?;
        Ok(Self { director })
    }

    #[inline]
    pub fn window(&self) -> &Window {
        self.director.surface().target().window()
    }

    /// Handles resize and pointer events. Returns `true` if consumed.
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::Resized(size) => {
                let viewport = logical_viewport(*size, self.window().scale_factor());
                self.director.on_resize(viewport);
                true
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                // `inner_size()` is still the old physical size here. The
                // logical size is kept, so reapply it at the new ratio; a
                // `Resized` follows if the window actually changes.
                log::debug!("Scale factor changed to {}", scale_factor);
                self.director.on_resize(self.director.viewport());
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f64>(self.window().scale_factor());
                let pointer = self.director.on_pointer_move(logical.x, logical.y);
                log::trace!("Pointer at ({:.3}, {:.3})", pointer.x, pointer.y);
                true
            }
            _ => false,
        }
    }

    /// Advances and draws one frame.
    pub fn tick(&mut self) -> Result<(), SceneError> {
        self.director.tick()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_viewport_divides_scale() {
        let vp = logical_viewport(PhysicalSize::new(2560, 1440), 2.0);
        assert_eq!(vp, Viewport::new(1280, 720));
    }

    #[test]
    fn test_logical_viewport_after_scale_change() {
        // 1280x720 logical moved from a 1x to a 1.5x display.
        let vp = logical_viewport(PhysicalSize::new(1920, 1080), 1.5);
        assert_eq!(vp, Viewport::new(1280, 720));
    }

    #[test]
    fn test_logical_viewport_keeps_empty() {
        let vp = logical_viewport(PhysicalSize::new(0, 900), 1.0);
        assert!(vp.is_empty());
    }
}
