//! The rendering backend. Owns the GPU context, render targets, and the
//! pipelines for each kind of scene entity.

pub mod context;
pub mod pipelines;
pub mod targets;

use self::{
    context::GfxContext,
    pipelines::{lit_mesh::LitMeshPipeline, starfield::StarfieldPipeline, wireframe::WireframePipeline},
    targets::Targets,
};
use crate::config::Config;
use backdrop::{Frame, FrameTarget, SceneError, Viewport};
use std::sync::Arc;
use winit::{dpi::PhysicalSize, window::Window};

/// Drawing-buffer size for a logical viewport, with the device pixel ratio
/// capped at `max_pixel_ratio`.
pub fn drawing_buffer_size(
    viewport: Viewport,
    scale_factor: f64,
    max_pixel_ratio: f64,
) -> PhysicalSize<u32> {
    let ratio = scale_factor.min(max_pixel_ratio);
    let scale = |px: u32| ((px as f64 * ratio).round() as u32).max(1);
    PhysicalSize::new(scale(viewport.width), scale(viewport.height))
}

/// Owns all rendering-related state.
pub struct Renderer {
    pub gfx: GfxContext,
    pub targets: Targets,
    pub starfield: StarfieldPipeline,
    pub globe: WireframePipeline,
    pub bodies: LitMeshPipeline,
    window: Arc<Window>,
    max_pixel_ratio: f64,
    clear: wgpu::Color,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, viewport: Viewport, config: &Config) -> anyhow::Result<Self> {
        let size = drawing_buffer_size(viewport, window.scale_factor(), config.max_pixel_ratio);
        let gfx = GfxContext::new(window.clone(), size, !config.opaque).await?;

        let targets = Targets::new(&gfx.device, size, gfx.config.format, config.sample_count());
        let starfield = StarfieldPipeline::new(
            &gfx.device,
            targets.color_fmt,
            targets.depth_fmt,
            targets.sample_count,
        );
        let globe = WireframePipeline::new(
            &gfx.device,
            targets.color_fmt,
            targets.depth_fmt,
            targets.sample_count,
        );
        let bodies = LitMeshPipeline::new(
            &gfx.device,
            targets.color_fmt,
            targets.depth_fmt,
            targets.sample_count,
        );

        // Alpha blending over a zero clear leaves premultiplied colour behind,
        // which is what the compositor expects from a transparent surface.
        let clear = if config.opaque {
            wgpu::Color::BLACK
        } else {
            wgpu::Color::TRANSPARENT
        };

        log::info!(
            "Renderer ready: {}x{} px, {:?}, {}x MSAA",
            size.width,
            size.height,
            gfx.config.format,
            targets.sample_count
        );

        Ok(Self {
            gfx,
            targets,
            starfield,
            globe,
            bodies,
            window,
            max_pixel_ratio: config.max_pixel_ratio,
            clear,
        })
    }

    #[inline]
    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl FrameTarget for Renderer {
    fn resize(&mut self, viewport: Viewport) {
        let size = drawing_buffer_size(viewport, self.window.scale_factor(), self.max_pixel_ratio);
        self.gfx.resize(size);
        self.targets.resize(&self.gfx.device, size);
    }

    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), SceneError> {
        let output = match self.gfx.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(err @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                log::warn!("Surface {:?}; reconfiguring and skipping frame", err);
                self.gfx.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timed out; skipping frame");
                return Ok(());
            }
            Err(err) => return Err(SceneError::draw(err)),
        };
        let swap_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let buffer_size = [self.gfx.config.width as f32, self.gfx.config.height as f32];
        self.starfield.prepare(&self.gfx.device, &self.gfx.queue, frame, buffer_size);
        self.globe.prepare(&self.gfx.device, &self.gfx.queue, frame);
        self.bodies.prepare(&self.gfx.device, &self.gfx.queue, frame);

        let mut encoder = self
            .gfx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        // With MSAA we draw into the multisampled target and resolve into
        // the swap chain image.
        let (view, resolve_target) = match self.targets.msaa.as_ref() {
            Some(msaa) => (msaa, Some(&swap_view)),
            None => (&swap_view, None),
        };

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Backdrop Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Background first, then the globe, then translucent bodies far to near.
            self.starfield.draw(&mut pass);
            self.globe.draw(&mut pass);
            self.bodies.draw(&mut pass);
        }

        self.gfx.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_size_follows_scale_factor() {
        let size = drawing_buffer_size(Viewport::new(1280, 720), 1.5, 2.0);
        assert_eq!(size, PhysicalSize::new(1920, 1080));
    }

    #[test]
    fn test_pixel_ratio_is_capped() {
        let size = drawing_buffer_size(Viewport::new(1280, 720), 3.0, 2.0);
        assert_eq!(size, PhysicalSize::new(2560, 1440));
    }

    #[test]
    fn test_buffer_never_zero() {
        let size = drawing_buffer_size(Viewport::new(0, 0), 1.0, 2.0);
        assert_eq!(size, PhysicalSize::new(1, 1));
    }
}
