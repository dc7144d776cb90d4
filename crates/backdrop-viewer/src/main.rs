//! Entry point for the backdrop viewer.

use anyhow::Result;
use backdrop_viewer::{app::App, config::Config};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use std::sync::Arc;
use winit::{
    dpi::LogicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

fn main() -> Result<()> {
    // Initialize logging; default to "info" if RUST_LOG is unset.
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    let config = Config::parse();
    log::debug!("{:?}", config);

    let event_loop = EventLoop::new()?;

    // A window that cannot be created leaves nothing to mount on.
    let window = WindowBuilder::new()
        .with_title("Backdrop")
        .with_inner_size(LogicalSize::new(config.width, config.height))
        .with_transparent(!config.opaque)
        .build(&event_loop)
        .map_err(|err| log::error!("Failed to create window: {}", err))
        .ok()
        .map(Arc::new);

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut app = App::new(window, &config, &mut rng).map_err(|err| {
        log::error!("Backdrop failed to start: {}", err);
        err
    })?;

    // Run the winit event loop.
    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { window_id, event } if window_id == app.window().id() => {
                if !app.handle_event(&event) {
                    match event {
                        WindowEvent::CloseRequested => elwt.exit(),
                        WindowEvent::KeyboardInput { event, .. } => {
                            if event.physical_key == PhysicalKey::Code(KeyCode::Escape) {
                                elwt.exit();
                            }
                        }
                        WindowEvent::RedrawRequested => {
                            if let Err(err) = app.tick() {
                                log::error!("Frame loop stopped: {}", err);
                                elwt.exit();
                            }
                        }
                        _ => {}
                    }
                }
            }
            Event::AboutToWait => {
                // One frame per display refresh.
                app.window().request_redraw();
            }
            _ => {}
        }
    })?;

    Ok(())
}
