//! Scene animation engine for the animated 3D page backdrop.
//!
//! The crate is headless: it owns the simulated state (particle field,
//! floating bodies, globe, camera, pointer) and hands a [`Frame`] to a
//! [`FrameTarget`] once per tick. Drawing is done by whatever implements that
//! trait, e.g. the `wgpu` renderer in `backdrop-viewer`.

pub mod bodies;
pub mod camera;
pub mod director;
pub mod error;
pub mod geometry;
pub mod globe;
pub mod lights;
pub mod material;
pub mod particles;
pub mod pointer;
pub mod scene;
pub mod surface;
pub mod viewport;

pub use bodies::{generate_bodies, BodySettings, Bounds, FloatingBody};
pub use camera::{Camera, CameraSettings};
pub use director::SceneDirector;
pub use error::{BoxError, SceneError};
pub use geometry::{Mesh, Shape};
pub use globe::{Globe, GlobeSettings};
pub use lights::{AmbientLight, DirectionalLight, Lighting, PointLight};
pub use material::{Color, Material, PointMaterial, WireMaterial};
pub use particles::{ParticleField, ParticleSettings};
pub use pointer::{PointerState, PointerTracker};
pub use scene::{Scene, SceneSettings};
pub use surface::{Frame, FrameTarget, MountPoint, RenderSurface};
pub use viewport::Viewport;
