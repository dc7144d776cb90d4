// src/data/mod.rs
//! GPU-side data for the backdrop.
//!
//! This module provides:
//! - The POD vertex and uniform layouts shared with the WGSL shaders.
//! - Uploading of procedural meshes and the starfield into GPU buffers.

pub mod meshes;
pub mod types;

pub use self::meshes::{LineMeshGpu, MeshGpu};
pub use self::types::{
    BodyUniform, LitSceneUniform, MeshVertex, PointInstance, PointsUniform, WireUniform,
};
