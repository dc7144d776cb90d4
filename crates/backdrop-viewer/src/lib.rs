// src/lib.rs
//! Native host for the animated backdrop.
//!
//! A `winit` window acts as the mount point, a `wgpu` renderer draws the
//! frames produced by [`backdrop::SceneDirector`], and the event loop drives
//! one tick per display refresh.

pub mod app;
pub mod config;
pub mod data;
pub mod renderer;
