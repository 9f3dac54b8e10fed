//! wgpu render backend for the toybox scene.
//!
//! Draws every object as an instance of a unit sphere or unit cube, shaded
//! by a single ambient light, with 4x MSAA.
//!
//! # Invariants
//! - Renderer never mutates the scene.
//! - Instance buffers grow with the registry; nothing is dropped from a frame.

mod gpu;
mod mesh;
mod shaders;

pub use gpu::{SAMPLE_COUNT, WgpuRenderer};
