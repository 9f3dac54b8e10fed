//! Rendering adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read the scene; they never mutate it.
//! - Draw data derives from the scene and the camera alone.

mod draw;
mod renderer;

pub use draw::{DrawList, Instance};
pub use renderer::{DebugTextRenderer, Renderer};

/// Clear color behind the scene (alice blue).
pub const BACKGROUND: toybox_common::Color = toybox_common::Color(0xf0f8ff);
/// Intensity of the single white ambient light.
pub const AMBIENT_INTENSITY: f32 = 0.8;
