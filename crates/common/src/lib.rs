//! Shared value types for the toybox scene.
//!
//! Everything here is plain data plus the camera math both the input
//! router and the renderers need.

pub mod camera;
pub mod types;

pub use camera::PerspectiveCamera;
pub use types::{
    Color, Geometry, Material, ObjectHandle, PALETTE, ShapeKind, Transform,
};
