//! Input routing: raw window input in, scene effects out.
//!
//! # Invariants
//! - Routing never touches the scene; it only yields effects for the
//!   kernel to apply.
//! - Resize only updates the camera.

pub mod event;
pub mod router;

pub use event::{InputEvent, Key};
pub use router::InputRouter;
