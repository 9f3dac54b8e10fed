//! Toybox kernel: the scene registry and everything that mutates it.
//!
//! # Invariants
//! - The registry only grows; handles stay valid for the whole session.
//! - Animators run once per frame in a fixed order: spin, kinetic, bounce.
//! - Delayed effects (color restore, bounce expiry) are independent timer
//!   tasks that fire before anything else that happens at or after their
//!   deadline.

pub mod animate;
pub mod effects;
pub mod factory;
pub mod object;
pub mod playground;
pub mod scene;
pub mod timers;

pub use effects::Effect;
pub use factory::ObjectFactory;
pub use object::{BounceParams, VisualObject};
pub use playground::Playground;
pub use scene::{Scene, SceneError};
pub use timers::{TimerQueue, TimerTask};
