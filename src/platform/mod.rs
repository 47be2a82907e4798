//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame pacing (fixed tick rate on any refresh rate)
//! - Viewport size and device pixel ratio
//! - Page hide/show lifecycle (back/forward cache)
//! - Browser listener/animation-frame lifetimes (wasm32 only)

pub mod clock;
pub mod lifecycle;
pub mod viewport;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use clock::FrameClock;
pub use lifecycle::{PageAction, PageLifecycle};
pub use viewport::Viewport;
