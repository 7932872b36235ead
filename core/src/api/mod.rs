//! The host-facing surface.

mod engine;

pub use engine::Engine;
