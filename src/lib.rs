//! Solar system animation
//!
//! Application layer shared by the binary and the integration tests:
//! configuration, key mapping, and the systems driving each frame.

pub mod config;
pub mod input;
pub mod systems;
