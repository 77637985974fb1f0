//! Application systems
//!
//! The pieces `main` wires together: the animation driver, the window, and
//! the renderer.

mod render;
mod simulation;
mod window;

pub use render::{frame_uniforms, RenderError, RenderSystem};
pub use simulation::{FrameState, SimulationSystem};
pub use window::{format_title, WindowError, WindowSystem};
