//! Input handling module
//!
//! Maps raw key events to semantic actions.

mod input_mapper;

pub use input_mapper::{InputAction, InputMapper};
