//! Solar System Rendering Library
//!
//! This crate provides the wgpu-based pipelines that draw the bodies of a
//! [`SolarSystem`] at their placements for one frame.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::ViewCamera`] - Fixed viewpoint and perspective projection
//! - [`lighting::LightingFlags`] - Which lighting terms are switched on
//! - [`pipeline::WirePipeline`] - Flat-colored wireframe spheres
//! - [`pipeline::LitPipeline`] - Textured spheres lit by the star
//! - [`texture::TextureCache`] - Bitmap textures loaded once per path
//! - [`renderable::RenderableBodies`] - Converts placements to GPU instances

pub mod context;
pub mod camera;
pub mod lighting;
pub mod mesh;
pub mod pipeline;
pub mod renderable;
pub mod texture;

// Re-export core types for convenience
pub use solar_core::{AnimationClock, BodyKind, PlacedBody, SolarSystem};

pub use camera::ViewCamera;
pub use lighting::LightingFlags;
pub use renderable::RenderableBodies;
