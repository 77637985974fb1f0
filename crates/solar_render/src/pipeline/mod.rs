//! Rendering pipeline components
//!
//! Both pipelines draw the same instances from unit sphere meshes and share
//! the per-frame uniforms; they differ in topology and shading.

pub mod types;
pub mod buffers;
pub mod wire_pipeline;
pub mod lit_pipeline;

// Re-export types
pub use types::{BodyInstance, FrameUniforms, MeshVertex};

// Re-export pipelines
pub use buffers::{DepthTarget, InstanceBuffer, DEPTH_FORMAT};
pub use wire_pipeline::WirePipeline;
pub use lit_pipeline::LitPipeline;
