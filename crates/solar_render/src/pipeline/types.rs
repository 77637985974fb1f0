//! GPU-compatible data types for the sphere pipelines
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use solar_math::mat4;

/// A vertex of the unit sphere mesh
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Position on the unit sphere
    pub position: [f32; 3],
    /// Outward normal (equal to the position on a unit sphere)
    pub normal: [f32; 3],
    /// Texture coordinates, u around the equator and v from pole to pole
    pub uv: [f32; 2],
}

impl MeshVertex {
    /// Get the vertex buffer layout (per-vertex, locations 0..=2)
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
            0 => Float32x3,
            1 => Float32x3,
            2 => Float32x2
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Per-body instance data
///
/// Layout: 96 bytes (must match `InstanceInput` in the shaders)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    /// Model matrix: placement, spin, and scale (64 bytes)
    pub model: [[f32; 4]; 4],
    /// RGBA color; tints the texture in the lit pipeline (16 bytes)
    pub color: [f32; 4],
    /// 1.0 for bodies that emit light and are drawn unlit
    pub emissive: f32,
    pub _padding: [f32; 3],
}

impl BodyInstance {
    /// Create an instance from a model matrix and an RGB color
    pub fn new(model: [[f32; 4]; 4], rgb: [f32; 3], emissive: bool) -> Self {
        Self {
            model,
            color: [rgb[0], rgb[1], rgb[2], 1.0],
            emissive: if emissive { 1.0 } else { 0.0 },
            _padding: [0.0; 3],
        }
    }

    /// Get the vertex buffer layout (per-instance, locations 3..=8)
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
            3 => Float32x4,
            4 => Float32x4,
            5 => Float32x4,
            6 => Float32x4,
            7 => Float32x4,
            8 => Float32
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BodyInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRIBUTES,
        }
    }
}

impl Default for BodyInstance {
    fn default() -> Self {
        Self::new(mat4::IDENTITY, [1.0, 1.0, 1.0], false)
    }
}

/// Per-frame uniforms shared by both pipelines
/// Layout: 176 bytes total (must match `FrameUniforms` in the shaders)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    /// View matrix (64 bytes)
    pub view_matrix: [[f32; 4]; 4],
    /// Projection matrix (64 bytes)
    pub projection_matrix: [[f32; 4]; 4],
    /// Light position in view space + padding (16 bytes)
    pub light_position: [f32; 3],
    pub _padding: f32,
    /// Lighting parameters (16 bytes)
    pub ambient_strength: f32,
    pub diffuse_strength: f32,
    pub specular_strength: f32,
    pub shininess: f32,
    /// Enabled terms as [`LightingFlags`](crate::LightingFlags) bits + padding (16 bytes)
    pub lighting_flags: u32,
    pub _padding2: [u32; 3],
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            view_matrix: mat4::IDENTITY,
            projection_matrix: mat4::IDENTITY,
            light_position: [0.0; 3],
            _padding: 0.0,
            ambient_strength: 0.15,
            diffuse_strength: 1.0,
            specular_strength: 0.3,
            shininess: 16.0,
            lighting_flags: 0,
            _padding2: [0; 3],
        }
    }
}
