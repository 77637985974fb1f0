//! Sphere meshes on the GPU
//!
//! Every body is drawn from a unit sphere scaled by its model matrix, so only
//! a handful of meshes exist: one smooth triangle mesh for the lit pipeline,
//! and one line mesh per [`BodyKind`] for the wireframe pipeline.

use solar_core::BodyKind;
use solar_math::SphereMesh;
use wgpu::util::DeviceExt;

use crate::pipeline::MeshVertex;

/// Tessellation of the lit sphere as (slices, stacks)
pub const LIT_SEGMENTS: (u32, u32) = (48, 24);

/// Interleave a sphere's positions, normals, and texture coordinates
pub fn sphere_vertices(sphere: &SphereMesh) -> Vec<MeshVertex> {
    sphere
        .positions
        .iter()
        .zip(&sphere.uvs)
        .map(|(position, uv)| MeshVertex {
            position: position.to_array(),
            normal: position.normalized().to_array(),
            uv: *uv,
        })
        .collect()
}

/// An indexed mesh uploaded to the GPU
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    /// Upload a sphere with its triangle indices
    pub fn triangles(device: &wgpu::Device, sphere: &SphereMesh, label: &str) -> Self {
        Self::upload(device, &sphere_vertices(sphere), &sphere.triangles, label)
    }

    /// Upload a sphere with its line indices
    pub fn lines(device: &wgpu::Device, sphere: &SphereMesh, label: &str) -> Self {
        Self::upload(device, &sphere_vertices(sphere), &sphere.lines, label)
    }

    fn upload(device: &wgpu::Device, vertices: &[MeshVertex], indices: &[u32], label: &str) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", label)),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", label)),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!("Uploaded {}: {} vertices, {} indices", label, vertices.len(), indices.len());

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }
}

/// One wireframe mesh per body kind
pub struct WireMeshes {
    star: GpuMesh,
    planet: GpuMesh,
    moon: GpuMesh,
}

impl WireMeshes {
    /// Tessellate and upload a wire sphere for each kind
    pub fn new(device: &wgpu::Device) -> Self {
        let build = |kind: BodyKind, label: &str| {
            let (slices, stacks) = kind.wire_segments();
            GpuMesh::lines(device, &SphereMesh::uv(slices, stacks), label)
        };

        Self {
            star: build(BodyKind::Star, "Star Wire Sphere"),
            planet: build(BodyKind::Planet, "Planet Wire Sphere"),
            moon: build(BodyKind::Moon, "Moon Wire Sphere"),
        }
    }

    /// The mesh drawn for a kind of body
    pub fn for_kind(&self, kind: BodyKind) -> &GpuMesh {
        match kind {
            BodyKind::Star => &self.star,
            BodyKind::Planet => &self.planet,
            BodyKind::Moon => &self.moon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_vertices_interleave() {
        let sphere = SphereMesh::uv(8, 4);
        let vertices = sphere_vertices(&sphere);
        assert_eq!(vertices.len(), sphere.vertex_count());

        for (vertex, position) in vertices.iter().zip(&sphere.positions) {
            assert_eq!(vertex.position, position.to_array());
            let n = vertex.normal;
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 0.001);
        }
    }

    #[test]
    fn test_uvs_span_texture() {
        let vertices = sphere_vertices(&SphereMesh::uv(LIT_SEGMENTS.0, LIT_SEGMENTS.1));
        let max_u = vertices.iter().map(|v| v.uv[0]).fold(0.0, f32::max);
        let max_v = vertices.iter().map(|v| v.uv[1]).fold(0.0, f32::max);
        assert_eq!(max_u, 1.0);
        assert_eq!(max_v, 1.0);
    }
}
