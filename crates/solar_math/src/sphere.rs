//! UV sphere tessellation
//!
//! Produces a unit-radius sphere whose poles lie on the Y axis, so spinning
//! a body about +Y spins its surface texture around the poles. Both a
//! triangle list (for shaded rendering) and a line list (latitude rings plus
//! longitude meridians, like a classic wire sphere) index the same vertices.

use std::f32::consts::{PI, TAU};

use crate::Vec3;

/// A unit UV sphere centered at the origin
#[derive(Clone, Debug)]
pub struct SphereMesh {
    /// Vertex positions (also the outward normals, the sphere has radius 1)
    pub positions: Vec<Vec3>,
    /// Texture coordinates, u around the equator and v from north to south pole
    pub uvs: Vec<[f32; 2]>,
    /// Triangle list indices, counter-clockwise seen from outside
    pub triangles: Vec<u32>,
    /// Line list indices for wireframe rendering
    pub lines: Vec<u32>,
    slices: u32,
    stacks: u32,
}

impl SphereMesh {
    /// Tessellate a unit sphere
    ///
    /// # Arguments
    /// * `slices` - Subdivisions around the Y axis (clamped to at least 3)
    /// * `stacks` - Subdivisions from pole to pole (clamped to at least 2)
    pub fn uv(slices: u32, stacks: u32) -> Self {
        let slices = slices.max(3);
        let stacks = stacks.max(2);

        // The seam column is duplicated so u can run 0..=1 without wrapping
        let ring = slices + 1;
        let vertex_count = (ring * (stacks + 1)) as usize;
        let mut positions = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);

        for i in 0..=stacks {
            let v = i as f32 / stacks as f32;
            let phi = v * PI;
            for j in 0..=slices {
                let u = j as f32 / slices as f32;
                let theta = u * TAU;
                positions.push(Vec3::new(
                    phi.sin() * theta.cos(),
                    phi.cos(),
                    -phi.sin() * theta.sin(),
                ));
                uvs.push([u, v]);
            }
        }

        let index = |i: u32, j: u32| i * ring + j;

        let mut triangles = Vec::with_capacity((6 * slices * (stacks - 1)) as usize);
        for i in 0..stacks {
            for j in 0..slices {
                let a = index(i, j);
                let b = index(i + 1, j);
                let c = index(i + 1, j + 1);
                let d = index(i, j + 1);
                // Skip the degenerate halves of the pole quads
                if i != 0 {
                    triangles.extend_from_slice(&[a, b, d]);
                }
                if i != stacks - 1 {
                    triangles.extend_from_slice(&[d, b, c]);
                }
            }
        }

        let mut lines = Vec::with_capacity((2 * slices * (2 * stacks - 1)) as usize);
        // Latitude rings (the poles are points, not rings)
        for i in 1..stacks {
            for j in 0..slices {
                lines.extend_from_slice(&[index(i, j), index(i, j + 1)]);
            }
        }
        // Longitude meridians
        for j in 0..slices {
            for i in 0..stacks {
                lines.extend_from_slice(&[index(i, j), index(i + 1, j)]);
            }
        }

        Self {
            positions,
            uvs,
            triangles,
            lines,
            slices,
            stacks,
        }
    }

    /// Number of vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Number of wireframe line segments
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len() / 2
    }

    /// Subdivisions around the Y axis
    pub fn slices(&self) -> u32 {
        self.slices
    }

    /// Subdivisions from pole to pole
    pub fn stacks(&self) -> u32 {
        self.stacks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    #[test]
    fn test_vertices_lie_on_unit_sphere() {
        let mesh = SphereMesh::uv(10, 10);
        for p in &mesh.positions {
            assert!((p.length() - 1.0).abs() < EPSILON, "{:?} is not on the unit sphere", p);
        }
    }

    #[test]
    fn test_counts() {
        let mesh = SphereMesh::uv(10, 10);
        assert_eq!(mesh.vertex_count(), 11 * 11);
        assert_eq!(mesh.triangle_count(), 2 * 10 * 9);
        // 9 rings + 10 meridians of 10 segments each
        assert_eq!(mesh.line_count(), 10 * 9 + 10 * 10);
    }

    #[test]
    fn test_poles_on_y_axis() {
        let mesh = SphereMesh::uv(15, 15);
        let north = mesh.positions[0];
        let south = mesh.positions[mesh.vertex_count() - 1];
        assert!((north.y - 1.0).abs() < EPSILON);
        assert!((south.y + 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_indices_in_range() {
        let mesh = SphereMesh::uv(5, 5);
        let n = mesh.vertex_count() as u32;
        assert!(mesh.triangles.iter().all(|&i| i < n));
        assert!(mesh.lines.iter().all(|&i| i < n));
    }

    #[test]
    fn test_triangles_face_outward() {
        let mesh = SphereMesh::uv(12, 8);
        for tri in mesh.triangles.chunks(3) {
            let a = mesh.positions[tri[0] as usize];
            let b = mesh.positions[tri[1] as usize];
            let c = mesh.positions[tri[2] as usize];
            let face_normal = (b - a).cross(c - a);
            let centroid = (a + b + c) * (1.0 / 3.0);
            assert!(face_normal.dot(centroid) > 0.0, "triangle {:?} faces inward", tri);
        }
    }

    #[test]
    fn test_minimum_tessellation() {
        let mesh = SphereMesh::uv(0, 0);
        assert_eq!(mesh.slices(), 3);
        assert_eq!(mesh.stacks(), 2);
        assert!(mesh.triangle_count() > 0);
    }
}
