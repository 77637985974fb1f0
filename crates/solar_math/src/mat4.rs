//! 4x4 Matrix utilities for homogeneous 3D transforms
//!
//! Matrices are stored column-major (`m[column][row]`), which is the layout
//! WGSL's `mat4x4<f32>` expects, so they can be uploaded as-is.
//!
//! Angles taken by the rotation helpers are in **degrees** and are never
//! reduced modulo 360: a rotation of 4320° is twelve full turns.

use crate::Vec3;

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Create a rotation matrix in the plane spanned by two axes.
///
/// Rotates axis `p1` towards axis `p2` by `angle` radians.
///
/// # Arguments
/// * `angle` - Rotation angle in radians
/// * `p1`, `p2` - Indices of the axes forming the rotation plane (0=X, 1=Y, 2=Z)
pub fn plane_rotation(angle: f32, p1: usize, p2: usize) -> Mat4 {
    let cs = angle.cos();
    let sn = angle.sin();

    let mut m = IDENTITY;

    m[p1][p1] = cs;
    m[p2][p2] = cs;
    m[p1][p2] = sn;
    m[p2][p1] = -sn;

    m
}

/// Rotation about +X, counter-clockwise when viewed from +X.
pub fn rotation_x(degrees: f32) -> Mat4 {
    // Y rotates towards Z
    plane_rotation(degrees.to_radians(), 1, 2)
}

/// Rotation about +Y, counter-clockwise when viewed from +Y.
pub fn rotation_y(degrees: f32) -> Mat4 {
    // Z rotates towards X
    plane_rotation(degrees.to_radians(), 2, 0)
}

/// Translation by an offset
pub fn translation(offset: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[3][0] = offset.x;
    m[3][1] = offset.y;
    m[3][2] = offset.z;
    m
}

/// Uniform scale
pub fn scale(factor: f32) -> Mat4 {
    let mut m = IDENTITY;
    m[0][0] = factor;
    m[1][1] = factor;
    m[2][2] = factor;
    m
}

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Transform a point (w = 1) by a 4x4 matrix
pub fn transform_point(m: Mat4, p: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
        m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
        m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
    )
}

/// Transform a direction (w = 0) by a 4x4 matrix, ignoring translation
pub fn transform_direction(m: Mat4, d: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * d.x + m[1][0] * d.y + m[2][0] * d.z,
        m[0][1] * d.x + m[1][1] * d.y + m[2][1] * d.z,
        m[0][2] * d.x + m[1][2] * d.y + m[2][2] * d.z,
    )
}

/// Get the xyz part of a column
pub fn get_column(m: Mat4, col: usize) -> Vec3 {
    Vec3::new(m[col][0], m[col][1], m[col][2])
}

/// Transpose a matrix
pub fn transpose(m: Mat4) -> Mat4 {
    [
        [m[0][0], m[1][0], m[2][0], m[3][0]],
        [m[0][1], m[1][1], m[2][1], m[3][1]],
        [m[0][2], m[1][2], m[2][2], m[3][2]],
        [m[0][3], m[1][3], m[2][3], m[3][3]],
    ]
}

/// Right-handed perspective projection with depth mapped to `[0, 1]`.
///
/// # Arguments
/// * `fov_y` - Vertical field of view in radians
/// * `aspect` - Width / height
/// * `near`, `far` - Clip distances (both positive)
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let nf = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, far * nf, -1.0],
        [0.0, 0.0, far * near * nf, 0.0],
    ]
}
