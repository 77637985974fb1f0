//! 3D Mathematics Library
//!
//! This crate provides the small amount of linear algebra the solar system
//! demo needs.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Mat4`] - 4x4 column-major matrix for homogeneous transforms
//!
//! ## Geometry
//!
//! - [`SphereMesh`] - Unit UV sphere with triangle and wireframe indices

mod vec3;
pub mod mat4;
pub mod sphere;

pub use vec3::Vec3;
pub use mat4::Mat4;
pub use sphere::SphereMesh;
