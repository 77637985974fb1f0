//! Core types for the solar system demo
//!
//! This crate holds everything that decides *where* bodies are, independent
//! of how they are drawn:
//!
//! - [`AnimationClock`] - Manually stepped simulated time
//! - [`OrbitalBody`] - One body with its orbit, spin, size, and appearance
//! - [`OrbitalTransform`] - A body's transform relative to its parent
//! - [`SolarSystem`] - The body table and its hierarchy
//! - [`BodyKey`] - Generational key to a body in the system
//! - [`SystemTemplate`] - Serializable body table
//! - [`SystemValidator`] - Checks a body table before it is used

mod body;
mod clock;
mod transform;
mod system;
mod system_file;
mod validator;

pub use body::{Appearance, BodyKind, OrbitalBody};
pub use clock::{AnimationClock, DEFAULT_TIME_STEP_HOURS, HOURS_PER_DAY};
pub use transform::{
    compute_transform, lunar_orbit_angle, orbital_angle, spin_angle, OrbitalTransform,
    DAYS_PER_YEAR, DEGREES_PER_TURN, LUNAR_ORBITS_PER_YEAR,
};
pub use system::{BodyKey, PlacedBody, SolarSystem};
pub use system_file::{BodyTemplate, SystemError, SystemLoadError, SystemSaveError, SystemTemplate};
pub use validator::{SystemValidator, ValidationError};

// Re-export commonly used math types for convenience
pub use solar_math::{Mat4, Vec3};
