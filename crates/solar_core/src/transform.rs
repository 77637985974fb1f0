//! Orbital transform evaluation
//!
//! Each body is placed in its parent's frame by three steps:
//!
//! 1. rotate about +Y by the orbital angle,
//! 2. translate along the rotated +X by the orbital radius,
//! 3. rotate about +Y by the spin angle.
//!
//! Steps 1 and 2 are the body's *placement*; its children are placed relative
//! to that frame. Step 3 only orients the body's own surface and is not
//! inherited. Moons replace the orbital angle with a fixed twelve
//! revolutions per year and do not spin; stars skip steps 1 and 2.
//!
//! All angles are in degrees and are left unreduced.

use solar_math::{mat4, Mat4, Vec3};

use crate::body::{BodyKind, OrbitalBody};
use crate::clock::AnimationClock;

/// Degrees in one full revolution
pub const DEGREES_PER_TURN: f32 = 360.0;

/// Days in the year used by the moon's revolution rate
pub const DAYS_PER_YEAR: f32 = 365.0;

/// Moon revolutions per year
pub const LUNAR_ORBITS_PER_YEAR: f32 = 12.0;

/// Orbital angle in degrees after `day_of_year` days
#[inline]
pub fn orbital_angle(day_of_year: f32, orbital_period_days: f32) -> f32 {
    DEGREES_PER_TURN * (day_of_year / orbital_period_days)
}

/// Spin angle in degrees after `hour_of_day` hours
///
/// The hour count is divided by a period in days, so a body with a one day
/// period turns once per simulated *hour*.
#[inline]
pub fn spin_angle(hour_of_day: f32, rotation_period_days: f32) -> f32 {
    DEGREES_PER_TURN * (hour_of_day / rotation_period_days)
}

/// Moon revolution angle in degrees after `day_of_year` days
#[inline]
pub fn lunar_orbit_angle(day_of_year: f32) -> f32 {
    DEGREES_PER_TURN * LUNAR_ORBITS_PER_YEAR * day_of_year / DAYS_PER_YEAR
}

/// A body's rigid transform relative to its parent's placement frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitalTransform {
    /// Rotation about the parent's +Y, in degrees
    pub orbit_angle: f32,
    /// Distance along the rotated +X
    pub orbit_radius: f32,
    /// Rotation about the body's own +Y, in degrees
    pub spin_angle: f32,
}

impl OrbitalTransform {
    /// The transform that leaves everything where it is
    pub const IDENTITY: Self = Self {
        orbit_angle: 0.0,
        orbit_radius: 0.0,
        spin_angle: 0.0,
    };

    /// Orbit rotation followed by the outward translation
    ///
    /// This is the frame children are placed in.
    pub fn placement_matrix(&self) -> Mat4 {
        mat4::mul(
            mat4::rotation_y(self.orbit_angle),
            mat4::translation(Vec3::X * self.orbit_radius),
        )
    }

    /// Spin about the body's own axis
    pub fn spin_matrix(&self) -> Mat4 {
        mat4::rotation_y(self.spin_angle)
    }

    /// Placement followed by spin
    pub fn local_matrix(&self) -> Mat4 {
        mat4::mul(self.placement_matrix(), self.spin_matrix())
    }
}

impl Default for OrbitalTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Compute a body's transform relative to its parent at the clock's time
///
/// This is a pure function of its arguments. The body's periods must be
/// non-zero.
pub fn compute_transform(body: &OrbitalBody, clock: &AnimationClock) -> OrbitalTransform {
    match body.kind {
        BodyKind::Star => {
            debug_assert!(body.rotation_period_days != 0.0, "zero rotation period for {}", body.name);
            OrbitalTransform {
                orbit_angle: 0.0,
                orbit_radius: 0.0,
                spin_angle: spin_angle(clock.hour_of_day(), body.rotation_period_days),
            }
        }
        BodyKind::Planet => {
            debug_assert!(
                body.orbital_period_days != 0.0 && body.rotation_period_days != 0.0,
                "zero period for {}",
                body.name
            );
            OrbitalTransform {
                orbit_angle: orbital_angle(clock.day_of_year(), body.orbital_period_days),
                orbit_radius: body.orbital_radius,
                spin_angle: spin_angle(clock.hour_of_day(), body.rotation_period_days),
            }
        }
        BodyKind::Moon => OrbitalTransform {
            orbit_angle: lunar_orbit_angle(clock.day_of_year()),
            orbit_radius: body.orbital_radius,
            spin_angle: 0.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Appearance;
    use crate::system::BodyKey;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    fn earth() -> OrbitalBody {
        OrbitalBody::planet("Earth", BodyKey::default(), 1.496, 365.0, 1.0, 0.13)
            .with_appearance(Appearance::color(0.2, 0.2, 1.0))
    }

    #[test]
    fn test_quarter_year_is_quarter_turn() {
        assert!(approx_eq(orbital_angle(91.25, 365.0), 90.0));
    }

    #[test]
    fn test_spin_angle_is_unreduced() {
        assert_eq!(spin_angle(12.0, 1.0), 4320.0);
    }

    #[test]
    fn test_lunar_half_cycle() {
        assert!(approx_eq(lunar_orbit_angle(365.0 / 24.0), 180.0));
    }

    #[test]
    fn test_planet_transform() {
        let clock = AnimationClock::at(12.0, 91.25);
        let t = compute_transform(&earth(), &clock);
        assert!(approx_eq(t.orbit_angle, 90.0));
        assert_eq!(t.orbit_radius, 1.496);
        assert_eq!(t.spin_angle, 4320.0);
    }

    #[test]
    fn test_star_only_spins() {
        let sun = OrbitalBody::star("Sun", 25.0, 0.05);
        let clock = AnimationClock::at(50.0, 1000.0);
        let t = compute_transform(&sun, &clock);
        assert_eq!(t.orbit_angle, 0.0);
        assert_eq!(t.orbit_radius, 0.0);
        assert!(approx_eq(t.spin_angle, 720.0));
    }

    #[test]
    fn test_moon_ignores_its_own_period() {
        let clock = AnimationClock::at(0.0, 365.0 / 24.0);
        let slow = OrbitalBody::moon("Moon", BodyKey::default(), 0.2, 27.3, 0.05);
        let fast = OrbitalBody::moon("Moon", BodyKey::default(), 0.2, 1.0, 0.05);

        let a = compute_transform(&slow, &clock);
        let b = compute_transform(&fast, &clock);
        assert_eq!(a, b);
        assert!(approx_eq(a.orbit_angle, 180.0));
        assert_eq!(a.spin_angle, 0.0);
    }

    #[test]
    fn test_deterministic() {
        let clock = AnimationClock::at(1234.5, 51.4375);
        let a = compute_transform(&earth(), &clock);
        let b = compute_transform(&earth(), &clock);
        assert_eq!(a.orbit_angle.to_bits(), b.orbit_angle.to_bits());
        assert_eq!(a.spin_angle.to_bits(), b.spin_angle.to_bits());
        assert_eq!(a.local_matrix(), b.local_matrix());
    }

    #[test]
    fn test_placement_quarter_orbit() {
        // A quarter turn counter-clockwise from +X ends on -Z
        let t = OrbitalTransform {
            orbit_angle: 90.0,
            orbit_radius: 2.0,
            spin_angle: 0.0,
        };
        let center = mat4::transform_point(t.placement_matrix(), Vec3::ZERO);
        assert!(vec_approx_eq(center, Vec3::new(0.0, 0.0, -2.0)), "got {:?}", center);
    }

    #[test]
    fn test_spin_does_not_move_center() {
        let t = OrbitalTransform {
            orbit_angle: 30.0,
            orbit_radius: 1.5,
            spin_angle: 123.0,
        };
        let placed = mat4::transform_point(t.placement_matrix(), Vec3::ZERO);
        let spun = mat4::transform_point(t.local_matrix(), Vec3::ZERO);
        assert!(vec_approx_eq(placed, spun));
    }

    #[test]
    fn test_identity_transform() {
        assert_eq!(OrbitalTransform::default().local_matrix(), mat4::IDENTITY);
    }
}
