//! Orbital bodies and their appearance
//!
//! An [`OrbitalBody`] describes one sphere in the system: where it orbits
//! relative to its parent, how fast it orbits and spins, how big it is drawn,
//! and what it looks like. Bodies carry no position; placement is always
//! derived from the clock.

use serde::{Serialize, Deserialize};

use crate::system::BodyKey;

/// The role a body plays in the hierarchy
///
/// The kind decides which transform rule applies to the body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    /// The root body; it spins in place and does not orbit
    Star,
    /// Orbits the star and spins about its own axis
    Planet,
    /// Orbits a planet at a fixed number of revolutions per year
    Moon,
}

impl BodyKind {
    /// Wireframe tessellation as (slices, stacks)
    pub fn wire_segments(&self) -> (u32, u32) {
        match self {
            BodyKind::Star => (15, 15),
            BodyKind::Planet => (10, 10),
            BodyKind::Moon => (5, 5),
        }
    }
}

/// How a body is drawn
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Appearance {
    /// Flat RGB color
    Color {
        rgb: [f32; 3],
    },
    /// Bitmap texture, with a color to use when the texture is unavailable
    Texture {
        /// Path to the image, relative to the configured texture directory
        path: String,
        /// Fallback RGB color
        fallback: [f32; 3],
    },
}

impl Appearance {
    /// Flat color appearance
    pub fn color(r: f32, g: f32, b: f32) -> Self {
        Appearance::Color { rgb: [r, g, b] }
    }

    /// Textured appearance with a fallback color
    pub fn texture(path: impl Into<String>, fallback: [f32; 3]) -> Self {
        Appearance::Texture {
            path: path.into(),
            fallback,
        }
    }

    /// The color used when no texture is drawn
    pub fn base_color(&self) -> [f32; 3] {
        match self {
            Appearance::Color { rgb } => *rgb,
            Appearance::Texture { fallback, .. } => *fallback,
        }
    }

    /// The texture reference, if any
    pub fn texture_path(&self) -> Option<&str> {
        match self {
            Appearance::Color { .. } => None,
            Appearance::Texture { path, .. } => Some(path),
        }
    }
}

/// One body of the system
///
/// Periods must be positive; the transform evaluator divides by them and
/// does not check. Tables loaded from files are checked by
/// [`SystemValidator`](crate::SystemValidator) before they become bodies.
#[derive(Clone, Debug)]
pub struct OrbitalBody {
    /// Unique name
    pub name: String,
    /// Role in the hierarchy
    pub kind: BodyKind,
    /// Body this one orbits (None for the star)
    pub parent: Option<BodyKey>,
    /// Distance from the parent's center, in scene units (0 for the star)
    pub orbital_radius: f32,
    /// Simulated days for one revolution around the parent
    ///
    /// Unused for the star and for moons, whose revolution rate is fixed.
    pub orbital_period_days: f32,
    /// Simulated days for one turn about the body's own axis
    ///
    /// Unused for moons, which do not spin.
    pub rotation_period_days: f32,
    /// Drawn radius, in scene units
    pub visual_radius: f32,
    /// Color or texture
    pub appearance: Appearance,
}

impl OrbitalBody {
    /// Create a star at the root of the hierarchy
    pub fn star(name: impl Into<String>, rotation_period_days: f32, visual_radius: f32) -> Self {
        Self {
            name: name.into(),
            kind: BodyKind::Star,
            parent: None,
            orbital_radius: 0.0,
            orbital_period_days: 1.0,
            rotation_period_days,
            visual_radius,
            appearance: Appearance::color(1.0, 1.0, 1.0),
        }
    }

    /// Create a planet orbiting `parent`
    pub fn planet(
        name: impl Into<String>,
        parent: BodyKey,
        orbital_radius: f32,
        orbital_period_days: f32,
        rotation_period_days: f32,
        visual_radius: f32,
    ) -> Self {
        Self {
            name: name.into(),
            kind: BodyKind::Planet,
            parent: Some(parent),
            orbital_radius,
            orbital_period_days,
            rotation_period_days,
            visual_radius,
            appearance: Appearance::color(1.0, 1.0, 1.0),
        }
    }

    /// Create a moon orbiting the planet `parent`
    pub fn moon(
        name: impl Into<String>,
        parent: BodyKey,
        orbital_radius: f32,
        orbital_period_days: f32,
        visual_radius: f32,
    ) -> Self {
        Self {
            name: name.into(),
            kind: BodyKind::Moon,
            parent: Some(parent),
            orbital_radius,
            orbital_period_days,
            rotation_period_days: orbital_period_days,
            visual_radius,
            appearance: Appearance::color(1.0, 1.0, 1.0),
        }
    }

    /// Set the appearance
    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_color() {
        assert_eq!(Appearance::color(0.1, 0.2, 0.3).base_color(), [0.1, 0.2, 0.3]);
        let textured = Appearance::texture("earth.bmp", [0.2, 0.2, 1.0]);
        assert_eq!(textured.base_color(), [0.2, 0.2, 1.0]);
    }

    #[test]
    fn test_texture_path() {
        assert_eq!(Appearance::color(1.0, 1.0, 1.0).texture_path(), None);
        assert_eq!(
            Appearance::texture("mars.bmp", [1.0, 0.0, 0.0]).texture_path(),
            Some("mars.bmp")
        );
    }

    #[test]
    fn test_wire_segments_decrease_down_the_tree() {
        let (star, _) = BodyKind::Star.wire_segments();
        let (planet, _) = BodyKind::Planet.wire_segments();
        let (moon, _) = BodyKind::Moon.wire_segments();
        assert!(star > planet && planet > moon);
    }

    #[test]
    fn test_star_has_no_parent() {
        let sun = OrbitalBody::star("Sun", 25.38, 0.05);
        assert!(sun.parent.is_none());
        assert_eq!(sun.orbital_radius, 0.0);
        assert_eq!(sun.kind, BodyKind::Star);
    }
}
