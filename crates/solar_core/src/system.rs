//! The body table
//!
//! A [`SolarSystem`] owns every [`OrbitalBody`] and the parent links between
//! them. It is built once at startup and read every frame to produce the
//! world placement of each body by composing local transforms down the tree.

use std::collections::HashMap;

use slotmap::{new_key_type, SecondaryMap, SlotMap};
use solar_math::{mat4, Mat4, Vec3};

use crate::body::{Appearance, BodyKind, OrbitalBody};
use crate::clock::AnimationClock;
use crate::system_file::{BodyTemplate, SystemError, SystemTemplate};
use crate::transform::{compute_transform, OrbitalTransform};
use crate::validator::SystemValidator;

new_key_type! {
    /// Key to a body in a [`SolarSystem`]
    ///
    /// Parent links are stored as keys, so a body never owns its parent.
    pub struct BodyKey;
}

/// A body placed in the world for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedBody {
    /// Which body this is
    pub key: BodyKey,
    /// The body's role (decides tessellation and lighting)
    pub kind: BodyKind,
    /// The body's transform relative to its parent
    pub transform: OrbitalTransform,
    /// Placement frame in world space (what children are placed in)
    pub world: Mat4,
    /// Placement, spin, and scale by the visual radius
    pub model: Mat4,
}

impl PlacedBody {
    /// Center of the body in world space
    pub fn position(&self) -> Vec3 {
        mat4::get_column(self.world, 3)
    }
}

/// The set of bodies and their hierarchy
pub struct SolarSystem {
    name: String,
    bodies: SlotMap<BodyKey, OrbitalBody>,
    /// Declaration order, which is also the order siblings are visited in
    order: Vec<BodyKey>,
    names: HashMap<String, BodyKey>,
}

impl SolarSystem {
    /// Create an empty system
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bodies: SlotMap::with_key(),
            order: Vec::new(),
            names: HashMap::new(),
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a body, returning its key
    ///
    /// If another body already has the same name, name lookups resolve to the
    /// newer one.
    pub fn add_body(&mut self, body: OrbitalBody) -> BodyKey {
        let name = body.name.clone();
        let key = self.bodies.insert(body);
        self.order.push(key);
        if self.names.insert(name.clone(), key).is_some() {
            log::warn!("Body name '{}' is declared more than once", name);
        }
        key
    }

    /// Get a body by key
    pub fn get(&self, key: BodyKey) -> Option<&OrbitalBody> {
        self.bodies.get(key)
    }

    /// Find a body by name
    pub fn get_by_name(&self, name: &str) -> Option<(BodyKey, &OrbitalBody)> {
        let key = *self.names.get(name)?;
        self.bodies.get(key).map(|body| (key, body))
    }

    /// Number of bodies
    #[inline]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Check if the system has no bodies
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Iterate over bodies in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (BodyKey, &OrbitalBody)> {
        self.order
            .iter()
            .filter_map(|&key| self.bodies.get(key).map(|body| (key, body)))
    }

    /// Bodies without a parent, in declaration order
    pub fn roots(&self) -> impl Iterator<Item = BodyKey> + '_ {
        self.iter()
            .filter(|(_, body)| body.parent.is_none())
            .map(|(key, _)| key)
    }

    /// Direct children of a body, in declaration order
    pub fn children(&self, parent: BodyKey) -> impl Iterator<Item = BodyKey> + '_ {
        self.iter()
            .filter(move |(_, body)| body.parent == Some(parent))
            .map(|(key, _)| key)
    }

    /// Every reachable body, parents before children
    ///
    /// Depth-first from each root; siblings in declaration order. Bodies that
    /// cannot be reached from a root (a parent cycle) are not visited.
    pub fn traversal(&self) -> Vec<BodyKey> {
        let mut visited = Vec::with_capacity(self.bodies.len());
        let mut stack: Vec<BodyKey> = self.roots().collect();
        stack.reverse();

        while let Some(key) = stack.pop() {
            visited.push(key);
            let first_child = stack.len();
            stack.extend(self.children(key));
            stack[first_child..].reverse();
        }

        visited
    }

    /// Place every body in the world at the clock's time
    ///
    /// Each body's placement frame is its parent's placement frame composed
    /// with its own orbit rotation and translation. Spin and scale are applied
    /// to the body's own model matrix only.
    pub fn placements(&self, clock: &AnimationClock) -> Vec<PlacedBody> {
        let mut frames: SecondaryMap<BodyKey, Mat4> = SecondaryMap::with_capacity(self.bodies.len());
        let mut placed = Vec::with_capacity(self.bodies.len());

        for key in self.traversal() {
            let body = &self.bodies[key];
            let parent_frame = body
                .parent
                .and_then(|parent| frames.get(parent).copied())
                .unwrap_or(mat4::IDENTITY);

            let transform = compute_transform(body, clock);
            let world = mat4::mul(parent_frame, transform.placement_matrix());
            let model = mat4::mul(
                mat4::mul(world, transform.spin_matrix()),
                mat4::scale(body.visual_radius),
            );

            frames.insert(key, world);
            placed.push(PlacedBody {
                key,
                kind: body.kind,
                transform,
                world,
                model,
            });
        }

        placed
    }

    /// Build a system from a validated template
    pub fn from_template(template: &SystemTemplate) -> Result<Self, SystemError> {
        SystemValidator::validate_or_error(template).map_err(SystemError::Invalid)?;

        let mut system = Self::new(template.name.clone());
        let keys: Vec<BodyKey> = template
            .bodies
            .iter()
            .map(|t| system.add_body(t.to_body(None)))
            .collect();

        // Second pass so parents may be declared after their children
        for (key, body_template) in keys.iter().zip(&template.bodies) {
            if let Some(parent_name) = &body_template.parent {
                let parent = system
                    .names
                    .get(parent_name)
                    .copied()
                    .ok_or_else(|| SystemError::UnknownBody(parent_name.clone()))?;
                system.bodies[*key].parent = Some(parent);
            }
        }

        Ok(system)
    }

    /// Convert back into a serializable template
    pub fn to_template(&self) -> SystemTemplate {
        let bodies = self
            .iter()
            .map(|(_, body)| {
                let parent = body
                    .parent
                    .and_then(|p| self.bodies.get(p))
                    .map(|p| p.name.clone());
                BodyTemplate::from_body(body, parent)
            })
            .collect();

        SystemTemplate {
            name: self.name.clone(),
            bodies,
        }
    }

    /// The built-in table: the sun, eight planets, and Earth's moon
    ///
    /// Distances are in scene units, periods are approximate real-world
    /// values in days. Every body refers to a bitmap named after it and falls
    /// back to a flat color.
    pub fn classic() -> Self {
        let mut system = Self::new("Solar System");

        let sun = system.add_body(
            OrbitalBody::star("Sun", SUN_DAY, 0.05)
                .with_appearance(Appearance::texture("sun.bmp", [0.0, 1.0, 0.0])),
        );

        let planets: Vec<BodyKey> = CLASSIC_PLANETS
            .iter()
            .map(|planet| {
                system.add_body(
                    OrbitalBody::planet(planet.name, sun, planet.distance, planet.year, planet.day, planet.size)
                        .with_appearance(Appearance::texture(planet.texture, planet.color)),
                )
            })
            .collect();

        let earth = planets[EARTH_INDEX];
        system.add_body(
            OrbitalBody::moon("Moon", earth, 0.2, MOON_MONTH, 0.05)
                .with_appearance(Appearance::texture("moon.bmp", [0.3, 0.7, 0.3])),
        );

        system
    }
}

// Years (days per revolution)
const MERCURY_YEAR: f32 = 88.0;
const VENUS_YEAR: f32 = 225.0;
const EARTH_YEAR: f32 = 365.0;
const MARS_YEAR: f32 = 687.0;
const JUPITER_YEAR: f32 = 4332.0;
const SATURN_YEAR: f32 = 29.5 * 365.0;
const URANUS_YEAR: f32 = 84.0 * 365.0;
const NEPTUNE_YEAR: f32 = 165.0 * 365.0;

// Days (days per turn)
const SUN_DAY: f32 = 25.38;
const MERCURY_DAY: f32 = 58.7;
const VENUS_DAY: f32 = 243.0;
const EARTH_DAY: f32 = 1.0;
const MARS_DAY: f32 = 24.6 / 24.0;
const JUPITER_DAY: f32 = 9.83 / 24.0;
const SATURN_DAY: f32 = 10.23 / 24.0;
const URANUS_DAY: f32 = 17.23 / 24.0;
const NEPTUNE_DAY: f32 = 16.1 / 24.0;

const MOON_MONTH: f32 = 27.3;

/// Position of Earth in [`CLASSIC_PLANETS`]
const EARTH_INDEX: usize = 2;

struct PlanetEntry {
    name: &'static str,
    texture: &'static str,
    distance: f32,
    year: f32,
    day: f32,
    size: f32,
    color: [f32; 3],
}

const CLASSIC_PLANETS: [PlanetEntry; 8] = [
    PlanetEntry { name: "Mercury", texture: "mercury.bmp", distance: 0.579, year: MERCURY_YEAR, day: MERCURY_DAY, size: 0.1, color: [0.5, 0.5, 0.5] },
    PlanetEntry { name: "Venus", texture: "venus.bmp", distance: 1.082, year: VENUS_YEAR, day: VENUS_DAY, size: 0.12, color: [0.9, 0.6, 0.1] },
    PlanetEntry { name: "Earth", texture: "earth.bmp", distance: 1.496, year: EARTH_YEAR, day: EARTH_DAY, size: 0.13, color: [0.2, 0.2, 1.0] },
    PlanetEntry { name: "Mars", texture: "mars.bmp", distance: 2.28, year: MARS_YEAR, day: MARS_DAY, size: 0.07, color: [1.0, 0.0, 0.0] },
    PlanetEntry { name: "Jupiter", texture: "jupiter.bmp", distance: 7.79, year: JUPITER_YEAR, day: JUPITER_DAY, size: 0.3, color: [1.0, 0.5, 0.0] },
    PlanetEntry { name: "Saturn", texture: "saturn.bmp", distance: 14.27, year: SATURN_YEAR, day: SATURN_DAY, size: 0.25, color: [1.0, 1.0, 0.5] },
    PlanetEntry { name: "Uranus", texture: "uranus.bmp", distance: 28.71, year: URANUS_YEAR, day: URANUS_DAY, size: 0.2, color: [0.5, 0.5, 1.0] },
    PlanetEntry { name: "Neptune", texture: "neptune.bmp", distance: 44.97, year: NEPTUNE_YEAR, day: NEPTUNE_DAY, size: 0.18, color: [0.3, 0.3, 0.8] },
];

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    #[test]
    fn test_classic_table() {
        let system = SolarSystem::classic();
        assert_eq!(system.body_count(), 10);

        let (_, sun) = system.get_by_name("Sun").unwrap();
        assert_eq!(sun.kind, BodyKind::Star);

        let (earth_key, _) = system.get_by_name("Earth").unwrap();
        let (_, moon) = system.get_by_name("Moon").unwrap();
        assert_eq!(moon.parent, Some(earth_key));
    }

    #[test]
    fn test_traversal_order() {
        let system = SolarSystem::classic();
        let names: Vec<&str> = system
            .traversal()
            .into_iter()
            .map(|k| system.get(k).unwrap().name.as_str())
            .collect();

        assert_eq!(
            names,
            vec!["Sun", "Mercury", "Venus", "Earth", "Moon", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune"]
        );
    }

    #[test]
    fn test_children() {
        let system = SolarSystem::classic();
        let (sun, _) = system.get_by_name("Sun").unwrap();
        let (earth, _) = system.get_by_name("Earth").unwrap();
        assert_eq!(system.children(sun).count(), 8);
        assert_eq!(system.children(earth).count(), 1);
    }

    #[test]
    fn test_placements_at_time_zero() {
        let system = SolarSystem::classic();
        let placed = system.placements(&AnimationClock::new());
        assert_eq!(placed.len(), 10);

        // Everything starts lined up along +X
        let earth = placed.iter().find(|p| system.get(p.key).unwrap().name == "Earth").unwrap();
        assert!(vec_approx_eq(earth.position(), Vec3::new(1.496, 0.0, 0.0)));

        let moon = placed.iter().find(|p| p.kind == BodyKind::Moon).unwrap();
        assert!(vec_approx_eq(moon.position(), Vec3::new(1.696, 0.0, 0.0)));
    }

    #[test]
    fn test_moon_follows_parent_placement() {
        let system = SolarSystem::classic();
        let clock = AnimationClock::at(7.0, 123.0);
        let placed = system.placements(&clock);

        let earth = placed.iter().find(|p| system.get(p.key).unwrap().name == "Earth").unwrap();
        let moon = placed.iter().find(|p| p.kind == BodyKind::Moon).unwrap();

        let offset = moon.position() - earth.position();
        assert!(approx_eq(offset.length(), 0.2), "moon is {} from earth", offset.length());
        assert!(approx_eq(offset.y, 0.0));
    }

    #[test]
    fn test_child_does_not_inherit_parent_spin() {
        let system = SolarSystem::classic();
        // Same day, different hour: only spins differ
        let a = system.placements(&AnimationClock::at(0.0, 10.0));
        let b = system.placements(&AnimationClock::at(5.0, 10.0));

        let moon_a = a.iter().find(|p| p.kind == BodyKind::Moon).unwrap();
        let moon_b = b.iter().find(|p| p.kind == BodyKind::Moon).unwrap();
        assert!(vec_approx_eq(moon_a.position(), moon_b.position()));
    }

    #[test]
    fn test_model_scales_by_visual_radius() {
        let system = SolarSystem::classic();
        let placed = system.placements(&AnimationClock::new());
        let sun = placed.iter().find(|p| p.kind == BodyKind::Star).unwrap();
        let surface = mat4::transform_point(sun.model, Vec3::Y);
        assert!(vec_approx_eq(surface, Vec3::new(0.0, 0.05, 0.0)));
    }

    #[test]
    fn test_template_round_trip_preserves_hierarchy() {
        let system = SolarSystem::classic();
        let rebuilt = SolarSystem::from_template(&system.to_template()).unwrap();
        assert_eq!(rebuilt.body_count(), system.body_count());

        let (earth, _) = rebuilt.get_by_name("Earth").unwrap();
        let (_, moon) = rebuilt.get_by_name("Moon").unwrap();
        assert_eq!(moon.parent, Some(earth));
    }

    #[test]
    fn test_empty_system_places_nothing() {
        let system = SolarSystem::new("Empty");
        assert!(system.is_empty());
        assert!(system.placements(&AnimationClock::new()).is_empty());
    }
}
