//! Renderable bodies - bridges placements to GPU instances
//!
//! Converts the [`PlacedBody`] list produced by
//! [`SolarSystem::placements`] into per-instance data for the pipelines,
//! deciding each body's color and texture.

use solar_core::{BodyKind, PlacedBody, SolarSystem};

use crate::pipeline::BodyInstance;

/// One body ready to draw
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderableBody<'a> {
    /// Instance data uploaded to the GPU
    pub instance: BodyInstance,
    /// Decides which wire mesh is drawn
    pub kind: BodyKind,
    /// Texture to bind, if the body has one that loaded
    pub texture: Option<&'a str>,
}

/// Every body of a frame, in traversal order
#[derive(Clone, Debug, Default)]
pub struct RenderableBodies<'a> {
    pub bodies: Vec<RenderableBody<'a>>,
}

impl<'a> RenderableBodies<'a> {
    /// Flat-colored bodies, as drawn by the wireframe pipeline
    pub fn flat(system: &'a SolarSystem, placements: &[PlacedBody]) -> Self {
        Self::textured(system, placements, |_| false)
    }

    /// Textured bodies
    ///
    /// `is_loaded` reports whether a texture is available. Bodies whose
    /// texture is available are drawn untinted; the rest use their fallback
    /// color.
    pub fn textured(
        system: &'a SolarSystem,
        placements: &[PlacedBody],
        is_loaded: impl Fn(&str) -> bool,
    ) -> Self {
        let bodies = placements
            .iter()
            .filter_map(|placed| {
                let body = system.get(placed.key)?;
                let texture = body.appearance.texture_path().filter(|path| is_loaded(*path));
                let color = if texture.is_some() {
                    [1.0, 1.0, 1.0]
                } else {
                    body.appearance.base_color()
                };

                Some(RenderableBody {
                    instance: BodyInstance::new(placed.model, color, placed.kind == BodyKind::Star),
                    kind: placed.kind,
                    texture,
                })
            })
            .collect();

        Self { bodies }
    }

    /// Instance data in draw order
    pub fn instances(&self) -> Vec<BodyInstance> {
        self.bodies.iter().map(|b| b.instance).collect()
    }

    /// Get the number of bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Check if there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solar_core::AnimationClock;

    #[test]
    fn test_flat_uses_fallback_colors() {
        let system = SolarSystem::classic();
        let placed = system.placements(&AnimationClock::new());
        let bodies = RenderableBodies::flat(&system, &placed);

        assert_eq!(bodies.len(), 10);
        assert!(bodies.bodies.iter().all(|b| b.texture.is_none()));

        // The sun is drawn green, and is the only emissive body
        let sun = &bodies.bodies[0];
        assert_eq!(sun.kind, BodyKind::Star);
        assert_eq!(sun.instance.color, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(sun.instance.emissive, 1.0);
        assert!(bodies.bodies[1..].iter().all(|b| b.instance.emissive == 0.0));
    }

    #[test]
    fn test_loaded_textures_are_untinted() {
        let system = SolarSystem::classic();
        let placed = system.placements(&AnimationClock::new());
        let bodies = RenderableBodies::textured(&system, &placed, |path| path == "earth.bmp");

        let earth = bodies.bodies.iter().find(|b| b.texture == Some("earth.bmp")).unwrap();
        assert_eq!(earth.instance.color, [1.0, 1.0, 1.0, 1.0]);

        let textured = bodies.bodies.iter().filter(|b| b.texture.is_some()).count();
        assert_eq!(textured, 1);
    }

    #[test]
    fn test_instances_follow_placements() {
        let system = SolarSystem::classic();
        let placed = system.placements(&AnimationClock::at(3.0, 40.0));
        let bodies = RenderableBodies::flat(&system, &placed);

        for (instance, placed) in bodies.instances().iter().zip(&placed) {
            assert_eq!(instance.model, placed.model);
        }
    }
}
