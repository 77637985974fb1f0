//! Animation driver
//!
//! Applies clock actions between frames and, once per displayed frame,
//! advances the clock and places every body.

use solar_core::{AnimationClock, PlacedBody, SolarSystem};

use crate::input::InputAction;

/// Everything the renderer needs for one frame
#[derive(Clone, Debug)]
pub struct FrameState {
    /// Clock after this frame's advance
    pub clock: AnimationClock,
    /// Every body in traversal order
    pub placements: Vec<PlacedBody>,
}

/// Drives the animation clock
#[derive(Debug, Default)]
pub struct SimulationSystem;

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new() -> Self {
        Self
    }

    /// Apply a clock action
    ///
    /// Returns `false` for actions that do not concern the clock, which are
    /// left untouched.
    pub fn apply(&self, action: InputAction, clock: &mut AnimationClock) -> bool {
        match action {
            InputAction::ToggleRun => clock.toggle_run(),
            InputAction::SingleStep => clock.request_single_step(),
            InputAction::IncreaseRate => clock.increase_rate(),
            InputAction::DecreaseRate => clock.decrease_rate(),
            _ => return false,
        }

        log::debug!(
            "{:?}: running={} step={}h",
            action,
            clock.is_running(),
            clock.time_step_hours()
        );
        true
    }

    /// Run one frame: advance the clock, then place every body
    pub fn update(&mut self, clock: &mut AnimationClock, system: &SolarSystem) -> FrameState {
        if clock.advance() {
            log::trace!("Day {:.2} hour {:.1}", clock.day_of_year(), clock.hour_of_day());
        }

        FrameState {
            clock: *clock,
            placements: system.placements(clock),
        }
    }
}
