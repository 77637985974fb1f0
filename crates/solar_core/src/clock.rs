//! Animation clock
//!
//! The clock owns the simulated time that drives every orbit and spin. It is
//! stepped manually, once per rendered frame, by a fixed number of hours, and
//! can be paused, single-stepped, or have its step doubled and halved.
//!
//! Neither accumulator is ever wrapped back into a day or a year: both grow
//! for as long as the animation runs, and the angles derived from them grow
//! with them.

/// Hours in one simulated day
pub const HOURS_PER_DAY: f32 = 24.0;

/// Default time step (hours advanced per frame)
pub const DEFAULT_TIME_STEP_HOURS: f32 = 24.0;

/// Manually stepped simulation clock
///
/// Created once at startup and mutated only between frames by input handling
/// and by [`advance`](AnimationClock::advance) at the start of each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationClock {
    hour_of_day: f32,
    day_of_year: f32,
    time_step_hours: f32,
    running: bool,
    single_step_pending: bool,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationClock {
    /// Create a running clock at time zero with a 24 hour step
    pub fn new() -> Self {
        Self {
            hour_of_day: 0.0,
            day_of_year: 0.0,
            time_step_hours: DEFAULT_TIME_STEP_HOURS,
            running: true,
            single_step_pending: false,
        }
    }

    /// Create a clock positioned at a given time, paused
    ///
    /// Useful for evaluating transforms at a fixed instant.
    pub fn at(hour_of_day: f32, day_of_year: f32) -> Self {
        Self {
            hour_of_day,
            day_of_year,
            running: false,
            ..Self::new()
        }
    }

    /// Set the initial time step
    pub fn with_time_step(mut self, hours: f32) -> Self {
        self.time_step_hours = hours;
        self
    }

    /// Set whether the clock starts running
    pub fn with_running(mut self, running: bool) -> Self {
        self.running = running;
        self
    }

    /// Elapsed simulated hours
    #[inline]
    pub fn hour_of_day(&self) -> f32 {
        self.hour_of_day
    }

    /// Elapsed simulated days
    #[inline]
    pub fn day_of_year(&self) -> f32 {
        self.day_of_year
    }

    /// Hours advanced per frame while running
    #[inline]
    pub fn time_step_hours(&self) -> f32 {
        self.time_step_hours
    }

    /// Whether the next [`advance`](Self::advance) will move time forward
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the clock will stop again after the next advance
    #[inline]
    pub fn is_single_step_pending(&self) -> bool {
        self.single_step_pending
    }

    /// Toggle continuous running
    ///
    /// If a single step is pending it is cancelled and the clock keeps
    /// running continuously; otherwise running is flipped.
    pub fn toggle_run(&mut self) {
        if self.single_step_pending {
            self.single_step_pending = false;
            self.running = true;
        } else {
            self.running = !self.running;
        }
    }

    /// Run for exactly one more advance, then stop
    pub fn request_single_step(&mut self) {
        self.single_step_pending = true;
        self.running = true;
    }

    /// Double the time step
    pub fn increase_rate(&mut self) {
        self.time_step_hours *= 2.0;
    }

    /// Halve the time step
    ///
    /// There is no lower bound; repeated halving approaches zero.
    pub fn decrease_rate(&mut self) {
        self.time_step_hours /= 2.0;
    }

    /// Step the clock for one frame
    ///
    /// Returns whether time moved.
    pub fn advance(&mut self) -> bool {
        if !self.running {
            return false;
        }

        self.hour_of_day += self.time_step_hours;
        self.day_of_year += self.time_step_hours / HOURS_PER_DAY;

        if self.single_step_pending {
            self.running = false;
            self.single_step_pending = false;
        }

        true
    }
}
