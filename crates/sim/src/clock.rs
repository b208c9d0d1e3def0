//! Playback clock advancing stellar age on a fixed real-time cadence.

use std::time::Duration;

use orrery_core::bounds::sanitize_age;
use orrery_core::constants::{AGE_MAX, AGE_STEP, TICK_PERIOD};

/// Outcome of feeding a frame's real time into the clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockAdvance {
    pub ticks: u32,
    /// Playback stopped because age hit the upper clamp.
    pub stopped: bool,
}

#[derive(Debug, Clone)]
pub struct SimulationClock {
    period: Duration,
    age_step: f64,
    age: f64,
    playing: bool,
    pending: Duration,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(TICK_PERIOD, AGE_STEP, 0.0)
    }
}

impl SimulationClock {
    /// A paused clock at `age`. A zero period is bumped to 1 ms.
    pub fn new(period: Duration, age_step: f64, age: f64) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            age_step,
            age: sanitize_age(age),
            playing: false,
            pending: Duration::ZERO,
        }
    }

    pub fn age(&self) -> f64 {
        self.age
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Start playback. A no-op returning `false` at the age clamp.
    pub fn play(&mut self) -> bool {
        if self.age >= AGE_MAX {
            return false;
        }
        self.playing = true;
        true
    }

    /// Halt playback and drop any partial tick.
    pub fn pause(&mut self) {
        self.playing = false;
        self.pending = Duration::ZERO;
    }

    /// Toggle playback; returns the new playing state.
    pub fn toggle(&mut self) -> bool {
        if self.playing {
            self.pause();
            false
        } else {
            self.play()
        }
    }

    /// Immediate write of age, clamped to the valid range.
    pub fn set_age(&mut self, age: f64) {
        self.age = sanitize_age(age);
    }

    /// Consume `dt` of real time, applying one age step per elapsed period.
    pub fn advance(&mut self, dt: Duration) -> ClockAdvance {
        let mut result = ClockAdvance::default();
        if !self.playing {
            return result;
        }
        self.pending += dt;
        while self.pending >= self.period {
            self.pending -= self.period;
            self.age = (self.age + self.age_step).min(AGE_MAX);
            result.ticks += 1;
            if self.age >= AGE_MAX {
                self.pause();
                result.stopped = true;
                break;
            }
        }
        result
    }
}
