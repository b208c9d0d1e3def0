//! Timed explosion effect: `Normal -> Exploding -> Normal`.
//!
//! The revert is a single deadline compared against the caller's monotonic
//! time on every update, so a second trigger can never arm a second timer.

use std::time::Duration;

use orrery_core::constants::{EXPLOSION_DURATION, SHOCKWAVE_MAX_RADIUS};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplosionState {
    Normal,
    Exploding { started: Duration, deadline: Duration },
}

/// Radial shockwave visual.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Shockwave {
    pub radius: f64,
    pub opacity: f64,
}

impl Shockwave {
    /// Resting state shown whenever no explosion is active.
    pub const BASELINE: Shockwave = Shockwave {
        radius: 0.0,
        opacity: 0.0,
    };
}

#[derive(Debug, Clone)]
pub struct ExplosionMachine {
    state: ExplosionState,
    duration: Duration,
    shockwave_max_radius: f64,
}

impl Default for ExplosionMachine {
    fn default() -> Self {
        Self::new(EXPLOSION_DURATION, SHOCKWAVE_MAX_RADIUS)
    }
}

impl ExplosionMachine {
    pub fn new(duration: Duration, shockwave_max_radius: f64) -> Self {
        Self {
            state: ExplosionState::Normal,
            duration,
            shockwave_max_radius,
        }
    }

    pub fn state(&self) -> ExplosionState {
        self.state
    }

    pub fn is_exploding(&self) -> bool {
        matches!(self.state, ExplosionState::Exploding { .. })
    }

    /// Revert deadline of the active episode.
    pub fn deadline(&self) -> Option<Duration> {
        match self.state {
            ExplosionState::Exploding { deadline, .. } => Some(deadline),
            ExplosionState::Normal => None,
        }
    }

    /// Start an episode at `now`. Returns `false` (and leaves the deadline
    /// untouched) when one is already running.
    pub fn trigger(&mut self, now: Duration) -> bool {
        if self.is_exploding() {
            return false;
        }
        self.state = ExplosionState::Exploding {
            started: now,
            deadline: now + self.duration,
        };
        true
    }

    /// Revert to `Normal` once `now` reaches the deadline. Returns `true` on
    /// the update that performed the revert.
    pub fn update(&mut self, now: Duration) -> bool {
        match self.state {
            ExplosionState::Exploding { deadline, .. } if now >= deadline => {
                self.state = ExplosionState::Normal;
                true
            }
            _ => false,
        }
    }

    /// Force `Normal` immediately.
    pub fn reset(&mut self) {
        self.state = ExplosionState::Normal;
    }

    /// Elapsed fraction of the active episode in `[0, 1]`.
    pub fn progress(&self, now: Duration) -> Option<f64> {
        match self.state {
            ExplosionState::Exploding { started, deadline } => {
                let span = (deadline - started).as_secs_f64();
                if span <= 0.0 {
                    return Some(1.0);
                }
                let elapsed = now.saturating_sub(started).as_secs_f64();
                Some((elapsed / span).clamp(0.0, 1.0))
            }
            ExplosionState::Normal => None,
        }
    }

    /// Shockwave grows linearly and fades out over the episode.
    pub fn shockwave(&self, now: Duration) -> Shockwave {
        match self.progress(now) {
            Some(t) => Shockwave {
                radius: self.shockwave_max_radius * t,
                opacity: 1.0 - t,
            },
            None => Shockwave::BASELINE,
        }
    }
}
