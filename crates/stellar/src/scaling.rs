//! System-wide scaling driven by red-giant mass loss.
//!
//! The speed rule is a visual tuning curve, not Kepler's third law.

use orrery_core::bounds::{sanitize_age, sanitize_mass};
use orrery_core::constants::{MASS_FLOOR, RED_GIANT_SPAN};
use serde::Serialize;

use crate::lifecycle::lifespan;

/// Scaling factors applied to every orbit for a given `(mass, age)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SystemScaling {
    /// Initial (sanitized) stellar mass.
    pub mass: f64,
    /// Effective central mass after red-giant mass loss.
    pub current_mass: f64,
    /// `current_mass / mass`, in `[MASS_FLOOR, 1]`.
    pub mass_multiplier: f64,
    /// Multiplier applied to base orbital distances.
    pub expansion_factor: f64,
}

impl SystemScaling {
    /// Scale a base angular speed by `sqrt(current_mass) / sqrt(mass)`.
    pub fn speed_factor(&self, base_speed: f64) -> f64 {
        base_speed * self.current_mass.sqrt() / self.mass.sqrt()
    }
}

/// Mass multiplier: 1 up to `lifespan`, linear down to the floor across the
/// red-giant window, pinned at the floor afterwards.
pub fn mass_multiplier(mass: f64, age: f64) -> f64 {
    let start = lifespan(mass);
    let end = start * RED_GIANT_SPAN;
    if age >= end {
        MASS_FLOOR
    } else if age <= start {
        1.0
    } else {
        let phase = (age - start) / (end - start);
        1.0 - (1.0 - MASS_FLOOR) * phase
    }
}

/// Compute orbital scaling for the given mass and age. Inputs are clamped first.
pub fn compute_system_scaling(mass: f64, age: f64) -> SystemScaling {
    let mass = sanitize_mass(mass);
    let age = sanitize_age(age);
    let mass_multiplier = mass_multiplier(mass, age);
    let current_mass = mass * mass_multiplier;
    let expansion_factor = (mass / current_mass) * mass.sqrt();

    SystemScaling {
        mass,
        current_mass,
        mass_multiplier,
        expansion_factor,
    }
}
