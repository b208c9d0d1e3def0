//! Single-entry memo over the `(mass, age)` model.
//!
//! Frame-rate callers evaluate the model every frame while the inputs
//! change only on ticks or user input, so the last frame is kept and
//! reused while its key matches.

use orrery_core::bounds::{sanitize_age, sanitize_mass};
use serde::Serialize;

use crate::lifecycle::{StarState, compute_star_state};
use crate::scaling::{SystemScaling, compute_system_scaling};

/// Combined model output for one `(mass, age)` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelFrame {
    pub star: StarState,
    pub scaling: SystemScaling,
}

/// Evaluate both pure models for `(mass, age)`.
pub fn evaluate(mass: f64, age: f64) -> ModelFrame {
    ModelFrame {
        star: compute_star_state(mass, age),
        scaling: compute_system_scaling(mass, age),
    }
}

/// Memo keyed on the bit patterns of the sanitized inputs.
#[derive(Debug, Default)]
pub struct ModelMemo {
    entry: Option<((u64, u64), ModelFrame)>,
    misses: u64,
}

impl ModelMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the frame for `(mass, age)`, recomputing only on a key change.
    pub fn get(&mut self, mass: f64, age: f64) -> &ModelFrame {
        let mass = sanitize_mass(mass);
        let age = sanitize_age(age);
        let key = (mass.to_bits(), age.to_bits());
        if matches!(&self.entry, Some((cached, _)) if *cached != key) {
            self.entry = None;
        }
        if self.entry.is_none() {
            self.misses += 1;
        }
        &self
            .entry
            .get_or_insert_with(|| (key, evaluate(mass, age)))
            .1
    }

    /// Number of recomputations so far.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}
