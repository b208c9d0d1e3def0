//! Stellar lifecycle: lifespan markers, stage selection, and visual parameters.
//!
//! Stage boundaries belong to the later stage: `age == lifespan` is already a
//! red giant and `age == red_giant_end` is already a remnant.

use std::fmt;

use orrery_core::bounds::{sanitize_age, sanitize_mass};
use orrery_core::constants::{
    RED_GIANT_GROWTH, RED_GIANT_SPAN, SUPERNOVA_MASS, SUPERNOVA_SCALE,
    WHITE_DWARF_SCALE,
};
use serde::Serialize;

use crate::color::StellarColor;

/// Life stage of the central star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StellarStage {
    MainSequence,
    RedGiant,
    Supernova,
    WhiteDwarf,
}

impl StellarStage {
    pub fn label(&self) -> &'static str {
        match self {
            StellarStage::MainSequence => "Main Sequence",
            StellarStage::RedGiant => "Red Giant",
            StellarStage::Supernova => "Supernova",
            StellarStage::WhiteDwarf => "White Dwarf",
        }
    }

    /// True for the terminal stages reached at `age >= red_giant_end`.
    pub fn is_remnant(&self) -> bool {
        matches!(self, StellarStage::Supernova | StellarStage::WhiteDwarf)
    }
}

impl fmt::Display for StellarStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Snapshot of the star derived from `(mass, age)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarState {
    pub mass: f64,
    pub age: f64,
    pub stage: StellarStage,
    pub color: StellarColor,
    pub scale: f64,
    pub description: String,
    pub lifespan: f64,
    pub red_giant_end: f64,
    /// Fraction of the red-giant window elapsed; zero outside it.
    pub phase_progress: f64,
}

/// Main-sequence lifetime in BY: `10 / mass^2.5 + 0.5`.
pub fn lifespan(mass: f64) -> f64 {
    10.0 / mass.powf(2.5) + 0.5
}

/// Age at which the red-giant phase ends.
pub fn red_giant_end(mass: f64) -> f64 {
    lifespan(mass) * RED_GIANT_SPAN
}

/// Main-sequence visual size.
pub fn base_size(mass: f64) -> f64 {
    (mass + 1.0).ln() * 1.5
}

/// Progress through the red-giant window, in `[0, 1]`.
///
/// Zero before `lifespan`, one from `red_giant_end` on.
pub fn phase_progress(mass: f64, age: f64) -> f64 {
    let start = lifespan(mass);
    let end = start * RED_GIANT_SPAN;
    if age <= start {
        0.0
    } else if age >= end {
        1.0
    } else {
        (age - start) / (end - start)
    }
}

fn main_sequence_color(mass: f64) -> StellarColor {
    if mass > 2.0 {
        StellarColor::PALE_BLUE
    } else if mass > 0.8 {
        StellarColor::YELLOW
    } else {
        StellarColor::ORANGE_RED
    }
}

/// Compute the star descriptor for the given mass (solar masses) and age (BY).
///
/// Out-of-range inputs are clamped first, so NaN never reaches stage selection.
pub fn compute_star_state(mass: f64, age: f64) -> StarState {
    let mass = sanitize_mass(mass);
    let age = sanitize_age(age);
    let lifespan = lifespan(mass);
    let red_giant_end = lifespan * RED_GIANT_SPAN;
    let base = base_size(mass);

    let (stage, color, scale, description, phase) = if age < lifespan {
        (
            StellarStage::MainSequence,
            main_sequence_color(mass),
            base,
            format!("Stable Fusion, estimated lifespan = {lifespan:.2} BY"),
            0.0,
        )
    } else if age < red_giant_end {
        let phase = (age - lifespan) / (red_giant_end - lifespan);
        (
            StellarStage::RedGiant,
            StellarColor::DEEP_RED,
            base * (1.0 + RED_GIANT_GROWTH * phase),
            "Hydrogen depleted, core collapsing".to_string(),
            phase,
        )
    } else if mass > SUPERNOVA_MASS {
        (
            StellarStage::Supernova,
            StellarColor::WHITE,
            base * SUPERNOVA_SCALE,
            "Core collapse: supernova remnant expanding".to_string(),
            1.0,
        )
    } else {
        (
            StellarStage::WhiteDwarf,
            StellarColor::WHITE,
            base * WHITE_DWARF_SCALE,
            "Outer layers shed: cooling white dwarf".to_string(),
            1.0,
        )
    };

    StarState {
        mass,
        age,
        stage,
        color,
        scale,
        description,
        lifespan,
        red_giant_end,
        phase_progress: phase,
    }
}
