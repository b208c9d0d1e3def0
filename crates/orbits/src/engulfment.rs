//! Engulfment: the growing red giant swallowing bodies on close orbits.

use orrery_core::vector::{Vector3, planar_norm};
use orrery_stellar::StarState;

use crate::BodyClass;

/// True while `lifespan <= age < red_giant_end`, the only window in which
/// engulfment is evaluated.
pub fn in_growth_window(star: &StarState) -> bool {
    star.age >= star.lifespan && star.age < star.red_giant_end
}

/// Whether a star of visual `star_scale` has overtaken a body at `position`.
///
/// Uses the distance in the orbital plane, so vertical offsets never save a
/// body. Classes without a threshold are never engulfed.
pub fn is_engulfed(class: BodyClass, star_scale: f64, position: &Vector3) -> bool {
    match class.engulf_threshold() {
        Some(threshold) => star_scale > planar_norm(position) * threshold,
        None => false,
    }
}
