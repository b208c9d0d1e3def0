//! Orbital position model for bodies circling the evolving star.
//!
//! Distances stretch with [`SystemScaling::expansion_factor`] and angular
//! speeds follow [`SystemScaling::speed_factor`].

pub mod engulfment;
pub mod smoothing;

use orrery_core::constants::{
    INNER_BELT_ENGULF_THRESHOLD, OUTER_BELT_TIME_SCALE, PLANET_ENGULF_THRESHOLD, PLANET_TIME_SCALE,
};
use orrery_core::vector::Vector3;
use orrery_stellar::SystemScaling;
use serde::Serialize;

pub use engulfment::{in_growth_window, is_engulfed};
pub use smoothing::{smooth_scalar, smooth_toward, smoothing_alpha};

/// Class of orbiting body; selects time scale and engulfment threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyClass {
    Planet,
    InnerBelt,
    OuterBelt,
}

impl BodyClass {
    /// Multiplier turning scaled angular speed into radians per simulated second.
    pub fn time_scale(&self) -> f64 {
        match self {
            BodyClass::Planet | BodyClass::InnerBelt => PLANET_TIME_SCALE,
            BodyClass::OuterBelt => OUTER_BELT_TIME_SCALE,
        }
    }

    /// Fraction of the planar orbital distance the star must exceed to engulf
    /// the body. `None` means the class is never engulfed.
    pub fn engulf_threshold(&self) -> Option<f64> {
        match self {
            BodyClass::Planet => Some(PLANET_ENGULF_THRESHOLD),
            BodyClass::InnerBelt => Some(INNER_BELT_ENGULF_THRESHOLD),
            BodyClass::OuterBelt => None,
        }
    }
}

/// Orbit geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrbitShape {
    #[default]
    Circular,
    /// Conic with the star at the focus; `inclination` in radians tilts the
    /// orbital plane about the x axis.
    Eccentric { eccentricity: f64, inclination: f64 },
}

/// Static orbital parameters of one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitParams {
    pub base_distance: f64,
    pub base_angular_speed: f64,
    pub vertical_offset: f64,
    pub shape: OrbitShape,
    pub class: BodyClass,
}

impl OrbitParams {
    pub fn circular(class: BodyClass, base_distance: f64, base_angular_speed: f64) -> Self {
        Self {
            base_distance,
            base_angular_speed,
            vertical_offset: 0.0,
            shape: OrbitShape::Circular,
            class,
        }
    }

    /// Orbital distance after system expansion.
    pub fn current_distance(&self, scaling: &SystemScaling) -> f64 {
        self.base_distance * scaling.expansion_factor
    }

    /// Angular rate in radians per simulated second.
    pub fn angular_rate(&self, scaling: &SystemScaling) -> f64 {
        scaling.speed_factor(self.base_angular_speed) * self.class.time_scale()
    }
}

/// Position of a body at `angle` under the given scaling.
pub fn orbital_position(params: &OrbitParams, scaling: &SystemScaling, angle: f64) -> Vector3 {
    let distance = params.current_distance(scaling);
    let (sin_a, cos_a) = angle.sin_cos();
    match params.shape {
        OrbitShape::Circular => [
            cos_a * distance,
            params.vertical_offset,
            sin_a * distance,
        ],
        OrbitShape::Eccentric {
            eccentricity,
            inclination,
        } => {
            let e = eccentricity;
            let r = distance * (1.0 - e * e) / (1.0 + e * cos_a);
            let planar_x = r * cos_a;
            let planar_y = r * sin_a;
            let (sin_i, cos_i) = inclination.sin_cos();
            [
                planar_x,
                params.vertical_offset + planar_y * sin_i,
                planar_y * cos_i,
            ]
        }
    }
}

/// Advance `angle` by `dt` simulated seconds, wrapped into `[0, 2π)`.
pub fn advance_angle(params: &OrbitParams, scaling: &SystemScaling, angle: f64, dt: f64) -> f64 {
    (angle + params.angular_rate(scaling) * dt).rem_euclid(std::f64::consts::TAU)
}
