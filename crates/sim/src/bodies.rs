//! Orbiting bodies and belt particles: static parameters plus the mutable
//! orbit state advanced every frame.

use std::f64::consts::TAU;

use orrery_config::{BeltConfig, BodyConfig, OrbitConfig};
use orrery_core::vector::{self, Vector3};
use orrery_orbits::{
    BodyClass, OrbitParams, OrbitShape, advance_angle, in_growth_window, is_engulfed,
    orbital_position,
};
use orrery_stellar::{StarState, SystemScaling};
use rand::Rng;
use rand_chacha::ChaChaRng;
use serde::Serialize;

use crate::BodyId;

/// Satellite angular speed in radians per real second.
const SATELLITE_SPEED: f64 = 1.5;
/// Satellite orbit radius as a multiple of the parent's size.
const SATELLITE_RADIUS_FACTOR: f64 = 2.5;

/// Mutable simulation state shared by bodies and particles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitState {
    pub angle: f64,
    pub is_inert: bool,
    pub position: Vector3,
}

impl OrbitState {
    fn at(params: &OrbitParams, scaling: &SystemScaling, angle: f64) -> Self {
        Self {
            angle,
            is_inert: false,
            position: orbital_position(params, scaling, angle),
        }
    }
}

/// Result of advancing one body by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyUpdate {
    pub position: Vector3,
    pub angle: f64,
    pub is_inert: bool,
    /// The body became inert during this update.
    pub engulfed: bool,
}

/// Advance one orbiter by `dt` simulated seconds and apply engulfment.
///
/// Only `state` is mutated. Inert bodies are returned unchanged. With
/// `frozen` set the angle holds still but the position is still re-derived
/// from the current scaling and checked for engulfment.
pub fn advance_body(
    params: &OrbitParams,
    state: &mut OrbitState,
    star: &StarState,
    scaling: &SystemScaling,
    dt: f64,
    frozen: bool,
) -> BodyUpdate {
    if state.is_inert {
        return BodyUpdate {
            position: state.position,
            angle: state.angle,
            is_inert: true,
            engulfed: false,
        };
    }
    if !frozen {
        state.angle = advance_angle(params, scaling, state.angle, dt);
    }
    state.position = orbital_position(params, scaling, state.angle);
    let engulfed =
        in_growth_window(star) && is_engulfed(params.class, star.scale, &state.position);
    if engulfed {
        state.is_inert = true;
    }
    BodyUpdate {
        position: state.position,
        angle: state.angle,
        is_inert: state.is_inert,
        engulfed,
    }
}

/// A catalog body.
#[derive(Debug, Clone)]
pub struct BodyState {
    pub id: BodyId,
    pub name: String,
    pub base_size: f64,
    pub params: OrbitParams,
    pub has_satellite: bool,
    pub has_ring_system: bool,
    pub orbit: OrbitState,
    /// Smoothed position handed to renderers.
    pub displayed_position: Vector3,
    pub satellite_angle: Option<f64>,
}

impl BodyState {
    /// Satellite position around the displayed parent, if any.
    pub fn satellite_position(&self) -> Option<Vector3> {
        self.satellite_angle.map(|angle| {
            let radius = self.base_size * SATELLITE_RADIUS_FACTOR;
            let (sin_a, cos_a) = angle.sin_cos();
            vector::add(
                &self.displayed_position,
                &[cos_a * radius, 0.0, sin_a * radius],
            )
        })
    }

    pub(crate) fn advance_satellite(&mut self, dt: f64) {
        if let Some(angle) = self.satellite_angle.as_mut() {
            *angle = (*angle + SATELLITE_SPEED * dt).rem_euclid(TAU);
        }
    }
}

/// A belt member.
#[derive(Debug, Clone)]
pub struct ParticleState {
    pub params: OrbitParams,
    pub size: f64,
    pub spin_axis: Vector3,
    pub orbit: OrbitState,
}

pub(crate) fn orbit_params(config: &BodyConfig) -> OrbitParams {
    let shape = match config.orbit {
        OrbitConfig::Circular => OrbitShape::Circular,
        OrbitConfig::Eccentric {
            eccentricity,
            inclination_deg,
        } => OrbitShape::Eccentric {
            eccentricity,
            inclination: inclination_deg.to_radians(),
        },
    };
    OrbitParams {
        base_distance: config.base_distance,
        base_angular_speed: config.base_angular_speed,
        vertical_offset: config.vertical_offset,
        shape,
        class: BodyClass::Planet,
    }
}

/// Create the catalog bodies with random starting angles.
pub fn build_bodies(
    catalog: &[BodyConfig],
    scaling: &SystemScaling,
    rng: &mut ChaChaRng,
) -> Vec<BodyState> {
    catalog
        .iter()
        .enumerate()
        .map(|(index, config)| {
            let params = orbit_params(config);
            let orbit = OrbitState::at(&params, scaling, rng.random_range(0.0..TAU));
            BodyState {
                id: BodyId(index),
                name: config.name.clone(),
                base_size: config.base_size,
                params,
                has_satellite: config.has_satellite,
                has_ring_system: config.has_ring_system,
                displayed_position: orbit.position,
                orbit,
                satellite_angle: config
                    .has_satellite
                    .then(|| rng.random_range(0.0..TAU)),
            }
        })
        .collect()
}

/// Generate `config.count` particles with randomized orbits.
///
/// Angular speed falls off as `(inner_radius / distance)^1.5`, scaled by a
/// uniform jitter of `±speed_jitter`.
pub fn generate_belt(
    config: &BeltConfig,
    class: BodyClass,
    scaling: &SystemScaling,
    rng: &mut ChaChaRng,
) -> Vec<ParticleState> {
    (0..config.count)
        .map(|_| {
            let distance = rng.random_range(config.inner_radius..config.outer_radius);
            let jitter = rng.random_range(-config.speed_jitter..=config.speed_jitter);
            let speed =
                config.base_angular_speed * (config.inner_radius / distance).powf(1.5) * (1.0 + jitter);
            let vertical_offset =
                rng.random_range(-config.vertical_spread..=config.vertical_spread);
            let params = OrbitParams {
                base_distance: distance,
                base_angular_speed: speed,
                vertical_offset,
                shape: OrbitShape::Circular,
                class,
            };
            let size = rng.random_range(config.min_size..=config.max_size);
            let axis = [
                rng.random_range(-1.0..=1.0),
                rng.random_range(-1.0..=1.0),
                rng.random_range(-1.0..=1.0),
            ];
            ParticleState {
                params,
                size,
                spin_axis: vector::normalize(&axis).unwrap_or([0.0, 1.0, 0.0]),
                orbit: OrbitState::at(&params, scaling, rng.random_range(0.0..TAU)),
            }
        })
        .collect()
}
