use std::f64::consts::{FRAC_PI_2, PI, TAU};

use stellar_orrery::orbits::{
    BodyClass, OrbitParams, OrbitShape, advance_angle, in_growth_window, is_engulfed,
    orbital_position, smooth_scalar, smoothing_alpha,
};
use stellar_orrery::sim::{OrbitState, advance_body};
use stellar_orrery::stellar::{compute_star_state, compute_system_scaling, lifespan};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn circular_orbit_follows_expansion() {
    let params = OrbitParams {
        vertical_offset: 0.3,
        ..OrbitParams::circular(BodyClass::Planet, 5.0, 1.0)
    };
    let young = compute_system_scaling(1.0, 0.0);
    let pos = orbital_position(&params, &young, 0.0);
    assert!(close(pos[0], 5.0) && close(pos[1], 0.3) && close(pos[2], 0.0));

    let old = compute_system_scaling(1.0, 14.0);
    let pos = orbital_position(&params, &old, FRAC_PI_2);
    assert!(close(pos[2], 12.5));
}

#[test]
fn eccentric_orbit_has_star_at_focus() {
    let params = OrbitParams {
        shape: OrbitShape::Eccentric {
            eccentricity: 0.5,
            inclination: 0.0,
        },
        ..OrbitParams::circular(BodyClass::Planet, 4.0, 1.0)
    };
    let scaling = compute_system_scaling(1.0, 0.0);
    let periapsis = orbital_position(&params, &scaling, 0.0);
    let apoapsis = orbital_position(&params, &scaling, PI);
    assert!(close(periapsis[0], 2.0));
    assert!(close(apoapsis[0], -6.0));
}

#[test]
fn inclination_lifts_the_orbit_out_of_plane() {
    let params = OrbitParams {
        shape: OrbitShape::Eccentric {
            eccentricity: 0.0,
            inclination: FRAC_PI_2,
        },
        ..OrbitParams::circular(BodyClass::Planet, 3.0, 1.0)
    };
    let scaling = compute_system_scaling(1.0, 0.0);
    let pos = orbital_position(&params, &scaling, FRAC_PI_2);
    assert!(close(pos[1], 3.0));
    assert!(pos[2].abs() < 1e-9);
}

#[test]
fn time_scales_per_class() {
    let scaling = compute_system_scaling(1.0, 0.0);
    let planet = OrbitParams::circular(BodyClass::Planet, 5.0, 1.0);
    let inner = OrbitParams::circular(BodyClass::InnerBelt, 5.0, 1.0);
    let outer = OrbitParams::circular(BodyClass::OuterBelt, 5.0, 1.0);
    assert!(close(advance_angle(&planet, &scaling, 0.0, 1.0), 0.2));
    assert!(close(advance_angle(&inner, &scaling, 0.0, 1.0), 0.2));
    assert!(close(advance_angle(&outer, &scaling, 0.0, 1.0), 0.1));
}

#[test]
fn angle_wraps_into_one_turn() {
    let scaling = compute_system_scaling(1.0, 0.0);
    let params = OrbitParams::circular(BodyClass::Planet, 5.0, 10.0);
    let angle = advance_angle(&params, &scaling, TAU - 0.1, 1.0);
    assert!((0.0..TAU).contains(&angle));
    assert!(close(angle, 1.9));
}

#[test]
fn engulfment_thresholds_per_class() {
    let pos = [1.0, 0.0, 0.0];
    assert!(is_engulfed(BodyClass::Planet, 0.96, &pos));
    assert!(!is_engulfed(BodyClass::Planet, 0.95, &pos));
    assert!(is_engulfed(BodyClass::InnerBelt, 0.91, &pos));
    assert!(!is_engulfed(BodyClass::InnerBelt, 0.9, &pos));
    assert!(!is_engulfed(BodyClass::OuterBelt, 1_000.0, &pos));
}

#[test]
fn vertical_offset_does_not_protect() {
    assert!(is_engulfed(BodyClass::Planet, 0.96, &[1.0, 50.0, 0.0]));
}

#[test]
fn growth_window_matches_red_giant_stage() {
    assert!(!in_growth_window(&compute_star_state(1.0, 10.0)));
    assert!(in_growth_window(&compute_star_state(1.0, lifespan(1.0))));
    assert!(in_growth_window(&compute_star_state(1.0, 12.0)));
    assert!(!in_growth_window(&compute_star_state(1.0, 13.0)));
}

#[test]
fn advance_body_engulfs_once_and_stays_inert() {
    let params = OrbitParams::circular(BodyClass::Planet, 2.0, 1.0);
    let star = compute_star_state(1.0, 11.9);
    let scaling = compute_system_scaling(1.0, 11.9);
    let mut state = OrbitState {
        angle: 0.0,
        is_inert: false,
        position: [2.0, 0.0, 0.0],
    };
    let first = advance_body(&params, &mut state, &star, &scaling, 0.016, false);
    assert!(first.engulfed && first.is_inert);

    let young = compute_star_state(1.0, 0.0);
    let young_scaling = compute_system_scaling(1.0, 0.0);
    let second = advance_body(&params, &mut state, &young, &young_scaling, 0.016, false);
    assert!(!second.engulfed);
    assert!(second.is_inert);
    assert_eq!(second.position, first.position);
}

#[test]
fn remnant_star_never_engulfs() {
    let params = OrbitParams::circular(BodyClass::Planet, 0.1, 1.0);
    let star = compute_star_state(1.0, 15.0);
    let scaling = compute_system_scaling(1.0, 15.0);
    let mut state = OrbitState {
        angle: 0.0,
        is_inert: false,
        position: [0.1, 0.0, 0.0],
    };
    let update = advance_body(&params, &mut state, &star, &scaling, 0.016, false);
    assert!(!update.is_inert);
}

#[test]
fn frozen_body_holds_its_angle() {
    let params = OrbitParams::circular(BodyClass::Planet, 5.0, 1.0);
    let star = compute_star_state(1.0, 0.0);
    let scaling = compute_system_scaling(1.0, 0.0);
    let mut state = OrbitState {
        angle: 1.0,
        is_inert: false,
        position: orbital_position(&params, &scaling, 1.0),
    };
    let update = advance_body(&params, &mut state, &star, &scaling, 1.0, true);
    assert_eq!(update.angle, 1.0);
}

#[test]
fn smoothing_converges_and_snaps_without_rate() {
    assert_eq!(smoothing_alpha(0.0, 0.016), 1.0);
    let alpha = smoothing_alpha(8.0, 0.016);
    assert!(alpha > 0.0 && alpha < 1.0);
    let mut value = 0.0;
    for _ in 0..600 {
        value = smooth_scalar(value, 10.0, alpha);
    }
    assert!((value - 10.0).abs() < 1e-6);
}
