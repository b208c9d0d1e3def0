use std::time::Duration;

use stellar_orrery::config::SimulationConfig;
use stellar_orrery::sim::{BodyId, Command, SimError, SimEvent, Simulation};
use stellar_orrery::stellar::StellarStage;

const MERCURY: BodyId = BodyId(0);
const VENUS: BodyId = BodyId(1);
const EARTH: BodyId = BodyId(2);
const JUPITER: BodyId = BodyId(4);

fn seeded(seed: u64) -> Simulation {
    let config = SimulationConfig {
        seed: Some(seed),
        ..SimulationConfig::default()
    };
    Simulation::new(config).expect("default config is valid")
}

fn frame() -> Duration {
    Duration::from_millis(20)
}

fn engulfed_ids(events: &[SimEvent]) -> Vec<BodyId> {
    events
        .iter()
        .filter_map(|e| match e {
            SimEvent::Engulfed { id, .. } => Some(*id),
            _ => None,
        })
        .collect()
}

#[test]
fn inner_planets_engulfed_during_red_giant_growth() {
    let mut sim = seeded(7);
    sim.apply(Command::SetAge(11.9)).unwrap();
    let events = sim.step(frame());
    let engulfed = engulfed_ids(&events);
    assert!(engulfed.contains(&MERCURY));
    assert!(engulfed.contains(&VENUS));
    assert!(!engulfed.contains(&EARTH));
    assert!(events.contains(&SimEvent::StageChanged {
        from: StellarStage::MainSequence,
        to: StellarStage::RedGiant,
        age: 11.9,
    }));

    let snapshot = sim.snapshot();
    assert_eq!(snapshot.body(MERCURY).unwrap().size, 0.0);
    assert!(snapshot.body(EARTH).unwrap().size > 0.0);
}

#[test]
fn engulfed_bodies_stay_inert_after_rewinding_age() {
    let mut sim = seeded(7);
    sim.apply(Command::SetAge(11.9)).unwrap();
    sim.step(frame());
    sim.apply(Command::SetAge(0.0)).unwrap();
    let events = sim.step(frame());
    assert!(engulfed_ids(&events).is_empty());
    assert!(sim.body(MERCURY).unwrap().orbit.is_inert);
    assert!(sim.body(VENUS).unwrap().orbit.is_inert);

    // Re-entering the window reports nothing new for the same bodies.
    sim.apply(Command::SetAge(12.2)).unwrap();
    let events = sim.step(frame());
    let again = engulfed_ids(&events);
    assert!(!again.contains(&MERCURY));
    assert!(!again.contains(&VENUS));
}

#[test]
fn engulfment_clears_focus_and_selection() {
    let mut sim = seeded(7);
    sim.apply(Command::Select(MERCURY)).unwrap();
    assert_eq!(sim.focus().focused(), Some(MERCURY));
    assert_eq!(sim.focused_body().map(|b| b.name.as_str()), Some("Mercury"));

    sim.apply(Command::SetAge(11.9)).unwrap();
    let events = sim.step(frame());
    assert!(events.contains(&SimEvent::FocusCleared { id: MERCURY }));
    assert_eq!(sim.focus().focused(), None);
    assert_eq!(sim.focus().selected(), None);
    assert!(sim.focused_body().is_none());

    assert!(matches!(
        sim.apply(Command::Select(MERCURY)),
        Err(SimError::BodyInert(MERCURY))
    ));
    assert!(matches!(
        sim.select(BodyId(99)),
        Err(SimError::UnknownBody(BodyId(99)))
    ));
}

#[test]
fn focus_on_surviving_body_is_kept() {
    let mut sim = seeded(7);
    sim.apply(Command::Select(EARTH)).unwrap();
    sim.apply(Command::SetAge(11.9)).unwrap();
    let events = sim.step(frame());
    assert!(!events.iter().any(|e| matches!(e, SimEvent::FocusCleared { .. })));
    assert_eq!(sim.focus().selected(), Some(EARTH));
}

#[test]
fn explosion_hides_bodies_and_freezes_orbits() {
    let mut sim = seeded(7);
    sim.step(frame());
    let events = sim.apply(Command::TriggerExplosion).unwrap();
    assert_eq!(events, vec![SimEvent::ExplosionStarted]);
    assert!(sim.is_exploding());

    let angle_before = sim.body(JUPITER).unwrap().orbit.angle;
    sim.step(frame());
    assert_eq!(sim.body(JUPITER).unwrap().orbit.angle, angle_before);

    let snapshot = sim.snapshot();
    assert!(snapshot.exploding);
    assert!(snapshot.bodies.iter().all(|b| b.size == 0.0));
    assert!(snapshot.bodies.iter().all(|b| b.satellite_position.is_none()));
    assert_eq!(snapshot.inner_belt.visible, 0);
    assert_eq!(snapshot.outer_belt.visible, 0);
    assert!(snapshot.shockwave.radius > 0.0);
    assert!(sim.displayed_star_scale() > snapshot.star.scale);
}

#[test]
fn explosion_ends_two_seconds_after_trigger() {
    let mut sim = seeded(7);
    sim.apply(Command::TriggerExplosion).unwrap();
    let mut ended_at = None;
    for _ in 0..150 {
        let events = sim.step(frame());
        if events.contains(&SimEvent::ExplosionEnded) {
            assert!(ended_at.is_none(), "explosion ended twice");
            ended_at = Some(sim.elapsed());
        }
    }
    assert_eq!(ended_at, Some(Duration::from_secs(2)));
    assert!(!sim.is_exploding());

    let snapshot = sim.snapshot();
    assert!(snapshot.body(EARTH).unwrap().size > 0.0);
    assert!(snapshot.body(EARTH).unwrap().satellite_position.is_some());
}

#[test]
fn second_trigger_does_not_extend_explosion() {
    let mut sim = seeded(7);
    sim.apply(Command::TriggerExplosion).unwrap();
    for _ in 0..50 {
        sim.step(frame());
    }
    assert!(sim.apply(Command::TriggerExplosion).unwrap().is_empty());
    assert_eq!(sim.explosion().deadline(), Some(Duration::from_secs(2)));
    for _ in 0..50 {
        sim.step(frame());
    }
    assert!(!sim.is_exploding());
}

#[test]
fn reset_restores_a_fresh_system() {
    let mut sim = seeded(7);
    let first_seed = sim.seed();
    sim.apply(Command::Select(EARTH)).unwrap();
    sim.apply(Command::SetAge(11.9)).unwrap();
    sim.apply(Command::Play).unwrap();
    sim.step(frame());
    sim.apply(Command::TriggerExplosion).unwrap();

    let events = sim.apply(Command::Reset).unwrap();
    assert!(matches!(events.as_slice(), [SimEvent::Reset { .. }]));
    assert_ne!(sim.seed(), first_seed);
    assert!(!sim.is_exploding());
    assert!(!sim.is_playing());
    assert_eq!(sim.age(), 0.0);
    assert_eq!(sim.focus().focused(), None);
    assert!(sim.bodies().iter().all(|b| !b.orbit.is_inert));
}

#[test]
fn reset_keeps_mass() {
    let mut sim = seeded(7);
    sim.apply(Command::SetMass(3.0)).unwrap();
    sim.apply(Command::Reset).unwrap();
    assert_eq!(sim.mass(), 3.0);
    assert_eq!(sim.model().star.mass, 3.0);
}

#[test]
fn same_seed_builds_same_system() {
    let a = seeded(42);
    let b = seeded(42);
    assert_eq!(a.seed(), b.seed());
    for (x, y) in a.bodies().iter().zip(b.bodies()) {
        assert_eq!(x.orbit.angle, y.orbit.angle);
    }
    for (x, y) in a.inner_belt().iter().zip(b.inner_belt()) {
        assert_eq!(x.params, y.params);
    }
    assert_eq!(a.outer_belt().len(), 1500);

    let c = seeded(43);
    assert!(
        a.inner_belt()
            .iter()
            .zip(c.inner_belt())
            .any(|(x, y)| x.params.base_distance != y.params.base_distance)
    );
}

#[test]
fn belt_particles_stay_within_configured_band() {
    let sim = seeded(3);
    for p in sim.inner_belt() {
        assert!((5.2..6.6).contains(&p.params.base_distance));
        assert!(p.params.vertical_offset.abs() <= 0.15);
        assert!((0.02..=0.06).contains(&p.size));
        let axis_len = p.spin_axis.iter().map(|c| c * c).sum::<f64>().sqrt();
        assert!((axis_len - 1.0).abs() < 1e-9);
    }
}

#[test]
fn advancing_one_body_leaves_the_rest_untouched() {
    let mut sim = seeded(7);
    let before: Vec<f64> = sim.bodies().iter().map(|b| b.orbit.angle).collect();
    let update = sim.advance_body(JUPITER, 1.0).expect("body exists");
    assert!(!update.engulfed);
    for (index, body) in sim.bodies().iter().enumerate() {
        if index == JUPITER.0 {
            assert_ne!(body.orbit.angle, before[index]);
        } else {
            assert_eq!(body.orbit.angle, before[index]);
        }
    }
    assert!(sim.advance_body(BodyId(99), 1.0).is_none());
}

#[test]
fn playback_advances_age_on_ticks() {
    let mut sim = seeded(7);
    sim.apply(Command::Play).unwrap();
    for _ in 0..10 {
        sim.step(frame());
    }
    // 200 ms of play at one 0.05 BY step per 50 ms.
    assert!((sim.age() - 0.2).abs() < 1e-9);
    sim.apply(Command::TogglePlay).unwrap();
    sim.step(Duration::from_secs(1));
    assert!((sim.age() - 0.2).abs() < 1e-9);
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = SimulationConfig::default();
    config.clock.tick_ms = 0;
    assert!(matches!(Simulation::new(config), Err(SimError::Config(_))));
}

#[test]
fn unbounded_belt_is_rejected_before_generation() {
    let mut config = SimulationConfig::default();
    config.belts.inner.outer_radius = f64::INFINITY;
    assert!(matches!(Simulation::new(config), Err(SimError::Config(_))));

    let mut config = SimulationConfig::default();
    config.belts.outer.max_size = f64::NAN;
    assert!(matches!(Simulation::new(config), Err(SimError::Config(_))));
}
