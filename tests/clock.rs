use std::time::Duration;

use stellar_orrery::sim::SimulationClock;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn paused_clock_does_not_advance() {
    let mut clock = SimulationClock::default();
    let advance = clock.advance(ms(500));
    assert_eq!(advance.ticks, 0);
    assert_eq!(clock.age(), 0.0);
}

#[test]
fn one_step_per_period() {
    let mut clock = SimulationClock::new(ms(50), 0.05, 1.0);
    assert!(clock.play());
    assert_eq!(clock.advance(ms(50)).ticks, 1);
    assert!((clock.age() - 1.05).abs() < 1e-12);
    assert_eq!(clock.advance(ms(120)).ticks, 2);
    assert_eq!(clock.advance(ms(30)).ticks, 1);
    assert!((clock.age() - 1.2).abs() < 1e-9);
}

#[test]
fn pause_drops_partial_tick() {
    let mut clock = SimulationClock::new(ms(50), 0.05, 0.0);
    clock.play();
    clock.advance(ms(40));
    clock.pause();
    clock.play();
    assert_eq!(clock.advance(ms(10)).ticks, 0);
    assert_eq!(clock.age(), 0.0);
}

#[test]
fn clamps_and_stops_at_max_age() {
    let mut clock = SimulationClock::new(ms(50), 0.05, 14.98);
    clock.play();
    let advance = clock.advance(ms(500));
    assert!(advance.stopped);
    assert_eq!(advance.ticks, 1);
    assert_eq!(clock.age(), 15.0);
    assert!(!clock.is_playing());
    assert!(!clock.play());
    assert!(!clock.toggle());
}

#[test]
fn set_age_is_clamped_and_immediate() {
    let mut clock = SimulationClock::default();
    clock.set_age(7.25);
    assert_eq!(clock.age(), 7.25);
    clock.set_age(-2.0);
    assert_eq!(clock.age(), 0.0);
    clock.set_age(f64::NAN);
    assert_eq!(clock.age(), 0.0);
    clock.set_age(40.0);
    assert_eq!(clock.age(), 15.0);
}

#[test]
fn toggle_flips_playback() {
    let mut clock = SimulationClock::default();
    assert!(clock.toggle());
    assert!(clock.is_playing());
    assert!(!clock.toggle());
    assert!(!clock.is_playing());
}
