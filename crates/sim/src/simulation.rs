//! The frame-driven simulation tying the pure models to mutable body state.

use std::time::Duration;

use log::{debug, info};
use orrery_config::SimulationConfig;
use orrery_core::bounds::sanitize_mass;
use orrery_orbits::{BodyClass, smooth_scalar, smooth_toward, smoothing_alpha};
use orrery_stellar::{ModelFrame, ModelMemo, StellarStage, compute_system_scaling};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;
use serde::Serialize;

use crate::bodies::{BodyState, BodyUpdate, ParticleState, advance_body, build_bodies, generate_belt};
use crate::clock::SimulationClock;
use crate::explosion::ExplosionMachine;
use crate::focus::Focus;
use crate::snapshot::{BeltSnapshot, BodySnapshot, FrameSnapshot};
use crate::{BodyId, SimError};

/// Discrete commands relayed from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SetMass(f64),
    SetAge(f64),
    Play,
    Pause,
    TogglePlay,
    TriggerExplosion,
    Reset,
    Select(BodyId),
    ClearSelection,
}

/// Notable transitions reported by [`Simulation::apply`] and [`Simulation::step`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimEvent {
    StageChanged {
        from: StellarStage,
        to: StellarStage,
        age: f64,
    },
    Engulfed {
        id: BodyId,
        name: String,
        age: f64,
    },
    BeltEngulfed {
        class: BodyClass,
        count: usize,
    },
    FocusCleared {
        id: BodyId,
    },
    ExplosionStarted,
    ExplosionEnded,
    PlaybackStopped {
        age: f64,
    },
    Reset {
        seed: u64,
    },
}

pub struct Simulation {
    config: SimulationConfig,
    mass: f64,
    clock: SimulationClock,
    explosion: ExplosionMachine,
    focus: Focus,
    bodies: Vec<BodyState>,
    inner_belt: Vec<ParticleState>,
    outer_belt: Vec<ParticleState>,
    memo: ModelMemo,
    seeds: ChaChaRng,
    seed: u64,
    now: Duration,
    displayed_star_scale: f64,
    stage: StellarStage,
}

impl Simulation {
    /// Build a simulation from a validated configuration.
    pub fn new(config: SimulationConfig) -> Result<Self, SimError> {
        config.validate()?;
        let mut seeds = match config.seed {
            Some(seed) => ChaChaRng::seed_from_u64(seed),
            None => ChaChaRng::seed_from_u64(rand::random()),
        };
        let seed = seeds.random();
        let mass = sanitize_mass(config.star.initial_mass);
        let clock = SimulationClock::new(
            Duration::from_millis(config.clock.tick_ms),
            config.clock.age_step,
            config.star.initial_age,
        );
        let explosion = ExplosionMachine::new(
            Duration::from_millis(config.explosion.duration_ms),
            config.explosion.shockwave_max_radius,
        );

        let mut sim = Self {
            config,
            mass,
            clock,
            explosion,
            focus: Focus::default(),
            bodies: Vec::new(),
            inner_belt: Vec::new(),
            outer_belt: Vec::new(),
            memo: ModelMemo::new(),
            seeds,
            seed,
            now: Duration::ZERO,
            displayed_star_scale: 0.0,
            stage: StellarStage::MainSequence,
        };
        sim.populate();
        Ok(sim)
    }

    /// Recreate every body and belt from the current seed and sync derived state.
    fn populate(&mut self) {
        let mut rng = ChaChaRng::seed_from_u64(self.seed);
        let scaling = compute_system_scaling(self.mass, self.clock.age());
        self.bodies = build_bodies(&self.config.bodies, &scaling, &mut rng);
        self.inner_belt = generate_belt(
            &self.config.belts.inner,
            BodyClass::InnerBelt,
            &scaling,
            &mut rng,
        );
        self.outer_belt = generate_belt(
            &self.config.belts.outer,
            BodyClass::OuterBelt,
            &scaling,
            &mut rng,
        );
        let frame = self.memo.get(self.mass, self.clock.age());
        self.stage = frame.star.stage;
        self.displayed_star_scale = frame.star.scale;
        debug!(
            "populated {} bodies, {} + {} belt particles (seed {})",
            self.bodies.len(),
            self.inner_belt.len(),
            self.outer_belt.len(),
            self.seed
        );
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn age(&self) -> f64 {
        self.clock.age()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn elapsed(&self) -> Duration {
        self.now
    }

    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    pub fn is_exploding(&self) -> bool {
        self.explosion.is_exploding()
    }

    pub fn explosion(&self) -> &ExplosionMachine {
        &self.explosion
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn bodies(&self) -> &[BodyState] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&BodyState> {
        self.bodies.get(id.0)
    }

    pub fn body_by_name(&self, name: &str) -> Option<&BodyState> {
        self.bodies
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(name))
    }

    /// The focused body, resolved through the live table.
    pub fn focused_body(&self) -> Option<&BodyState> {
        self.focus.focused().and_then(|id| self.body(id))
    }

    pub fn inner_belt(&self) -> &[ParticleState] {
        &self.inner_belt
    }

    pub fn outer_belt(&self) -> &[ParticleState] {
        &self.outer_belt
    }

    pub fn displayed_star_scale(&self) -> f64 {
        self.displayed_star_scale
    }

    /// Model output for the current `(mass, age)`.
    pub fn model(&mut self) -> &ModelFrame {
        self.memo.get(self.mass, self.clock.age())
    }

    /// Apply a discrete command immediately.
    pub fn apply(&mut self, command: Command) -> Result<Vec<SimEvent>, SimError> {
        let mut events = Vec::new();
        match command {
            Command::SetMass(mass) => self.mass = sanitize_mass(mass),
            Command::SetAge(age) => self.clock.set_age(age),
            Command::Play => {
                self.clock.play();
            }
            Command::Pause => self.clock.pause(),
            Command::TogglePlay => {
                self.clock.toggle();
            }
            Command::TriggerExplosion => {
                if self.explosion.trigger(self.now) {
                    info!("explosion triggered at {:.3}s", self.now.as_secs_f64());
                    events.push(SimEvent::ExplosionStarted);
                }
            }
            Command::Reset => events.push(self.reset()),
            Command::Select(id) => self.select(id)?,
            Command::ClearSelection => self.focus.clear(),
        }
        Ok(events)
    }

    /// Focus and select a live body.
    pub fn select(&mut self, id: BodyId) -> Result<(), SimError> {
        let body = self.body(id).ok_or(SimError::UnknownBody(id))?;
        if body.orbit.is_inert {
            return Err(SimError::BodyInert(id));
        }
        self.focus.select(id);
        Ok(())
    }

    /// Full reset: new seed, fresh bodies, explosion back to normal, focus
    /// cleared, playback stopped, age back to its initial value. Mass is kept.
    pub fn reset(&mut self) -> SimEvent {
        self.seed = self.seeds.random();
        self.explosion.reset();
        self.focus.clear();
        self.clock.pause();
        self.clock.set_age(self.config.star.initial_age);
        self.populate();
        info!("system reset with seed {}", self.seed);
        SimEvent::Reset { seed: self.seed }
    }

    /// Advance one body by `dt` simulated seconds against the current model.
    ///
    /// Mutates only that body. Engulfment releases any focus on it.
    pub fn advance_body(&mut self, id: BodyId, dt: f64) -> Option<BodyUpdate> {
        let frame = self.memo.get(self.mass, self.clock.age()).clone();
        let frozen = self.explosion.is_exploding();
        let body = self.bodies.get_mut(id.0)?;
        let update = advance_body(
            &body.params,
            &mut body.orbit,
            &frame.star,
            &frame.scaling,
            dt,
            frozen,
        );
        if update.engulfed {
            self.focus.release(id);
        }
        Some(update)
    }

    /// Advance the whole system by one frame of real time.
    pub fn step(&mut self, dt: Duration) -> Vec<SimEvent> {
        let mut events = Vec::new();
        self.now += dt;

        let advance = self.clock.advance(dt);
        if advance.ticks > 0 {
            debug!("{} tick(s), age {:.2}", advance.ticks, self.clock.age());
        }
        if advance.stopped {
            info!("playback stopped at age {:.2}", self.clock.age());
            events.push(SimEvent::PlaybackStopped {
                age: self.clock.age(),
            });
        }
        if self.explosion.update(self.now) {
            info!("explosion ended at {:.3}s", self.now.as_secs_f64());
            events.push(SimEvent::ExplosionEnded);
        }

        let frame = self.memo.get(self.mass, self.clock.age()).clone();
        if frame.star.stage != self.stage {
            debug!(
                "stage {} -> {} at age {:.2}",
                self.stage, frame.star.stage, frame.star.age
            );
            events.push(SimEvent::StageChanged {
                from: self.stage,
                to: frame.star.stage,
                age: frame.star.age,
            });
            self.stage = frame.star.stage;
        }

        let exploding = self.explosion.is_exploding();
        let seconds = dt.as_secs_f64();
        let alpha = smoothing_alpha(self.config.smoothing_rate, seconds);

        for body in &mut self.bodies {
            let update = advance_body(
                &body.params,
                &mut body.orbit,
                &frame.star,
                &frame.scaling,
                seconds,
                exploding,
            );
            if update.engulfed {
                info!("{} engulfed at age {:.2}", body.name, frame.star.age);
                events.push(SimEvent::Engulfed {
                    id: body.id,
                    name: body.name.clone(),
                    age: frame.star.age,
                });
                if self.focus.release(body.id) {
                    events.push(SimEvent::FocusCleared { id: body.id });
                }
            }
            if !update.is_inert {
                body.displayed_position =
                    smooth_toward(&body.displayed_position, &update.position, alpha);
                if !exploding {
                    body.advance_satellite(seconds);
                }
            }
        }

        for (class, belt) in [
            (BodyClass::InnerBelt, &mut self.inner_belt),
            (BodyClass::OuterBelt, &mut self.outer_belt),
        ] {
            let count = belt
                .iter_mut()
                .map(|p| {
                    advance_body(
                        &p.params,
                        &mut p.orbit,
                        &frame.star,
                        &frame.scaling,
                        seconds,
                        exploding,
                    )
                })
                .filter(|u| u.engulfed)
                .count();
            if count > 0 {
                debug!("{count} {class:?} particle(s) engulfed");
                events.push(SimEvent::BeltEngulfed { class, count });
            }
        }

        let target_scale = if exploding {
            self.config.explosion.peak_star_scale
        } else {
            frame.star.scale
        };
        self.displayed_star_scale = smooth_scalar(self.displayed_star_scale, target_scale, alpha);

        events
    }

    /// Capture what a renderer needs for the current frame.
    pub fn snapshot(&mut self) -> FrameSnapshot {
        let frame = self.memo.get(self.mass, self.clock.age()).clone();
        let exploding = self.explosion.is_exploding();
        let bodies = self
            .bodies
            .iter()
            .map(|b| {
                let hidden = exploding || b.orbit.is_inert;
                BodySnapshot {
                    id: b.id,
                    name: b.name.clone(),
                    position: b.displayed_position,
                    size: if hidden { 0.0 } else { b.base_size },
                    is_inert: b.orbit.is_inert,
                    has_ring_system: b.has_ring_system,
                    satellite_position: if hidden { None } else { b.satellite_position() },
                }
            })
            .collect();

        FrameSnapshot {
            elapsed_s: self.now.as_secs_f64(),
            seed: self.seed,
            playing: self.clock.is_playing(),
            exploding,
            star: frame.star,
            displayed_star_scale: self.displayed_star_scale,
            scaling: frame.scaling,
            shockwave: self.explosion.shockwave(self.now),
            bodies,
            inner_belt: belt_snapshot(&self.inner_belt, exploding),
            outer_belt: belt_snapshot(&self.outer_belt, exploding),
            focused: self.focus.focused(),
            selected: self.focus.selected(),
        }
    }
}

fn belt_snapshot(belt: &[ParticleState], exploding: bool) -> BeltSnapshot {
    let inert = belt.iter().filter(|p| p.orbit.is_inert).count();
    BeltSnapshot {
        total: belt.len(),
        inert,
        visible: if exploding { 0 } else { belt.len() - inert },
    }
}
