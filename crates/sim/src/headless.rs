//! Fixed-step driver that runs a simulation without a renderer.

use std::time::Duration;

use log::info;
use orrery_config::SimulationConfig;
use orrery_stellar::StellarStage;
use serde::Serialize;

use crate::simulation::{Command, SimEvent, Simulation};
use crate::snapshot::FrameSnapshot;
use crate::{BodyId, SimError};

/// What to run and for how long.
#[derive(Debug, Clone)]
pub struct RunPlan {
    /// Overrides the configured initial mass.
    pub mass: Option<f64>,
    /// Overrides the configured initial age.
    pub age: Option<f64>,
    /// Real time to simulate.
    pub duration: Duration,
    /// Frame length fed to [`Simulation::step`].
    pub frame: Duration,
    pub play: bool,
    /// Trigger an explosion once this much real time has elapsed.
    pub explode_at: Option<Duration>,
    /// Select this body (by name) before the first frame.
    pub focus: Option<String>,
}

impl Default for RunPlan {
    fn default() -> Self {
        Self {
            mass: None,
            age: None,
            duration: Duration::from_secs(20),
            frame: Duration::from_micros(16_667),
            play: true,
            explode_at: None,
            focus: None,
        }
    }
}

/// One row of the age trace.
#[derive(Debug, Clone, Serialize)]
pub struct TraceSample {
    pub elapsed_s: f64,
    pub age: f64,
    pub stage: StellarStage,
    pub star_scale: f64,
    pub displayed_star_scale: f64,
    pub lifespan: f64,
    pub red_giant_end: f64,
    pub current_mass: f64,
    pub expansion_factor: f64,
    pub inert_bodies: usize,
    pub exploding: bool,
}

impl TraceSample {
    fn from_snapshot(snapshot: &FrameSnapshot) -> Self {
        Self {
            elapsed_s: snapshot.elapsed_s,
            age: snapshot.star.age,
            stage: snapshot.star.stage,
            star_scale: snapshot.star.scale,
            displayed_star_scale: snapshot.displayed_star_scale,
            lifespan: snapshot.star.lifespan,
            red_giant_end: snapshot.star.red_giant_end,
            current_mass: snapshot.scaling.current_mass,
            expansion_factor: snapshot.scaling.expansion_factor,
            inert_bodies: snapshot.inert_bodies(),
            exploding: snapshot.exploding,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimedEvent {
    pub elapsed_s: f64,
    #[serde(flatten)]
    pub event: SimEvent,
}

/// What became of the body selected through [`RunPlan::focus`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FocusReport {
    pub id: BodyId,
    pub name: String,
    /// Age at which engulfment released the selection, if it did.
    pub cleared_at_age: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub frames: u64,
    pub events: Vec<TimedEvent>,
    pub trace: Vec<TraceSample>,
    pub focus: Option<FocusReport>,
    pub final_snapshot: FrameSnapshot,
}

impl RunReport {
    pub fn engulfed_names(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match &e.event {
                SimEvent::Engulfed { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Run `plan` against a fresh simulation built from `config`.
///
/// A trace sample is taken at the start, whenever age or the explosion flag
/// changes, and at the end.
pub fn run(config: SimulationConfig, plan: &RunPlan) -> Result<RunReport, SimError> {
    let mut sim = Simulation::new(config)?;
    let mut events = Vec::new();
    if let Some(mass) = plan.mass {
        sim.apply(Command::SetMass(mass))?;
    }
    if let Some(age) = plan.age {
        sim.apply(Command::SetAge(age))?;
    }
    let mut focus = match &plan.focus {
        Some(name) => {
            let body = sim
                .body_by_name(name)
                .ok_or_else(|| SimError::UnknownName(name.clone()))?;
            let report = FocusReport {
                id: body.id,
                name: body.name.clone(),
                cleared_at_age: None,
            };
            sim.apply(Command::Select(report.id))?;
            Some(report)
        }
        None => None,
    };
    if plan.play {
        sim.apply(Command::Play)?;
    }

    let frame = plan.frame.max(Duration::from_millis(1));
    let mut current = sim.snapshot();
    let mut trace = vec![TraceSample::from_snapshot(&current)];
    let mut last_key = (current.star.age, current.exploding);
    let mut exploded = false;
    let mut frames = 0u64;

    while sim.elapsed() < plan.duration {
        if let Some(at) = plan.explode_at {
            if !exploded && sim.elapsed() >= at {
                exploded = true;
                for event in sim.apply(Command::TriggerExplosion)? {
                    events.push(TimedEvent {
                        elapsed_s: sim.elapsed().as_secs_f64(),
                        event,
                    });
                }
            }
        }

        let step_events = sim.step(frame);
        frames += 1;
        let elapsed_s = sim.elapsed().as_secs_f64();
        if let Some(report) = focus.as_mut() {
            if step_events.contains(&SimEvent::FocusCleared { id: report.id }) {
                report.cleared_at_age = Some(sim.age());
            }
        }
        events.extend(
            step_events
                .into_iter()
                .map(|event| TimedEvent { elapsed_s, event }),
        );

        current = sim.snapshot();
        let key = (current.star.age, current.exploding);
        if key != last_key {
            trace.push(TraceSample::from_snapshot(&current));
            last_key = key;
        }
    }

    let final_snapshot = sim.snapshot();
    trace.push(TraceSample::from_snapshot(&final_snapshot));
    info!(
        "headless run finished: {frames} frames, {} events, final stage {}",
        events.len(),
        final_snapshot.star.stage
    );

    Ok(RunReport {
        frames,
        events,
        trace,
        focus,
        final_snapshot,
    })
}
