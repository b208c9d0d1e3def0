//! Frame-driven simulation of a star system whose orbits respond to stellar aging.
//!
//! The presentation layer owns the frame loop: it relays [`Command`]s into a
//! [`Simulation`], calls [`Simulation::step`] once per frame with the real
//! frame time, and draws from [`Simulation::snapshot`].

pub mod bodies;
pub mod clock;
pub mod explosion;
pub mod focus;
pub mod headless;
pub mod simulation;
pub mod snapshot;

use std::fmt;

use orrery_config::ConfigError;
use serde::Serialize;
use thiserror::Error;

pub use bodies::{BodyState, BodyUpdate, OrbitState, ParticleState, advance_body};
pub use clock::{ClockAdvance, SimulationClock};
pub use explosion::{ExplosionMachine, ExplosionState, Shockwave};
pub use focus::Focus;
pub use simulation::{Command, SimEvent, Simulation};
pub use snapshot::{BeltSnapshot, BodySnapshot, FrameSnapshot};

/// Index of a catalog body in the live body table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BodyId(pub usize);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no body with id {0}")]
    UnknownBody(BodyId),
    #[error("no body named {0:?} in the catalog")]
    UnknownName(String),
    #[error("body {0} has been engulfed")]
    BodyInert(BodyId),
}
