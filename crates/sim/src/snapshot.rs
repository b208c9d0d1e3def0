//! Read-only frame snapshot consumed by renderers and exporters.

use orrery_core::vector::Vector3;
use orrery_stellar::{StarState, SystemScaling};
use serde::Serialize;

use crate::BodyId;
use crate::explosion::Shockwave;

#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub elapsed_s: f64,
    pub seed: u64,
    pub playing: bool,
    pub exploding: bool,
    pub star: StarState,
    /// Smoothed visual scale; differs from `star.scale` while exploding.
    pub displayed_star_scale: f64,
    pub scaling: SystemScaling,
    pub shockwave: Shockwave,
    pub bodies: Vec<BodySnapshot>,
    pub inner_belt: BeltSnapshot,
    pub outer_belt: BeltSnapshot,
    pub focused: Option<BodyId>,
    pub selected: Option<BodyId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub name: String,
    pub position: Vector3,
    /// Rendered size; zero when inert or while exploding.
    pub size: f64,
    pub is_inert: bool,
    pub has_ring_system: bool,
    pub satellite_position: Option<Vector3>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BeltSnapshot {
    pub total: usize,
    pub inert: usize,
    pub visible: usize,
}

impl FrameSnapshot {
    pub fn body(&self, id: BodyId) -> Option<&BodySnapshot> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn inert_bodies(&self) -> usize {
        self.bodies.iter().filter(|b| b.is_inert).count()
    }
}
