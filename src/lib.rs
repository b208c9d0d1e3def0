//! Stellar orrery: a star-and-planets system driven by a closed-form model of
//! stellar aging.
//!
//! The model crates are pure functions of `(mass, age)`; the simulation crate
//! layers body state, the playback clock, and the explosion effect on top.
//! Keeping them behind one library lets several front-ends (CLI, renderer,
//! web) share them.

pub use orrery_config as config;
pub use orrery_core::{bounds, constants, vector};
pub use orrery_export as export;
pub use orrery_orbits as orbits;
pub use orrery_sim as sim;
pub use orrery_stellar as stellar;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
