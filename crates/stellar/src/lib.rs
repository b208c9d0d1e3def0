//! Stellar aging model: lifecycle stage, visual parameters, and the scaling
//! applied to the orbiting system as the star sheds mass.
//!
//! Everything here is a pure function of `(mass, age)`.

pub mod color;
pub mod lifecycle;
pub mod memo;
pub mod scaling;

pub use color::{ColorParseError, StellarColor};
pub use lifecycle::{StarState, StellarStage, compute_star_state, lifespan, red_giant_end};
pub use memo::{ModelFrame, ModelMemo, evaluate};
pub use scaling::{SystemScaling, compute_system_scaling};
