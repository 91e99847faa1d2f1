//! Kinetic (momentum) drag physics for a single scalar axis.
//!
//! A [`KineticModel`] owns one draggable value clamped to fixed bounds.
//! While the host feeds it drag positions, a periodic tick estimates the
//! drag velocity; once released, the value keeps moving under simulated
//! deceleration until it settles. The model is deliberately blind to input
//! devices, rendering, and coordinate systems: it sees millisecond
//! timestamps and scalar positions, and reports every visible change
//! through a caller-supplied callback.
//!
//! This crate contains only the deterministic simulation. Periodic
//! scheduling against a real clock lives in `kinetic-runtime-std`.

mod config;
mod model;
pub mod motion_constants;

pub use config::{MotionConfig, NotifyPolicy};
pub use model::{KineticModel, Phase};
