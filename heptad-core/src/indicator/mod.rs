//! Two-channel status indicator
//!
//! A positive (green) and a negative (red) lamp signal the phase of the
//! calculator. Each phase maps to a short pulse program; only `Active`
//! persists after `enter` returns.

pub mod controller;
pub mod phase;

pub use controller::IndicatorController;
pub use phase::{Channel, IndicatorPhase, PhasePrograms, Pulse};
