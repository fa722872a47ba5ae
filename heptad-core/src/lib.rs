//! Board-agnostic core logic for the seven-segment calculator
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Output port and clock traits (the only seams to hardware)
//! - Glyph encoding and timed glyph sequencing
//! - Two-channel status indicator state machine
//! - Bounded-grammar expression evaluator and result formatting
//! - Session orchestration (one console line in, one display sequence out)
//! - Board configuration types and parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod calc;
pub mod config;
pub mod display;
pub mod indicator;
pub mod session;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;
