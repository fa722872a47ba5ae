//! Heptad Hardware Abstraction Layer
//!
//! This crate defines the pin-level traits that chip-specific code implements
//! so that the display drivers can run on any board (RP2040 firmware, host
//! test doubles, ...).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  heptad-firmware / host tools           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  heptad-drivers (GpioPort, adapters)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  heptad-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output line (segment or indicator LED)

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;

pub use gpio::{OutputPin, Polarity};
