//! Hardware driver implementations
//!
//! Concrete implementations of the traits defined in heptad-core:
//!
//! - GPIO output port (seven segment lines, two indicator lines)
//! - Adapters from `embedded-hal` pins and delays

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod pin;
pub mod port;

pub use clock::DelayClock;
pub use pin::HalPin;
pub use port::{GpioPort, Line};
