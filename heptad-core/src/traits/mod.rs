//! Hardware abstraction traits
//!
//! These traits define the interface between the display/indicator logic
//! and hardware-specific implementations.

pub mod clock;
pub mod port;

pub use clock::Clock;
pub use port::{OutputPort, PortGuard};
