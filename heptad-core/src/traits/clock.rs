//! Blocking delay trait
//!
//! Every timed hold in the sequencer and indicator goes through this trait,
//! so tests can substitute a clock that records requested durations instead
//! of sleeping.

/// Blocking millisecond delay
pub trait Clock {
    /// Block the calling thread for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}
