//! Blocking clock over an `embedded-hal` delay

use embedded_hal::delay::DelayNs;
use heptad_core::traits::Clock;

/// [`Clock`] backed by any [`DelayNs`] provider
pub struct DelayClock<D> {
    delay: D,
}

impl<D: DelayNs> DelayClock<D> {
    pub fn new(delay: D) -> Self {
        Self { delay }
    }

    pub fn into_inner(self) -> D {
        self.delay
    }
}

impl<D: DelayNs> Clock for DelayClock<D> {
    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
