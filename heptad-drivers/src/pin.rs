//! Adapter from `embedded-hal` output pins

use core::convert::Infallible;

use embedded_hal::digital::OutputPin as EhOutputPin;
use heptad_hal::OutputPin;

/// [`OutputPin`] over an infallible `embedded-hal` pin
///
/// The last written level is tracked here, so the wrapped pin does not
/// need to support read-back.
pub struct HalPin<P> {
    pin: P,
    high: bool,
}

impl<P: EhOutputPin<Error = Infallible>> HalPin<P> {
    /// Wrap `pin`, driving it low
    pub fn new(pin: P) -> Self {
        let mut wrapped = Self { pin, high: true };
        wrapped.set_low();
        wrapped
    }

    /// Wrap `pin` that is already driven to `high`, without writing it
    pub fn with_level(pin: P, high: bool) -> Self {
        Self { pin, high }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: EhOutputPin<Error = Infallible>> OutputPin for HalPin<P> {
    fn set_high(&mut self) {
        self.pin.set_high().unwrap_or_else(|e| match e {});
        self.high = true;
    }

    fn set_low(&mut self) {
        self.pin.set_low().unwrap_or_else(|e| match e {});
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}
