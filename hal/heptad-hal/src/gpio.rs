//! GPIO pin abstractions
//!
//! Provides the digital output trait implemented by chip-specific pins and
//! the polarity used to translate logical on/off into electrical levels.

/// Digital output pin
///
/// Implementations handle the actual register writes for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Toggle the pin state
    fn toggle(&mut self) {
        if self.is_set_high() {
            self.set_low();
        } else {
            self.set_high();
        }
    }

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Electrical polarity of a logical output
///
/// Common-anode displays and some LED drivers light a segment when the line
/// is pulled low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Logical on = pin high
    #[default]
    ActiveHigh,
    /// Logical on = pin low
    ActiveLow,
}

impl Polarity {
    /// Build from an "inverted" flag as written in board configs
    pub const fn from_inverted(inverted: bool) -> Self {
        if inverted {
            Polarity::ActiveLow
        } else {
            Polarity::ActiveHigh
        }
    }

    /// Electrical level for a logical state
    pub const fn level(self, asserted: bool) -> bool {
        match self {
            Polarity::ActiveHigh => asserted,
            Polarity::ActiveLow => !asserted,
        }
    }

    /// Drive `pin` to the logical state `asserted`
    pub fn drive<P: OutputPin + ?Sized>(self, pin: &mut P, asserted: bool) {
        pin.set_state(self.level(asserted));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockPin {
        high: bool,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_default_toggle() {
        let mut pin = MockPin { high: false };
        pin.toggle();
        assert!(pin.is_set_high());
        pin.toggle();
        assert!(pin.is_set_low());
    }

    #[test]
    fn test_polarity_levels() {
        assert!(Polarity::ActiveHigh.level(true));
        assert!(!Polarity::ActiveHigh.level(false));
        assert!(!Polarity::ActiveLow.level(true));
        assert!(Polarity::ActiveLow.level(false));
    }

    #[test]
    fn test_drive_active_low() {
        let mut pin = MockPin { high: false };
        let polarity = Polarity::from_inverted(true);

        polarity.drive(&mut pin, false);
        assert!(pin.is_set_high());

        polarity.drive(&mut pin, true);
        assert!(pin.is_set_low());
    }
}
