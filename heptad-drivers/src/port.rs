//! GPIO output port
//!
//! Seven segment lines and two indicator lines, each driven through its own
//! pin with its own polarity.

use heptad_core::config::BoardConfig;
use heptad_core::display::Segment;
use heptad_core::indicator::Channel;
use heptad_core::traits::OutputPort;
use heptad_hal::{OutputPin, Polarity};

/// One logical output line
pub struct Line<P> {
    pin: P,
    polarity: Polarity,
    asserted: bool,
}

impl<P: OutputPin> Line<P> {
    /// Wrap `pin`, leaving it inactive
    pub fn new(pin: P, polarity: Polarity) -> Self {
        let mut line = Self {
            pin,
            polarity,
            asserted: true,
        };
        line.set(false);
        line
    }

    pub fn active_high(pin: P) -> Self {
        Self::new(pin, Polarity::ActiveHigh)
    }

    pub fn active_low(pin: P) -> Self {
        Self::new(pin, Polarity::ActiveLow)
    }

    fn set(&mut self, asserted: bool) {
        self.asserted = asserted;
        self.polarity.drive(&mut self.pin, asserted);
    }

    /// Logical state (true = lit)
    pub fn is_asserted(&self) -> bool {
        self.asserted
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }
}

/// [`OutputPort`] over GPIO pins
///
/// After `shutdown` the port is released: every line is inactive and
/// further writes are ignored until `initialize` is called again.
pub struct GpioPort<P> {
    segments: [Line<P>; 7],
    indicator: [Line<P>; 2],
    released: bool,
}

impl<P: OutputPin> GpioPort<P> {
    /// Build from lines in `a..g` order and the positive/negative lamps
    pub fn new(segments: [Line<P>; 7], positive: Line<P>, negative: Line<P>) -> Self {
        Self {
            segments,
            indicator: [positive, negative],
            released: false,
        }
    }

    /// Build from raw pins, taking polarities from the board config
    pub fn from_config(segments: [P; 7], positive: P, negative: P, config: &BoardConfig) -> Self {
        let wiring = config.segments.as_array();
        let mut i = 0;
        let segments = segments.map(|pin| {
            let line = Line::new(pin, Polarity::from_inverted(wiring[i].inverted));
            i += 1;
            line
        });

        let polarity = |channel: Channel| Polarity::from_inverted(config.indicator.get(channel).inverted);
        Self::new(
            segments,
            Line::new(positive, polarity(Channel::Positive)),
            Line::new(negative, polarity(Channel::Negative)),
        )
    }

    pub fn segment(&self, segment: Segment) -> &Line<P> {
        &self.segments[segment.index()]
    }

    pub fn indicator(&self, channel: Channel) -> &Line<P> {
        &self.indicator[channel.index()]
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    fn all_inactive(&mut self) {
        for line in self.segments.iter_mut().chain(self.indicator.iter_mut()) {
            line.set(false);
        }
    }
}

impl<P: OutputPin> OutputPort for GpioPort<P> {
    fn initialize(&mut self) {
        self.all_inactive();
        self.released = false;
    }

    fn set_segment(&mut self, segment: Segment, asserted: bool) {
        if !self.released {
            self.segments[segment.index()].set(asserted);
        }
    }

    fn set_indicator(&mut self, channel: Channel, asserted: bool) {
        if !self.released {
            self.indicator[channel.index()].set(asserted);
        }
    }

    fn shutdown(&mut self) {
        self.all_inactive();
        self.released = true;
    }
}
