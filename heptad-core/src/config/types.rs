//! Configuration type definitions

use crate::calc::{Evaluator, DEFAULT_MAX_DIGITS};
use crate::display::{RenderTiming, Segment, MAX_JOB_LEN};
use crate::indicator::Channel;

/// Number of usable GPIO pins (RP2040: 0-29)
pub const MAX_GPIO: u8 = 30;

/// Single output pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO pin number
    pub pin: u8,
    /// Pin is active-low
    pub inverted: bool,
}

impl PinConfig {
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
        }
    }

    /// Active-low pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
        }
    }
}

/// Segment line wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentPins {
    pub a: PinConfig,
    pub b: PinConfig,
    pub c: PinConfig,
    pub d: PinConfig,
    pub e: PinConfig,
    pub f: PinConfig,
    pub g: PinConfig,
}

impl SegmentPins {
    pub fn get(&self, segment: Segment) -> PinConfig {
        match segment {
            Segment::A => self.a,
            Segment::B => self.b,
            Segment::C => self.c,
            Segment::D => self.d,
            Segment::E => self.e,
            Segment::F => self.f,
            Segment::G => self.g,
        }
    }

    pub fn get_mut(&mut self, segment: Segment) -> &mut PinConfig {
        match segment {
            Segment::A => &mut self.a,
            Segment::B => &mut self.b,
            Segment::C => &mut self.c,
            Segment::D => &mut self.d,
            Segment::E => &mut self.e,
            Segment::F => &mut self.f,
            Segment::G => &mut self.g,
        }
    }

    /// Pins in `a..g` order
    pub fn as_array(&self) -> [PinConfig; 7] {
        Segment::ALL.map(|s| self.get(s))
    }
}

impl Default for SegmentPins {
    fn default() -> Self {
        Self {
            a: PinConfig::new(18),
            b: PinConfig::new(23),
            c: PinConfig::new(24),
            d: PinConfig::new(25),
            e: PinConfig::new(8),
            f: PinConfig::new(7),
            g: PinConfig::new(12),
        }
    }
}

/// Indicator lamp wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorPins {
    /// Green lamp
    pub positive: PinConfig,
    /// Red lamp
    pub negative: PinConfig,
}

impl IndicatorPins {
    pub fn get(&self, channel: Channel) -> PinConfig {
        match channel {
            Channel::Positive => self.positive,
            Channel::Negative => self.negative,
        }
    }
}

impl Default for IndicatorPins {
    fn default() -> Self {
        Self {
            positive: PinConfig::new(20),
            negative: PinConfig::new(21),
        }
    }
}

/// Display and indicator timing (all ms)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    pub glyph_hold_ms: u32,
    pub blank_ms: u32,
    pub dot_hold_ms: u32,
    /// Extra time the last glyph of a result stays lit
    pub result_hold_ms: u32,
    /// How long `E` stays lit after a failed evaluation
    pub error_hold_ms: u32,
    /// All-segments-lit duration of the self test
    pub lamp_test_ms: u32,
}

impl TimingConfig {
    pub fn render_timing(&self) -> RenderTiming {
        RenderTiming {
            hold_ms: self.glyph_hold_ms,
            blank_ms: self.blank_ms,
            dot_hold_ms: self.dot_hold_ms,
            result_hold_ms: self.result_hold_ms,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            glyph_hold_ms: 1500,
            blank_ms: 300,
            dot_hold_ms: 0,
            result_hold_ms: 2000,
            error_hold_ms: 2000,
            lamp_test_ms: 2000,
        }
    }
}

/// Complete board configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    pub segments: SegmentPins,
    pub indicator: IndicatorPins,
    pub timing: TimingConfig,
    /// Most digits a result may have and still be shown
    pub max_digits: u8,
    /// Run the lamp test and digit walk at startup
    pub self_test: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            segments: SegmentPins::default(),
            indicator: IndicatorPins::default(),
            timing: TimingConfig::default(),
            max_digits: DEFAULT_MAX_DIGITS as u8,
            self_test: false,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pin number outside the chip's GPIO range
    PinOutOfRange(u8),
    /// Same pin assigned to two lines
    DuplicatePin(u8),
    /// Digit budget of zero
    ZeroDigitBudget,
    /// Digit budget longer than a render job
    DigitBudgetTooLarge(u8),
}

impl BoardConfig {
    /// Every pin in the configuration, segments first
    pub fn pins(&self) -> [PinConfig; 9] {
        let s = self.segments.as_array();
        [
            s[0],
            s[1],
            s[2],
            s[3],
            s[4],
            s[5],
            s[6],
            self.indicator.positive,
            self.indicator.negative,
        ]
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pins = self.pins();
        for (i, p) in pins.iter().enumerate() {
            if p.pin >= MAX_GPIO {
                return Err(ConfigError::PinOutOfRange(p.pin));
            }
            if pins[..i].iter().any(|q| q.pin == p.pin) {
                return Err(ConfigError::DuplicatePin(p.pin));
            }
        }
        if self.max_digits == 0 {
            return Err(ConfigError::ZeroDigitBudget);
        }
        if self.max_digits as usize > MAX_JOB_LEN {
            return Err(ConfigError::DigitBudgetTooLarge(self.max_digits));
        }
        Ok(())
    }

    /// Evaluator with this board's digit budget
    pub fn evaluator(&self) -> Evaluator {
        Evaluator::new(self.max_digits as usize)
    }
}
