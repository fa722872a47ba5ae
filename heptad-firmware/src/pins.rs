//! Config-driven pin allocation
//!
//! GPIO pins are held in a bank and taken by number, so the board file
//! decides which pin drives which line.

use embassy_rp::gpio::{AnyPin, Level, Output};
use embassy_rp::Peri;

use heptad_core::config::{BoardConfig, PinConfig, MAX_GPIO};
use heptad_core::display::Segment;
use heptad_drivers::{GpioPort, HalPin};
use heptad_hal::Polarity;

/// Output pin type used by the board port
pub type BoardPin = HalPin<Output<'static>>;

/// Output port type for this board
pub type BoardPort = GpioPort<BoardPin>;

/// Error when requesting a pin
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin(u8),
    /// Pin already taken
    AlreadyTaken(u8),
    /// Pin reserved for the console UART
    Reserved(u8),
}

/// GPIO pins available to the board file
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; MAX_GPIO as usize],
}

impl PinBank {
    /// Create a bank; `None` entries are reserved
    pub fn new(pins: [Option<Peri<'static, AnyPin>>; MAX_GPIO as usize]) -> Self {
        Self { pins }
    }

    /// Take a pin by number
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        if pin_num >= MAX_GPIO {
            return Err(PinError::InvalidPin(pin_num));
        }
        if is_reserved(pin_num) {
            return Err(PinError::Reserved(pin_num));
        }
        self.pins[pin_num as usize]
            .take()
            .ok_or(PinError::AlreadyTaken(pin_num))
    }

    /// Take a pin and configure it as an output at its inactive level
    pub fn output(&mut self, config: PinConfig) -> Result<BoardPin, PinError> {
        let pin = self.take(config.pin)?;
        let high = Polarity::from_inverted(config.inverted).level(false);
        let level = if high { Level::High } else { Level::Low };
        Ok(HalPin::with_level(Output::new(pin, level), high))
    }
}

/// GPIO0/GPIO1 carry the UART0 console
fn is_reserved(pin_num: u8) -> bool {
    pin_num < 2
}

/// Build the output port described by `board`
pub fn board_port(bank: &mut PinBank, board: &BoardConfig) -> Result<BoardPort, PinError> {
    let segments = [
        bank.output(board.segments.get(Segment::A))?,
        bank.output(board.segments.get(Segment::B))?,
        bank.output(board.segments.get(Segment::C))?,
        bank.output(board.segments.get(Segment::D))?,
        bank.output(board.segments.get(Segment::E))?,
        bank.output(board.segments.get(Segment::F))?,
        bank.output(board.segments.get(Segment::G))?,
    ];
    let positive = bank.output(board.indicator.positive)?;
    let negative = bank.output(board.indicator.negative)?;

    Ok(GpioPort::from_config(segments, positive, negative, board))
}
