//! Board configuration
//!
//! Pin assignment, timing and display budget for one board. The firmware
//! embeds a `board.toml` and parses it with [`parse_board`] at boot.

pub mod toml;
pub mod types;

pub use self::toml::{parse_board, parse_pin, ParseError};
pub use types::{
    BoardConfig, ConfigError, IndicatorPins, PinConfig, SegmentPins, TimingConfig, MAX_GPIO,
};
