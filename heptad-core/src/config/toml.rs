//! Minimal TOML parser for board configuration
//!
//! Handles only the subset a board file needs. It does NOT support the
//! full TOML grammar.
//!
//! Supported:
//! - `[segments]`, `[indicator]`, `[timing]` and `[display]` sections
//! - Key = value pairs (string, integer, boolean)
//! - Comments (# ...)
//!
//! Pins are written `"gpioN"`, or `"!gpioN"` for an active-low line.
//! Keys that are not set keep their default value.

use super::types::{BoardConfig, PinConfig};
use crate::display::Segment;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Line is not `key = value`
    InvalidLine,
    /// Key not known in this section
    UnknownKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Segments,
    Indicator,
    Timing,
    Display,
}

/// Parse a board file into a [`BoardConfig`]
///
/// The result is not validated; call [`BoardConfig::validate`] on it.
pub fn parse_board(input: &str) -> Result<BoardConfig, ParseError> {
    let mut config = BoardConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;

        match section {
            Section::Root => return Err(ParseError::UnknownKey),
            Section::Segments => {
                let segment = Segment::from_name(key).ok_or(ParseError::UnknownKey)?;
                *config.segments.get_mut(segment) = parse_pin(value)?;
            }
            Section::Indicator => match key {
                "positive" | "green" => config.indicator.positive = parse_pin(value)?,
                "negative" | "red" => config.indicator.negative = parse_pin(value)?,
                _ => return Err(ParseError::UnknownKey),
            },
            Section::Timing => {
                let ms = parse_int(value)?;
                let timing = &mut config.timing;
                match key {
                    "glyph_hold_ms" => timing.glyph_hold_ms = ms,
                    "blank_ms" => timing.blank_ms = ms,
                    "dot_hold_ms" => timing.dot_hold_ms = ms,
                    "result_hold_ms" => timing.result_hold_ms = ms,
                    "error_hold_ms" => timing.error_hold_ms = ms,
                    "lamp_test_ms" => timing.lamp_test_ms = ms,
                    _ => return Err(ParseError::UnknownKey),
                }
            }
            Section::Display => match key {
                "max_digits" => config.max_digits = parse_int(value)?,
                "self_test" => config.self_test = parse_bool(value)?,
                _ => return Err(ParseError::UnknownKey),
            },
        }
    }

    Ok(config)
}

fn parse_section_header(line: &str) -> Result<Section, ParseError> {
    let name = line
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or(ParseError::InvalidSection)?
        .trim();

    match name {
        "segments" => Ok(Section::Segments),
        "indicator" => Ok(Section::Indicator),
        "timing" => Ok(Section::Timing),
        "display" => Ok(Section::Display),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Split `key = value`, dropping a trailing comment outside quotes
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    let value = match value.find('#') {
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Remove surrounding quotes, if any
fn parse_string(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(value)
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a pin string like `"gpio18"` or `"!gpio20"`
pub fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    let s = parse_string(value);
    let (inverted, s) = match s.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    let digits = s.strip_prefix("gpio").ok_or(ParseError::InvalidPin)?;
    let pin: u8 = digits.parse().map_err(|_| ParseError::InvalidPin)?;

    Ok(PinConfig { pin, inverted })
}
