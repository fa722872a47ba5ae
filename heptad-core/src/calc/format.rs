//! Display text for results

use core::fmt::Write;

use heapless::String;

use super::number::Number;
use crate::display::MAX_JOB_LEN;

/// Formatted result, sized to fit one render job
pub type DisplayText = String<MAX_JOB_LEN>;

/// Format `value` for the display
///
/// Returns `None` when the text does not fit in a render job.
pub fn format_number(value: Number) -> Option<DisplayText> {
    let mut text = DisplayText::new();
    write!(text, "{}", value).ok()?;
    Some(text)
}

/// Number of digit characters in `text` (signs and points excluded)
pub fn count_digits(text: &str) -> usize {
    text.chars().filter(char::is_ascii_digit).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fits() {
        assert_eq!(format_number(Number::Int(-12)).as_deref(), Some("-12"));
        assert_eq!(format_number(Number::Real(0.126)).as_deref(), Some("0.13"));
        assert_eq!(format_number(Number::Real(1e20)), None);
    }

    #[test]
    fn test_count_digits() {
        assert_eq!(count_digits("-0.33"), 3);
        assert_eq!(count_digits("999998000001"), 12);
        assert_eq!(count_digits(""), 0);
    }
}
