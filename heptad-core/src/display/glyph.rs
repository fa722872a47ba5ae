//! Character to segment-pattern encoding
//!
//! The renderable alphabet is the ten digits, the minus sign and `E` (error).
//! A `.` is accepted but lights nothing; there is no decimal-point segment.

use super::segment::{GlyphPattern, Segment};
use crate::traits::OutputPort;

/// Result of encoding a renderable character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Glyph {
    /// Drive the segments with this pattern
    Pattern(GlyphPattern),
    /// Leave the segment lines untouched (the `.` slot)
    NoChange,
}

/// Character outside the renderable alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NotRenderable(pub char);

const fn pattern(a: u8, b: u8, c: u8, d: u8, e: u8, f: u8, g: u8) -> GlyphPattern {
    GlyphPattern::from_segments([a != 0, b != 0, c != 0, d != 0, e != 0, f != 0, g != 0])
}

/// Digit patterns, indexed by value
pub const DIGIT_GLYPHS: [GlyphPattern; 10] = [
    //      a  b  c  d  e  f  g
    pattern(1, 1, 1, 1, 1, 1, 0), // 0
    pattern(0, 1, 1, 0, 0, 0, 0), // 1
    pattern(1, 1, 0, 1, 1, 0, 1), // 2
    pattern(1, 1, 1, 1, 0, 0, 1), // 3
    pattern(0, 1, 1, 0, 0, 1, 1), // 4
    pattern(1, 0, 1, 1, 0, 1, 1), // 5
    pattern(1, 0, 1, 1, 1, 1, 1), // 6
    pattern(1, 1, 1, 0, 0, 0, 0), // 7
    pattern(1, 1, 1, 1, 1, 1, 1), // 8
    pattern(1, 1, 1, 1, 0, 1, 1), // 9
];

/// Minus sign: middle bar only
pub const MINUS_GLYPH: GlyphPattern = pattern(0, 0, 0, 0, 0, 0, 1);

/// Error indicator `E`
pub const ERROR_GLYPH: GlyphPattern = pattern(1, 0, 0, 1, 1, 1, 1);

/// Encode a character for the display
pub fn encode(ch: char) -> Result<Glyph, NotRenderable> {
    match ch {
        '0'..='9' => Ok(Glyph::Pattern(DIGIT_GLYPHS[ch as usize - '0' as usize])),
        '-' => Ok(Glyph::Pattern(MINUS_GLYPH)),
        'E' => Ok(Glyph::Pattern(ERROR_GLYPH)),
        '.' => Ok(Glyph::NoChange),
        other => Err(NotRenderable(other)),
    }
}

/// Write all seven segment lines for `pattern`
pub fn show<P: OutputPort + ?Sized>(port: &mut P, pattern: GlyphPattern) {
    for segment in Segment::ALL {
        port.set_segment(segment, pattern.is_lit(segment));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Recorder;

    fn lit(ch: char) -> [bool; 7] {
        match encode(ch) {
            Ok(Glyph::Pattern(p)) => Segment::ALL.map(|s| p.is_lit(s)),
            other => panic!("{ch:?} did not encode to a pattern: {other:?}"),
        }
    }

    #[test]
    fn test_alphabet_table() {
        let table: [(char, &str); 12] = [
            ('0', "abcdef"),
            ('1', "bc"),
            ('2', "abdeg"),
            ('3', "abcdg"),
            ('4', "bcfg"),
            ('5', "acdfg"),
            ('6', "acdefg"),
            ('7', "abc"),
            ('8', "abcdefg"),
            ('9', "abcdfg"),
            ('-', "g"),
            ('E', "adefg"),
        ];

        for (ch, segments) in table {
            let expected = Segment::ALL.map(|s| segments.contains(s.name()));
            assert_eq!(lit(ch), expected, "glyph {ch:?}");
        }
    }

    #[test]
    fn test_dot_is_no_change() {
        assert_eq!(encode('.'), Ok(Glyph::NoChange));
    }

    #[test]
    fn test_outside_alphabet() {
        for ch in ['e', 'A', ' ', '+', '*', '/', '(', 'x', '\n', '∞'] {
            assert_eq!(encode(ch), Err(NotRenderable(ch)));
        }
    }

    #[test]
    fn test_show_writes_every_line() {
        let recorder = Recorder::new();
        let mut port = recorder.port();

        show(&mut port, ERROR_GLYPH);
        assert_eq!(recorder.events().len(), 7);
        assert!(recorder.segment_lit(Segment::A));
        assert!(!recorder.segment_lit(Segment::B));
        assert!(!recorder.segment_lit(Segment::C));
        assert!(recorder.segment_lit(Segment::G));

        show(&mut port, GlyphPattern::BLANK);
        assert!(recorder.segments_clear());
    }

    proptest::proptest! {
        #[test]
        fn prop_encode_never_garbage(ch in proptest::char::any()) {
            match encode(ch) {
                Ok(Glyph::Pattern(p)) => {
                    proptest::prop_assert!(ch.is_ascii_digit() || ch == '-' || ch == 'E');
                    proptest::prop_assert!(p.bits() < 0x80);
                }
                Ok(Glyph::NoChange) => proptest::prop_assert_eq!(ch, '.'),
                Err(NotRenderable(c)) => proptest::prop_assert_eq!(c, ch),
            }
        }
    }
}
