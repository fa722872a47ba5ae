//! Segment identifiers and lighting patterns
//!
//! ```text
//!    ─a─
//!   f   b
//!    ─g─
//!   e   c
//!    ─d─
//! ```

/// One of the seven segments of a digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Segment {
    /// Top
    A,
    /// Top right
    B,
    /// Bottom right
    C,
    /// Bottom
    D,
    /// Bottom left
    E,
    /// Top left
    F,
    /// Middle
    G,
}

impl Segment {
    /// All segments, in wiring-table order
    pub const ALL: [Segment; 7] = [
        Segment::A,
        Segment::B,
        Segment::C,
        Segment::D,
        Segment::E,
        Segment::F,
        Segment::G,
    ];

    /// Position in [`Segment::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Conventional lowercase name (`a`..`g`)
    pub const fn name(self) -> char {
        match self {
            Segment::A => 'a',
            Segment::B => 'b',
            Segment::C => 'c',
            Segment::D => 'd',
            Segment::E => 'e',
            Segment::F => 'f',
            Segment::G => 'g',
        }
    }

    /// Look up a segment by its name, case-insensitive
    pub fn from_name(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let c = chars.next()?.to_ascii_lowercase();
        if chars.next().is_some() {
            return None;
        }
        Segment::ALL.into_iter().find(|s| s.name() == c)
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Lit/unlit state for all seven segments
///
/// Stored as a bitmask, so a pattern is always total over the seven
/// segments and cannot be modified after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlyphPattern {
    bits: u8,
}

impl GlyphPattern {
    /// Every segment unlit
    pub const BLANK: GlyphPattern = GlyphPattern { bits: 0 };

    /// Every segment lit (lamp test)
    pub const FULL: GlyphPattern = GlyphPattern { bits: 0b0111_1111 };

    /// Build a pattern from lit flags in `a..g` order
    pub const fn from_segments(lit: [bool; 7]) -> Self {
        let mut bits = 0u8;
        let mut i = 0;
        while i < 7 {
            if lit[i] {
                bits |= Segment::ALL[i].bit();
            }
            i += 1;
        }
        Self { bits }
    }

    /// Whether `segment` is lit in this pattern
    pub const fn is_lit(self, segment: Segment) -> bool {
        self.bits & segment.bit() != 0
    }

    /// Number of lit segments
    pub const fn lit_count(self) -> u32 {
        self.bits.count_ones()
    }

    /// Raw bitmask, bit 0 = segment a
    pub const fn bits(self) -> u8 {
        self.bits
    }

    /// Iterate `(segment, lit)` for all seven segments
    pub fn iter(self) -> impl Iterator<Item = (Segment, bool)> {
        Segment::ALL.into_iter().map(move |s| (s, self.is_lit(s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_names_roundtrip() {
        for segment in Segment::ALL {
            let mut buf = [0u8; 4];
            let name = segment.name().encode_utf8(&mut buf);
            assert_eq!(Segment::from_name(name), Some(segment));
        }
        assert_eq!(Segment::from_name("G"), Some(Segment::G));
        assert_eq!(Segment::from_name("h"), None);
        assert_eq!(Segment::from_name("ab"), None);
        assert_eq!(Segment::from_name(""), None);
    }

    #[test]
    fn test_pattern_is_total() {
        let pattern = GlyphPattern::from_segments([true, false, true, false, true, false, true]);
        assert_eq!(pattern.iter().count(), 7);
        assert_eq!(pattern.lit_count(), 4);
        assert!(pattern.is_lit(Segment::A));
        assert!(!pattern.is_lit(Segment::B));
        assert!(pattern.is_lit(Segment::G));
    }

    #[test]
    fn test_blank_and_full() {
        assert_eq!(GlyphPattern::BLANK.lit_count(), 0);
        assert_eq!(GlyphPattern::FULL.lit_count(), 7);
        assert_eq!(GlyphPattern::from_segments([true; 7]), GlyphPattern::FULL);
    }
}
