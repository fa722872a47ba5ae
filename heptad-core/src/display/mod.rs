//! Seven-segment display logic
//!
//! Glyph encoding (character → lit segments) and the sequencer that shows a
//! result one glyph at a time.

pub mod glyph;
pub mod segment;
pub mod sequencer;

pub use glyph::{encode, show, Glyph, NotRenderable, DIGIT_GLYPHS, ERROR_GLYPH, MINUS_GLYPH};
pub use segment::{GlyphPattern, Segment};
pub use sequencer::{JobTooLong, RenderJob, RenderReport, RenderTiming, Sequencer, MAX_JOB_LEN};
