//! Timed glyph sequencing
//!
//! A single-digit display shows a multi-character result one glyph at a
//! time. Each glyph is held, then the display is blanked briefly so that
//! repeated digits ("11") read as two glyphs rather than one long hold.

use heapless::{String, Vec};

use super::glyph::{encode, show, Glyph, DIGIT_GLYPHS};
use super::segment::GlyphPattern;
use crate::indicator::{IndicatorController, IndicatorPhase};
use crate::traits::{Clock, OutputPort};

/// Maximum characters in one render job
pub const MAX_JOB_LEN: usize = 16;

/// Timing for one render job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderTiming {
    /// How long each glyph stays lit (ms)
    pub hold_ms: u32,
    /// Dark gap between consecutive glyphs (ms)
    pub blank_ms: u32,
    /// Pause spent on a `.` slot (ms, 0 = none)
    pub dot_hold_ms: u32,
    /// Extra time the last glyph stays lit before the display clears
    pub result_hold_ms: u32,
}

impl Default for RenderTiming {
    fn default() -> Self {
        Self {
            hold_ms: 1500,
            blank_ms: 300,
            dot_hold_ms: 0,
            result_hold_ms: 2000,
        }
    }
}

/// Text does not fit in a render job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JobTooLong;

/// Characters to show, with their timing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    text: String<MAX_JOB_LEN>,
    timing: RenderTiming,
}

impl RenderJob {
    /// Create a job for `text`
    pub fn new(text: &str, timing: RenderTiming) -> Result<Self, JobTooLong> {
        let mut buf = String::new();
        buf.push_str(text).map_err(|_| JobTooLong)?;
        Ok(Self { text: buf, timing })
    }

    /// Characters of the job
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Timing of the job
    pub fn timing(&self) -> RenderTiming {
        self.timing
    }

    /// Number of characters (including `.` and unrenderable ones)
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// True if there is nothing to show
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// What happened during a render, for console logging
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Glyphs that were lit
    pub glyphs: u8,
    /// Blank windows between glyphs
    pub blanks: u8,
    /// `.` slots passed over
    pub dots: u8,
    /// Characters skipped because they are not renderable
    pub skipped: Vec<char, MAX_JOB_LEN>,
}

/// Drives the display through a render job
///
/// Borrows the port, clock and indicator for the duration of one or more
/// display operations.
pub struct Sequencer<'a, P, C> {
    port: &'a mut P,
    clock: &'a mut C,
    indicator: &'a mut IndicatorController,
}

impl<'a, P: OutputPort, C: Clock> Sequencer<'a, P, C> {
    /// Create a sequencer over the given resources
    pub fn new(port: &'a mut P, clock: &'a mut C, indicator: &'a mut IndicatorController) -> Self {
        Self {
            port,
            clock,
            indicator,
        }
    }

    /// Show every glyph of `job` in order
    ///
    /// The indicator is held in `Active` while glyphs are shown and finishes
    /// with `Success`. All segment lines are clear when this returns.
    pub fn render(&mut self, job: &RenderJob) -> RenderReport {
        let timing = job.timing;
        let mut report = RenderReport::default();

        self.indicator
            .enter(IndicatorPhase::ReadyPulse, &mut *self.port, &mut *self.clock);
        self.indicator
            .enter(IndicatorPhase::Active, &mut *self.port, &mut *self.clock);

        // Blank only between lit glyphs, never after the last one
        let last_lit = job
            .text
            .chars()
            .enumerate()
            .filter(|(_, ch)| matches!(encode(*ch), Ok(Glyph::Pattern(_))))
            .map(|(i, _)| i)
            .last();

        for (i, ch) in job.text.chars().enumerate() {
            match encode(ch) {
                Err(_) => {
                    // Capacity matches the job, so this cannot overflow
                    let _ = report.skipped.push(ch);
                }
                Ok(Glyph::NoChange) => {
                    report.dots = report.dots.saturating_add(1);
                    if timing.dot_hold_ms > 0 {
                        self.clock.delay_ms(timing.dot_hold_ms);
                    }
                }
                Ok(Glyph::Pattern(pattern)) => {
                    show(&mut *self.port, pattern);
                    self.clock.delay_ms(timing.hold_ms);
                    report.glyphs = report.glyphs.saturating_add(1);

                    if last_lit.is_some_and(|last| i < last) {
                        self.port.clear_segments();
                        self.clock.delay_ms(timing.blank_ms);
                        report.blanks = report.blanks.saturating_add(1);
                    } else if timing.result_hold_ms > 0 {
                        self.clock.delay_ms(timing.result_hold_ms);
                    }
                }
            }
        }

        self.port.clear_segments();
        self.indicator
            .enter(IndicatorPhase::Success, &mut *self.port, &mut *self.clock);

        report
    }

    /// Show a single pattern for `hold_ms`, then clear
    pub fn flash(&mut self, pattern: GlyphPattern, hold_ms: u32) {
        show(&mut *self.port, pattern);
        self.clock.delay_ms(hold_ms);
        self.port.clear_segments();
    }

    /// Light every segment for `hold_ms`
    pub fn lamp_test(&mut self, hold_ms: u32) {
        self.flash(GlyphPattern::FULL, hold_ms);
    }

    /// Step through the digits 0 to 9, `hold_ms` each
    pub fn count_up(&mut self, hold_ms: u32) {
        self.walk(DIGIT_GLYPHS.into_iter(), hold_ms);
    }

    /// Step through the digits 9 down to 0, `hold_ms` each
    pub fn count_down(&mut self, hold_ms: u32) {
        self.walk(DIGIT_GLYPHS.into_iter().rev(), hold_ms);
    }

    fn walk(&mut self, patterns: impl Iterator<Item = GlyphPattern>, hold_ms: u32) {
        for pattern in patterns {
            show(&mut *self.port, pattern);
            self.clock.delay_ms(hold_ms);
        }
        self.port.clear_segments();
    }
}
