//! Calculator session
//!
//! Owns the output port for the lifetime of the calculator and turns one
//! console line at a time into a display sequence. The port is shut down
//! when the session ends, whichever way it ends.

pub mod command;

pub use command::{classify, LineCommand, QUIT_WORDS};

use core::fmt::{self, Write};

use crate::calc::{DisplayText, EvalError, EvaluationOutcome, Evaluator, Number};
use crate::config::BoardConfig;
use crate::display::{RenderJob, RenderReport, Sequencer, ERROR_GLYPH};
use crate::indicator::{IndicatorController, IndicatorPhase, PhasePrograms};
use crate::traits::{Clock, OutputPort, PortGuard};

/// Result of processing one console line
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// Blank line, nothing driven
    Ignored,
    /// Quit requested; the session is closed
    Quit,
    /// Result rendered on the display
    Shown {
        text: DisplayText,
        report: RenderReport,
    },
    /// Result too long, reported on the console only
    TooLong { value: Number },
    /// Evaluation failed, `E` was shown
    Failed(EvalError),
}

/// Longest console reply [`LineOutcome::write_reply`] produces
///
/// Sized for a too-long `-f64::MAX`, which prints as 310 characters.
pub const MAX_REPLY_LEN: usize = 352;

impl LineOutcome {
    /// Console reply for this outcome, without a line ending
    pub fn write_reply<W: Write>(&self, out: &mut W) -> fmt::Result {
        match self {
            LineOutcome::Ignored => out.write_str("Please enter an expression"),
            LineOutcome::Quit => out.write_str("Thanks for calculating, goodbye"),
            LineOutcome::Shown { text, .. } => write!(out, "= {}", text.as_str()),
            LineOutcome::TooLong { value } => {
                write!(out, "= {} (too long for the display)", value)
            }
            LineOutcome::Failed(e) => write!(out, "error: {}", e),
        }
    }
}

/// One calculator session over a port and clock
pub struct Session<P: OutputPort, C: Clock> {
    port: PortGuard<P>,
    clock: C,
    indicator: IndicatorController,
    evaluator: Evaluator,
    config: BoardConfig,
    closed: bool,
}

impl<P: OutputPort, C: Clock> Session<P, C> {
    /// Take ownership of the port and initialize it
    pub fn new(port: P, clock: C, config: BoardConfig) -> Self {
        Self::with_programs(port, clock, config, PhasePrograms::DEFAULT)
    }

    /// Like [`Session::new`], with custom indicator programs
    pub fn with_programs(port: P, clock: C, config: BoardConfig, programs: PhasePrograms) -> Self {
        Self {
            port: PortGuard::new(port),
            clock,
            indicator: IndicatorController::with_programs(programs),
            evaluator: config.evaluator(),
            config,
            closed: false,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn indicator_phase(&self) -> IndicatorPhase {
        self.indicator.phase()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn sequencer(&mut self) -> Sequencer<'_, P, C> {
        Sequencer::new(&mut *self.port, &mut self.clock, &mut self.indicator)
    }

    /// Startup signal, then the optional self test (lamp test, digits up
    /// and back down)
    pub fn start(&mut self) {
        self.port.clear_segments();
        self.indicator
            .enter(IndicatorPhase::Startup, &mut *self.port, &mut self.clock);

        if self.config.self_test {
            let timing = self.config.timing;
            let mut sequencer = self.sequencer();
            sequencer.lamp_test(timing.lamp_test_ms);
            sequencer.count_up(timing.glyph_hold_ms);
            sequencer.count_down(timing.glyph_hold_ms);
        }
    }

    /// Handle one console line
    pub fn process(&mut self, line: &str) -> LineOutcome {
        if self.closed {
            return LineOutcome::Quit;
        }

        match classify(line) {
            LineCommand::Empty => LineOutcome::Ignored,
            LineCommand::Quit => {
                self.close();
                LineOutcome::Quit
            }
            LineCommand::Expression(expr) => self.run(expr),
        }
    }

    fn run(&mut self, expr: &str) -> LineOutcome {
        match self.evaluator.evaluate(expr) {
            EvaluationOutcome::Display { value, text } => {
                match RenderJob::new(&text, self.config.timing.render_timing()) {
                    Ok(job) => {
                        let report = self.sequencer().render(&job);
                        LineOutcome::Shown { text, report }
                    }
                    Err(_) => self.warn(value),
                }
            }
            EvaluationOutcome::TooLongForDisplay { value } => self.warn(value),
            EvaluationOutcome::Failed(e) => {
                self.show_error();
                LineOutcome::Failed(e)
            }
        }
    }

    fn warn(&mut self, value: Number) -> LineOutcome {
        self.indicator
            .enter(IndicatorPhase::Warning, &mut *self.port, &mut self.clock);
        LineOutcome::TooLong { value }
    }

    /// `E` stays lit for the error hold, including the indicator pulses
    fn show_error(&mut self) {
        let hold = self.config.timing.error_hold_ms;
        let pulses = self.indicator.programs().duration_ms(IndicatorPhase::Error);

        crate::display::show(&mut *self.port, ERROR_GLYPH);
        self.indicator
            .enter(IndicatorPhase::Error, &mut *self.port, &mut self.clock);

        let remaining = (hold as u64).saturating_sub(pulses);
        if remaining > 0 {
            self.clock.delay_ms(remaining as u32);
        }
        self.port.clear_segments();
    }

    fn close(&mut self) {
        if !self.closed {
            self.port.clear_segments();
            self.indicator
                .enter(IndicatorPhase::Shutdown, &mut *self.port, &mut self.clock);
            self.closed = true;
        }
    }

    /// Interrupt: drive every line low at once, no pulses
    pub fn abort(mut self) {
        self.port.clear_segments();
        self.indicator.exit(&mut *self.port);
        self.closed = true;
    }

    /// Normal end: shutdown signal, then release the port
    pub fn finish(mut self) {
        self.close();
    }
}
