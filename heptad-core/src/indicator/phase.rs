//! Indicator phases and pulse programs

use Channel::{Negative, Positive};

/// Indicator lamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Success / activity (green)
    Positive,
    /// Failure (red)
    Negative,
}

impl Channel {
    /// Both channels
    pub const ALL: [Channel; 2] = [Channel::Positive, Channel::Negative];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// The opposite channel
    pub const fn other(self) -> Channel {
        match self {
            Channel::Positive => Channel::Negative,
            Channel::Negative => Channel::Positive,
        }
    }
}

/// Indicator phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorPhase {
    /// Both channels dark
    #[default]
    Off,
    /// Power-on lamp check
    Startup,
    /// Short pulse before a render starts
    ReadyPulse,
    /// Positive channel held while glyphs are shown
    Active,
    /// Result shown
    Success,
    /// Evaluation failed
    Error,
    /// Result computed but too long for the display
    Warning,
    /// Session ending
    Shutdown,
}

impl IndicatorPhase {
    /// Every phase, for exhaustive tests and property strategies
    pub const ALL: [IndicatorPhase; 8] = [
        IndicatorPhase::Off,
        IndicatorPhase::Startup,
        IndicatorPhase::ReadyPulse,
        IndicatorPhase::Active,
        IndicatorPhase::Success,
        IndicatorPhase::Error,
        IndicatorPhase::Warning,
        IndicatorPhase::Shutdown,
    ];

    /// Whether the phase outlives `enter`
    pub fn is_held(&self) -> bool {
        matches!(self, IndicatorPhase::Active)
    }
}

/// One step of a pulse program: light `channel` for `on_ms`, then dark for
/// `off_ms`, `repeat` times
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pulse {
    pub channel: Channel,
    pub on_ms: u32,
    pub off_ms: u32,
    pub repeat: u8,
}

impl Pulse {
    pub const fn once(channel: Channel, on_ms: u32, off_ms: u32) -> Self {
        Self::repeated(channel, on_ms, off_ms, 1)
    }

    pub const fn repeated(channel: Channel, on_ms: u32, off_ms: u32, repeat: u8) -> Self {
        Self {
            channel,
            on_ms,
            off_ms,
            repeat,
        }
    }

    /// Total time this step takes (ms)
    pub const fn duration_ms(&self) -> u64 {
        (self.on_ms as u64 + self.off_ms as u64) * self.repeat as u64
    }
}

/// Pulse program for every transient phase
///
/// `Active` and `Off` have no program: `Active` holds the positive channel
/// and `Off` leaves both dark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhasePrograms {
    pub startup: &'static [Pulse],
    pub ready_pulse: &'static [Pulse],
    pub success: &'static [Pulse],
    pub error: &'static [Pulse],
    pub warning: &'static [Pulse],
    pub shutdown: &'static [Pulse],
}

impl PhasePrograms {
    /// Built-in programs
    pub const DEFAULT: PhasePrograms = PhasePrograms {
        startup: &[Pulse::once(Positive, 200, 100), Pulse::once(Negative, 200, 100)],
        ready_pulse: &[Pulse::once(Positive, 100, 50)],
        success: &[Pulse::once(Positive, 300, 300)],
        error: &[Pulse::repeated(Negative, 200, 200, 3)],
        warning: &[
            Pulse::once(Positive, 150, 150),
            Pulse::once(Negative, 150, 150),
            Pulse::once(Positive, 150, 150),
            Pulse::once(Negative, 150, 150),
        ],
        shutdown: &[Pulse::repeated(Positive, 300, 300, 2)],
    };

    /// No pulses in any phase
    pub const fn silent() -> Self {
        PhasePrograms {
            startup: &[],
            ready_pulse: &[],
            success: &[],
            error: &[],
            warning: &[],
            shutdown: &[],
        }
    }

    /// Program for `phase`
    pub fn program(&self, phase: IndicatorPhase) -> &'static [Pulse] {
        match phase {
            IndicatorPhase::Off | IndicatorPhase::Active => &[],
            IndicatorPhase::Startup => self.startup,
            IndicatorPhase::ReadyPulse => self.ready_pulse,
            IndicatorPhase::Success => self.success,
            IndicatorPhase::Error => self.error,
            IndicatorPhase::Warning => self.warning,
            IndicatorPhase::Shutdown => self.shutdown,
        }
    }

    /// Time `phase` blocks for (ms)
    pub fn duration_ms(&self, phase: IndicatorPhase) -> u64 {
        self.program(phase).iter().map(Pulse::duration_ms).sum()
    }
}

impl Default for PhasePrograms {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_other() {
        assert_eq!(Channel::Positive.other(), Channel::Negative);
        assert_eq!(Channel::Negative.other(), Channel::Positive);
        assert_ne!(Channel::Positive.index(), Channel::Negative.index());
    }

    #[test]
    fn test_default_durations() {
        let programs = PhasePrograms::DEFAULT;
        assert_eq!(programs.duration_ms(IndicatorPhase::Startup), 600);
        assert_eq!(programs.duration_ms(IndicatorPhase::ReadyPulse), 150);
        assert_eq!(programs.duration_ms(IndicatorPhase::Success), 600);
        assert_eq!(programs.duration_ms(IndicatorPhase::Error), 1200);
        assert_eq!(programs.duration_ms(IndicatorPhase::Warning), 1200);
        assert_eq!(programs.duration_ms(IndicatorPhase::Shutdown), 1200);
        assert_eq!(programs.duration_ms(IndicatorPhase::Active), 0);
        assert_eq!(programs.duration_ms(IndicatorPhase::Off), 0);
    }

    #[test]
    fn test_error_is_negative_only() {
        assert!(PhasePrograms::DEFAULT
            .error
            .iter()
            .all(|p| p.channel == Channel::Negative));
    }

    #[test]
    fn test_only_active_is_held() {
        for phase in IndicatorPhase::ALL {
            assert_eq!(phase.is_held(), phase == IndicatorPhase::Active);
        }
    }
}
