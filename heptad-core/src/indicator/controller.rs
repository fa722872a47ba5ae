//! Indicator state machine
//!
//! `enter` runs a phase's pulse program to completion before returning.
//! The two channels are never asserted together: the other channel is
//! cleared before one is lit.

use super::phase::{Channel, IndicatorPhase, PhasePrograms, Pulse};
use crate::traits::{Clock, OutputPort};

/// Drives the positive/negative indicator channels
#[derive(Debug, Clone)]
pub struct IndicatorController {
    programs: PhasePrograms,
    phase: IndicatorPhase,
}

impl IndicatorController {
    /// Controller with the built-in pulse programs
    pub fn new() -> Self {
        Self::with_programs(PhasePrograms::DEFAULT)
    }

    /// Controller with custom pulse programs
    pub fn with_programs(programs: PhasePrograms) -> Self {
        Self {
            programs,
            phase: IndicatorPhase::Off,
        }
    }

    /// Current phase
    ///
    /// Transient phases have already finished by the time `enter` returns,
    /// so this is either `Active` or `Off`.
    pub fn phase(&self) -> IndicatorPhase {
        self.phase
    }

    pub fn programs(&self) -> &PhasePrograms {
        &self.programs
    }

    /// Enter `phase` from any state
    pub fn enter<P, C>(&mut self, phase: IndicatorPhase, port: &mut P, clock: &mut C)
    where
        P: OutputPort + ?Sized,
        C: Clock + ?Sized,
    {
        port.clear_indicator();

        for pulse in self.programs.program(phase) {
            run_pulse(pulse, port, clock);
        }

        if phase.is_held() {
            assert_channel(Channel::Positive, port);
            self.phase = IndicatorPhase::Active;
        } else {
            self.phase = IndicatorPhase::Off;
        }
    }

    /// Leave the current phase, both channels dark
    pub fn exit<P: OutputPort + ?Sized>(&mut self, port: &mut P) {
        port.clear_indicator();
        self.phase = IndicatorPhase::Off;
    }
}

impl Default for IndicatorController {
    fn default() -> Self {
        Self::new()
    }
}

fn assert_channel<P: OutputPort + ?Sized>(channel: Channel, port: &mut P) {
    port.set_indicator(channel.other(), false);
    port.set_indicator(channel, true);
}

fn run_pulse<P, C>(pulse: &Pulse, port: &mut P, clock: &mut C)
where
    P: OutputPort + ?Sized,
    C: Clock + ?Sized,
{
    for _ in 0..pulse.repeat {
        assert_channel(pulse.channel, port);
        clock.delay_ms(pulse.on_ms);
        port.set_indicator(pulse.channel, false);
        clock.delay_ms(pulse.off_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{PortEvent, Recorder};
    use proptest::prelude::*;

    fn rig() -> (Recorder, crate::testing::RecordingPort, crate::testing::RecordingClock) {
        let recorder = Recorder::new();
        let port = recorder.port();
        let clock = recorder.clock();
        (recorder, port, clock)
    }

    #[test]
    fn test_initial_state_off() {
        assert_eq!(IndicatorController::new().phase(), IndicatorPhase::Off);
    }

    #[test]
    fn test_error_blinks_negative_three_times() {
        let (recorder, mut port, mut clock) = rig();
        let mut indicator = IndicatorController::new();

        indicator.enter(IndicatorPhase::Error, &mut port, &mut clock);

        let lit = recorder
            .events()
            .iter()
            .filter(|e| **e == PortEvent::Indicator(Channel::Negative, true))
            .count();
        assert_eq!(lit, 3);
        assert_eq!(recorder.delays(), vec![200; 6]);
        assert_eq!(indicator.phase(), IndicatorPhase::Off);
        assert!(recorder.all_clear());
    }

    #[test]
    fn test_active_holds_positive() {
        let (recorder, mut port, mut clock) = rig();
        let mut indicator = IndicatorController::new();

        indicator.enter(IndicatorPhase::Active, &mut port, &mut clock);
        assert_eq!(indicator.phase(), IndicatorPhase::Active);
        assert!(recorder.channel_lit(Channel::Positive));
        assert!(!recorder.channel_lit(Channel::Negative));
        assert!(recorder.delays().is_empty());

        indicator.exit(&mut port);
        assert_eq!(indicator.phase(), IndicatorPhase::Off);
        assert!(recorder.all_clear());
    }

    #[test]
    fn test_enter_from_active_clears_first() {
        let (recorder, mut port, mut clock) = rig();
        let mut indicator = IndicatorController::new();

        indicator.enter(IndicatorPhase::Active, &mut port, &mut clock);
        recorder.clear_events();
        indicator.enter(IndicatorPhase::Error, &mut port, &mut clock);

        let events = recorder.events();
        let first_negative = events
            .iter()
            .position(|e| *e == PortEvent::Indicator(Channel::Negative, true))
            .unwrap();
        assert!(events[..first_negative].contains(&PortEvent::Indicator(Channel::Positive, false)));
        assert!(!recorder.channels_overlapped());
    }

    #[test]
    fn test_startup_checks_both_lamps() {
        let (recorder, mut port, mut clock) = rig();
        let mut indicator = IndicatorController::new();

        indicator.enter(IndicatorPhase::Startup, &mut port, &mut clock);
        let events = recorder.events();
        assert!(events.contains(&PortEvent::Indicator(Channel::Positive, true)));
        assert!(events.contains(&PortEvent::Indicator(Channel::Negative, true)));
        assert_eq!(recorder.total_delay_ms(), 600);
    }

    #[test]
    fn test_off_writes_nothing_lit() {
        let (recorder, mut port, mut clock) = rig();
        let mut indicator = IndicatorController::new();

        indicator.enter(IndicatorPhase::Off, &mut port, &mut clock);
        assert!(recorder
            .events()
            .iter()
            .all(|e| !matches!(e, PortEvent::Indicator(_, true))));
    }

    #[test]
    fn test_custom_programs() {
        let (recorder, mut port, mut clock) = rig();
        const SUCCESS: &[Pulse] = &[Pulse::repeated(Channel::Positive, 10, 20, 4)];
        let programs = PhasePrograms {
            success: SUCCESS,
            ..PhasePrograms::silent()
        };
        let mut indicator = IndicatorController::with_programs(programs);

        indicator.enter(IndicatorPhase::Success, &mut port, &mut clock);
        assert_eq!(recorder.total_delay_ms(), 120);
        indicator.enter(IndicatorPhase::Error, &mut port, &mut clock);
        assert_eq!(recorder.total_delay_ms(), 120);
    }

    fn any_phase() -> impl Strategy<Value = IndicatorPhase> {
        proptest::sample::select(IndicatorPhase::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_channels_never_overlap(phases in proptest::collection::vec(any_phase(), 0..12)) {
            let (recorder, mut port, mut clock) = rig();
            let mut indicator = IndicatorController::new();

            for phase in phases {
                indicator.enter(phase, &mut port, &mut clock);
                let expected = if phase == IndicatorPhase::Active {
                    IndicatorPhase::Active
                } else {
                    IndicatorPhase::Off
                };
                prop_assert_eq!(indicator.phase(), expected);
            }
            prop_assert!(!recorder.channels_overlapped());
        }
    }
}
