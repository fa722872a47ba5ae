//! Test doubles shared by the unit tests
//!
//! `Recorder` hands out a port and a clock that append to the same timeline,
//! so tests can check the exact interleaving of line writes and holds.

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use crate::display::Segment;
use crate::indicator::Channel;
use crate::traits::{Clock, OutputPort};

/// One observable action on the port or clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortEvent {
    Initialize,
    Segment(Segment, bool),
    Indicator(Channel, bool),
    Delay(u32),
    Shutdown,
}

#[derive(Default)]
struct State {
    segments: [bool; 7],
    channels: [bool; 2],
    events: Vec<PortEvent>,
    channels_overlapped: bool,
}

/// Shared timeline for a recording port and clock
#[derive(Clone, Default)]
pub struct Recorder {
    state: Rc<RefCell<State>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn port(&self) -> RecordingPort {
        RecordingPort {
            state: Rc::clone(&self.state),
        }
    }

    pub fn clock(&self) -> RecordingClock {
        RecordingClock {
            state: Rc::clone(&self.state),
        }
    }

    pub fn events(&self) -> Vec<PortEvent> {
        self.state.borrow().events.clone()
    }

    pub fn clear_events(&self) {
        self.state.borrow_mut().events.clear();
    }

    pub fn delays(&self) -> Vec<u32> {
        self.state
            .borrow()
            .events
            .iter()
            .filter_map(|e| match e {
                PortEvent::Delay(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }

    pub fn total_delay_ms(&self) -> u64 {
        self.delays().iter().map(|&ms| ms as u64).sum()
    }

    pub fn segment_lit(&self, segment: Segment) -> bool {
        self.state.borrow().segments[segment.index()]
    }

    pub fn channel_lit(&self, channel: Channel) -> bool {
        self.state.borrow().channels[channel.index()]
    }

    pub fn all_clear(&self) -> bool {
        let state = self.state.borrow();
        state.segments.iter().all(|lit| !lit) && state.channels.iter().all(|lit| !lit)
    }

    pub fn segments_clear(&self) -> bool {
        self.state.borrow().segments.iter().all(|lit| !lit)
    }

    /// True if both indicator channels were ever asserted at the same time
    pub fn channels_overlapped(&self) -> bool {
        self.state.borrow().channels_overlapped
    }
}

pub struct RecordingPort {
    state: Rc<RefCell<State>>,
}

impl OutputPort for RecordingPort {
    fn initialize(&mut self) {
        let mut state = self.state.borrow_mut();
        state.segments = [false; 7];
        state.channels = [false; 2];
        state.events.push(PortEvent::Initialize);
    }

    fn set_segment(&mut self, segment: Segment, asserted: bool) {
        let mut state = self.state.borrow_mut();
        state.segments[segment.index()] = asserted;
        state.events.push(PortEvent::Segment(segment, asserted));
    }

    fn set_indicator(&mut self, channel: Channel, asserted: bool) {
        let mut state = self.state.borrow_mut();
        state.channels[channel.index()] = asserted;
        if state.channels[0] && state.channels[1] {
            state.channels_overlapped = true;
        }
        state.events.push(PortEvent::Indicator(channel, asserted));
    }

    fn shutdown(&mut self) {
        let mut state = self.state.borrow_mut();
        state.segments = [false; 7];
        state.channels = [false; 2];
        state.events.push(PortEvent::Shutdown);
    }
}

pub struct RecordingClock {
    state: Rc<RefCell<State>>,
}

impl Clock for RecordingClock {
    fn delay_ms(&mut self, ms: u32) {
        self.state.borrow_mut().events.push(PortEvent::Delay(ms));
    }
}
