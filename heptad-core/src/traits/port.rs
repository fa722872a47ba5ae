//! Output port trait
//!
//! The output port is the single mutable hardware resource: seven segment
//! lines plus the two channels of the bicolor status light. Core logic never
//! sees pin numbers; those belong to the board configuration.

use core::ops::{Deref, DerefMut};

use crate::display::Segment;
use crate::indicator::Channel;

/// Logical output lines of the display board
pub trait OutputPort {
    /// Drive every line to its inactive level and take control of the lines
    fn initialize(&mut self);

    /// Assert or clear one segment line
    fn set_segment(&mut self, segment: Segment, asserted: bool);

    /// Assert or clear one indicator channel
    fn set_indicator(&mut self, channel: Channel, asserted: bool);

    /// Drive every line inactive and release the lines
    ///
    /// Must be safe to call more than once.
    fn shutdown(&mut self);

    /// Clear all seven segment lines
    fn clear_segments(&mut self) {
        for segment in Segment::ALL {
            self.set_segment(segment, false);
        }
    }

    /// Clear both indicator channels
    fn clear_indicator(&mut self) {
        self.set_indicator(Channel::Positive, false);
        self.set_indicator(Channel::Negative, false);
    }
}

impl<P: OutputPort + ?Sized> OutputPort for &mut P {
    fn initialize(&mut self) {
        (**self).initialize()
    }

    fn set_segment(&mut self, segment: Segment, asserted: bool) {
        (**self).set_segment(segment, asserted)
    }

    fn set_indicator(&mut self, channel: Channel, asserted: bool) {
        (**self).set_indicator(channel, asserted)
    }

    fn shutdown(&mut self) {
        (**self).shutdown()
    }
}

/// Scoped ownership of an output port
///
/// Initializes the port when created and shuts it down when dropped, so
/// every exit path (early return, `?`, unwinding) leaves all lines low.
pub struct PortGuard<P: OutputPort> {
    port: P,
}

impl<P: OutputPort> PortGuard<P> {
    /// Take ownership of `port` and initialize it
    pub fn new(mut port: P) -> Self {
        port.initialize();
        Self { port }
    }
}

impl<P: OutputPort> Deref for PortGuard<P> {
    type Target = P;

    fn deref(&self) -> &P {
        &self.port
    }
}

impl<P: OutputPort> DerefMut for PortGuard<P> {
    fn deref_mut(&mut self) -> &mut P {
        &mut self.port
    }
}

impl<P: OutputPort> Drop for PortGuard<P> {
    fn drop(&mut self) {
        self.port.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{PortEvent, Recorder};

    #[test]
    fn test_guard_initializes_and_shuts_down() {
        let recorder = Recorder::new();
        {
            let mut guard = PortGuard::new(recorder.port());
            guard.set_segment(Segment::A, true);
            assert!(recorder.segment_lit(Segment::A));
        }

        let events = recorder.events();
        assert_eq!(events.first(), Some(&PortEvent::Initialize));
        assert_eq!(events.last(), Some(&PortEvent::Shutdown));
        assert!(recorder.all_clear());
    }

    #[test]
    fn test_guard_shuts_down_on_unwind() {
        let recorder = Recorder::new();
        let port = recorder.port();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let mut guard = PortGuard::new(port);
            guard.set_indicator(Channel::Negative, true);
            guard.set_segment(Segment::G, true);
            panic!("interrupted mid-hold");
        }));

        assert!(result.is_err());
        assert_eq!(recorder.events().last(), Some(&PortEvent::Shutdown));
        assert!(recorder.all_clear());
    }

    #[test]
    fn test_default_clear_helpers() {
        let recorder = Recorder::new();
        let mut port = recorder.port();

        for segment in Segment::ALL {
            port.set_segment(segment, true);
        }
        port.set_indicator(Channel::Positive, true);

        port.clear_segments();
        port.clear_indicator();
        assert!(recorder.all_clear());
    }
}
