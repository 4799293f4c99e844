//! Timer-driven sample capture.
//!
//! [`SampleCapture::tick`] is called once per sample period from the timer
//! interrupt. It reads one value from the analog front end, stores it as the
//! real part of the next (re, im) pair with a zero imaginary part, and on
//! the 128th pair hands the completed frame to the foreground through the
//! [`FrameMailbox`](crate::mailbox::FrameMailbox).
//!
//! A diagnostic pin is toggled on every tick, so the effective sampling
//! rate can be observed on a scope as a square wave at half the tick rate.

use embedded_hal::digital::StatefulOutputPin;

use crate::constants::FRAME_LEN;
use crate::mailbox::FrameMailbox;

/// One-shot access to the analog front end.
///
/// Implementations trigger an acquisition, wait out the hold time, and
/// return the converted value as a signed 1.15 fractional code (the ADC's
/// signed-fractional output format).
pub trait SampleSource {
    /// Acquire and return one sample.
    fn read_sample(&mut self) -> i16;
}

/// Interrupt-side capture state: accumulates pairs into a frame and
/// publishes completed frames.
///
/// Owns the capture buffer and the write cursor outright; the only state
/// shared with the foreground is the mailbox.
pub struct SampleCapture<'a, S, P> {
    source: S,
    heartbeat: P,
    samples: [i16; FRAME_LEN],
    /// Next write position; always even, always `< FRAME_LEN`.
    cursor: usize,
    mailbox: &'a FrameMailbox,
}

impl<'a, S, P> SampleCapture<'a, S, P>
where
    S: SampleSource,
    P: StatefulOutputPin,
{
    /// Create a capture task with an empty frame.
    pub fn new(source: S, heartbeat: P, mailbox: &'a FrameMailbox) -> Self {
        SampleCapture {
            source,
            heartbeat,
            samples: [0; FRAME_LEN],
            cursor: 0,
            mailbox,
        }
    }

    /// Take one sample. Call exactly once per timer period, from the timer
    /// interrupt.
    ///
    /// When the 128th pair lands, the frame is published to the mailbox. If
    /// the foreground has not drained the previous frame yet, the completed
    /// frame is silently discarded and capture restarts from index 0 — no
    /// queueing, no backpressure.
    pub fn tick(&mut self) {
        debug_assert!(self.cursor % 2 == 0 && self.cursor < FRAME_LEN);

        self.samples[self.cursor] = self.source.read_sample();
        self.samples[self.cursor + 1] = 0;
        self.cursor += 2;

        // Sampling-rate heartbeat. Pin failures have nowhere to go from an
        // ISR and the pin is diagnostic only.
        let _ = self.heartbeat.toggle();

        if self.cursor == FRAME_LEN {
            self.cursor = 0;
            let _ = self.mailbox.publish(&self.samples);
        }
    }
}
