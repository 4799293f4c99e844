//! Foreground control loop: poll the mailbox, analyze, report.
//!
//! The foreground has no blocking primitive on this class of device; it
//! busy-polls the mailbox between timer interrupts. Each completed frame
//! costs one FFT plus one report, which finishes well inside the 10 ms
//! frame period, so in steady state no frames are dropped.

use embedded_hal::digital::StatefulOutputPin;
use embedded_io::Write;

use crate::analyze::{analyze, Spectrum};
use crate::constants::FRAME_LEN;
use crate::mailbox::FrameMailbox;
use crate::report::{ReportError, SpectrumReporter};

/// Consumer side of the pipeline: owns the work frame and the reporter.
///
/// The capture interrupt never touches the work frame; frames arrive by
/// copy through the mailbox, so analysis may destroy its frame in place
/// while the next capture is already underway.
pub struct SpectrumTask<'a, W, P> {
    mailbox: &'a FrameMailbox,
    frame: [i16; FRAME_LEN],
    reporter: SpectrumReporter<W, P>,
}

impl<'a, W, P> SpectrumTask<'a, W, P>
where
    W: Write,
    P: StatefulOutputPin,
{
    /// Create the foreground task.
    pub fn new(mailbox: &'a FrameMailbox, reporter: SpectrumReporter<W, P>) -> Self {
        SpectrumTask {
            mailbox,
            frame: [0; FRAME_LEN],
            reporter,
        }
    }

    /// Give the reporter back.
    pub fn release(self) -> SpectrumReporter<W, P> {
        self.reporter
    }

    /// Run one poll iteration.
    ///
    /// Returns `Ok(None)` when no frame is pending, `Ok(Some(spectrum))`
    /// after a full analyze + report cycle.
    pub fn poll(&mut self) -> Result<Option<Spectrum>, ReportError<W::Error, P::Error>> {
        if !self.mailbox.take(&mut self.frame) {
            return Ok(None);
        }

        let spectrum = analyze(&mut self.frame);
        self.reporter.report(&spectrum)?;
        Ok(Some(spectrum))
    }

    /// Busy-poll forever, returning only if publishing a result fails.
    pub fn run(&mut self) -> Result<(), ReportError<W::Error, P::Error>> {
        loop {
            self.poll()?;
        }
    }
}
