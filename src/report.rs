//! Result publication: parallel bin-index pins and the framed serial
//! magnitude stream.
//!
//! Each analysis cycle ends here. The dominant bin index (0–63) is latched
//! onto six digital lines, least-significant bit first, then the 64
//! magnitude bytes go out over the serial channel bracketed by literal
//! start/end markers:
//!
//! ```text
//! "Inicio" <64 magnitude bytes, bin order> "Fin"
//! ```
//!
//! A diagnostic pin toggles once per published result, giving a slow
//! "result heartbeat" alongside the fast per-sample one in
//! [`capture`](crate::capture).

use embedded_hal::digital::{OutputPin, StatefulOutputPin};
use embedded_io::Write;

use crate::analyze::Spectrum;

/// Literal bytes preceding each magnitude block on the serial channel.
pub const FRAME_START: &[u8] = b"Inicio";
/// Literal bytes following each magnitude block.
pub const FRAME_END: &[u8] = b"Fin";

/// Number of parallel lines carrying the dominant bin index.
pub const BIN_PORT_WIDTH: usize = 6;

/// Failure publishing a result: either the serial channel or a pin write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportError<S, P> {
    /// The serial channel rejected a write.
    Serial(S),
    /// A digital output line rejected a write.
    Pin(P),
}

/// Six digital lines carrying an unsigned 6-bit value, LSB on `pins[0]`.
///
/// The lines are updated one after another with no synchronization guard;
/// they are meant to be read by hardware, not sampled mid-update by
/// software.
pub struct BinPort<P> {
    pins: [P; BIN_PORT_WIDTH],
}

impl<P: OutputPin> BinPort<P> {
    /// Wrap six output lines, least-significant bit first.
    pub fn new(pins: [P; BIN_PORT_WIDTH]) -> Self {
        BinPort { pins }
    }

    /// Give the lines back.
    pub fn release(self) -> [P; BIN_PORT_WIDTH] {
        self.pins
    }

    /// Latch a bin index onto the lines. Bits above the port width are
    /// ignored.
    pub fn write(&mut self, bin: u8) -> Result<(), P::Error> {
        for (i, pin) in self.pins.iter_mut().enumerate() {
            if bin >> i & 1 == 1 {
                pin.set_high()?;
            } else {
                pin.set_low()?;
            }
        }
        Ok(())
    }
}

/// Publishes one [`Spectrum`] per analysis cycle.
///
/// By default every cycle is reported unconditionally. Change suppression
/// can be opted into with [`report_only_changes`](Self::report_only_changes):
/// when the dominant bin matches the previous cycle's, the serial stream is
/// skipped while the parallel lines are still refreshed.
pub struct SpectrumReporter<W, P> {
    serial: W,
    port: BinPort<P>,
    heartbeat: P,
    only_changes: bool,
    last_bin: Option<u8>,
}

impl<W, P> SpectrumReporter<W, P>
where
    W: Write,
    P: StatefulOutputPin,
{
    /// Create a reporter publishing every cycle.
    pub fn new(serial: W, port: BinPort<P>, heartbeat: P) -> Self {
        SpectrumReporter {
            serial,
            port,
            heartbeat,
            only_changes: false,
            last_bin: None,
        }
    }

    /// Give the serial channel, the bin port and the heartbeat pin back.
    pub fn release(self) -> (W, BinPort<P>, P) {
        (self.serial, self.port, self.heartbeat)
    }

    /// Enable or disable suppression of repeated identical results on the
    /// serial channel. Off by default.
    pub fn report_only_changes(&mut self, enabled: bool) {
        self.only_changes = enabled;
    }

    /// Publish one analysis result.
    ///
    /// Order matters and is observable: parallel lines first, then the
    /// serial stream, then the result heartbeat toggle.
    pub fn report(
        &mut self,
        spectrum: &Spectrum,
    ) -> Result<(), ReportError<W::Error, P::Error>> {
        self.port
            .write(spectrum.dominant_bin)
            .map_err(ReportError::Pin)?;

        let unchanged = self.last_bin == Some(spectrum.dominant_bin);
        if !(self.only_changes && unchanged) {
            self.serial
                .write_all(FRAME_START)
                .map_err(ReportError::Serial)?;
            self.serial
                .write_all(&spectrum.magnitudes)
                .map_err(ReportError::Serial)?;
            self.serial
                .write_all(FRAME_END)
                .map_err(ReportError::Serial)?;
            self.serial.flush().map_err(ReportError::Serial)?;
        }
        self.last_bin = Some(spectrum.dominant_bin);

        self.heartbeat.toggle().map_err(ReportError::Pin)?;
        Ok(())
    }
}
