//! Eight-LED analog level ladder.
//!
//! The first-unit companion program: no spectral math, just a per-
//! conversion mapping from a raw 12-bit ADC code to a bar of lit LEDs,
//! with the level byte echoed over the serial channel and a diagnostic
//! pin toggled once per conversion.

use embedded_hal::digital::StatefulOutputPin;
use embedded_io::Write;

use crate::report::ReportError;

/// Number of LEDs in the ladder.
pub const LADDER_LEDS: usize = 8;

/// ADC counts per level step: 4096-count range split into 512-count bands.
pub const COUNTS_PER_LEVEL: u16 = 512;

/// Map a raw 12-bit ADC code to a level.
///
/// Integer division by 512 yields 0..=7 over the 0..=4095 input range, so
/// the topmost LED only lights for codes the converter cannot actually
/// produce; the visible bar spans seven steps.
pub fn level_from_adc(code: u16) -> u8 {
    (code / COUNTS_PER_LEVEL) as u8
}

/// Drives the LED bar, the serial echo and the conversion heartbeat.
pub struct LevelMeter<W, P> {
    serial: W,
    leds: [P; LADDER_LEDS],
    heartbeat: P,
}

impl<W, P> LevelMeter<W, P>
where
    W: Write,
    P: StatefulOutputPin,
{
    /// Wrap the eight LED lines (bottom of the bar first) and the serial
    /// channel.
    pub fn new(serial: W, leds: [P; LADDER_LEDS], heartbeat: P) -> Self {
        LevelMeter {
            serial,
            leds,
            heartbeat,
        }
    }

    /// Handle one completed conversion. Call once per ADC interrupt.
    ///
    /// LEDs light cumulatively: LED i is on when the level is at least
    /// `i + 1`.
    pub fn update(&mut self, code: u16) -> Result<(), ReportError<W::Error, P::Error>> {
        self.heartbeat.toggle().map_err(ReportError::Pin)?;

        let level = level_from_adc(code);
        for (i, led) in self.leds.iter_mut().enumerate() {
            if level as usize >= i + 1 {
                led.set_high().map_err(ReportError::Pin)?;
            } else {
                led.set_low().map_err(ReportError::Pin)?;
            }
        }

        self.serial
            .write_all(&[level])
            .map_err(ReportError::Serial)?;
        Ok(())
    }
}
