//! Test doubles for the hardware seams: pins, serial channel, and analog
//! sources. Host-only, compiled with the test harness.

use core::convert::Infallible;
use core::f32::consts::PI;

use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin, StatefulOutputPin};
use embedded_io::{ErrorType as IoErrorType, Write};
use libm::cosf;

use crate::capture::SampleSource;
use crate::constants::FFT_SIZE;
use crate::dsp::fixed::float_to_fract;

/// Infallible digital output line that remembers its state and counts
/// edges.
pub struct MockPin {
    pub state: bool,
    pub edges: usize,
}

impl MockPin {
    pub fn new() -> Self {
        MockPin {
            state: false,
            edges: 0,
        }
    }
}

impl PinErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        if self.state {
            self.edges += 1;
        }
        self.state = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        if !self.state {
            self.edges += 1;
        }
        self.state = true;
        Ok(())
    }
}

impl StatefulOutputPin for MockPin {
    fn is_set_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.state)
    }

    fn is_set_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.state)
    }
}

/// Fixed-capacity sink standing in for the UART.
pub struct MockSerial {
    buf: [u8; 1024],
    len: usize,
}

impl MockSerial {
    pub fn new() -> Self {
        MockSerial {
            buf: [0; 1024],
            len: 0,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl IoErrorType for MockSerial {
    type Error = Infallible;
}

impl Write for MockSerial {
    fn write(&mut self, data: &[u8]) -> Result<usize, Infallible> {
        let n = data.len().min(self.buf.len() - self.len);
        self.buf[self.len..self.len + n].copy_from_slice(&data[..n]);
        self.len += n;
        Ok(n)
    }

    fn flush(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Deterministic sample source: a linear ramp, one step per read.
pub struct RampSource {
    next: i16,
    step: i16,
}

impl RampSource {
    pub fn new(start: i16, step: i16) -> Self {
        RampSource { next: start, step }
    }
}

impl SampleSource for RampSource {
    fn read_sample(&mut self) -> i16 {
        let value = self.next;
        self.next = self.next.wrapping_add(self.step);
        value
    }
}

/// Pure cosine pinned to an exact analysis bin, phase-continuous across
/// frames.
pub struct ToneSource {
    bin: usize,
    amplitude: f32,
    n: usize,
}

impl ToneSource {
    pub fn new(bin: usize, amplitude: f32) -> Self {
        ToneSource {
            bin,
            amplitude,
            n: 0,
        }
    }
}

impl SampleSource for ToneSource {
    fn read_sample(&mut self) -> i16 {
        let phase = 2.0 * PI * self.bin as f32 * self.n as f32 / FFT_SIZE as f32;
        self.n = (self.n + 1) % FFT_SIZE;
        float_to_fract(self.amplitude * cosf(phase))
    }
}
