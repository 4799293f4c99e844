//! Spectral analysis: per-bin magnitudes and dominant-bin selection.
//!
//! Consumes one completed frame, runs the forward FFT plus bit-reversal
//! reorder in place, then scans bins 0..64 converting each (re, im) pair to
//! a magnitude. The non-DC bin with the greatest magnitude becomes the
//! dominant bin; with eight-bit published values and 100 Hz spacing that is
//! everything the output stage needs.

use libm::sqrtf;

use crate::constants::{BIN_COUNT, BIN_SPACING_HZ, FFT_SIZE, FRAME_LEN};
use crate::dsp::fft;
use crate::dsp::fixed::fract_to_float;

/// One analysis cycle's result: 64 bin magnitudes plus the index of the
/// strongest non-DC bin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spectrum {
    /// Magnitude per 100 Hz bin, bin 0 = DC. Values wrap into eight bits;
    /// a true magnitude above 255 aliases. That is the accepted range
    /// trade-off of the one-byte-per-bin serial contract.
    pub magnitudes: [u8; BIN_COUNT],
    /// Index of the strongest bin, 1–63. DC never wins; ties keep the
    /// lowest index.
    pub dominant_bin: u8,
}

impl Spectrum {
    /// Scan a natural-order frequency-domain frame.
    ///
    /// Each code is converted through [`fract_to_float`] (folding negative
    /// codes positive *before* the magnitude step — the conversion order is
    /// part of the numeric contract), then
    /// `sqrt(re^2 + im^2) * 128` undoes the transform's 1/N scaling.
    ///
    /// The DC bin's true magnitude is recorded in `magnitudes[0]`, but its
    /// amplitude is forced to zero before the max comparison so it cannot
    /// become the dominant bin.
    pub fn from_bins(frame: &[i16; FRAME_LEN]) -> Self {
        let mut magnitudes = [0u8; BIN_COUNT];
        let mut dominant_bin = 0u8;
        let mut max = 0.0f32;

        for k in 0..BIN_COUNT {
            let re = fract_to_float(frame[2 * k]);
            let im = fract_to_float(frame[2 * k + 1]);

            let mut amplitude = sqrtf(re * re + im * im) * FFT_SIZE as f32;
            magnitudes[k] = amplitude as u32 as u8; // wraps above 255

            if k == 0 {
                amplitude = 0.0;
            }
            if amplitude > max {
                max = amplitude;
                dominant_bin = k as u8;
            }
        }

        Spectrum {
            magnitudes,
            dominant_bin,
        }
    }

    /// Dominant frequency in Hz: bin index times the 100 Hz bin spacing.
    pub fn dominant_frequency_hz(&self) -> u32 {
        self.dominant_bin as u32 * BIN_SPACING_HZ
    }
}

/// Full spectral engine pass over one time-domain frame.
///
/// Runs the in-place forward FFT (the frame is destructively overwritten
/// with frequency-domain coefficients), restores natural bin order, and
/// scans the bins. The frame is free for reuse afterwards.
pub fn analyze(frame: &mut [i16; FRAME_LEN]) -> Spectrum {
    fft::forward(frame);
    fft::bit_reverse(frame);
    Spectrum::from_bins(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::fixed::float_to_fract;
    use core::f32::consts::PI;
    use libm::cosf;

    /// A frequency-domain code of `m * 256` converts to magnitude `m`
    /// exactly: (256 m / 32768) * 128 = m.
    fn bin_code(magnitude: i16) -> i16 {
        magnitude * 256
    }

    #[test]
    fn ties_keep_the_lowest_bin() {
        let mut frame = [0i16; FRAME_LEN];
        frame[0] = bin_code(5); // DC
        frame[2] = bin_code(10); // bin 1
        frame[4] = bin_code(10); // bin 2, tied
        frame[6] = bin_code(3); // bin 3

        let spectrum = Spectrum::from_bins(&frame);
        assert_eq!(spectrum.dominant_bin, 1);
        assert_eq!(spectrum.magnitudes[0], 5);
        assert_eq!(spectrum.magnitudes[1], 10);
        assert_eq!(spectrum.magnitudes[2], 10);
        assert_eq!(spectrum.magnitudes[3], 3);
    }

    #[test]
    fn dc_is_recorded_but_never_dominant() {
        let mut frame = [0i16; FRAME_LEN];
        frame[0] = bin_code(100); // huge DC
        frame[2 * 4] = bin_code(2); // small bin 4

        let spectrum = Spectrum::from_bins(&frame);
        assert_eq!(spectrum.magnitudes[0], 100, "DC magnitude still published");
        assert_eq!(spectrum.dominant_bin, 4);
    }

    #[test]
    fn silent_frame_reports_bin_zero() {
        let frame = [0i16; FRAME_LEN];
        let spectrum = Spectrum::from_bins(&frame);
        assert_eq!(spectrum.dominant_bin, 0);
        assert_eq!(spectrum.magnitudes, [0u8; BIN_COUNT]);
    }

    #[test]
    fn negative_codes_fold_before_magnitude() {
        let mut positive = [0i16; FRAME_LEN];
        let mut negative = [0i16; FRAME_LEN];
        positive[2 * 9] = bin_code(7);
        negative[2 * 9] = -bin_code(7);

        assert_eq!(
            Spectrum::from_bins(&positive),
            Spectrum::from_bins(&negative)
        );
    }

    #[test]
    fn full_scale_pair_truncates_to_floor() {
        let mut frame = [0i16; FRAME_LEN];
        frame[2 * 3] = i16::MIN; // folds to full scale
        frame[2 * 3 + 1] = i16::MIN;

        let spectrum = Spectrum::from_bins(&frame);
        // sqrt(1 + 1) * 128 = 181.019..., truncated on publish.
        assert_eq!(spectrum.magnitudes[3], 181);
        assert_eq!(spectrum.dominant_bin, 3);
    }

    #[test]
    fn dominant_frequency_in_hz() {
        let mut frame = [0i16; FRAME_LEN];
        frame[2 * 13] = bin_code(20);
        let spectrum = Spectrum::from_bins(&frame);
        assert_eq!(spectrum.dominant_frequency_hz(), 1_300);
    }

    #[test]
    fn pure_sinusoid_detected_end_to_end() {
        // Bin-3 tone (300 Hz at the 12.8 kHz sample rate), zero imaginary
        // part, exactly as the capture path produces it.
        let mut frame = [0i16; FRAME_LEN];
        for n in 0..FFT_SIZE {
            let phase = 2.0 * PI * 3.0 * n as f32 / FFT_SIZE as f32;
            frame[2 * n] = float_to_fract(0.5 * cosf(phase));
        }

        let spectrum = analyze(&mut frame);
        assert_eq!(spectrum.dominant_bin, 3);

        // Bin 3 carries 0.25 * 32768 / 256 = 32; every other non-DC bin
        // should be at least an order of magnitude below it.
        let peak = spectrum.magnitudes[3];
        assert!(peak >= 30, "peak magnitude {}", peak);
        for k in 1..BIN_COUNT {
            if k == 3 {
                continue;
            }
            assert!(
                (spectrum.magnitudes[k] as u32) * 10 <= peak as u32,
                "bin {} = {} too close to peak {}",
                k,
                spectrum.magnitudes[k],
                peak
            );
        }
    }
}
