//! In-place radix-2 FFT over interleaved 1.15 complex frames.
//!
//! The transform mirrors the classic decimation-in-frequency hardware FFT:
//! seven butterfly stages over 128 complex points, each stage halving the
//! working values so the forward output carries an overall 1/N scaling, and
//! the result left in bit-reversed order. [`bit_reverse`] restores natural
//! frequency order as a separate pass; bin k then corresponds to
//! k x ([`SAMPLE_RATE_HZ`](crate::constants::SAMPLE_RATE_HZ) / N) Hz.
//!
//! Butterflies are computed in `f32` (twiddles from `libm`) and rounded
//! back to 1.15 codes once at the end; the frame is the only storage that
//! crosses module boundaries, so its fixed-point format is the contract.

use core::f32::consts::PI;

use libm::{cosf, sinf};

use crate::constants::{FFT_SIZE, FFT_STAGES, FRAME_LEN};
use crate::dsp::fixed::{float_to_fract, Q15_SCALE};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Inverse,
}

/// Forward transform: natural-order time-domain input, bit-reversed
/// frequency-domain output scaled by 1/N. Destroys the input in place.
pub fn forward(frame: &mut [i16; FRAME_LEN]) {
    transform(frame, Direction::Forward);
}

/// Inverse transform: natural-order frequency-domain input (as produced by
/// [`forward`] + [`bit_reverse`]), bit-reversed time-domain output.
///
/// Uses conjugate twiddles and no per-stage scaling, so it exactly undoes
/// the forward transform's 1/N normalization: forward, [`bit_reverse`],
/// `inverse`, [`bit_reverse`] reproduces the original frame up to 1.15
/// rounding. The reporting pipeline only ever runs the forward direction;
/// this one exists to validate the kernel.
pub fn inverse(frame: &mut [i16; FRAME_LEN]) {
    transform(frame, Direction::Inverse);
}

fn transform(frame: &mut [i16; FRAME_LEN], direction: Direction) {
    let mut re = [0.0f32; FFT_SIZE];
    let mut im = [0.0f32; FFT_SIZE];
    for k in 0..FFT_SIZE {
        re[k] = frame[2 * k] as f32 / Q15_SCALE;
        im[k] = frame[2 * k + 1] as f32 / Q15_SCALE;
    }

    // Forward halves every stage (1/N overall); the inverse leaves the sum
    // untouched so the pair is an identity.
    let scale = match direction {
        Direction::Forward => 0.5,
        Direction::Inverse => 1.0,
    };

    for stage in 0..FFT_STAGES {
        // Butterfly span for this stage: N/2, N/4, ..., 1.
        let half = FFT_SIZE >> (stage + 1);
        for block in (0..FFT_SIZE).step_by(2 * half) {
            for j in 0..half {
                let angle = PI * j as f32 / half as f32;
                let wr = cosf(angle);
                let wi = match direction {
                    Direction::Forward => -sinf(angle),
                    Direction::Inverse => sinf(angle),
                };

                let a = block + j;
                let b = a + half;
                let (ar, ai) = (re[a], im[a]);
                let (br, bi) = (re[b], im[b]);

                let (dr, di) = (ar - br, ai - bi);
                re[a] = (ar + br) * scale;
                im[a] = (ai + bi) * scale;
                re[b] = (dr * wr - di * wi) * scale;
                im[b] = (dr * wi + di * wr) * scale;
            }
        }
    }

    for k in 0..FFT_SIZE {
        frame[2 * k] = float_to_fract(re[k]);
        frame[2 * k + 1] = float_to_fract(im[k]);
    }
}

/// Reorder the complex pairs of a bit-reversed frame into natural order.
///
/// The permutation is its own inverse, so the same call also converts a
/// natural-order frame into bit-reversed order (as [`inverse`] expects on
/// its output side).
pub fn bit_reverse(frame: &mut [i16; FRAME_LEN]) {
    for i in 0..FFT_SIZE {
        let j = reversed(i);
        if j > i {
            frame.swap(2 * i, 2 * j);
            frame.swap(2 * i + 1, 2 * j + 1);
        }
    }
}

/// Reverse the low [`FFT_STAGES`] bits of a frame index.
fn reversed(index: usize) -> usize {
    index.reverse_bits() >> (usize::BITS as usize - FFT_STAGES)
}
