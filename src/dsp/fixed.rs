//! 1.15 signed fractional format helpers.
//!
//! The ADC and the FFT work buffer both hold 16-bit codes in 1.15 format:
//! one sign bit, 15 fractional bits, value = code / 2^15.

/// Full-scale magnitude of the 1.15 format (2^15).
pub const Q15_SCALE: f32 = 32768.0;

/// Convert a 1.15 code to a real value in `[0.0, 1.0]`.
///
/// Negative codes are folded onto the positive axis *before* scaling, so
/// `fract_to_float(x) == fract_to_float(-x)`. Sign is deliberately
/// discarded here: the only consumer is the spectral magnitude step, which
/// is sign-insensitive, and the folding order is part of the pipeline's
/// observable numeric contract.
pub fn fract_to_float(code: i16) -> f32 {
    // Widen first so that -32768 folds to +32768 instead of overflowing.
    let folded = (code as i32).unsigned_abs();
    folded as f32 / Q15_SCALE
}

/// Round a real value to the nearest 1.15 code, saturating at the rails.
pub fn float_to_fract(value: f32) -> i16 {
    let scaled = libm::roundf(value * Q15_SCALE);
    if scaled >= i16::MAX as f32 {
        i16::MAX
    } else if scaled <= i16::MIN as f32 {
        i16::MIN
    } else {
        scaled as i16
    }
}
