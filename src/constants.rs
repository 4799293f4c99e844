/// Number of complex (re, im) sample pairs per analysis frame.
pub const FFT_SIZE: usize = 128;

/// Radix-2 butterfly stages: log2([`FFT_SIZE`]).
pub const FFT_STAGES: usize = 7;

/// Length of one interleaved frame in 16-bit words: re, im, re, im, ...
pub const FRAME_LEN: usize = FFT_SIZE * 2;

/// Number of published frequency bins (DC up to just below Nyquist).
pub const BIN_COUNT: usize = FFT_SIZE / 2;

/// Fixed sampling rate in Hz (set by the sample timer period).
pub const SAMPLE_RATE_HZ: u32 = 12_800;

/// Frequency spacing between adjacent bins: bin k covers k x 100 Hz.
pub const BIN_SPACING_HZ: u32 = SAMPLE_RATE_HZ / FFT_SIZE as u32;
