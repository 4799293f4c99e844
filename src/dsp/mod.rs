//! Numeric kernels: 1.15 fixed-point conversion and the radix-2 FFT.

pub mod fft;
pub mod fixed;
