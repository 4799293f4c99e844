//! # dspic-spectrum
//!
//! A `no_std`, zero-allocation reimplementation of a dsPIC30F4013 real-time
//! spectrum analyzer in pure Rust. An interrupt-driven capture task fills
//! 128-sample frames from an analog front end, a foreground task runs a
//! radix-2 FFT over each completed frame and publishes the dominant 100 Hz
//! frequency bin on six digital lines while streaming all 64 bin magnitudes
//! over a serial link.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Handoff | [`mailbox`] | Single-slot lock-free frame handoff, ISR → foreground |
//! | Capture | [`capture`] | Timer-tick sampling into double-buffered frames |
//! | DSP | [`dsp`] | Radix-2 FFT, bit-reversal reorder, 1.15 fixed-point math |
//! | Analysis | [`analyze`] | Per-bin magnitudes and dominant-bin selection |
//! | Output | [`report`] | Parallel bin-index pins + framed serial magnitude stream |
//! | Glue | [`pipeline`] | Foreground poll loop tying take → analyze → report |
//! | Extra | [`level`] | Stand-alone eight-LED ADC level ladder |
//!
//! ## Quick start
//!
//! ```ignore
//! use dspic_spectrum::capture::SampleCapture;
//! use dspic_spectrum::mailbox::FrameMailbox;
//! use dspic_spectrum::pipeline::SpectrumTask;
//! use dspic_spectrum::report::{BinPort, SpectrumReporter};
//!
//! static MAILBOX: FrameMailbox = FrameMailbox::new();
//!
//! // In the timer ISR (one call per sample period):
//! capture.tick();
//!
//! // In the foreground loop:
//! let mut task = SpectrumTask::new(&MAILBOX, reporter);
//! loop {
//!     task.poll()?;
//! }
//! ```
//!
//! ## Fixed design parameters
//!
//! - **Frame size:** 128 complex pairs ([`constants::FFT_SIZE`])
//! - **Sample rate:** 12 800 Hz ([`constants::SAMPLE_RATE_HZ`])
//! - **Bin spacing:** 100 Hz, bins 0–63 ([`constants::BIN_COUNT`])
//! - **Sample format:** `i16` in 1.15 signed fractional format
//!
//! These are structural to the seven-stage FFT and the 6-bit output port,
//! not tunables.
//!
//! ## Hardware seams
//!
//! There is no Rust target for the dsPIC30F itself, so all register-level
//! collaborators sit behind traits: the analog front end implements
//! [`capture::SampleSource`], output lines implement the `embedded-hal`
//! pin traits, and the serial channel implements `embedded_io::Write`.

#![no_std]

pub mod analyze;
pub mod capture;
pub mod constants;
pub mod dsp;
pub mod level;
pub mod mailbox;
pub mod pipeline;
pub mod report;

#[cfg(test)]
pub(crate) mod mock;
