//! Lock-free single-slot frame mailbox.
//!
//! Carries one completed sample frame from the capture interrupt (producer)
//! to the foreground analysis loop (consumer). There is deliberately no
//! queue: if the consumer has not drained the previous frame by the time the
//! next one completes, the new frame is dropped and capture restarts. This
//! at-most-one-frame-in-flight policy keeps the interrupt handler wait-free
//! and bounds memory at exactly one spare frame.
//!
//! # Safety Contract
//!
//! - Only ONE context may call [`publish()`](FrameMailbox::publish) (the
//!   timer interrupt).
//! - Only ONE context may call [`take()`](FrameMailbox::take) (the
//!   foreground loop).
//! - These may run at different priorities / preempt each other.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicBool, Ordering};

use crate::constants::FRAME_LEN;

/// Single-slot handoff for interleaved (re, im) sample frames.
///
/// The readiness flag doubles as the ownership token for the slot: while it
/// is clear the producer owns the slot, while it is set the consumer does.
/// The slot is always written strictly before the flag is set (release
/// store) and read strictly after the flag is observed set (acquire load),
/// so a partially written frame is never visible.
pub struct FrameMailbox {
    slot: UnsafeCell<[i16; FRAME_LEN]>,
    /// Set by the producer on frame completion, cleared by the consumer.
    ready: AtomicBool,
}

// SAFETY: The slot is only touched by the side that currently owns it per
// the `ready` protocol above, and the acquire/release pair on `ready`
// orders the slot accesses across contexts.
unsafe impl Sync for FrameMailbox {}

impl FrameMailbox {
    /// Create an empty mailbox (usable as a `static`).
    pub const fn new() -> Self {
        FrameMailbox {
            slot: UnsafeCell::new([0; FRAME_LEN]),
            ready: AtomicBool::new(false),
        }
    }

    /// Publish a completed frame (producer side).
    ///
    /// Returns `false` and leaves the mailbox untouched if the previous
    /// frame has not been consumed yet; the caller is expected to discard
    /// the frame silently and keep capturing.
    pub fn publish(&self, frame: &[i16; FRAME_LEN]) -> bool {
        if self.ready.load(Ordering::Acquire) {
            return false; // consumer is lagging, drop this frame
        }

        // SAFETY: `ready` is clear, so the consumer has released the slot
        // and we are the sole producer.
        unsafe {
            *self.slot.get() = *frame;
        }

        // Release ordering ensures the slot write is visible before the
        // consumer can observe the flag set.
        self.ready.store(true, Ordering::Release);
        true
    }

    /// Copy the pending frame out and release the slot (consumer side).
    ///
    /// Returns `false` without touching `out` if no frame is pending.
    pub fn take(&self, out: &mut [i16; FRAME_LEN]) -> bool {
        if !self.ready.load(Ordering::Acquire) {
            return false;
        }

        // SAFETY: `ready` is set, so the producer has handed the slot to us
        // and will not write it again until we clear the flag.
        unsafe {
            *out = *self.slot.get();
        }

        // Release ordering ensures the copy completes before the producer
        // may start overwriting the slot.
        self.ready.store(false, Ordering::Release);
        true
    }

    /// Whether a completed frame is waiting for the consumer.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

impl Default for FrameMailbox {
    fn default() -> Self {
        Self::new()
    }
}
