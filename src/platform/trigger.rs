//! Single-slot trigger capture
//!
//! Input handlers press; the frame loop takes. Any number of presses between
//! two ticks collapse into one.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared pending-trigger flag. Clones refer to the same slot.
#[derive(Debug, Clone, Default)]
pub struct TriggerSlot {
    pending: Arc<AtomicBool>,
}

impl TriggerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press (from any input source)
    #[inline]
    pub fn press(&self) {
        self.pending.store(true, Ordering::Release);
    }

    /// Consume the pending press, if any
    #[inline]
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }
}
