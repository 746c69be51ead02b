//! Platform abstraction layer
//!
//! Handles the host side of the game:
//! - Frame loop mount/teardown
//! - Input capture into a single trigger slot

pub mod frame_loop;
pub mod trigger;

pub use frame_loop::{FrameLoop, FrameRequest, FrameScheduler, HeadlessScheduler};
pub use trigger::TriggerSlot;
