//! Gamepad subsystem for frame-driven input polling
//!
//! Implements a poll-and-diff pipeline:
//!
//! 1. [`snapshot`] - raw snapshot model and digital thresholding
//! 2. [`source`] - gilrs-backed snapshot acquisition
//! 3. [`differ`] - edge detection between consecutive snapshots
//! 4. [`poll_loop`] - frame pacing and lifecycle management
//!
//! # Architecture
//!
//! ```text
//! Gamepad ──► SnapshotSource ──► StateDiffer ──► ActionDispatcher
//!             (RawSnapshot)      (EdgeEvent)
//! ```
//!
//! The pipeline runs inside a single tokio task ticked at the display
//! refresh interval, so exactly one poll cycle is in flight at a time.

pub mod differ;
pub mod poll_loop;
pub mod snapshot;
pub mod source;

pub use differ::{EdgeEvent, StateDiffer};
pub use poll_loop::{FrameTimer, PollError, PollHandle};
pub use snapshot::{
    RawSnapshot, SnapshotSource, StickDirection, ANALOGUE_BUTTON_THRESHOLD, AXIS_THRESHOLD,
};
pub use source::{GilrsSource, SnapshotError};
