//! Frame-driven gamepad polling with edge detection and action dispatch.
//!
//! `padpoll` samples a connected gamepad once per display-refresh interval
//! (~60 Hz), compares the thresholded digital interpretation of the new
//! sample against the previous one, and turns every transition into a single
//! discrete action call on a consumer-supplied [`GameActions`] handler.
//!
//! The subsystem is split into two stages:
//!
//! 1. [`gamepad`] - snapshot acquisition, state diffing and the poll loop
//! 2. [`dispatch`] - mapping edge events onto consumer action handlers
//!
//! A typical consumer spawns a [`PollHandle`] with its own `GameActions`
//! implementation and toggles polling via `start()`/`stop()`.

pub mod config;
pub mod dispatch;
pub mod gamepad;

pub use config::PollSettings;
pub use dispatch::{ActionDispatcher, GameActions, KeyMask};
pub use gamepad::{
    EdgeEvent, GilrsSource, PollError, PollHandle, RawSnapshot, SnapshotError, SnapshotSource,
    StateDiffer, StickDirection,
};
