//! Dispatch of edge events onto consumer action handlers
//!
//! The gamepad subsystem reports *what changed* ([`EdgeEvent`]); this module
//! decides *what that means* for the game: one-shot actions fired on rising
//! edges, and paired key-down/key-up calls for held controls so the consumer
//! can treat controller input uniformly with keyboard input.
//!
//! [`EdgeEvent`]: crate::gamepad::EdgeEvent

pub mod actions;
pub mod dispatcher;

pub use actions::{GameActions, KeyMask};
pub use dispatcher::ActionDispatcher;
