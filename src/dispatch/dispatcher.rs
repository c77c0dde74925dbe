use tracing::{debug, warn};

use crate::dispatch::actions::{GameActions, KeyMask};
use crate::gamepad::differ::EdgeEvent;
use crate::gamepad::snapshot::StickDirection;

/// Maps each edge event to exactly one handler call.
///
/// Fixed bindings, not configurable:
///
/// | Control      | Edge             | Action                         |
/// |--------------|------------------|--------------------------------|
/// | button 0     | press            | `drop_bomb`                    |
/// | button 2     | press            | `detonate`                     |
/// | button 3     | press            | `pause`                        |
/// | button 8     | press            | `show_stats`                   |
/// | button 1     | press/release    | `key_down`/`key_up` ZOOM       |
/// | axis 1 neg   | engage/disengage | `key_down`/`key_up` FORWARD    |
/// | axis 1 pos   | engage/disengage | `key_down`/`key_up` MOVE_DOWN  |
/// | axis 0 neg   | engage/disengage | `key_down`/`key_up` LEFT       |
/// | axis 0 pos   | engage/disengage | `key_down`/`key_up` RIGHT      |
pub struct ActionDispatcher<A: GameActions> {
    actions: A,
}

impl<A: GameActions> ActionDispatcher<A> {
    pub fn new(actions: A) -> Self {
        Self { actions }
    }

    pub fn dispatch(&mut self, event: &EdgeEvent) {
        debug!("Dispatching edge event: {:?}", event);
        match *event {
            EdgeEvent::Button {
                button, pressed, ..
            } => self.dispatch_button(button, pressed),
            EdgeEvent::Stick {
                axis,
                direction,
                engaged,
                ..
            } => self.dispatch_stick(axis, direction, engaged),
        }
    }

    fn dispatch_button(&mut self, button: usize, pressed: bool) {
        match (button, pressed) {
            // One-shot actions fire on the rising edge only.
            (0, true) => self.actions.drop_bomb(),
            (2, true) => self.actions.detonate(),
            (3, true) => self.actions.pause(),
            (8, true) => self.actions.show_stats(),
            (0 | 2 | 3 | 8, false) => {}
            // Zoom is a paired control.
            (1, true) => self.actions.key_down(KeyMask::ZOOM),
            (1, false) => self.actions.key_up(KeyMask::ZOOM),
            _ => warn!("Edge event for unmonitored button {}", button),
        }
    }

    fn dispatch_stick(&mut self, axis: usize, direction: StickDirection, engaged: bool) {
        let keys = match (axis, direction) {
            (1, StickDirection::Negative) => KeyMask::FORWARD,
            (1, StickDirection::Positive) => KeyMask::MOVE_DOWN,
            (0, StickDirection::Negative) => KeyMask::LEFT,
            (0, StickDirection::Positive) => KeyMask::RIGHT,
            _ => {
                warn!("Edge event for unmonitored axis {} {:?}", axis, direction);
                return;
            }
        };

        if engaged {
            self.actions.key_down(keys);
        } else {
            self.actions.key_up(keys);
        }
    }
}
