use gilrs::{Axis, Button, Event, GamepadId, Gilrs};
use tracing::{debug, info, warn};

use crate::gamepad::snapshot::{RawSnapshot, SnapshotSource, TYPICAL_AXIS_COUNT, TYPICAL_BUTTON_COUNT};

// Standard gamepad layout: button index -> gilrs button. Index 0 is the
// south face button, index 8 the select/back button.
const STANDARD_BUTTONS: [Button; TYPICAL_BUTTON_COUNT] = [
    Button::South,
    Button::East,
    Button::West,
    Button::North,
    Button::LeftTrigger,
    Button::RightTrigger,
    Button::LeftTrigger2,
    Button::RightTrigger2,
    Button::Select,
    Button::Start,
    Button::LeftThumb,
    Button::RightThumb,
    Button::DPadUp,
    Button::DPadDown,
    Button::DPadLeft,
    Button::DPadRight,
];

// Standard gamepad layout: axis index -> (gilrs axis, inverted). gilrs stick
// Y axes point up, the standard layout points down, hence the inversion.
const STANDARD_AXES: [(Axis, bool); TYPICAL_AXIS_COUNT] = [
    (Axis::LeftStickX, false),
    (Axis::LeftStickY, true),
    (Axis::RightStickX, false),
    (Axis::RightStickY, true),
];

// Source errors
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to initialize controller support: {0}")]
    InitializationError(String),
}

/// Gilrs-backed snapshot source for a single active gamepad.
///
/// gilrs caches gamepad state internally and only refreshes it while its
/// event queue is drained, so every snapshot first pumps the queue. The
/// update counter advances once per drained hardware event, which lets the
/// differ skip frames where nothing new arrived.
pub struct GilrsSource {
    gilrs: Gilrs,
    active_gamepad: Option<GamepadId>,
    counter: u64,
}

impl GilrsSource {
    /// Initialize controller support.
    ///
    /// Fails when the platform offers no controller API at all; the caller
    /// is expected to surface that once and never start polling.
    pub fn new() -> Result<Self, SnapshotError> {
        info!("Initializing gilrs controller interface");
        let gilrs = Gilrs::new().map_err(|e| {
            SnapshotError::InitializationError(e.to_string())
        })?;

        let source = Self {
            gilrs,
            active_gamepad: None,
            counter: 0,
        };

        if source.gilrs.gamepads().next().is_none() {
            warn!("No gamepad connected yet, continuing in idle mode");
        }

        Ok(source)
    }

    // Drain the gilrs event queue so cached gamepad state is current. The
    // update counter advances only when hardware events actually arrived.
    fn pump_events(&mut self) {
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            debug!("gilrs event from {:?}: {:?}", id, event);
            self.counter += 1;
        }
    }

    // Resolve the single gamepad we poll. First connected pad wins; after a
    // disconnect the next connected pad is selected on a later frame.
    fn resolve_gamepad(&mut self) -> Option<GamepadId> {
        if let Some(id) = self.active_gamepad {
            if self.gilrs.gamepad(id).is_connected() {
                return Some(id);
            }
            warn!("Active gamepad {:?} disconnected", id);
            self.active_gamepad = None;
        }

        let found = self.gilrs.gamepads().next().map(|(id, gamepad)| {
            info!("Selected gamepad: {} ({})", gamepad.name(), id);
            id
        });
        self.active_gamepad = found;
        found
    }
}

impl SnapshotSource for GilrsSource {
    fn snapshot(&mut self) -> Option<RawSnapshot> {
        self.pump_events();

        let id = self.resolve_gamepad()?;
        let gamepad = self.gilrs.gamepad(id);

        let buttons = STANDARD_BUTTONS
            .iter()
            .map(|button| {
                gamepad
                    .button_data(*button)
                    .map(|data| data.value())
                    .unwrap_or(0.0)
            })
            .collect();

        let axes = STANDARD_AXES
            .iter()
            .map(|(axis, inverted)| {
                let value = gamepad.axis_data(*axis).map(|data| data.value()).unwrap_or(0.0);
                if *inverted {
                    -value
                } else {
                    value
                }
            })
            .collect();

        Some(RawSnapshot {
            buttons,
            axes,
            counter: Some(self.counter),
        })
    }
}
