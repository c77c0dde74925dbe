use serde::{Deserialize, Serialize};

/// Analogue intensity above which a button counts as pressed.
pub const ANALOGUE_BUTTON_THRESHOLD: f32 = 0.5;

/// Deflection beyond which a stick axis counts as engaged in a direction.
pub const AXIS_THRESHOLD: f32 = 0.3;

/// Number of buttons covered by the standard gamepad layout. Extra buttons
/// on exotic pads would have larger indices and are not monitored.
pub const TYPICAL_BUTTON_COUNT: usize = 16;

/// Number of axes covered by the standard gamepad layout.
pub const TYPICAL_AXIS_COUNT: usize = 4;

/// Direction of stick deflection along one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StickDirection {
    /// Towards -1.0 (left on axis 0, up/forward on axis 1).
    Negative,
    /// Towards +1.0 (right on axis 0, down on axis 1).
    Positive,
}

/// Raw gamepad state as read from the snapshot source.
///
/// Buttons are analogue intensities in `0.0..=1.0` indexed by standard-layout
/// button id; axes are positions in `-1.0..=1.0` indexed by standard-layout
/// axis id (axis 0 horizontal, axis 1 vertical with positive pointing down).
///
/// `counter` is an opaque, monotonically non-decreasing update counter used
/// to detect that the underlying source has not produced a new hardware
/// sample since the last poll. `None` when the source cannot report one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawSnapshot {
    pub buttons: Vec<f32>,
    pub axes: Vec<f32>,
    pub counter: Option<u64>,
}

impl RawSnapshot {
    /// Digital interpretation of a button: strictly above the analogue
    /// threshold. An index the pad never reported is never pressed.
    pub fn button_pressed(&self, button: usize) -> bool {
        self.buttons
            .get(button)
            .is_some_and(|value| *value > ANALOGUE_BUTTON_THRESHOLD)
    }

    /// Digital interpretation of a stick axis in one direction: strictly
    /// beyond the axis threshold. An absent axis is never engaged.
    pub fn stick_engaged(&self, axis: usize, direction: StickDirection) -> bool {
        match self.axes.get(axis) {
            None => false,
            Some(value) => match direction {
                StickDirection::Negative => *value < -AXIS_THRESHOLD,
                StickDirection::Positive => *value > AXIS_THRESHOLD,
            },
        }
    }
}

/// Non-blocking read-only query for the current gamepad state.
///
/// Returns `None` while no controller is connected; that is an empty frame,
/// not an error. Must be cheap enough to call at 60 Hz.
pub trait SnapshotSource {
    fn snapshot(&mut self) -> Option<RawSnapshot>;
}
