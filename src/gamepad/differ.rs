use chrono::{DateTime, Local};
use tracing::{debug, trace};

use crate::gamepad::snapshot::{RawSnapshot, SnapshotSource, StickDirection};

/// Buttons monitored for edges, in dispatch order. Button 1 (zoom) is the
/// only one whose falling edge the dispatcher also acts on, but edges are
/// emitted uniformly and the dispatcher decides.
pub const MONITORED_BUTTONS: [usize; 5] = [0, 2, 3, 8, 1];

/// Stick directions monitored for edges: vertical forward/down, horizontal
/// left/right.
pub const MONITORED_STICKS: [(usize, StickDirection); 4] = [
    (1, StickDirection::Negative),
    (1, StickDirection::Positive),
    (0, StickDirection::Negative),
    (0, StickDirection::Positive),
];

/// A detected change in a control's thresholded boolean state between two
/// consecutive samples.
#[derive(Clone, Debug, PartialEq)]
pub enum EdgeEvent {
    Button {
        button: usize,
        pressed: bool,
        timestamp: DateTime<Local>,
    },
    Stick {
        axis: usize,
        direction: StickDirection,
        engaged: bool,
        timestamp: DateTime<Local>,
    },
}

/// Compares consecutive snapshots and produces edge events.
///
/// Owns the snapshot source and the retained previous snapshot. Edge
/// detection is a plain XOR of the thresholded previous and current state
/// per monitored control; there is no debounce beyond the single-sample
/// threshold.
pub struct StateDiffer<S: SnapshotSource> {
    source: S,
    previous: Option<RawSnapshot>,
    last_counter: u64,
}

impl<S: SnapshotSource> StateDiffer<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            previous: None,
            last_counter: 0,
        }
    }

    /// Run one poll-and-diff cycle.
    ///
    /// Returns the edge events between the retained previous snapshot and a
    /// freshly acquired one, then retains the fresh snapshot. Returns no
    /// events when no device is present, when the source's update counter
    /// has not advanced, or when there is no previous sample to compare
    /// against yet.
    pub fn poll_and_diff(&mut self) -> Vec<EdgeEvent> {
        // Structural clone; the retained copy must never alias the live
        // snapshot we are about to acquire.
        let previous = self.previous.clone();

        let Some(current) = self.source.snapshot() else {
            trace!("No gamepad present, skipping frame");
            return Vec::new();
        };

        // A present, non-zero counter equal to the last-seen one means the
        // source has not produced a new hardware sample since the last poll.
        if let Some(counter) = current.counter {
            if counter != 0 && counter == self.last_counter {
                trace!("Update counter unchanged ({}), skipping frame", counter);
                return Vec::new();
            }
            self.last_counter = counter;
        }

        // Transitions require two samples; an empty button array counts as
        // no sample recorded yet.
        let Some(previous) = previous.filter(|prev| !prev.buttons.is_empty()) else {
            debug!("First gamepad sample recorded, no transitions yet");
            self.previous = Some(current);
            return Vec::new();
        };

        let events = diff_snapshots(&previous, &current);
        if !events.is_empty() {
            debug!("Detected {} edge event(s)", events.len());
        }

        self.previous = Some(current);
        events
    }
}

// Compute the digital state of every monitored control for both snapshots
// independently and emit one event per differing control.
fn diff_snapshots(previous: &RawSnapshot, current: &RawSnapshot) -> Vec<EdgeEvent> {
    let now = Local::now();
    let mut events = Vec::new();

    for button in MONITORED_BUTTONS {
        let was_pressed = previous.button_pressed(button);
        let is_pressed = current.button_pressed(button);
        if was_pressed != is_pressed {
            debug!(
                "Button {} edge: {}",
                button,
                if is_pressed { "pressed" } else { "released" }
            );
            events.push(EdgeEvent::Button {
                button,
                pressed: is_pressed,
                timestamp: now,
            });
        }
    }

    for (axis, direction) in MONITORED_STICKS {
        let was_engaged = previous.stick_engaged(axis, direction);
        let is_engaged = current.stick_engaged(axis, direction);
        if was_engaged != is_engaged {
            debug!(
                "Axis {} {:?} edge: {}",
                axis,
                direction,
                if is_engaged { "engaged" } else { "disengaged" }
            );
            events.push(EdgeEvent::Stick {
                axis,
                direction,
                engaged: is_engaged,
                timestamp: now,
            });
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Snapshot source replaying a scripted sequence of frames.
    struct ScriptedSource {
        frames: VecDeque<Option<RawSnapshot>>,
    }

    impl ScriptedSource {
        fn new(frames: Vec<Option<RawSnapshot>>) -> Self {
            Self {
                frames: frames.into(),
            }
        }
    }

    impl SnapshotSource for ScriptedSource {
        fn snapshot(&mut self) -> Option<RawSnapshot> {
            self.frames.pop_front().flatten()
        }
    }

    fn snap(buttons: &[f32], axes: &[f32], counter: Option<u64>) -> RawSnapshot {
        RawSnapshot {
            buttons: buttons.to_vec(),
            axes: axes.to_vec(),
            counter,
        }
    }

    fn idle() -> RawSnapshot {
        snap(&[0.0; 9], &[0.0, 0.0], None)
    }

    fn differ(frames: Vec<Option<RawSnapshot>>) -> StateDiffer<ScriptedSource> {
        StateDiffer::new(ScriptedSource::new(frames))
    }

    #[test]
    fn first_sample_never_transitions() {
        let mut pressed = idle();
        pressed.buttons[0] = 1.0;

        let mut differ = differ(vec![Some(pressed)]);
        assert!(differ.poll_and_diff().is_empty());
    }

    #[test]
    fn rising_edge_emits_exactly_one_event() {
        // Scenario A: button 8 held throughout, button 0 crosses the
        // threshold upward with an advanced counter.
        let previous = snap(&[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0], &[], Some(1));
        let mut current = previous.clone();
        current.counter = Some(2);
        current.buttons[0] = 0.9;

        let mut differ = differ(vec![Some(previous), Some(current)]);
        assert!(differ.poll_and_diff().is_empty());

        let events = differ.poll_and_diff();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            EdgeEvent::Button {
                button: 0,
                pressed: true,
                ..
            }
        ));
    }

    #[test]
    fn falling_edge_is_emitted_for_monitored_buttons() {
        let mut held = idle();
        held.buttons[1] = 1.0;

        let mut differ = differ(vec![Some(held), Some(idle())]);
        differ.poll_and_diff();

        let events = differ.poll_and_diff();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            EdgeEvent::Button {
                button: 1,
                pressed: false,
                ..
            }
        ));
    }

    #[test]
    fn duplicate_counter_skips_processing() {
        let first = snap(&[0.0; 9], &[0.0, 0.0], Some(7));
        // Same counter, different values: the frame must be skipped anyway.
        let mut stale = first.clone();
        stale.buttons[0] = 1.0;

        let mut differ = differ(vec![Some(first), Some(stale)]);
        differ.poll_and_diff();
        assert!(differ.poll_and_diff().is_empty());
    }

    #[test]
    fn zero_counter_is_never_deduplicated() {
        let first = snap(&[0.0; 9], &[0.0, 0.0], Some(0));
        let mut second = first.clone();
        second.buttons[0] = 1.0;

        let mut differ = differ(vec![Some(first), Some(second)]);
        differ.poll_and_diff();

        let events = differ.poll_and_diff();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn absent_counter_is_always_processed() {
        let mut pressed = idle();
        pressed.buttons[2] = 0.8;

        let mut differ = differ(vec![Some(idle()), Some(pressed)]);
        differ.poll_and_diff();

        let events = differ.poll_and_diff();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            EdgeEvent::Button {
                button: 2,
                pressed: true,
                ..
            }
        ));
    }

    #[test]
    fn axis_boundary_value_is_not_engaged() {
        let mut at_threshold = idle();
        at_threshold.axes[0] = 0.3;

        let mut differ = differ(vec![Some(idle()), Some(at_threshold)]);
        differ.poll_and_diff();
        assert!(differ.poll_and_diff().is_empty());
    }

    #[test]
    fn axis_just_past_boundary_engages() {
        let mut engaged = idle();
        engaged.axes[0] = 0.30001;

        let mut differ = differ(vec![Some(idle()), Some(engaged)]);
        differ.poll_and_diff();

        let events = differ.poll_and_diff();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            EdgeEvent::Stick {
                axis: 0,
                direction: StickDirection::Positive,
                engaged: true,
                ..
            }
        ));
    }

    #[test]
    fn negative_engage_does_not_report_positive() {
        // Scenario B: axis 0 swings from 0.1 to -0.5; only the negative
        // direction engages.
        let mut previous = idle();
        previous.axes[0] = 0.1;
        let mut current = idle();
        current.axes[0] = -0.5;

        let mut differ = differ(vec![Some(previous), Some(current)]);
        differ.poll_and_diff();

        let events = differ.poll_and_diff();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            EdgeEvent::Stick {
                axis: 0,
                direction: StickDirection::Negative,
                engaged: true,
                ..
            }
        ));
    }

    #[test]
    fn disconnect_leaves_retained_state_untouched() {
        // Scenario C: the device vanishes for one frame; on return, edges
        // are still detected against the pre-disconnect sample.
        let mut pressed = idle();
        pressed.buttons[3] = 1.0;

        let mut differ = differ(vec![Some(idle()), None, Some(pressed)]);
        differ.poll_and_diff();
        assert!(differ.poll_and_diff().is_empty());

        let events = differ.poll_and_diff();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            EdgeEvent::Button {
                button: 3,
                pressed: true,
                ..
            }
        ));
    }

    #[test]
    fn empty_button_array_defers_detection() {
        // A malformed first sample without buttons must not emit transitions
        // once real data arrives either; it is treated as "no sample yet".
        let malformed = snap(&[], &[], None);
        let mut pressed = idle();
        pressed.buttons[0] = 1.0;

        let mut differ = differ(vec![Some(malformed), Some(pressed), Some(idle())]);
        assert!(differ.poll_and_diff().is_empty());
        // The pressed sample becomes the baseline, not a transition.
        assert!(differ.poll_and_diff().is_empty());

        // The release afterwards is a real edge.
        let events = differ.poll_and_diff();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            EdgeEvent::Button {
                button: 0,
                pressed: false,
                ..
            }
        ));
    }

    #[test]
    fn simultaneous_edges_emit_one_event_each() {
        let mut current = idle();
        current.buttons[0] = 1.0;
        current.axes[1] = -0.9;

        let mut differ = differ(vec![Some(idle()), Some(current)]);
        differ.poll_and_diff();

        let events = differ.poll_and_diff();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[0],
            EdgeEvent::Button {
                button: 0,
                pressed: true,
                ..
            }
        ));
        assert!(matches!(
            events[1],
            EdgeEvent::Stick {
                axis: 1,
                direction: StickDirection::Negative,
                engaged: true,
                ..
            }
        ));
    }
}
