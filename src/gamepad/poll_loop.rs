use chrono::Local;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::config::PollSettings;
use crate::dispatch::{ActionDispatcher, GameActions};
use crate::gamepad::differ::StateDiffer;
use crate::gamepad::snapshot::SnapshotSource;
use crate::gamepad::source::{GilrsSource, SnapshotError};

// Poll loop errors
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("Controller support unavailable: {0}")]
    UnsupportedPlatform(#[from] SnapshotError),
}

/// Frame pacing for the poll loop.
///
/// Stands in for a display-refresh-synced callback: one `next_frame` await
/// per display refresh, backed by a fixed ~16.6ms tokio interval. Whether a
/// further frame gets requested at all is decided by the loop's running
/// flag, not by the timer.
pub struct FrameTimer {
    interval: tokio::time::Interval,
}

impl FrameTimer {
    pub fn new(settings: &PollSettings) -> Self {
        let mut interval = tokio::time::interval(settings.frame_interval());
        // Catch-up bursts after a stall would violate the one-sample-per-
        // frame assumption of the differ.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    pub async fn next_frame(&mut self) {
        self.interval.tick().await;
    }
}

/// The poll-and-diff loop: one tick per frame, dispatching every detected
/// edge, rescheduling itself only while the running flag is set.
struct PollLoop<S: SnapshotSource, A: GameActions> {
    differ: StateDiffer<S>,
    dispatcher: ActionDispatcher<A>,
    timer: FrameTimer,
    running: watch::Receiver<bool>,
    frames: u64,
    dispatched: u64,
    last_stats: chrono::DateTime<Local>,
    stats_interval: chrono::Duration,
}

impl<S: SnapshotSource, A: GameActions> PollLoop<S, A> {
    fn new(source: S, actions: A, settings: &PollSettings, running: watch::Receiver<bool>) -> Self {
        Self {
            differ: StateDiffer::new(source),
            dispatcher: ActionDispatcher::new(actions),
            timer: FrameTimer::new(settings),
            running,
            frames: 0,
            dispatched: 0,
            last_stats: Local::now(),
            stats_interval: chrono::Duration::seconds(settings.stats_interval_secs),
        }
    }

    // One poll-and-diff cycle. Side effects only; a frame with no device or
    // no changes dispatches nothing.
    fn tick(&mut self) {
        let events = self.differ.poll_and_diff();
        for event in &events {
            self.dispatcher.dispatch(event);
        }
        self.frames += 1;
        self.dispatched += events.len() as u64;
    }

    fn log_stats(&mut self) {
        let now = Local::now();
        if now - self.last_stats > self.stats_interval {
            info!(
                "Poll loop stats: {} frames, {} events dispatched in last {}s",
                self.frames,
                self.dispatched,
                (now - self.last_stats).num_seconds()
            );
            self.frames = 0;
            self.dispatched = 0;
            self.last_stats = now;
        }
    }

    async fn run(mut self) {
        info!("Poll loop task started");
        loop {
            // Park until started. A closed channel means the handle is gone
            // and the subsystem shuts down.
            while !*self.running.borrow_and_update() {
                if self.running.changed().await.is_err() {
                    debug!("Poll handle dropped, poll loop shutting down");
                    return;
                }
            }

            self.timer.next_frame().await;
            self.tick();
            self.log_stats();

            // Cooperative cancellation: stop() takes effect here, after the
            // in-flight tick finished, before any further frame is armed.
            if self.running.has_changed().is_err() {
                debug!("Poll handle dropped, poll loop shutting down");
                return;
            }
        }
    }
}

/// Owning handle for the poll loop task.
///
/// Spawns the loop stopped; `start()`/`stop()` toggle polling. Dropping the
/// handle shuts the task down after at most one frame.
pub struct PollHandle {
    running: watch::Sender<bool>,
}

impl PollHandle {
    /// Spawn the poll loop against the real gilrs backend.
    ///
    /// Fails with [`PollError::UnsupportedPlatform`] when the platform has
    /// no controller API; that is the one user-facing notice this subsystem
    /// produces, and polling never starts.
    pub fn spawn<A: GameActions>(
        actions: A,
        settings: Option<PollSettings>,
    ) -> Result<Self, PollError> {
        let source = GilrsSource::new().map_err(|e| {
            error!("No controller support on this platform: {}", e);
            PollError::UnsupportedPlatform(e)
        })?;
        Ok(Self::spawn_with_source(source, actions, settings))
    }

    /// Spawn the poll loop against an arbitrary snapshot source.
    pub fn spawn_with_source<S, A>(source: S, actions: A, settings: Option<PollSettings>) -> Self
    where
        S: SnapshotSource + Send + 'static,
        A: GameActions,
    {
        let settings = settings.unwrap_or_default();
        info!("Spawning poll loop with settings: {:?}", settings);

        let (running_tx, running_rx) = watch::channel(false);
        let poll_loop = PollLoop::new(source, actions, &settings, running_rx);
        tokio::spawn(poll_loop.run());

        Self {
            running: running_tx,
        }
    }

    /// Start polling. No-op while already running.
    pub fn start(&self) {
        if *self.running.borrow() {
            debug!("Poll loop already running, ignoring start");
            return;
        }
        info!("Starting gamepad polling");
        let _ = self.running.send(true);
    }

    /// Stop polling. Does not cancel an in-flight frame; the loop checks
    /// the flag itself before arming the next one.
    pub fn stop(&self) {
        if !*self.running.borrow() {
            return;
        }
        info!("Stopping gamepad polling");
        let _ = self.running.send(false);
    }

    pub fn is_running(&self) -> bool {
        *self.running.borrow()
    }
}
