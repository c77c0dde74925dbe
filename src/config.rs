use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Settings for the poll loop.
///
/// Thresholds and bindings are fixed policy and deliberately not part of
/// this; only the pacing of the loop is tunable.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PollSettings {
    /// Frame interval in microseconds. Defaults to ~60 Hz, standing in for
    /// a display-refresh-synced callback.
    pub frame_interval_us: u64,

    /// How often the loop logs throughput stats, in seconds.
    pub stats_interval_secs: i64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            frame_interval_us: 16_667,
            stats_interval_secs: 30,
        }
    }
}

impl PollSettings {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_micros(self.frame_interval_us)
    }

    /// Load settings from a TOML file, falling back to defaults when the
    /// file is absent or malformed. A bad config file should never keep the
    /// input subsystem from starting.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(raw) => match toml::from_str(&raw) {
                Ok(settings) => {
                    info!("Loaded poll settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    warn!(
                        "Malformed poll settings in {}, using defaults: {}",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                debug!(
                    "No poll settings at {}, using defaults: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_sixty_hertz() {
        let settings = PollSettings::default();
        assert_eq!(settings.frame_interval(), Duration::from_micros(16_667));
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let settings: PollSettings = toml::from_str("frame_interval_us = 8000").unwrap();
        assert_eq!(settings.frame_interval_us, 8_000);
        assert_eq!(settings.stats_interval_secs, 30);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = PollSettings::load("/nonexistent/padpoll.toml");
        assert_eq!(settings.frame_interval_us, 16_667);
    }
}
