use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timing and device knobs for the guided session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProtocolConfig {
    /// How long each gesture is "being detected" before it counts as done.
    pub detection_window_ms: u64,

    /// Pause between a recognized gesture and the next detection window.
    pub settle_delay_ms: u64,

    /// How long the success notice stays up before returning to the dashboard.
    pub completion_delay_ms: u64,

    /// Off when the host has no vibration motor.
    pub haptics_enabled: bool,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            detection_window_ms: 3_000,
            settle_delay_ms: 1_000,
            completion_delay_ms: 2_000,
            haptics_enabled: true,
        }
    }
}

impl ProtocolConfig {
    /// A tenth of the default cadence, for demos.
    pub fn fast() -> Self {
        Self {
            detection_window_ms: 300,
            settle_delay_ms: 100,
            completion_delay_ms: 200,
            ..Self::default()
        }
    }

    pub fn detection_window(&self) -> Duration {
        Duration::from_millis(self.detection_window_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }

    /// Start-to-completion time for `gestures` steps: every step gets a
    /// detection window, every step but the last a settle delay.
    pub fn session_length(&self, gestures: usize) -> Duration {
        let settles = gestures.saturating_sub(1) as u32;
        self.detection_window() * gestures as u32 + self.settle_delay() * settles
    }
}
