use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::Instant;

use crate::gestures::{self, Gesture};

pub const DETECTING_STATUS: &str = "Detecting...";
pub const WAITING_STATUS: &str = "Waiting...";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(tag = "phase", content = "step", rename_all = "camelCase")]
pub enum ProtocolPhase {
    #[default]
    Idle,
    Detecting(usize),
    Transitioning(usize),
    Completing,
    /// Persisting failed; the user has to start over.
    CompletionFailed,
}

impl ProtocolPhase {
    pub fn accepts_start(&self) -> bool {
        matches!(self, ProtocolPhase::Idle | ProtocolPhase::CompletionFailed)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub phase: ProtocolPhase,
    pub session_id: Option<String>,
    pub current_step: usize,
    pub is_active: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub detected_status: String,
    /// Monotonic start; wall-clock `started_at` is for display only.
    #[serde(skip)]
    pub running_anchor: Option<Instant>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: ProtocolPhase::Idle,
            session_id: None,
            current_step: 0,
            is_active: false,
            started_at: None,
            detected_status: WAITING_STATUS.to_string(),
            running_anchor: None,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_session(&mut self, session_id: String, started_at: DateTime<Utc>, now: Instant) {
        *self = Self {
            phase: ProtocolPhase::Detecting(0),
            session_id: Some(session_id),
            current_step: 0,
            is_active: true,
            started_at: Some(started_at),
            detected_status: DETECTING_STATUS.to_string(),
            running_anchor: Some(now),
        };
    }

    pub fn is_owned_by(&self, session_id: &str) -> bool {
        self.session_id.as_deref() == Some(session_id)
    }

    pub fn enter_transition(&mut self, step: usize, gesture_name: &str) {
        self.phase = ProtocolPhase::Transitioning(step);
        self.detected_status = format!("✓ {gesture_name}");
    }

    pub fn advance_to(&mut self, step: usize) {
        self.phase = ProtocolPhase::Detecting(step);
        self.current_step = step;
        self.detected_status = DETECTING_STATUS.to_string();
    }

    pub fn begin_completing(&mut self) {
        self.phase = ProtocolPhase::Completing;
    }

    pub fn fail_completion(&mut self) {
        self.phase = ProtocolPhase::CompletionFailed;
    }

    pub fn elapsed(&self) -> Duration {
        self.running_anchor
            .map(|anchor| anchor.elapsed())
            .unwrap_or_default()
    }

    /// `(step + 1) / count * 100`; never zero, 100 only on the last gesture.
    pub fn progress(&self) -> f64 {
        let count = gestures::gesture_count();
        ((self.current_step + 1) as f64 / count as f64) * 100.0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// State plus the values a watch face needs to draw it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub progress: f64,
    pub current_gesture: Option<Gesture>,
    pub next_gesture: Option<Gesture>,
}

impl SessionSnapshot {
    pub fn from_state(state: &SessionState) -> Self {
        Self {
            progress: state.progress(),
            current_gesture: gestures::gesture_at(state.current_step).copied(),
            next_gesture: gestures::next_after(state.current_step).copied(),
            state: state.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> SessionState {
        let mut state = SessionState::new();
        state.begin_session("s-1".into(), Utc::now(), Instant::now());
        state
    }

    #[test]
    fn begin_session_resets_step_and_status() {
        let mut state = started();
        state.advance_to(4);
        state.enter_transition(4, "Thumb Rotation");

        state.begin_session("s-2".into(), Utc::now(), Instant::now());
        assert_eq!(state.current_step, 0);
        assert_eq!(state.detected_status, DETECTING_STATUS);
        assert_eq!(state.phase, ProtocolPhase::Detecting(0));
        assert!(state.is_owned_by("s-2"));
        assert!(!state.is_owned_by("s-1"));
    }

    #[test]
    fn progress_tracks_step() {
        let mut state = started();
        let mut last = 0.0;
        for step in 0..6 {
            state.advance_to(step);
            let progress = state.progress();
            assert!(progress > last);
            assert!((progress - 100.0 * (step + 1) as f64 / 6.0).abs() < 1e-9);
            last = progress;
        }
        assert_eq!(last, 100.0);
    }

    #[test]
    fn transition_status_names_the_gesture() {
        let mut state = started();
        state.enter_transition(0, "Palm to Palm");
        assert_eq!(state.detected_status, "✓ Palm to Palm");
        assert_eq!(state.current_step, 0);
    }

    #[test]
    fn only_idle_and_failed_accept_start() {
        assert!(ProtocolPhase::Idle.accepts_start());
        assert!(ProtocolPhase::CompletionFailed.accepts_start());
        assert!(!ProtocolPhase::Detecting(2).accepts_start());
        assert!(!ProtocolPhase::Transitioning(2).accepts_start());
        assert!(!ProtocolPhase::Completing.accepts_start());
    }

    #[test]
    fn snapshot_has_no_next_gesture_on_last_step() {
        let mut state = started();
        state.advance_to(5);
        let snapshot = SessionSnapshot::from_state(&state);
        assert_eq!(snapshot.current_gesture.map(|g| g.id), Some(6));
        assert!(snapshot.next_gesture.is_none());
    }
}
