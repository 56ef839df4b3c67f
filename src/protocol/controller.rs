use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{self, Instant},
};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::{
    auth::AuthContext,
    db::NewHandwashSession,
    error::HandwashError,
    events::{EventBus, HapticPattern, Notice, ProtocolEvent, Route},
    gestures,
    store::SessionStore,
};

use super::{
    PlaceholderScorer, ProtocolConfig, ProtocolPhase, SessionScorer, SessionSnapshot,
    SessionState,
};

// Set to false to silence protocol logging.
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_error, log_info, log_warn};

/// The spawned task walking one session, and the token that stops it.
struct Driver {
    handle: JoinHandle<()>,
    cancel_token: CancellationToken,
}

impl Driver {
    fn stop(self) {
        self.cancel_token.cancel();
        self.handle.abort();
    }
}

/// Owns the session state machine and the single task that advances it.
#[derive(Clone)]
pub struct SessionController<S: SessionStore> {
    state: Arc<Mutex<SessionState>>,
    driver: Arc<Mutex<Option<Driver>>>,
    store: S,
    auth: AuthContext,
    events: EventBus,
    scorer: Arc<dyn SessionScorer>,
    config: ProtocolConfig,
}

impl<S: SessionStore> SessionController<S> {
    pub fn new(store: S, auth: AuthContext, events: EventBus, config: ProtocolConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::new())),
            driver: Arc::new(Mutex::new(None)),
            store,
            auth,
            events,
            scorer: Arc::new(PlaceholderScorer::new()),
            config,
        }
    }

    pub fn with_scorer(mut self, scorer: Arc<dyn SessionScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    pub async fn get_state(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from_state(&*self.state.lock().await)
    }

    pub async fn start_session(&self) -> Result<SessionState, HandwashError> {
        let session_id = Uuid::new_v4().to_string();

        // Hold the driver slot across the phase check so two starts can't race.
        let mut driver_slot = self.driver.lock().await;
        {
            let mut state = self.state.lock().await;
            if !state.phase.accepts_start() {
                return Err(HandwashError::SessionActive);
            }
            state.begin_session(session_id.clone(), Utc::now(), Instant::now());

            self.events.notice(Notice::info(
                "Session Started",
                "Begin with palm-to-palm gesture",
            ));
            self.events
                .emit(ProtocolEvent::StateChanged(SessionSnapshot::from_state(&state)));
        }

        if let Some(previous) = driver_slot.take() {
            previous.stop();
        }

        let cancel_token = CancellationToken::new();
        let run = SessionRun {
            session_id: session_id.clone(),
            state: self.state.clone(),
            store: self.store.clone(),
            auth: self.auth.clone(),
            events: self.events.clone(),
            scorer: self.scorer.clone(),
            config: self.config.clone(),
            cancel_token: cancel_token.clone(),
        };
        let handle = tokio::spawn(run.drive());
        *driver_slot = Some(Driver {
            handle,
            cancel_token,
        });
        drop(driver_slot);

        log_info!("Handwash session {} started", session_id);
        Ok(self.get_state().await)
    }

    /// Abandon whatever is in progress. Nothing is persisted and no timer
    /// from the abandoned session fires afterwards.
    pub async fn cancel_session(&self) {
        if let Some(driver) = self.driver.lock().await.take() {
            driver.stop();
        }

        let mut state = self.state.lock().await;
        if state.phase == ProtocolPhase::Idle {
            return;
        }

        if let Some(session_id) = state.session_id.as_deref() {
            log_info!("Handwash session {} abandoned", session_id);
        }
        state.reset();
        self.events
            .emit(ProtocolEvent::StateChanged(SessionSnapshot::from_state(&state)));
    }

    /// The simulator's "Back to Dashboard" button.
    pub async fn back_to_dashboard(&self) {
        self.cancel_session().await;
        self.events.navigate(Route::Dashboard);
    }
}

/// Everything one session's driver task needs, cloned out of the controller.
struct SessionRun<S: SessionStore> {
    session_id: String,
    state: Arc<Mutex<SessionState>>,
    store: S,
    auth: AuthContext,
    events: EventBus,
    scorer: Arc<dyn SessionScorer>,
    config: ProtocolConfig,
    cancel_token: CancellationToken,
}

impl<S: SessionStore> SessionRun<S> {
    async fn drive(self) {
        for step in 0..gestures::gesture_count() {
            if !self.pause(self.config.detection_window()).await {
                return;
            }

            if gestures::is_last(step) {
                break;
            }

            let Some(gesture) = gestures::gesture_at(step) else {
                return;
            };
            log_debug!("Session {} recognized {}", self.session_id, gesture.name);

            let cue = self.haptic(HapticPattern::gesture_recognized());
            if !self
                .update(|state| state.enter_transition(step, gesture.name), cue)
                .await
            {
                return;
            }

            if !self.pause(self.config.settle_delay()).await {
                return;
            }

            if !self
                .update(|state| state.advance_to(step + 1), Vec::new())
                .await
            {
                return;
            }
        }

        self.complete().await;
    }

    async fn complete(&self) {
        let elapsed = {
            let mut state = self.state.lock().await;
            if !self.is_current(&state) {
                return;
            }
            state.begin_completing();
            self.events
                .emit(ProtocolEvent::StateChanged(SessionSnapshot::from_state(&state)));
            state.elapsed()
        };

        let gestures_completed = gestures::gesture_count();
        let outcome = self.scorer.evaluate(elapsed, gestures_completed);

        let Some(user) = self.auth.current_user() else {
            let failure = HandwashError::AuthRequired;
            log_warn!("Session {} not saved: {}", self.session_id, failure);
            self.update(
                SessionState::reset,
                vec![ProtocolEvent::Notice(failure.notice())],
            )
            .await;
            return;
        };

        let record = NewHandwashSession {
            user_id: user.id,
            duration_seconds: outcome.duration_seconds,
            gestures_completed: gestures_completed as u32,
            completion_score: outcome.completion_score,
        };

        let result = tokio::select! {
            result = self.store.insert_session(record) => result,
            _ = self.cancel_token.cancelled() => return,
        };

        if let Err(err) = result {
            let failure = HandwashError::remote(&err);
            log_error!("Failed to save session {}: {}", self.session_id, failure);
            self.update(
                SessionState::fail_completion,
                vec![ProtocolEvent::Notice(failure.notice())],
            )
            .await;
            return;
        }

        log_info!(
            "Session {} saved: score {}%, {}s",
            self.session_id,
            outcome.completion_score,
            outcome.duration_seconds
        );

        let mut celebration = self.haptic(HapticPattern::session_complete());
        celebration.push(ProtocolEvent::Notice(Notice::info(
            "Session Complete! 🎉",
            format!(
                "Score: {}% | Duration: {}s",
                outcome.completion_score, outcome.duration_seconds
            ),
        )));
        if !self.publish(celebration).await {
            return;
        }

        if !self.pause(self.config.completion_delay()).await {
            return;
        }

        self.update(
            SessionState::reset,
            vec![ProtocolEvent::Navigate(Route::Dashboard)],
        )
        .await;
    }

    /// Sleeps unless cancelled first. `false` means stop driving.
    async fn pause(&self, duration: Duration) -> bool {
        tokio::select! {
            _ = time::sleep(duration) => !self.cancel_token.is_cancelled(),
            _ = self.cancel_token.cancelled() => false,
        }
    }

    fn is_current(&self, state: &SessionState) -> bool {
        !self.cancel_token.is_cancelled() && state.is_owned_by(&self.session_id)
    }

    fn haptic(&self, pattern: HapticPattern) -> Vec<ProtocolEvent> {
        if self.config.haptics_enabled {
            vec![ProtocolEvent::Haptic(pattern)]
        } else {
            Vec::new()
        }
    }

    /// Mutate the state if this run still owns it, then publish the new
    /// snapshot followed by `follow_up`, all under the state lock so a
    /// cancellation can't interleave.
    async fn update<F>(&self, mutate: F, follow_up: Vec<ProtocolEvent>) -> bool
    where
        F: FnOnce(&mut SessionState),
    {
        let mut state = self.state.lock().await;
        if !self.is_current(&state) {
            return false;
        }

        mutate(&mut state);
        self.events
            .emit(ProtocolEvent::StateChanged(SessionSnapshot::from_state(&state)));
        for event in follow_up {
            self.events.emit(event);
        }
        true
    }

    async fn publish(&self, events: Vec<ProtocolEvent>) -> bool {
        let state = self.state.lock().await;
        if !self.is_current(&state) {
            return false;
        }

        for event in events {
            self.events.emit(event);
        }
        true
    }
}
