#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use chrono::Utc;
use tokio::sync::broadcast::Receiver;

use handwash_monitor_lib::{
    db::{DailyStats, HandwashSession, NewHandwashSession, User},
    events::{HapticPattern, Notice, ProtocolEvent},
    protocol::SessionSnapshot,
    store::SessionStore,
};

pub fn test_user() -> User {
    User {
        id: "user-1".to_string(),
        email: "nurse@example.com".to_string(),
        created_at: Utc::now(),
    }
}

/// In-memory store that remembers every insert.
#[derive(Clone, Default)]
pub struct RecordingStore {
    inserted: Arc<Mutex<Vec<NewHandwashSession>>>,
}

impl RecordingStore {
    pub fn inserted(&self) -> Vec<NewHandwashSession> {
        self.inserted.lock().unwrap().clone()
    }
}

impl SessionStore for RecordingStore {
    async fn insert_session(&self, session: NewHandwashSession) -> Result<()> {
        self.inserted.lock().unwrap().push(session);
        Ok(())
    }

    async fn list_recent_sessions(
        &self,
        _user_id: &str,
        _limit: usize,
    ) -> Result<Vec<HandwashSession>> {
        Ok(Vec::new())
    }

    async fn get_daily_stats(&self, _user_id: &str) -> Result<Vec<DailyStats>> {
        Ok(Vec::new())
    }
}

/// Store whose every call fails like an unreachable backend.
#[derive(Clone, Default)]
pub struct FailingStore;

impl SessionStore for FailingStore {
    async fn insert_session(&self, _session: NewHandwashSession) -> Result<()> {
        Err(anyhow!("network unreachable"))
    }

    async fn list_recent_sessions(
        &self,
        _user_id: &str,
        _limit: usize,
    ) -> Result<Vec<HandwashSession>> {
        Err(anyhow!("network unreachable"))
    }

    async fn get_daily_stats(&self, _user_id: &str) -> Result<Vec<DailyStats>> {
        Err(anyhow!("network unreachable"))
    }
}

pub fn drain(rx: &mut Receiver<ProtocolEvent>) -> Vec<ProtocolEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

pub fn notices(events: &[ProtocolEvent]) -> Vec<Notice> {
    events
        .iter()
        .filter_map(|event| match event {
            ProtocolEvent::Notice(notice) => Some(notice.clone()),
            _ => None,
        })
        .collect()
}

pub fn haptics(events: &[ProtocolEvent]) -> Vec<HapticPattern> {
    events
        .iter()
        .filter_map(|event| match event {
            ProtocolEvent::Haptic(pattern) => Some(pattern.clone()),
            _ => None,
        })
        .collect()
}

pub fn snapshots(events: &[ProtocolEvent]) -> Vec<SessionSnapshot> {
    events
        .iter()
        .filter_map(|event| match event {
            ProtocolEvent::StateChanged(snapshot) => Some(snapshot.clone()),
            _ => None,
        })
        .collect()
}
