//! Event bus between the session protocol and whatever front end renders it.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::protocol::SessionSnapshot;

const EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Route {
    Dashboard,
    Simulator,
    Auth,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Simulator => "/watch",
            Route::Auth => "/auth",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum NoticeVariant {
    Default,
    Destructive,
}

/// Transient user-visible message.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Default,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Destructive,
        }
    }
}

/// Vibration pattern as alternating on/off spans in milliseconds, starting "on".
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HapticPattern(pub Vec<u64>);

impl HapticPattern {
    pub fn gesture_recognized() -> Self {
        HapticPattern(vec![200])
    }

    pub fn session_complete() -> Self {
        HapticPattern(vec![200, 100, 200])
    }

    pub fn pulses(&self) -> usize {
        self.0.len().div_ceil(2)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ProtocolEvent {
    StateChanged(SessionSnapshot),
    Notice(Notice),
    Haptic(HapticPattern),
    Navigate(Route),
}

/// Broadcast sender that tolerates having no listeners.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ProtocolEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ProtocolEvent> {
        self.sender.subscribe()
    }

    pub fn emit(&self, event: ProtocolEvent) {
        let _ = self.sender.send(event);
    }

    pub fn notice(&self, notice: Notice) {
        self.emit(ProtocolEvent::Notice(notice));
    }

    pub fn navigate(&self, route: Route) {
        self.emit(ProtocolEvent::Navigate(route));
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
