//! Persisted handwash records and the per-day aggregate read back for the dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A completed session as stored. Written once, never updated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HandwashSession {
    pub id: String,
    pub user_id: String,
    pub duration_seconds: u64,
    pub completion_score: u8,
    pub completed_at: DateTime<Utc>,
    pub gestures_completed: u32,
}

/// Insert payload; the store assigns `id` and `completed_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewHandwashSession {
    pub user_id: String,
    pub duration_seconds: u64,
    pub gestures_completed: u32,
    pub completion_score: u8,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub total_washes: u32,
    pub avg_score: f64,
    pub avg_duration: f64,
}
