//! The persistence seam the protocol and dashboard talk to.

use std::future::Future;

use anyhow::Result;
use chrono::{Local, Utc};

use crate::db::{helpers::day_range, DailyStats, Database, HandwashSession, NewHandwashSession};

/// How many sessions the dashboard log shows.
pub const RECENT_SESSIONS_LIMIT: usize = 10;

pub trait SessionStore: Clone + Send + Sync + 'static {
    fn insert_session(&self, session: NewHandwashSession)
        -> impl Future<Output = Result<()>> + Send;

    /// Newest first, at most `limit` rows, only sessions owned by `user_id`.
    fn list_recent_sessions(
        &self,
        user_id: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<HandwashSession>>> + Send;

    /// Aggregate for `user_id` over today's local calendar day; zero or one row.
    fn get_daily_stats(&self, user_id: &str)
        -> impl Future<Output = Result<Vec<DailyStats>>> + Send;
}

impl SessionStore for Database {
    async fn insert_session(&self, session: NewHandwashSession) -> Result<()> {
        self.insert_handwash_session(&session, Utc::now()).await?;
        Ok(())
    }

    async fn list_recent_sessions(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<HandwashSession>> {
        self.recent_handwash_sessions(user_id, limit).await
    }

    async fn get_daily_stats(&self, user_id: &str) -> Result<Vec<DailyStats>> {
        let (start, end) = day_range(Local::now().date_naive(), &Local)?;
        self.handwash_stats_between(user_id, start, end).await
    }
}
