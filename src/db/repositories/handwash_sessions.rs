use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use uuid::Uuid;

use crate::db::{
    helpers::{
        format_timestamp, parse_datetime, to_i64, to_score, to_stored_precision, to_u64,
    },
    models::{DailyStats, HandwashSession, NewHandwashSession},
    Database,
};

fn row_to_session(row: &Row) -> Result<HandwashSession> {
    let completed_at: String = row.get("completed_at")?;
    let duration_seconds: i64 = row.get("duration_seconds")?;
    let gestures_completed: i64 = row.get("gestures_completed")?;
    let completion_score: i64 = row.get("completion_score")?;

    Ok(HandwashSession {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        duration_seconds: to_u64(duration_seconds, "duration_seconds")?,
        completion_score: to_score(completion_score)?,
        completed_at: parse_datetime(&completed_at, "completed_at")?,
        gestures_completed: u32::try_from(to_u64(gestures_completed, "gestures_completed")?)
            .context("gestures_completed out of range")?,
    })
}

impl Database {
    pub async fn insert_handwash_session(
        &self,
        session: &NewHandwashSession,
        completed_at: DateTime<Utc>,
    ) -> Result<HandwashSession> {
        let record = HandwashSession {
            id: Uuid::new_v4().to_string(),
            user_id: session.user_id.clone(),
            duration_seconds: session.duration_seconds,
            completion_score: session.completion_score,
            completed_at: to_stored_precision(completed_at),
            gestures_completed: session.gestures_completed,
        };

        let stored = record.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO handwash_sessions (id, user_id, duration_seconds, gestures_completed, completion_score, completed_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    record.id,
                    record.user_id,
                    to_i64(record.duration_seconds)?,
                    record.gestures_completed,
                    record.completion_score,
                    format_timestamp(record.completed_at),
                ],
            )
            .context("failed to insert handwash session")?;
            Ok(())
        })
        .await?;

        Ok(stored)
    }

    /// Newest first, never more than `limit`, only `user_id`'s rows.
    pub async fn recent_handwash_sessions(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<HandwashSession>> {
        let user_id = user_id.to_string();
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, duration_seconds, gestures_completed, completion_score, completed_at
                 FROM handwash_sessions
                 WHERE user_id = ?1
                 ORDER BY completed_at DESC
                 LIMIT ?2",
            )?;

            let mut rows = stmt.query(params![user_id, limit])?;
            let mut sessions = Vec::new();
            while let Some(row) = rows.next()? {
                sessions.push(row_to_session(row)?);
            }

            Ok(sessions)
        })
        .await
    }

    /// Aggregate over `[start, end)`. Empty when the user has no sessions
    /// in that range.
    pub async fn handwash_stats_between(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DailyStats>> {
        let user_id = user_id.to_string();
        let (day_start, day_end) = (format_timestamp(start), format_timestamp(end));
        self.execute(move |conn| {
            let (total, avg_score, avg_duration): (i64, Option<f64>, Option<f64>) = conn
                .query_row(
                    "SELECT COUNT(*), AVG(completion_score), AVG(duration_seconds)
                     FROM handwash_sessions
                     WHERE user_id = ?1 AND completed_at >= ?2 AND completed_at < ?3",
                    params![user_id, day_start, day_end],
                    |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
                )
                .context("failed to aggregate daily handwash stats")?;

            if total == 0 {
                return Ok(Vec::new());
            }

            Ok(vec![DailyStats {
                total_washes: u32::try_from(total).unwrap_or(u32::MAX),
                avg_score: avg_score.unwrap_or_default(),
                avg_duration: avg_duration.unwrap_or_default(),
            }])
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::helpers::day_range;
    use chrono::{FixedOffset, NaiveDate, TimeZone};

    fn new_session(user_id: &str, duration_seconds: u64, completion_score: u8) -> NewHandwashSession {
        NewHandwashSession {
            user_id: user_id.to_string(),
            duration_seconds,
            gestures_completed: 6,
            completion_score,
        }
    }

    #[tokio::test]
    async fn recent_sessions_are_scoped_ordered_and_capped() {
        let db = Database::open_in_memory().unwrap();
        let alice = db.find_or_create_user("alice@example.com").await.unwrap();
        let bob = db.find_or_create_user("bob@example.com").await.unwrap();

        for minute in 0..12 {
            let at = Utc.with_ymd_and_hms(2026, 10, 16, 8, minute, 0).unwrap();
            db.insert_handwash_session(&new_session(&alice.id, 23, 90), at)
                .await
                .unwrap();
        }
        let bob_at = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        db.insert_handwash_session(&new_session(&bob.id, 25, 99), bob_at)
            .await
            .unwrap();

        let recent = db.recent_handwash_sessions(&alice.id, 10).await.unwrap();
        assert_eq!(recent.len(), 10);
        assert!(recent.iter().all(|s| s.user_id == alice.id));
        assert!(recent
            .windows(2)
            .all(|pair| pair[0].completed_at >= pair[1].completed_at));
        assert_eq!(
            recent[0].completed_at,
            Utc.with_ymd_and_hms(2026, 10, 16, 8, 11, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn daily_stats_only_count_that_day() {
        let db = Database::open_in_memory().unwrap();
        let user = db.find_or_create_user("carol@example.com").await.unwrap();
        let day = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let (start, end) = day_range(day, &Utc).unwrap();

        let yesterday = Utc.with_ymd_and_hms(2026, 10, 15, 23, 59, 59).unwrap();
        db.insert_handwash_session(&new_session(&user.id, 40, 70), yesterday)
            .await
            .unwrap();
        assert!(db
            .handwash_stats_between(&user.id, start, end)
            .await
            .unwrap()
            .is_empty());

        for (hour, duration, score) in [(9, 22, 88), (13, 24, 96)] {
            let at = Utc.with_ymd_and_hms(2026, 10, 16, hour, 0, 0).unwrap();
            db.insert_handwash_session(&new_session(&user.id, duration, score), at)
                .await
                .unwrap();
        }

        let stats = db.handwash_stats_between(&user.id, start, end).await.unwrap();
        assert_eq!(
            stats,
            vec![DailyStats {
                total_washes: 2,
                avg_score: 92.0,
                avg_duration: 23.0,
            }]
        );
    }

    #[tokio::test]
    async fn evening_wash_counts_toward_the_local_day() {
        let db = Database::open_in_memory().unwrap();
        let user = db.find_or_create_user("dave@example.com").await.unwrap();
        let pacific = FixedOffset::west_opt(7 * 3600).unwrap();

        // 20:30 on the 16th in UTC-7 is already the 17th in UTC.
        let evening = pacific.with_ymd_and_hms(2026, 10, 16, 20, 30, 0).unwrap();
        db.insert_handwash_session(&new_session(&user.id, 23, 91), evening.with_timezone(&Utc))
            .await
            .unwrap();

        let day = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let (start, end) = day_range(day, &pacific).unwrap();
        let stats = db.handwash_stats_between(&user.id, start, end).await.unwrap();
        assert_eq!(stats.first().map(|s| s.total_washes), Some(1));

        let (utc_start, utc_end) = day_range(day, &Utc).unwrap();
        assert!(db
            .handwash_stats_between(&user.id, utc_start, utc_end)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn inserted_session_matches_its_read_back() {
        let db = Database::open_in_memory().unwrap();
        let user = db.find_or_create_user("erin@example.com").await.unwrap();

        let precise = Utc.with_ymd_and_hms(2026, 10, 16, 22, 52, 32).unwrap()
            + chrono::Duration::nanoseconds(917_051_303);
        let returned = db
            .insert_handwash_session(&new_session(&user.id, 23, 94), precise)
            .await
            .unwrap();

        let read_back = db.recent_handwash_sessions(&user.id, 10).await.unwrap();
        assert_eq!(read_back, vec![returned]);
    }

    #[tokio::test]
    async fn insert_requires_known_user() {
        let db = Database::open_in_memory().unwrap();
        let result = db
            .insert_handwash_session(&new_session("ghost", 23, 90), Utc::now())
            .await;
        assert!(result.is_err());
    }
}
