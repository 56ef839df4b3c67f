use chrono::{DateTime, Local, TimeZone};

use crate::db::HandwashSession;
use crate::gestures;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Success,
    Warning,
    Destructive,
}

impl ScoreTier {
    pub fn for_score(score: u8) -> Self {
        match score {
            90.. => ScoreTier::Success,
            70..=89 => ScoreTier::Warning,
            _ => ScoreTier::Destructive,
        }
    }

    fn badge(&self, score: u8) -> String {
        match self {
            ScoreTier::Success => format!("[{score:>3}%]"),
            ScoreTier::Warning => format!("<{score:>3}%>"),
            ScoreTier::Destructive => format!("!{score:>3}%!"),
        }
    }
}

/// `Oct 16, 2026   9:05 AM   6/6 gestures    23s   [ 94%]`
pub fn render_entry<Tz: TimeZone>(session: &HandwashSession, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let local: DateTime<Tz> = session.completed_at.with_timezone(tz);
    format!(
        "{:<13} {:>8}   {}/{} gestures   {:>3}s   {}",
        local.format("%b %-d, %Y").to_string(),
        local.format("%-I:%M %p").to_string(),
        session.gestures_completed,
        gestures::gesture_count(),
        session.duration_seconds,
        ScoreTier::for_score(session.completion_score).badge(session.completion_score)
    )
}

pub fn render(sessions: &[HandwashSession]) -> Vec<String> {
    sessions
        .iter()
        .map(|session| render_entry(session, &Local))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn session(score: u8) -> HandwashSession {
        HandwashSession {
            id: "h-1".into(),
            user_id: "u-1".into(),
            duration_seconds: 23,
            completion_score: score,
            completed_at: Utc.with_ymd_and_hms(2026, 10, 16, 9, 5, 0).unwrap(),
            gestures_completed: 6,
        }
    }

    #[test]
    fn score_tiers() {
        assert_eq!(ScoreTier::for_score(100), ScoreTier::Success);
        assert_eq!(ScoreTier::for_score(90), ScoreTier::Success);
        assert_eq!(ScoreTier::for_score(89), ScoreTier::Warning);
        assert_eq!(ScoreTier::for_score(70), ScoreTier::Warning);
        assert_eq!(ScoreTier::for_score(69), ScoreTier::Destructive);
    }

    #[test]
    fn entry_formats_date_time_and_badge() {
        let line = render_entry(&session(94), &Utc);
        assert_eq!(
            line,
            "Oct 16, 2026   9:05 AM   6/6 gestures    23s   [ 94%]"
        );
    }
}
