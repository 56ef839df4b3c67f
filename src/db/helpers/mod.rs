use std::convert::TryFrom;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Days, NaiveDate, SecondsFormat, SubsecRound, TimeZone, Utc};

pub fn to_i64(value: u64) -> Result<i64> {
    i64::try_from(value).map_err(|_| anyhow!("value {value} exceeds SQLite INTEGER range"))
}

pub fn to_u64(value: i64, field: &str) -> Result<u64> {
    u64::try_from(value).map_err(|_| anyhow!("{field} contains negative value {value}"))
}

pub fn to_score(value: i64) -> Result<u8> {
    u8::try_from(value)
        .ok()
        .filter(|score| *score <= 100)
        .ok_or_else(|| anyhow!("completion_score {value} is outside 0..=100"))
}

/// Drop what [`format_timestamp`] can't store, so a value read back
/// compares equal to the one written.
pub fn to_stored_precision(value: DateTime<Utc>) -> DateTime<Utc> {
    value.trunc_subsecs(3)
}

pub fn now() -> DateTime<Utc> {
    to_stored_precision(Utc::now())
}

/// Fixed-width UTC RFC 3339 so stored timestamps sort lexically.
pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

/// `[start, end)` of calendar `day` as seen in `tz`, in UTC.
pub fn day_range<Tz: TimeZone>(
    day: NaiveDate,
    tz: &Tz,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let next = day
        .checked_add_days(Days::new(1))
        .ok_or_else(|| anyhow!("no day after {day}"))?;
    Ok((start_of_day(day, tz)?, start_of_day(next, tz)?))
}

fn start_of_day<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> Result<DateTime<Utc>> {
    let midnight = day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow!("no midnight on {day}"))?;
    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|start| start.with_timezone(&Utc))
        .ok_or_else(|| anyhow!("midnight of {day} does not exist in this time zone"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn timestamps_round_trip_and_sort() {
        let early = Utc.with_ymd_and_hms(2026, 10, 16, 9, 5, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2026, 10, 16, 17, 45, 30).unwrap();

        let early_text = format_timestamp(early);
        assert_eq!(early_text, "2026-10-16T09:05:00.000Z");
        assert!(early_text < format_timestamp(late));
        assert_eq!(parse_datetime(&early_text, "completed_at").unwrap(), early);
    }

    #[test]
    fn stored_precision_survives_formatting() {
        let precise = Utc.with_ymd_and_hms(2026, 10, 16, 22, 52, 32).unwrap()
            + chrono::Duration::nanoseconds(916_881_798);
        let stored = to_stored_precision(precise);

        let reread = parse_datetime(&format_timestamp(stored), "created_at").unwrap();
        assert_eq!(reread, stored);
        assert_ne!(reread, precise);
        let stamped = now();
        assert_eq!(stamped, to_stored_precision(stamped));
    }

    #[test]
    fn utc_day_range_covers_one_day() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let (start, end) = day_range(day, &Utc).unwrap();
        assert_eq!(format_timestamp(start), "2026-10-16T00:00:00.000Z");
        assert_eq!(format_timestamp(end), "2026-10-17T00:00:00.000Z");
    }

    #[test]
    fn day_range_follows_local_midnight() {
        let pacific = FixedOffset::west_opt(7 * 3600).unwrap();
        let day = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let (start, end) = day_range(day, &pacific).unwrap();
        assert_eq!(format_timestamp(start), "2026-10-16T07:00:00.000Z");
        assert_eq!(format_timestamp(end), "2026-10-17T07:00:00.000Z");
    }

    #[test]
    fn scores_above_hundred_are_rejected() {
        assert_eq!(to_score(85).unwrap(), 85);
        assert!(to_score(101).is_err());
        assert!(to_score(-1).is_err());
    }
}
