use crate::db::DailyStats;
use crate::ui::{CardVariant, StatsCard};

/// Daily washes that count as full compliance.
pub const COMPLIANCE_TARGET: u32 = 6;

/// Percent of today's target reached; capped at 100.
pub fn compliance_percent(total_washes: u32) -> u32 {
    if total_washes >= COMPLIANCE_TARGET {
        return 100;
    }
    (total_washes as f64 / COMPLIANCE_TARGET as f64 * 100.0).round() as u32
}

pub fn stats_cards(stats: Option<&DailyStats>) -> Vec<StatsCard> {
    let stats = stats.cloned().unwrap_or_default();
    vec![
        StatsCard::new(
            "Today's Washes",
            stats.total_washes.to_string(),
            CardVariant::Primary,
        ),
        StatsCard::new(
            "Avg Score",
            format!("{:.0}%", stats.avg_score),
            CardVariant::Success,
        ),
        StatsCard::new(
            "Avg Duration",
            format!("{:.0}s", stats.avg_duration),
            CardVariant::Accent,
        ),
        StatsCard::new(
            "Compliance",
            format!("{}%", compliance_percent(stats.total_washes)),
            CardVariant::Default,
        ),
    ]
}
