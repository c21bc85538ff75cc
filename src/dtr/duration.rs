use chrono::NaiveTime;

/// Shown when a worked duration is undefined for the day.
pub const NO_DURATION: &str = "-";

/// Whole minutes between clock-in and clock-out, sub-minute remainder
/// discarded. Negative when clock-out precedes clock-in; callers treat
/// that as an invalid record.
pub fn rendered_minutes(clock_in: NaiveTime, clock_out: NaiveTime) -> i64 {
    (clock_out - clock_in).num_minutes()
}

/// Formats a non-negative minute count as `"{H}h {M}m"`.
pub fn format_minutes(total_minutes: i64) -> String {
    format!("{}h {}m", total_minutes / 60, total_minutes % 60)
}
