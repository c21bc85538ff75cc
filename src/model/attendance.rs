use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::Display;
use utoipa::ToSchema;

/// One day's raw time record for an employee, as the dashboard sends it.
/// Clock events are kept as strings because the source mixes ISO-8601,
/// 24-hour and 12-hour formats; parsing happens during classification.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[schema(example = "rec-1042")]
    pub id: String,

    #[schema(example = "Juan Dela Cruz")]
    pub name: String,

    #[schema(example = "Environmental Police Officer I")]
    pub position: String,

    #[schema(example = "2026-08-28", value_type = String, format = "date")]
    pub date: NaiveDate,

    /// Time the employee clocked in, if the event happened.
    #[schema(example = "08:00:00")]
    pub clock_in: Option<String>,

    /// Time the employee clocked out, if the event happened.
    #[schema(example = "14:00:00")]
    pub clock_out: Option<String>,
}

/// Status assigned to a single day's record. Exactly one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Rendered the required hours (or within 14 minutes of them; overtime
    /// folds in here too).
    #[strum(serialize = "Present")]
    Present,
    /// Clocked in, not yet clocked out, and the work-end cutoff has not
    /// passed for that record's day.
    #[strum(serialize = "Present (still working)")]
    StillWorking,
    /// Shortfall of 15 to 30 minutes against the required hours.
    #[strum(serialize = "Late")]
    Late,
    /// Shortfall of 31 minutes or more.
    #[strum(serialize = "Undertime")]
    Undertime,
    /// Neither clock-in nor clock-out was recorded.
    #[strum(serialize = "Absent")]
    Absent,
    /// Clocked in today but the work-end cutoff passed without a clock-out.
    #[strum(serialize = "Absent (missed clock-out)")]
    MissedClockOut,
    /// Unusable record: malformed time string, clock-out without clock-in,
    /// or clock-out earlier than clock-in.
    #[strum(serialize = "Invalid")]
    Invalid,
}

impl AttendanceStatus {
    /// Human-facing label, e.g. for report columns.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

/// An [`AttendanceRecord`] after classification. Derived data only, never
/// persisted; recomputing with the same inputs gives the same output.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedRecord {
    #[serde(flatten)]
    pub record: AttendanceRecord,

    /// Worked duration as `"{H}h {M}m"`, or `"-"` when either clock event
    /// is missing or unusable.
    #[schema(example = "6h 0m")]
    pub hours_rendered: String,

    pub status: AttendanceStatus,
}
