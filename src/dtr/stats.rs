use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::attendance::{AttendanceStatus, ClassifiedRecord};

/// Per-employee summary over a set of classified records. Counts are
/// mutually exclusive and sum to `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStats {
    pub total: u32,
    pub present: u32,
    pub still_working: u32,
    pub late: u32,
    pub undertime: u32,
    pub absent: u32,
    pub missed_clock_out: u32,
    pub invalid: u32,
    /// `round(present / total * 100)`, 0 for an empty set.
    #[schema(minimum = 0, maximum = 100)]
    pub attendance_rate: u32,
}

pub fn aggregate(records: &[ClassifiedRecord]) -> AttendanceStats {
    let mut stats = AttendanceStats::default();

    for classified in records {
        stats.total += 1;
        match classified.status {
            AttendanceStatus::Present => stats.present += 1,
            AttendanceStatus::StillWorking => stats.still_working += 1,
            AttendanceStatus::Late => stats.late += 1,
            AttendanceStatus::Undertime => stats.undertime += 1,
            AttendanceStatus::Absent => stats.absent += 1,
            AttendanceStatus::MissedClockOut => stats.missed_clock_out += 1,
            AttendanceStatus::Invalid => stats.invalid += 1,
        }
    }

    if stats.total > 0 {
        let rate = f64::from(stats.present) / f64::from(stats.total) * 100.0;
        stats.attendance_rate = rate.round() as u32;
    }

    stats
}
