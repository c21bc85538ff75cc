use chrono::{Local, NaiveDate, NaiveTime};

use crate::dtr::duration::{NO_DURATION, format_minutes, rendered_minutes};
use crate::dtr::time::parse_time_of_day;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus, ClassifiedRecord};
use crate::model::policy::EffectivePolicy;

/// Shortfall at or above this is Undertime.
const UNDERTIME_SHORTFALL_MINUTES: i64 = 31;
/// Shortfall at or above this (and below the Undertime bound) is Late.
const LATE_SHORTFALL_MINUTES: i64 = 15;

/// The point in time classification is evaluated against. Passed in
/// explicitly so the decision tree stays a pure function; only the
/// handlers reach for the wall clock.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceInstant {
    pub today: NaiveDate,
    pub now: NaiveTime,
}

impl ReferenceInstant {
    pub fn wall_clock() -> Self {
        let now = Local::now().naive_local();
        Self {
            today: now.date(),
            now: now.time(),
        }
    }
}

/// Classifies one day's record. First matching state wins:
///
/// 1. no clock events at all: `Absent`
/// 2. clock-out without clock-in: `Invalid`
/// 3. clock-in only: `StillWorking`, unless the record is dated today and
///    the work-end cutoff already passed, then `MissedClockOut`
/// 4. both events: shortfall against the required minutes decides between
///    `Undertime`, `Late` and `Present`; unparseable times or a negative
///    duration are `Invalid`
pub fn classify_record(
    record: &AttendanceRecord,
    policy: &EffectivePolicy,
    at: ReferenceInstant,
) -> ClassifiedRecord {
    let (status, hours_rendered) = evaluate(record, policy, at);
    ClassifiedRecord {
        record: record.clone(),
        hours_rendered,
        status,
    }
}

pub fn classify_all(
    records: &[AttendanceRecord],
    policy: &EffectivePolicy,
    at: ReferenceInstant,
) -> Vec<ClassifiedRecord> {
    records
        .iter()
        .map(|record| classify_record(record, policy, at))
        .collect()
}

fn evaluate(
    record: &AttendanceRecord,
    policy: &EffectivePolicy,
    at: ReferenceInstant,
) -> (AttendanceStatus, String) {
    let no_duration = || NO_DURATION.to_string();

    let (clock_in, clock_out) = match (record.clock_in.as_deref(), record.clock_out.as_deref()) {
        (None, None) => return (AttendanceStatus::Absent, no_duration()),
        (None, Some(_)) => return (AttendanceStatus::Invalid, no_duration()),
        (Some(_), None) => {
            let cutoff_passed = record.date == at.today && at.now > policy.work_end;
            let status = if cutoff_passed {
                AttendanceStatus::MissedClockOut
            } else {
                AttendanceStatus::StillWorking
            };
            return (status, no_duration());
        }
        (Some(clock_in), Some(clock_out)) => (clock_in, clock_out),
    };

    let (Ok(clock_in), Ok(clock_out)) = (parse_time_of_day(clock_in), parse_time_of_day(clock_out))
    else {
        return (AttendanceStatus::Invalid, no_duration());
    };

    let minutes = rendered_minutes(clock_in, clock_out);
    if minutes < 0 {
        return (AttendanceStatus::Invalid, no_duration());
    }

    let shortfall = policy.required_minutes - minutes;
    let status = if shortfall >= UNDERTIME_SHORTFALL_MINUTES {
        AttendanceStatus::Undertime
    } else if shortfall >= LATE_SHORTFALL_MINUTES {
        AttendanceStatus::Late
    } else {
        AttendanceStatus::Present
    };

    (status, format_minutes(minutes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::model::policy::PolicySource;

    fn six_hour_policy() -> EffectivePolicy {
        EffectivePolicy {
            work_start: Some(NaiveTime::from_hms_opt(10, 30, 0).unwrap()),
            work_end: NaiveTime::from_hms_opt(16, 30, 0).unwrap(),
            required_minutes: 360,
            source: PolicySource::Upstream,
        }
    }

    fn record(date: &str, clock_in: Option<&str>, clock_out: Option<&str>) -> AttendanceRecord {
        AttendanceRecord {
            id: "rec-1".to_string(),
            name: "Juan Dela Cruz".to_string(),
            position: "EPOL Officer I".to_string(),
            date: date.parse().unwrap(),
            clock_in: clock_in.map(str::to_string),
            clock_out: clock_out.map(str::to_string),
        }
    }

    fn midday() -> ReferenceInstant {
        ReferenceInstant {
            today: "2026-08-28".parse().unwrap(),
            now: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        }
    }

    fn after_cutoff() -> ReferenceInstant {
        ReferenceInstant {
            today: "2026-08-28".parse().unwrap(),
            now: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        }
    }

    #[test]
    fn full_day_is_present() {
        let c = classify_record(
            &record("2026-08-28", Some("08:00:00"), Some("14:00:00")),
            &six_hour_policy(),
            midday(),
        );
        assert_eq!(c.status, AttendanceStatus::Present);
        assert_eq!(c.hours_rendered, "6h 0m");
    }

    #[test]
    fn twenty_minute_shortfall_is_late() {
        let c = classify_record(
            &record("2026-08-28", Some("08:00:00"), Some("13:40:00")),
            &six_hour_policy(),
            midday(),
        );
        assert_eq!(c.status, AttendanceStatus::Late);
        assert_eq!(c.hours_rendered, "5h 40m");
    }

    #[test]
    fn hour_shortfall_is_undertime() {
        let c = classify_record(
            &record("2026-08-28", Some("08:00:00"), Some("13:00:00")),
            &six_hour_policy(),
            midday(),
        );
        assert_eq!(c.status, AttendanceStatus::Undertime);
        assert_eq!(c.hours_rendered, "5h 0m");
    }

    #[test]
    fn shortfall_boundaries() {
        let policy = six_hour_policy();
        let at = midday();
        // 14 minutes short still counts as Present
        let c = classify_record(
            &record("2026-08-28", Some("08:00:00"), Some("13:46:00")),
            &policy,
            at,
        );
        assert_eq!(c.status, AttendanceStatus::Present);
        // 15 minutes short is Late
        let c = classify_record(
            &record("2026-08-28", Some("08:00:00"), Some("13:45:00")),
            &policy,
            at,
        );
        assert_eq!(c.status, AttendanceStatus::Late);
        // 30 minutes short is still Late
        let c = classify_record(
            &record("2026-08-28", Some("08:00:00"), Some("13:30:00")),
            &policy,
            at,
        );
        assert_eq!(c.status, AttendanceStatus::Late);
        // 31 minutes short is Undertime
        let c = classify_record(
            &record("2026-08-28", Some("08:00:00"), Some("13:29:00")),
            &policy,
            at,
        );
        assert_eq!(c.status, AttendanceStatus::Undertime);
    }

    #[test]
    fn overtime_folds_into_present() {
        let c = classify_record(
            &record("2026-08-28", Some("08:00:00"), Some("18:00:00")),
            &six_hour_policy(),
            midday(),
        );
        assert_eq!(c.status, AttendanceStatus::Present);
        assert_eq!(c.hours_rendered, "10h 0m");
    }

    #[test]
    fn no_events_is_absent() {
        let c = classify_record(&record("2026-08-28", None, None), &six_hour_policy(), midday());
        assert_eq!(c.status, AttendanceStatus::Absent);
        assert_eq!(c.hours_rendered, "-");
    }

    #[test]
    fn open_record_before_cutoff_is_still_working() {
        let c = classify_record(
            &record("2026-08-28", Some("08:00:00"), None),
            &six_hour_policy(),
            midday(),
        );
        assert_eq!(c.status, AttendanceStatus::StillWorking);
        assert_eq!(c.hours_rendered, "-");
    }

    #[test]
    fn open_record_past_cutoff_today_is_missed_clock_out() {
        let c = classify_record(
            &record("2026-08-28", Some("08:00:00"), None),
            &six_hour_policy(),
            after_cutoff(),
        );
        assert_eq!(c.status, AttendanceStatus::MissedClockOut);
    }

    #[test]
    fn open_record_from_another_day_stays_still_working() {
        // The cutoff branch only applies to records dated today.
        let c = classify_record(
            &record("2026-08-27", Some("08:00:00"), None),
            &six_hour_policy(),
            after_cutoff(),
        );
        assert_eq!(c.status, AttendanceStatus::StillWorking);
    }

    #[test]
    fn unusable_records_are_invalid() {
        let policy = six_hour_policy();
        let at = midday();
        // clock-out alone
        let c = classify_record(&record("2026-08-28", None, Some("14:00:00")), &policy, at);
        assert_eq!(c.status, AttendanceStatus::Invalid);
        // malformed clock-in
        let c = classify_record(
            &record("2026-08-28", Some("eightish"), Some("14:00:00")),
            &policy,
            at,
        );
        assert_eq!(c.status, AttendanceStatus::Invalid);
        // clock-out earlier than clock-in
        let c = classify_record(
            &record("2026-08-28", Some("22:00:00"), Some("06:00:00")),
            &policy,
            at,
        );
        assert_eq!(c.status, AttendanceStatus::Invalid);
        assert_eq!(c.hours_rendered, "-");
    }

    #[test]
    fn mixed_input_formats_classify_alike() {
        let policy = six_hour_policy();
        let at = midday();
        let iso = classify_record(
            &record(
                "2026-08-28",
                Some("2026-08-28T08:00:00Z"),
                Some("2026-08-28T14:00:00Z"),
            ),
            &policy,
            at,
        );
        let twelve_hour = classify_record(
            &record("2026-08-28", Some("08:00 AM"), Some("02:00 PM")),
            &policy,
            at,
        );
        assert_eq!(iso.status, AttendanceStatus::Present);
        assert_eq!(twelve_hour.status, AttendanceStatus::Present);
        assert_eq!(iso.hours_rendered, twelve_hour.hours_rendered);
    }

    #[test]
    fn classification_is_idempotent_for_a_frozen_instant() {
        let policy = six_hour_policy();
        let at = after_cutoff();
        let records = vec![
            record("2026-08-28", Some("08:00:00"), Some("14:00:00")),
            record("2026-08-28", Some("08:00:00"), None),
            record("2026-08-28", None, None),
        ];
        let first = classify_all(&records, &policy, at);
        let second = classify_all(&records, &policy, at);
        let statuses = |v: &[ClassifiedRecord]| v.iter().map(|c| c.status).collect::<Vec<_>>();
        assert_eq!(statuses(&first), statuses(&second));
    }

    #[test]
    fn fallback_policy_matches_configured_defaults() {
        // SERVER_ADDR is irrelevant here; build the config by hand.
        let config = Config {
            server_addr: String::new(),
            policy_api_url: None,
            policy_cache_ttl_secs: 300,
            default_required_hours: 6,
            default_work_end: "16:30".to_string(),
            rate_dtr_per_min: 120,
            api_prefix: "/api/v1".to_string(),
        };
        let policy = EffectivePolicy::fallback(&config);
        assert_eq!(policy.required_minutes, 360);
        assert_eq!(policy.work_end, NaiveTime::from_hms_opt(16, 30, 0).unwrap());
        assert_eq!(policy.source, PolicySource::Default);
    }
}
