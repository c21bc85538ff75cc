use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::Config;
use crate::dtr::time::{TimeParseError, parse_time_of_day};

/// Work-hours policy as the upstream attendance API returns it. Only
/// `work_start` and `work_end` feed classification; the clock-window fields
/// are carried so an inline override can use the same document shape.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WorkHoursPolicyDto {
    #[schema(example = "10:30")]
    pub work_start: String,

    #[schema(example = "16:30")]
    pub work_end: String,

    pub clock_in_start: Option<String>,
    pub clock_in_end: Option<String>,
    pub clock_out_time: Option<String>,
    pub extended_clock_out_time: Option<String>,
}

/// Where the policy in force came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PolicySource {
    /// Fetched from the upstream attendance API.
    Upstream,
    /// Supplied inline by the caller for this request.
    Override,
    /// Configured fallback, used while the upstream is unset or failing.
    Default,
}

#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("bad {field} in work-hours policy: {source}")]
    BadTime {
        field: &'static str,
        source: TimeParseError,
    },
    #[error("work_end {work_end} is not after work_start {work_start}")]
    EmptyWorkWindow {
        work_start: NaiveTime,
        work_end: NaiveTime,
    },
}

/// Validated policy driving classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectivePolicy {
    pub work_start: Option<NaiveTime>,
    pub work_end: NaiveTime,
    /// Length of the official work window, in minutes.
    pub required_minutes: i64,
    pub source: PolicySource,
}

impl EffectivePolicy {
    pub fn from_dto(dto: &WorkHoursPolicyDto, source: PolicySource) -> Result<Self, PolicyError> {
        let work_start = parse_time_of_day(&dto.work_start).map_err(|source| {
            PolicyError::BadTime {
                field: "work_start",
                source,
            }
        })?;
        let work_end =
            parse_time_of_day(&dto.work_end).map_err(|source| PolicyError::BadTime {
                field: "work_end",
                source,
            })?;

        let required_minutes = (work_end - work_start).num_minutes();
        if required_minutes <= 0 {
            return Err(PolicyError::EmptyWorkWindow {
                work_start,
                work_end,
            });
        }

        Ok(Self {
            work_start: Some(work_start),
            work_end,
            required_minutes,
            source,
        })
    }

    /// Configured fallback: a required-hours count and a work-end cutoff,
    /// no explicit work-start.
    pub fn fallback(config: &Config) -> Self {
        let work_end = parse_time_of_day(&config.default_work_end)
            .unwrap_or_else(|_| NaiveTime::from_hms_opt(16, 30, 0).unwrap());

        Self {
            work_start: None,
            work_end,
            required_minutes: i64::from(config.default_required_hours) * 60,
            source: PolicySource::Default,
        }
    }
}
