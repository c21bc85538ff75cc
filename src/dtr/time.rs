use chrono::NaiveTime;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized time-of-day string: {0:?}")]
pub struct TimeParseError(pub String);

/// Normalizes the time formats the dashboard produces into a comparable
/// time-of-day. Three shapes are recognized:
///
/// - contains `'T'`: ISO-8601 timestamp; the clock portion is taken as-is
///   (fractional seconds and any zone suffix are ignored)
/// - contains a space: 12-hour `"hh:mm AM|PM"`
/// - otherwise: 24-hour `"HH:MM"` or `"HH:MM:SS"`, seconds default to 0
pub fn parse_time_of_day(raw: &str) -> Result<NaiveTime, TimeParseError> {
    let raw = raw.trim();
    let err = || TimeParseError(raw.to_string());

    if let Some((_, clock)) = raw.split_once('T') {
        let clock: String = clock
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == ':')
            .collect();
        return NaiveTime::parse_from_str(&clock, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(&clock, "%H:%M"))
            .map_err(|_| err());
    }

    if raw.contains(' ') {
        return NaiveTime::parse_from_str(raw, "%I:%M %p")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%I:%M:%S %p"))
            .map_err(|_| err());
    }

    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|_| err())
}
