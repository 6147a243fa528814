use crate::config::TimeZoneMode;
use crate::errors::InputError;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

const INPUT_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];
const DISPLAY_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Converts a `datetime-local` value to unix seconds, truncating toward zero.
pub fn parse_datetime_local(input: &str, zone: TimeZoneMode) -> Result<i64, InputError> {
    let input = input.trim();
    let naive = INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .ok_or_else(|| InputError::DateTime(input.to_string()))?;

    let millis = match zone {
        TimeZoneMode::Utc => naive.and_utc().timestamp_millis(),
        TimeZoneMode::Local => Local
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| InputError::DateTime(input.to_string()))?
            .timestamp_millis(),
    };
    Ok(millis / 1000)
}

pub fn format_timestamp(secs: i64, zone: TimeZoneMode) -> String {
    let Some(utc) = DateTime::<Utc>::from_timestamp(secs, 0) else {
        return secs.to_string();
    };
    match zone {
        TimeZoneMode::Utc => utc.format(DISPLAY_FORMAT).to_string(),
        TimeZoneMode::Local => utc.with_timezone(&Local).format(DISPLAY_FORMAT).to_string(),
    }
}
