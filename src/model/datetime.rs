//! Lenient (de)serialization of backend timestamps.
//!
//! Depending on the service and its Jackson setup, a timestamp may arrive as:
//! - an ISO-8601 string, with or without offset (`2024-11-15T10:30:00Z`, `2024-11-15T10:30:00`),
//! - a date string (`2024-11-15`),
//! - `dd/MM/yyyy` or `dd/MM/yyyy HH:mm`,
//! - an array `[year, month, day, hour?, minute?, second?, nanos?]`,
//! - an object `{year, monthValue|month, dayOfMonth|day, hour?, minute?, second?}`.
//!
//! Anything else decodes as `None`. Values are always serialized back as ISO-8601.
//!
//! Use with `#[serde(default, with = "crate::model::datetime")]` on `Option<NaiveDateTime>`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(ts) => serializer.serialize_str(&ts.format(ISO_FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(parse_backend_timestamp))
}

/// Interpret any of the supported shapes.
pub fn parse_backend_timestamp(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(s) => parse_text(s.trim()),
        Value::Array(parts) => {
            let n: Vec<i64> = parts.iter().map(Value::as_i64).collect::<Option<_>>()?;
            let at = |i: usize| n.get(i).copied().unwrap_or(0);
            if n.len() < 3 {
                return None;
            }
            build(at(0), at(1), at(2), at(3), at(4), at(5))
        }
        Value::Object(map) => {
            let field = |keys: &[&str]| keys.iter().find_map(|k| map.get(*k).and_then(Value::as_i64));
            build(
                field(&["year"])?,
                field(&["monthValue", "month"])?,
                field(&["dayOfMonth", "day"])?,
                field(&["hour"]).unwrap_or(0),
                field(&["minute"]).unwrap_or(0),
                field(&["second"]).unwrap_or(0),
            )
        }
        _ => None,
    }
}

fn parse_text(s: &str) -> Option<NaiveDateTime> {
    if s.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.naive_utc());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ts);
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(s, "%d/%m/%Y %H:%M") {
        return Some(ts);
    }
    ["%Y-%m-%d", "%d/%m/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .map(|date| date.and_time(NaiveTime::MIN))
}

fn build(year: i64, month: i64, day: i64, hour: i64, minute: i64, second: i64) -> Option<NaiveDateTime> {
    let date = NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )?;
    let time = NaiveTime::from_hms_opt(
        u32::try_from(hour).ok()?,
        u32::try_from(minute).ok()?,
        u32::try_from(second).ok()?,
    )?;
    Some(date.and_time(time))
}
