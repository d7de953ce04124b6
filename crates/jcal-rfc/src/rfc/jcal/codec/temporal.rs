//! Temporal codecs (RFC 7265 §3.6.4 - §3.6.9, §3.6.14).
//!
//! jCal uses the extended ISO 8601 forms (`2024-01-01`, `09:30:00Z`,
//! `-05:00`). Extended forms are read through `chrono`; the basic calendar
//! text forms are accepted as well and go through the calendar parser.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde_json::Value as JsonValue;

use super::{expect_str, native_text};
use crate::rfc::ical::core::{Date, DateTime, Duration, Period, Time, UtcOffset, Value};
use crate::rfc::ical::parse;
use crate::rfc::jcal::core::JCalParams;
use crate::rfc::jcal::error::{JCalError, JCalResult};

const TZID: &str = "tzid";

/// Zone identifiers that name UTC itself.
pub const UTC_ALIASES: [&str; 4] = ["UTC", "Etc/UTC", "GMT", "Z"];

#[must_use]
pub fn is_utc_alias(tzid: &str) -> bool {
    UTC_ALIASES.iter().any(|alias| alias.eq_ignore_ascii_case(tzid))
}

/// Returns whether a date-time denotes a UTC instant.
#[must_use]
pub fn is_utc(dt: &DateTime) -> bool {
    dt.is_utc() || dt.tzid().is_some_and(is_utc_alias)
}

#[must_use]
pub fn format_date(date: &Date) -> String {
    format!("{:04}-{:02}-{:02}", date.year, date.month, date.day)
}

#[must_use]
pub fn format_time(time: &Time) -> String {
    let zone = if time.is_utc { "Z" } else { "" };
    format!("{:02}:{:02}:{:02}{zone}", time.hour, time.minute, time.second)
}

/// Formats a date-time; UTC values (including UTC zone aliases) get `Z`.
#[must_use]
pub fn format_datetime(dt: &DateTime) -> String {
    let zone = if is_utc(dt) { "Z" } else { "" };
    format!(
        "{}T{:02}:{:02}:{:02}{zone}",
        format_date(&dt.date),
        dt.hour,
        dt.minute,
        dt.second
    )
}

/// Formats `±HH:MM`, adding `:SS` only when the seconds are non-zero.
#[must_use]
pub fn format_utc_offset(offset: UtcOffset) -> String {
    let sign = if offset.is_negative() { '-' } else { '+' };
    let (hours, minutes, seconds) = offset.parts();
    if seconds == 0 {
        format!("{sign}{hours:02}:{minutes:02}")
    } else {
        format!("{sign}{hours:02}:{minutes:02}:{seconds:02}")
    }
}

#[must_use]
pub fn parse_date(s: &str) -> Option<Date> {
    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(date) => Date::checked(date.year(), date.month(), date.day()),
        Err(_) => parse::parse_date(s, 1, 1).ok(),
    }
}

#[must_use]
pub fn parse_time(s: &str) -> Option<Time> {
    let (clock, is_utc) = match s.strip_suffix(['Z', 'z']) {
        Some(clock) => (clock, true),
        None => (s, false),
    };
    match NaiveTime::parse_from_str(clock, "%H:%M:%S") {
        Ok(time) => {
            // chrono folds a leap second into the nanoseconds
            let leap = u32::from(time.nanosecond() >= 1_000_000_000);
            Some(Time::new(
                u8::try_from(time.hour()).ok()?,
                u8::try_from(time.minute()).ok()?,
                u8::try_from(time.second() + leap).ok()?,
                is_utc,
            ))
        }
        Err(_) => parse::parse_time(s, 1, 1).ok(),
    }
}

/// Parses a date-time in the zone `tzid` (ignored for `Z` values).
#[must_use]
pub fn parse_datetime(s: &str, tzid: Option<&str>) -> Option<DateTime> {
    let (date, time) = s.split_once(['T', 't'])?;
    Some(DateTime::new(parse_date(date)?, parse_time(time)?, tzid))
}

#[must_use]
pub fn parse_utc_offset(s: &str) -> Option<UtcOffset> {
    let negative = s.starts_with('-');
    let digits = s.strip_prefix(['+', '-'])?;
    if !digits.contains(':') {
        return parse::parse_utc_offset(s, 1, 1).ok();
    }

    let fields = digits
        .split(':')
        .map(|field| {
            (field.len() == 2 && field.bytes().all(|b| b.is_ascii_digit()))
                .then(|| field.parse::<u8>().ok())
                .flatten()
        })
        .collect::<Option<Vec<_>>>()?;
    let (hours, minutes, seconds) = match fields.as_slice() {
        [hours, minutes] => (*hours, *minutes, 0),
        [hours, minutes, seconds] => (*hours, *minutes, *seconds),
        _ => return None,
    };
    if hours > 23 || minutes > 59 || seconds > 59 {
        return None;
    }
    Some(UtcOffset::from_parts(negative, hours, minutes, seconds))
}

#[must_use]
pub fn parse_duration(s: &str) -> Option<Duration> {
    parse::parse_duration(s, 1, 1).ok()
}

/// Sets or clears the `tzid` parameter to match a date-time's zone.
fn annotate_zone(dt: &DateTime, params: &mut JCalParams) {
    match dt.tzid() {
        _ if is_utc(dt) => {
            params.remove(TZID);
        }
        Some(tzid) => params.insert(TZID, tzid),
        None => {}
    }
}

fn as_datetime(value: &Value, params: &JCalParams, property: &str) -> JCalResult<DateTime> {
    match value {
        Value::DateTime(dt) => Ok(dt.clone()),
        other => {
            let text = native_text(other);
            parse_datetime(&text, params.get_str(TZID))
                .ok_or_else(|| JCalError::malformed(property, "date-time", text))
        }
    }
}

pub(super) fn encode_date(value: &Value, property: &str) -> JCalResult<JsonValue> {
    let date = match value {
        Value::Date(date) => *date,
        other => {
            let text = native_text(other);
            parse_date(&text).ok_or_else(|| JCalError::malformed(property, "date", text))?
        }
    };
    Ok(JsonValue::String(format_date(&date)))
}

pub(super) fn encode_datetime(
    value: &Value,
    params: &mut JCalParams,
    property: &str,
) -> JCalResult<JsonValue> {
    let dt = as_datetime(value, params, property)?;
    annotate_zone(&dt, params);
    Ok(JsonValue::String(format_datetime(&dt)))
}

pub(super) fn encode_time(
    value: &Value,
    params: &mut JCalParams,
    property: &str,
) -> JCalResult<JsonValue> {
    let time = match value {
        Value::Time(time) => *time,
        other => {
            let text = native_text(other);
            parse_time(&text).ok_or_else(|| JCalError::malformed(property, "time", text))?
        }
    };
    if time.is_utc {
        params.remove(TZID);
    }
    Ok(JsonValue::String(format_time(&time)))
}

pub(super) fn encode_duration(value: &Value, property: &str) -> JCalResult<JsonValue> {
    let duration = match value {
        Value::Duration(duration) => *duration,
        other => {
            let text = native_text(other);
            parse_duration(&text).ok_or_else(|| JCalError::malformed(property, "duration", text))?
        }
    };
    Ok(JsonValue::String(duration.to_string()))
}

pub(super) fn encode_period(
    value: &Value,
    params: &mut JCalParams,
    property: &str,
) -> JCalResult<JsonValue> {
    let period = match value {
        Value::Period(period) => period.clone(),
        other => {
            let text = native_text(other);
            parse_period(&text, params.get_str(TZID))
                .ok_or_else(|| JCalError::malformed(property, "period", text))?
        }
    };

    annotate_zone(period.start(), params);
    let end = match &period {
        Period::Explicit { end, .. } => format_datetime(end),
        Period::Duration { duration, .. } => duration.to_string(),
    };
    Ok(JsonValue::Array(vec![
        JsonValue::String(format_datetime(period.start())),
        JsonValue::String(end),
    ]))
}

pub(super) fn encode_utc_offset(value: &Value, property: &str) -> JCalResult<JsonValue> {
    let offset = match value {
        Value::UtcOffset(offset) => *offset,
        other => {
            let text = native_text(other);
            parse_utc_offset(&text)
                .ok_or_else(|| JCalError::malformed(property, "utc-offset", text))?
        }
    };
    Ok(JsonValue::String(format_utc_offset(offset)))
}

pub(super) fn decode_date(json: &JsonValue, property: &str) -> JCalResult<Value> {
    let s = expect_str(json, property, "date")?;
    parse_date(s)
        .map(Value::Date)
        .ok_or_else(|| JCalError::malformed(property, "date", s))
}

pub(super) fn decode_datetime(
    json: &JsonValue,
    params: &JCalParams,
    property: &str,
) -> JCalResult<Value> {
    let s = expect_str(json, property, "date-time")?;
    parse_datetime(s, params.get_str(TZID))
        .map(Value::DateTime)
        .ok_or_else(|| JCalError::malformed(property, "date-time", s))
}

pub(super) fn decode_time(json: &JsonValue, property: &str) -> JCalResult<Value> {
    let s = expect_str(json, property, "time")?;
    parse_time(s)
        .map(Value::Time)
        .ok_or_else(|| JCalError::malformed(property, "time", s))
}

pub(super) fn decode_duration(json: &JsonValue, property: &str) -> JCalResult<Value> {
    let s = expect_str(json, property, "duration")?;
    parse_duration(s)
        .map(Value::Duration)
        .ok_or_else(|| JCalError::malformed(property, "duration", s))
}

/// Accepts `[start, end-or-duration]` or a single `start/end-or-duration`
/// string. The second part is read as a date-time first, then a duration.
pub(super) fn decode_period(
    json: &JsonValue,
    params: &JCalParams,
    property: &str,
) -> JCalResult<Value> {
    let malformed = || JCalError::malformed(property, "period", json);
    let (start, end) = match json {
        JsonValue::String(s) => s.split_once('/').ok_or_else(malformed)?,
        JsonValue::Array(items) => match items.as_slice() {
            [JsonValue::String(start), JsonValue::String(end)] => (start.as_str(), end.as_str()),
            _ => return Err(malformed()),
        },
        _ => return Err(malformed()),
    };

    let tzid = params.get_str(TZID);
    let start = parse_datetime(start, tzid).ok_or_else(malformed)?;
    let period = if let Some(end) = parse_datetime(end, tzid) {
        Period::explicit(start, end)
    } else if let Some(duration) = parse_duration(end) {
        Period::from_duration(start, duration)
    } else {
        return Err(malformed());
    };
    Ok(Value::Period(period))
}

pub(super) fn decode_utc_offset(json: &JsonValue, property: &str) -> JCalResult<Value> {
    let s = expect_str(json, property, "utc-offset")?;
    parse_utc_offset(s)
        .map(Value::UtcOffset)
        .ok_or_else(|| JCalError::malformed(property, "utc-offset", s))
}

fn parse_period(s: &str, tzid: Option<&str>) -> Option<Period> {
    let (start, end) = s.split_once('/')?;
    let start = parse_datetime(start, tzid)?;
    match parse_datetime(end, tzid) {
        Some(end) => Some(Period::explicit(start, end)),
        None => parse_duration(end).map(|duration| Period::from_duration(start, duration)),
    }
}
