//! Value type parsers for iCalendar (RFC 5545 §3.3).
//!
//! Every parser takes the line and column of the value so errors point back
//! into the source document.
#![expect(
    clippy::map_err_ignore,
    reason = "Value parsers report position and kind, not the std parse error"
)]

use base64::{Engine, engine::general_purpose::STANDARD};

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{
    Date, DateTime, Duration, Frequency, Period, RRule, RRuleUntil, Time, UtcOffset, Weekday,
    WeekdayNum,
};

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a DATE value (RFC 5545 §3.3.4).
///
/// Format: YYYYMMDD (e.g., "19970714"). The day must exist in the month.
///
/// ## Errors
/// Returns an error if the string is not a valid 8-digit date.
pub fn parse_date(s: &str, line: usize, col: usize) -> ParseResult<Date> {
    let err = || ParseError::new(ParseErrorKind::InvalidDate, line, col);
    if s.len() != 8 || !all_digits(s) {
        return Err(err());
    }

    let year = s[0..4].parse::<i32>().map_err(|_| err())?;
    let month = s[4..6].parse::<u32>().map_err(|_| err())?;
    let day = s[6..8].parse::<u32>().map_err(|_| err())?;

    Date::checked(year, month, day).ok_or_else(err)
}

/// Parses a TIME value (RFC 5545 §3.3.12).
///
/// Format: HHMMSS[Z] (e.g., "133000", "133000Z")
///
/// ## Errors
/// Returns an error if the string is not a valid 6-digit time.
pub fn parse_time(s: &str, line: usize, col: usize) -> ParseResult<Time> {
    let err = || ParseError::new(ParseErrorKind::InvalidTime, line, col);
    let (time_str, is_utc) = match s.strip_suffix('Z') {
        Some(stripped) => (stripped, true),
        None => (s, false),
    };

    if time_str.len() != 6 || !all_digits(time_str) {
        return Err(err());
    }

    let hour = time_str[0..2].parse::<u8>().map_err(|_| err())?;
    let minute = time_str[2..4].parse::<u8>().map_err(|_| err())?;
    let second = time_str[4..6].parse::<u8>().map_err(|_| err())?;

    // 60 is a leap second
    if hour > 23 || minute > 59 || second > 60 {
        return Err(err());
    }

    Ok(Time::new(hour, minute, second, is_utc))
}

/// Parses a DATE-TIME value (RFC 5545 §3.3.5).
///
/// Format: YYYYMMDD"T"HHMMSS[Z] (e.g., "19970714T133000Z"). The TZID comes
/// from the property parameters and is ignored for UTC values.
///
/// ## Errors
/// Returns an error if the string is not a valid datetime format.
pub fn parse_datetime(
    s: &str,
    tzid: Option<&str>,
    line: usize,
    col: usize,
) -> ParseResult<DateTime> {
    let err = || ParseError::new(ParseErrorKind::InvalidDateTime, line, col);
    let (date_str, time_str) = s.split_once('T').ok_or_else(err)?;

    let date = parse_date(date_str, line, col).map_err(|_| err())?;
    let time = parse_time(time_str, line, col + date_str.len() + 1).map_err(|_| err())?;

    Ok(DateTime::new(date, time, tzid))
}

/// Parses a UTC-OFFSET value (RFC 5545 §3.3.14).
///
/// Format: (+|-)HHMM[SS] (e.g., "+0530", "-0800", "+001932")
///
/// ## Errors
/// Returns an error if the string is not a valid UTC offset format.
pub fn parse_utc_offset(s: &str, line: usize, col: usize) -> ParseResult<UtcOffset> {
    let err = || ParseError::new(ParseErrorKind::InvalidUtcOffset, line, col);

    let (negative, digits) = if let Some(rest) = s.strip_prefix('+') {
        (false, rest)
    } else if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else {
        return Err(err());
    };

    if !matches!(digits.len(), 4 | 6) || !all_digits(digits) {
        return Err(err());
    }

    let hours = digits[0..2].parse::<u8>().map_err(|_| err())?;
    let minutes = digits[2..4].parse::<u8>().map_err(|_| err())?;
    let seconds = match digits.get(4..6) {
        Some(ss) => ss.parse::<u8>().map_err(|_| err())?,
        None => 0,
    };
    if hours > 23 || minutes > 59 || seconds > 59 {
        return Err(err());
    }

    Ok(UtcOffset::from_parts(negative, hours, minutes, seconds))
}

/// Parses a DURATION value (RFC 5545 §3.3.6).
///
/// Format: [+|-]P[nW] or [+|-]P[nD][T[nH][nM][nS]]
///
/// ## Errors
/// Returns an error if the string is not a valid duration format.
pub fn parse_duration(s: &str, line: usize, col: usize) -> ParseResult<Duration> {
    let err = || ParseError::new(ParseErrorKind::InvalidDuration, line, col);

    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let body = rest.strip_prefix('P').ok_or_else(err)?;

    let mut dur = Duration::zero();
    dur.negative = negative;

    if let Some(weeks) = body.strip_suffix('W') {
        if !all_digits(weeks) {
            return Err(err());
        }
        dur.weeks = weeks.parse().map_err(|_| err())?;
        return Ok(dur);
    }

    let (date_part, time_part) = match body.split_once('T') {
        Some((date_part, time_part)) if !time_part.is_empty() => (date_part, Some(time_part)),
        Some(_) => return Err(err()),
        None => (body, None),
    };

    if !date_part.is_empty() {
        let days = date_part.strip_suffix('D').ok_or_else(err)?;
        if !all_digits(days) {
            return Err(err());
        }
        dur.days = days.parse().map_err(|_| err())?;
    }

    if let Some(time_part) = time_part {
        apply_time_components(&mut dur, time_part).ok_or_else(err)?;
    } else if date_part.is_empty() {
        return Err(err());
    }

    Ok(dur)
}

/// Applies `nH`, `nM` and `nS` components, in that order.
fn apply_time_components(dur: &mut Duration, time_part: &str) -> Option<()> {
    let mut rest = time_part;
    for (designator, slot) in [
        ('H', &mut dur.hours),
        ('M', &mut dur.minutes),
        ('S', &mut dur.seconds),
    ] {
        if let Some(pos) = rest.find(designator) {
            let digits = &rest[..pos];
            if !all_digits(digits) {
                return None;
            }
            *slot = digits.parse().ok()?;
            rest = &rest[pos + 1..];
        }
    }
    rest.is_empty().then_some(())
}

/// Parses a PERIOD value (RFC 5545 §3.3.9).
///
/// Format: start"/"end or start"/"duration
///
/// ## Errors
/// Returns an error if the string is not a valid period format.
pub fn parse_period(s: &str, tzid: Option<&str>, line: usize, col: usize) -> ParseResult<Period> {
    let (start_str, end_str) = s
        .split_once('/')
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidPeriod, line, col))?;

    let start = parse_datetime(start_str, tzid, line, col)?;
    let end_col = col + start_str.len() + 1;

    if end_str.starts_with(['P', '+', '-']) {
        let duration = parse_duration(end_str, line, end_col)?;
        Ok(Period::Duration { start, duration })
    } else {
        let end = parse_datetime(end_str, tzid, line, end_col)?;
        Ok(Period::Explicit { start, end })
    }
}

/// Parses a RECUR value (RFC 5545 §3.3.10).
///
/// Rule parts without a dedicated field are kept in [`RRule::extensions`].
///
/// ## Errors
/// Returns an error if the string is not a valid recurrence rule.
pub fn parse_rrule(s: &str, line: usize, col: usize) -> ParseResult<RRule> {
    let mut rrule = RRule::default();

    for part in s.split(';').filter(|part| !part.is_empty()) {
        let (key, value) = part
            .split_once('=')
            .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidRRule, line, col))?;

        parse_rrule_part(&mut rrule, key, value, line, col)?;
    }

    Ok(rrule)
}

fn parse_rrule_part(
    rrule: &mut RRule,
    key: &str,
    value: &str,
    line: usize,
    col: usize,
) -> ParseResult<()> {
    let err = || {
        ParseError::new(ParseErrorKind::InvalidRRule, line, col)
            .with_context(format!("{key}={value}"))
    };

    match key.to_ascii_uppercase().as_str() {
        "FREQ" => {
            rrule.freq = Some(
                Frequency::parse(value)
                    .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidFrequency, line, col))?,
            );
        }
        "INTERVAL" => rrule.interval = Some(value.parse().map_err(|_| err())?),
        "COUNT" => {
            if rrule.until.is_some() {
                return Err(ParseError::new(
                    ParseErrorKind::UntilCountConflict,
                    line,
                    col,
                ));
            }
            rrule.count = Some(value.parse().map_err(|_| err())?);
        }
        "UNTIL" => {
            if rrule.count.is_some() {
                return Err(ParseError::new(
                    ParseErrorKind::UntilCountConflict,
                    line,
                    col,
                ));
            }
            rrule.until = Some(parse_until(value, line, col)?);
        }
        "WKST" => {
            rrule.wkst = Some(
                Weekday::parse(value)
                    .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidWeekday, line, col))?,
            );
        }
        "BYSECOND" => rrule.by_second = parse_number_list(value).ok_or_else(err)?,
        "BYMINUTE" => rrule.by_minute = parse_number_list(value).ok_or_else(err)?,
        "BYHOUR" => rrule.by_hour = parse_number_list(value).ok_or_else(err)?,
        "BYDAY" => {
            rrule.by_day = value
                .split(',')
                .map(WeekdayNum::parse)
                .collect::<Option<_>>()
                .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidWeekday, line, col))?;
        }
        "BYMONTHDAY" => rrule.by_monthday = parse_number_list(value).ok_or_else(err)?,
        "BYYEARDAY" => rrule.by_yearday = parse_number_list(value).ok_or_else(err)?,
        "BYWEEKNO" => rrule.by_weekno = parse_number_list(value).ok_or_else(err)?,
        "BYMONTH" => rrule.by_month = parse_number_list(value).ok_or_else(err)?,
        "BYSETPOS" => rrule.by_setpos = parse_number_list(value).ok_or_else(err)?,
        other => rrule.extensions.push((
            other.to_string(),
            value.split(',').map(str::to_string).collect(),
        )),
    }
    Ok(())
}

/// UNTIL is a DATE or a DATE-TIME; the value shape decides.
fn parse_until(value: &str, line: usize, col: usize) -> ParseResult<RRuleUntil> {
    if value.contains('T') {
        Ok(RRuleUntil::DateTime(parse_datetime(value, None, line, col)?))
    } else {
        Ok(RRuleUntil::Date(parse_date(value, line, col)?))
    }
}

fn parse_number_list<T: std::str::FromStr>(s: &str) -> Option<Vec<T>> {
    s.split(',').map(|v| v.trim().parse().ok()).collect()
}

/// Unescapes text values (RFC 5545 §3.3.11).
///
/// Escape sequences: `\\` `\,` `\;` `\n` `\N`
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => result.push('\n'),
            Some(',') => result.push(','),
            Some(';') => result.push(';'),
            Some('\\') | None => result.push('\\'),
            Some(other) => {
                // Invalid escape, preserve as-is
                result.push('\\');
                result.push(other);
            }
        }
    }

    result
}

/// Parses a BOOLEAN value (RFC 5545 §3.3.2).
///
/// ## Errors
/// Returns an error if the string is not "TRUE" or "FALSE".
pub fn parse_boolean(s: &str, line: usize, col: usize) -> ParseResult<bool> {
    if s.eq_ignore_ascii_case("TRUE") {
        Ok(true)
    } else if s.eq_ignore_ascii_case("FALSE") {
        Ok(false)
    } else {
        Err(ParseError::new(ParseErrorKind::InvalidBoolean, line, col))
    }
}

/// Decodes a BINARY value (RFC 5545 §3.3.1); the text is base64.
///
/// ## Errors
/// Returns an error if the text is not valid base64.
pub fn parse_binary(s: &str, line: usize, col: usize) -> ParseResult<Vec<u8>> {
    STANDARD.decode(s).map_err(|e| {
        ParseError::new(ParseErrorKind::InvalidValue, line, col)
            .with_context(format!("invalid Base64 encoding: {e}"))
    })
}

/// Parses an INTEGER value (RFC 5545 §3.3.8).
///
/// Returns `None` when the text is not an integer; the caller decides
/// whether that is fatal.
#[must_use]
pub fn parse_integer(s: &str) -> Option<i64> {
    s.trim().parse().ok()
}

/// Parses a FLOAT value (RFC 5545 §3.3.7): `[+|-]digits[.digits]`.
///
/// Exponents, `inf` and `NaN` are not FLOAT syntax and yield `None`.
#[must_use]
pub fn parse_float(s: &str) -> Option<f64> {
    let s = s.trim();
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    if !all_digits(whole) || fraction.is_some_and(|f| !all_digits(f)) {
        return None;
    }
    s.parse().ok()
}
