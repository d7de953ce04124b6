//! RECUR codec (RFC 7265 §3.6.10).
//!
//! A rule becomes a JSON object keyed by lower-case rule part names, in the
//! order `freq, until, count, interval, bysecond, ..., bysetpos, wkst`,
//! followed by extension parts. Lists of one element collapse to a scalar.

use serde_json::{Map, Value as JsonValue};

use super::{native_text, temporal};
use crate::rfc::ical::core::{Frequency, RRule, RRuleUntil, Value, Weekday, WeekdayNum};
use crate::rfc::ical::parse::{parse_float, parse_rrule};
use crate::rfc::jcal::error::{JCalError, JCalResult};

pub(super) fn encode(value: &Value, property: &str) -> JCalResult<JsonValue> {
    match value {
        Value::Recur(rule) => Ok(JsonValue::Object(encode_rule(rule))),
        other => {
            let text = native_text(other);
            let rule = parse_rrule(&text, 1, 1)
                .map_err(|e| JCalError::malformed(property, "recur", format!("{text} ({e})")))?;
            Ok(JsonValue::Object(encode_rule(&rule)))
        }
    }
}

/// Accepts the jCal object, or a rule in calendar text form.
pub(super) fn decode(json: &JsonValue, property: &str) -> JCalResult<Value> {
    let rule = match json {
        JsonValue::Object(map) => decode_rule(map, property)?,
        JsonValue::String(text) => parse_rrule(text, 1, 1)
            .map_err(|e| JCalError::malformed(property, "recur", format!("{text} ({e})")))?,
        other => return Err(JCalError::malformed(property, "recur", other)),
    };
    Ok(Value::Recur(Box::new(rule)))
}

/// Integer, then float, then string.
fn coerce(token: &str) -> JsonValue {
    if let Ok(number) = token.parse::<i64>() {
        return JsonValue::from(number);
    }
    match parse_float(token) {
        Some(number) if number.is_finite() => JsonValue::from(number),
        _ => JsonValue::String(token.to_string()),
    }
}

fn collapse(mut items: Vec<JsonValue>) -> Option<JsonValue> {
    match items.len() {
        0 => None,
        1 => items.pop(),
        _ => Some(JsonValue::Array(items)),
    }
}

fn list<T: ToString>(items: &[T]) -> Option<JsonValue> {
    collapse(items.iter().map(|item| coerce(&item.to_string())).collect())
}

/// Converts a rule to its jCal object.
#[must_use]
pub fn encode_rule(rule: &RRule) -> Map<String, JsonValue> {
    let mut map = Map::new();

    if let Some(freq) = rule.freq {
        map.insert("freq".into(), freq.as_str().to_ascii_lowercase().into());
    }
    if let Some(until) = &rule.until {
        let until = match until {
            RRuleUntil::Date(date) => temporal::format_date(date),
            RRuleUntil::DateTime(dt) => temporal::format_datetime(dt),
        };
        map.insert("until".into(), until.into());
    }
    if let Some(count) = rule.count {
        map.insert("count".into(), count.into());
    }
    if let Some(interval) = rule.interval {
        map.insert("interval".into(), interval.into());
    }

    let by_day: Vec<String> = rule
        .by_day
        .iter()
        .map(|day| day.to_string().to_ascii_lowercase())
        .collect();
    let lists = [
        ("bysecond", list(&rule.by_second)),
        ("byminute", list(&rule.by_minute)),
        ("byhour", list(&rule.by_hour)),
        ("byday", list(&by_day)),
        ("bymonthday", list(&rule.by_monthday)),
        ("byyearday", list(&rule.by_yearday)),
        ("byweekno", list(&rule.by_weekno)),
        ("bymonth", list(&rule.by_month)),
        ("bysetpos", list(&rule.by_setpos)),
    ];
    for (key, value) in lists {
        if let Some(value) = value {
            map.insert(key.into(), value);
        }
    }

    if let Some(wkst) = rule.wkst {
        map.insert("wkst".into(), wkst.as_str().to_ascii_lowercase().into());
    }
    for (name, values) in &rule.extensions {
        if let Some(value) = list(values) {
            map.insert(name.to_ascii_lowercase(), value);
        }
    }

    map
}

/// Rebuilds a rule from its jCal object. Keys are case-insensitive; keys
/// without a dedicated field become extension parts.
///
/// ## Errors
/// Returns [`JCalError::InvalidRecurrenceField`] when a part has the wrong
/// arity or type.
pub fn decode_rule(map: &Map<String, JsonValue>, property: &str) -> JCalResult<RRule> {
    let mut rule = RRule::default();

    for (key, value) in map {
        let field = Field {
            property,
            name: key.to_ascii_lowercase(),
        };
        match field.name.as_str() {
            "freq" => {
                let token = field.single_text(value)?;
                rule.freq = Some(
                    Frequency::parse(&token)
                        .ok_or_else(|| field.error(format!("unknown frequency {token:?}")))?,
                );
            }
            "wkst" => {
                let token = field.single_text(value)?;
                rule.wkst = Some(
                    Weekday::parse(&token)
                        .ok_or_else(|| field.error(format!("unknown weekday {token:?}")))?,
                );
            }
            "count" => rule.count = Some(field.single_number(value)?),
            "interval" => rule.interval = Some(field.single_number(value)?),
            "until" => {
                let token = field.single_text(value)?;
                let until = temporal::parse_date(&token)
                    .map(RRuleUntil::Date)
                    .or_else(|| temporal::parse_datetime(&token, None).map(RRuleUntil::DateTime))
                    .ok_or_else(|| field.error(format!("{token:?} is not a date or date-time")))?;
                rule.until = Some(until);
            }
            "bysecond" => rule.by_second = field.numbers(value)?,
            "byminute" => rule.by_minute = field.numbers(value)?,
            "byhour" => rule.by_hour = field.numbers(value)?,
            "bymonthday" => rule.by_monthday = field.numbers(value)?,
            "byyearday" => rule.by_yearday = field.numbers(value)?,
            "byweekno" => rule.by_weekno = field.numbers(value)?,
            "bymonth" => rule.by_month = field.numbers(value)?,
            "bysetpos" => rule.by_setpos = field.numbers(value)?,
            "byday" => {
                rule.by_day = field
                    .texts(value)?
                    .into_iter()
                    .map(|token| {
                        WeekdayNum::parse(&token)
                            .ok_or_else(|| field.error(format!("invalid weekday {token:?}")))
                    })
                    .collect::<JCalResult<_>>()?;
            }
            _ => {
                let values = field.texts(value)?;
                rule.extensions.push((field.name.to_ascii_uppercase(), values));
            }
        }
    }

    Ok(rule)
}

/// One rule part being decoded, for error attribution.
struct Field<'a> {
    property: &'a str,
    name: String,
}

impl Field<'_> {
    fn error(&self, reason: impl Into<String>) -> JCalError {
        JCalError::recurrence(self.property, &self.name, reason)
    }

    fn elements<'v>(&self, value: &'v JsonValue) -> JCalResult<&'v [JsonValue]> {
        match value {
            JsonValue::Array(items) if items.is_empty() => Err(self.error("empty list")),
            JsonValue::Array(items) => Ok(items),
            scalar => Ok(std::slice::from_ref(scalar)),
        }
    }

    fn single<'v>(&self, value: &'v JsonValue) -> JCalResult<&'v JsonValue> {
        match self.elements(value)? {
            [single] => Ok(single),
            items => Err(self.error(format!(
                "expected a single value, got {} values",
                items.len()
            ))),
        }
    }

    fn text(&self, element: &JsonValue) -> JCalResult<String> {
        match element {
            JsonValue::String(s) => Ok(s.clone()),
            JsonValue::Number(n) => Ok(n.to_string()),
            other => Err(self.error(format!("expected a string or number, got {other}"))),
        }
    }

    fn number<T: TryFrom<i64>>(&self, element: &JsonValue) -> JCalResult<T> {
        let number = match element {
            JsonValue::Number(n) => n.as_i64(),
            JsonValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
        .ok_or_else(|| self.error(format!("expected an integer, got {element}")))?;
        T::try_from(number).map_err(|_out_of_range| self.error(format!("{number} is out of range")))
    }

    fn single_text(&self, value: &JsonValue) -> JCalResult<String> {
        self.text(self.single(value)?)
    }

    fn single_number<T: TryFrom<i64>>(&self, value: &JsonValue) -> JCalResult<T> {
        self.number(self.single(value)?)
    }

    fn texts(&self, value: &JsonValue) -> JCalResult<Vec<String>> {
        self.elements(value)?
            .iter()
            .map(|element| self.text(element))
            .collect()
    }

    fn numbers<T: TryFrom<i64>>(&self, value: &JsonValue) -> JCalResult<Vec<T>> {
        self.elements(value)?
            .iter()
            .map(|element| self.number(element))
            .collect()
    }
}
