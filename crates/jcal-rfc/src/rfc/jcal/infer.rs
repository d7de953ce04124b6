//! Value type inference.
//!
//! Decides which codec converts a property value, from the property name, the
//! explicit `VALUE` parameter and the shape of the native value. The default
//! types come from the immutable [`DEFAULT_VALUE_TYPES`] table.
//!
//! [`DEFAULT_VALUE_TYPES`]: crate::rfc::ical::core::DEFAULT_VALUE_TYPES

use crate::rfc::ical::core::{Value, ValueType, default_value_type};

/// Codec selected for a value.
///
/// GEO and REQUEST-STATUS are compound values whose jCal tag (`float`,
/// `text`) does not describe their shape, so they get their own codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    Scalar(ValueType),
    /// `[latitude, longitude]`, tagged `float`.
    Geo,
    /// Status code and texts, tagged `text`.
    RequestStatus,
}

impl Codec {
    /// Returns the jCal type tag the codec writes.
    #[must_use]
    pub const fn tag(self) -> ValueType {
        match self {
            Self::Scalar(value_type) => value_type,
            Self::Geo => ValueType::Float,
            Self::RequestStatus => ValueType::Text,
        }
    }
}

/// Returns the codec a property uses when nothing overrides it.
#[must_use]
pub fn default_codec(property_name: &str) -> Option<Codec> {
    if property_name.eq_ignore_ascii_case("GEO") {
        return Some(Codec::Geo);
    }
    if property_name.eq_ignore_ascii_case("REQUEST-STATUS") {
        return Some(Codec::RequestStatus);
    }
    default_value_type(property_name).map(Codec::Scalar)
}

/// Selects the codec for one native value.
///
/// In order: the explicit type (unrecognized names are `unknown`), the shape
/// of a date/time value, the property default, the value's own variant, and
/// finally `unknown`. An explicit `FLOAT` on GEO and an explicit `TEXT` on
/// REQUEST-STATUS keep the compound codec.
#[must_use]
pub fn infer(property_name: &str, explicit: Option<&str>, value: &Value) -> Codec {
    let default = default_codec(property_name);

    if let Some(explicit) = explicit {
        let value_type = ValueType::parse(explicit);
        return match (default, value_type) {
            (Some(Codec::Geo), ValueType::Float) => Codec::Geo,
            (Some(Codec::RequestStatus), ValueType::Text) => Codec::RequestStatus,
            _ => Codec::Scalar(value_type),
        };
    }

    if let Some(value_type) = temporal_shape(value) {
        return Codec::Scalar(value_type);
    }

    default
        .or_else(|| runtime_codec(value))
        .unwrap_or(Codec::Scalar(ValueType::Unknown))
}

/// Selects the codec for a jCal value from its type tag.
///
/// The codec always reports the tag it was given, so inferring again from
/// produced output is stable.
#[must_use]
pub fn infer_from_jcal(property_name: &str, tag: ValueType) -> Codec {
    match (default_codec(property_name), tag) {
        (Some(Codec::Geo), ValueType::Float) => Codec::Geo,
        (Some(Codec::RequestStatus), ValueType::Text) => Codec::RequestStatus,
        _ => Codec::Scalar(tag),
    }
}

fn temporal_shape(value: &Value) -> Option<ValueType> {
    match value {
        Value::Date(_) => Some(ValueType::Date),
        Value::DateTime(_) => Some(ValueType::DateTime),
        Value::Time(_) => Some(ValueType::Time),
        Value::Period(_) => Some(ValueType::Period),
        Value::Duration(_) => Some(ValueType::Duration),
        _ => None,
    }
}

fn runtime_codec(value: &Value) -> Option<Codec> {
    let codec = match value {
        Value::Binary(_) => Codec::Scalar(ValueType::Binary),
        Value::Boolean(_) => Codec::Scalar(ValueType::Boolean),
        Value::CalAddress(_) => Codec::Scalar(ValueType::CalAddress),
        Value::Float(_) => Codec::Scalar(ValueType::Float),
        Value::Integer(_) => Codec::Scalar(ValueType::Integer),
        Value::Recur(_) => Codec::Scalar(ValueType::Recur),
        Value::Text(_) => Codec::Scalar(ValueType::Text),
        Value::Uri(_) => Codec::Scalar(ValueType::Uri),
        Value::UtcOffset(_) => Codec::Scalar(ValueType::UtcOffset),
        Value::Geo { .. } => Codec::Geo,
        Value::RequestStatus(_) => Codec::RequestStatus,
        Value::Date(_)
        | Value::DateTime(_)
        | Value::Time(_)
        | Value::Period(_)
        | Value::Duration(_)
        | Value::List(_)
        | Value::Unknown(_) => return None,
    };
    Some(codec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::ical::core::{Date, DateTime, Duration, Frequency, Period, RRule};

    fn utc(day: u8) -> DateTime {
        DateTime::utc(Date::new(2024, 1, day), 0, 0, 0)
    }

    #[test]
    fn explicit_type_wins() {
        let value = Value::Date(Date::new(2024, 1, 1));
        assert_eq!(
            infer("DTSTART", Some("DATE"), &value),
            Codec::Scalar(ValueType::Date)
        );
        assert_eq!(
            infer("X-FOO", Some("integer"), &Value::Integer(3)),
            Codec::Scalar(ValueType::Integer)
        );
    }

    #[test]
    fn unrecognized_explicit_type_is_unknown() {
        let value = Value::Unknown("abc".to_string());
        assert_eq!(
            infer("X-FOO", Some("X-CUSTOM"), &value),
            Codec::Scalar(ValueType::Unknown)
        );
    }

    #[test]
    fn compound_defaults_survive_scalar_override() {
        let geo = Value::Geo {
            latitude: 1.0,
            longitude: 2.0,
        };
        assert_eq!(infer("GEO", Some("FLOAT"), &geo), Codec::Geo);
        assert_eq!(infer("GEO", None, &geo), Codec::Geo);
        assert_eq!(
            infer("GEO", Some("TEXT"), &Value::Text("1;2".to_string())),
            Codec::Scalar(ValueType::Text)
        );

        let status = Value::RequestStatus(vec!["2.0".to_string(), "Success".to_string()]);
        assert_eq!(infer("REQUEST-STATUS", Some("TEXT"), &status), Codec::RequestStatus);
        assert_eq!(infer("request-status", None, &status), Codec::RequestStatus);
    }

    #[test]
    fn temporal_shape_beats_default() {
        let trigger = Value::DateTime(utc(1));
        assert_eq!(
            infer("TRIGGER", None, &trigger),
            Codec::Scalar(ValueType::DateTime)
        );

        let period = Value::Period(Period::from_duration(utc(1), Duration::days(1)));
        assert_eq!(infer("RDATE", None, &period), Codec::Scalar(ValueType::Period));
        assert_eq!(
            infer("DTSTART", None, &Value::Date(Date::new(2024, 1, 1))),
            Codec::Scalar(ValueType::Date)
        );
    }

    #[test]
    fn default_beats_runtime_variant() {
        let malformed = Value::Unknown("high".to_string());
        assert_eq!(
            infer("PRIORITY", None, &malformed),
            Codec::Scalar(ValueType::Integer)
        );
        assert_eq!(
            infer("ATTACH", None, &Value::Uri("https://example.com".to_string())),
            Codec::Scalar(ValueType::Uri)
        );
    }

    #[test]
    fn runtime_variant_without_default() {
        let rule = Value::Recur(Box::new(RRule::new(Frequency::Daily)));
        assert_eq!(infer("X-RULE", None, &rule), Codec::Scalar(ValueType::Recur));
        assert_eq!(
            infer("X-FLAG", None, &Value::Boolean(true)),
            Codec::Scalar(ValueType::Boolean)
        );
        assert_eq!(
            infer("X-NAME", None, &Value::Text("x".to_string())),
            Codec::Scalar(ValueType::Text)
        );
    }

    #[test]
    fn falls_back_to_unknown() {
        assert_eq!(
            infer("X-RAW", None, &Value::Unknown("???".to_string())),
            Codec::Scalar(ValueType::Unknown)
        );
    }

    #[test]
    fn jcal_inference_is_idempotent() {
        for name in ["GEO", "REQUEST-STATUS", "DTSTART", "SUMMARY", "X-FOO"] {
            for tag in ValueType::ALL {
                let codec = infer_from_jcal(name, tag);
                assert_eq!(codec.tag(), tag, "{name} {tag}");
                assert_eq!(infer_from_jcal(name, codec.tag()), codec);
            }
        }
        assert_eq!(infer_from_jcal("geo", ValueType::Float), Codec::Geo);
        assert_eq!(
            infer_from_jcal("REQUEST-STATUS", ValueType::Text),
            Codec::RequestStatus
        );
    }
}
