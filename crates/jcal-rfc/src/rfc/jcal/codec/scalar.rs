//! Scalar and compound codecs (RFC 7265 §3.6.1 - §3.6.3, §3.6.11 - §3.6.13,
//! §3.4.1.1, §3.4.1.3).

use std::fmt;

use jcal_core::policy::InvalidValue;
use serde_json::Value as JsonValue;

use super::{CodecContext, native_text};
use crate::rfc::ical::core::{Value, ValueType};
use crate::rfc::ical::parse::{
    parse_binary, parse_float, parse_integer, split_unescaped, unescape_text,
};
use crate::rfc::jcal::diagnostics::Diagnostic;
use crate::rfc::jcal::error::{JCalError, JCalResult};

/// Applies the numeric policy to a value that did not parse.
fn substitute<T: Copy + fmt::Display>(
    policy: InvalidValue<T>,
    value_type: ValueType,
    raw: &str,
    cx: &mut CodecContext<'_>,
) -> JCalResult<T> {
    let Some(substitute) = policy.substitute() else {
        return Err(JCalError::InvalidNumericValue {
            property: cx.property.to_string(),
            value_type,
            value: raw.to_string(),
        });
    };
    cx.diagnostics.record(Diagnostic::NumericDefaultSubstituted {
        property: cx.property.to_string(),
        value_type,
        value: raw.to_string(),
        substitute: substitute.to_string(),
    });
    Ok(substitute)
}

fn float_or_default(parsed: Option<f64>, raw: &str, cx: &mut CodecContext<'_>) -> JCalResult<f64> {
    match parsed.filter(|f| f.is_finite()) {
        Some(number) => Ok(number),
        None => substitute(cx.policy.float, ValueType::Float, raw, cx),
    }
}

fn json_text(json: &JsonValue) -> String {
    match json {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_float(json: &JsonValue) -> Option<f64> {
    match json {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => parse_float(s),
        _ => None,
    }
}

fn native_float(value: &Value) -> Option<f64> {
    match value {
        Value::Float(number) => Some(*number),
        other => parse_float(&native_text(other)),
    }
}

pub(super) fn encode_float(value: &Value, cx: &mut CodecContext<'_>) -> JCalResult<JsonValue> {
    let number = float_or_default(native_float(value), &native_text(value), cx)?;
    Ok(JsonValue::from(number))
}

pub(super) fn decode_float(json: &JsonValue, cx: &mut CodecContext<'_>) -> JCalResult<Value> {
    float_or_default(json_float(json), &json_text(json), cx).map(Value::Float)
}

pub(super) fn encode_integer(value: &Value, cx: &mut CodecContext<'_>) -> JCalResult<JsonValue> {
    let parsed = match value {
        Value::Integer(number) => Some(*number),
        other => parse_integer(&native_text(other)),
    };
    let number = match parsed {
        Some(number) => number,
        None => substitute(cx.policy.integer, ValueType::Integer, &native_text(value), cx)?,
    };
    Ok(JsonValue::from(number))
}

pub(super) fn decode_integer(json: &JsonValue, cx: &mut CodecContext<'_>) -> JCalResult<Value> {
    let parsed = match json {
        JsonValue::Number(n) => n.as_i64(),
        JsonValue::String(s) => parse_integer(s),
        _ => None,
    };
    let number = match parsed {
        Some(number) => number,
        None => substitute(cx.policy.integer, ValueType::Integer, &json_text(json), cx)?,
    };
    Ok(Value::Integer(number))
}

fn parse_bool_token(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

pub(super) fn encode_boolean(value: &Value, property: &str) -> JCalResult<JsonValue> {
    let flag = match value {
        Value::Boolean(flag) => *flag,
        Value::Integer(number) => *number != 0,
        other => {
            let text = native_text(other);
            parse_bool_token(&text)
                .ok_or_else(|| JCalError::malformed(property, "boolean", text))?
        }
    };
    Ok(JsonValue::Bool(flag))
}

/// Accepts JSON booleans, the tokens `true`/`false` in any case, and numbers
/// (non-zero is true).
pub(super) fn decode_boolean(json: &JsonValue, property: &str) -> JCalResult<Value> {
    let flag = match json {
        JsonValue::Bool(flag) => Some(*flag),
        JsonValue::String(s) => parse_bool_token(s),
        JsonValue::Number(n) => n
            .as_i64()
            .map(|i| i != 0)
            .or_else(|| n.as_f64().map(|f| f != 0.0)),
        _ => None,
    };
    flag.map(Value::Boolean)
        .ok_or_else(|| JCalError::malformed(property, "boolean", json))
}

pub(super) fn encode_text(value: &Value) -> JsonValue {
    JsonValue::String(native_text(value))
}

pub(super) fn decode_string(
    json: &JsonValue,
    property: &str,
    expected: &'static str,
) -> JCalResult<String> {
    super::expect_str(json, property, expected).map(str::to_string)
}

pub(super) fn decode_unknown(json: &JsonValue) -> Value {
    Value::Unknown(json_text(json))
}

/// Native bytes are written as base64 by the calendar serializer.
pub(super) fn encode_binary(value: &Value) -> JsonValue {
    JsonValue::String(native_text(value))
}

pub(super) fn decode_binary(json: &JsonValue, property: &str) -> JCalResult<Value> {
    let encoded = super::expect_str(json, property, "binary")?;
    parse_binary(encoded, 1, 1)
        .map(Value::Binary)
        .map_err(|e| JCalError::malformed(property, "binary", format!("{encoded} ({})", e.kind)))
}

/// GEO as `[latitude, longitude]`. A value that is not two floats goes
/// through the numeric policy part by part.
pub(super) fn encode_geo(value: &Value, cx: &mut CodecContext<'_>) -> JCalResult<JsonValue> {
    let (latitude, longitude) = match value {
        Value::Geo {
            latitude,
            longitude,
        } => (
            float_or_default(Some(*latitude), &latitude.to_string(), cx)?,
            float_or_default(Some(*longitude), &longitude.to_string(), cx)?,
        ),
        other => {
            let raw = native_text(other);
            let Some((latitude, longitude)) = raw.split_once(';') else {
                return Err(JCalError::malformed(cx.property, "geo", raw));
            };
            (
                float_or_default(parse_float(latitude), latitude, cx)?,
                float_or_default(parse_float(longitude), longitude, cx)?,
            )
        }
    };
    Ok(JsonValue::Array(vec![
        JsonValue::from(latitude),
        JsonValue::from(longitude),
    ]))
}

pub(super) fn decode_geo(json: &JsonValue, cx: &mut CodecContext<'_>) -> JCalResult<Value> {
    let (latitude, longitude) = match json {
        JsonValue::Array(items) => match items.as_slice() {
            [latitude, longitude] => (
                float_or_default(json_float(latitude), &json_text(latitude), cx)?,
                float_or_default(json_float(longitude), &json_text(longitude), cx)?,
            ),
            _ => return Err(JCalError::malformed(cx.property, "geo", json)),
        },
        JsonValue::String(s) => {
            let Some((latitude, longitude)) = s.split_once(';') else {
                return Err(JCalError::malformed(cx.property, "geo", s));
            };
            (
                float_or_default(parse_float(latitude), latitude, cx)?,
                float_or_default(parse_float(longitude), longitude, cx)?,
            )
        }
        _ => return Err(JCalError::malformed(cx.property, "geo", json)),
    };
    Ok(Value::Geo {
        latitude,
        longitude,
    })
}

pub(super) fn encode_request_status(value: &Value) -> JsonValue {
    let segments: Vec<String> = match value {
        Value::RequestStatus(segments) => segments.clone(),
        Value::Text(text) => text.split(';').map(str::to_string).collect(),
        other => split_unescaped(&native_text(other), ';')
            .into_iter()
            .map(unescape_text)
            .collect(),
    };
    JsonValue::Array(segments.into_iter().map(JsonValue::String).collect())
}

pub(super) fn decode_request_status(json: &JsonValue, property: &str) -> JCalResult<Value> {
    let segments = match json {
        JsonValue::Array(items) => items
            .iter()
            .map(|item| match item {
                JsonValue::String(s) => Ok(s.clone()),
                JsonValue::Number(n) => Ok(n.to_string()),
                other => Err(JCalError::malformed(property, "request-status", other)),
            })
            .collect::<JCalResult<_>>()?,
        JsonValue::String(s) => s.split(';').map(str::to_string).collect(),
        other => return Err(JCalError::malformed(property, "request-status", other)),
    };
    Ok(Value::RequestStatus(segments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::jcal::diagnostics::Diagnostics;
    use jcal_core::policy::NumericPolicy;
    use serde_json::json;

    fn context<'a>(policy: NumericPolicy, diagnostics: &'a mut Diagnostics) -> CodecContext<'a> {
        CodecContext {
            property: "x-test",
            policy,
            diagnostics,
        }
    }

    #[test_log::test]
    fn float_substitutes_default() {
        let mut diagnostics = Diagnostics::default();
        let mut cx = context(NumericPolicy::LENIENT, &mut diagnostics);

        let json = encode_float(&Value::Unknown("abc".to_string()), &mut cx).unwrap();
        assert_eq!(json, json!(0.0));

        let value = decode_float(&json!("not a number"), &mut cx).unwrap();
        assert_eq!(value, Value::Float(0.0));
        assert_eq!(diagnostics.as_slice().len(), 2);
    }

    #[test]
    fn float_raises() {
        let mut diagnostics = Diagnostics::default();
        let mut cx = context(NumericPolicy::STRICT, &mut diagnostics);

        let err = encode_float(&Value::Float(f64::NAN), &mut cx).unwrap_err();
        assert!(matches!(
            err,
            JCalError::InvalidNumericValue {
                value_type: ValueType::Float,
                ..
            }
        ));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn integer_policy() {
        let mut diagnostics = Diagnostics::default();
        let mut cx = context(NumericPolicy::STRICT, &mut diagnostics);
        assert_eq!(encode_integer(&Value::Integer(7), &mut cx).unwrap(), json!(7));
        assert_eq!(decode_integer(&json!("42"), &mut cx).unwrap(), Value::Integer(42));
        assert!(decode_integer(&json!(1.5), &mut cx).is_err());

        let policy = NumericPolicy {
            integer: InvalidValue::Default(-1),
            ..NumericPolicy::STRICT
        };
        let mut cx = context(policy, &mut diagnostics);
        assert_eq!(
            encode_integer(&Value::Unknown("high".to_string()), &mut cx).unwrap(),
            json!(-1)
        );
    }

    #[test]
    fn boolean_forms() {
        assert_eq!(decode_boolean(&json!(true), "x").unwrap(), Value::Boolean(true));
        assert_eq!(decode_boolean(&json!("FALSE"), "x").unwrap(), Value::Boolean(false));
        assert_eq!(decode_boolean(&json!("True"), "x").unwrap(), Value::Boolean(true));
        assert_eq!(decode_boolean(&json!(0), "x").unwrap(), Value::Boolean(false));
        assert_eq!(decode_boolean(&json!(2), "x").unwrap(), Value::Boolean(true));
        assert!(matches!(
            decode_boolean(&json!("yes"), "x"),
            Err(JCalError::MalformedValue { .. })
        ));
        assert!(decode_boolean(&json!(null), "x").is_err());

        assert_eq!(encode_boolean(&Value::Boolean(true), "x").unwrap(), json!(true));
    }

    #[test]
    fn geo_from_malformed_raw() {
        let mut diagnostics = Diagnostics::default();
        let raw = Value::Unknown("37.5;east".to_string());

        let mut cx = context(NumericPolicy::LENIENT, &mut diagnostics);
        assert_eq!(encode_geo(&raw, &mut cx).unwrap(), json!([37.5, 0.0]));

        let mut cx = context(NumericPolicy::STRICT, &mut diagnostics);
        assert!(matches!(
            encode_geo(&raw, &mut cx),
            Err(JCalError::InvalidNumericValue { .. })
        ));

        let mut cx = context(NumericPolicy::LENIENT, &mut diagnostics);
        assert!(matches!(
            encode_geo(&Value::Unknown("37.5".to_string()), &mut cx),
            Err(JCalError::MalformedValue { .. })
        ));
    }

    #[test]
    fn geo_decode_forms() {
        let mut diagnostics = Diagnostics::default();
        let mut cx = context(NumericPolicy::STRICT, &mut diagnostics);
        let expected = Value::Geo {
            latitude: 37.386_013,
            longitude: -122.082_932,
        };
        assert_eq!(
            decode_geo(&json!([37.386_013, -122.082_932]), &mut cx).unwrap(),
            expected
        );
        assert_eq!(
            decode_geo(&json!("37.386013;-122.082932"), &mut cx).unwrap(),
            expected
        );
        assert!(decode_geo(&json!([1.0]), &mut cx).is_err());
    }

    #[test]
    fn request_status_segments() {
        let value = Value::RequestStatus(vec![
            "3.1".to_string(),
            "Invalid property value".to_string(),
            "DTSTART:96-Apr-01".to_string(),
        ]);
        let json = encode_request_status(&value);
        assert_eq!(json, json!(["3.1", "Invalid property value", "DTSTART:96-Apr-01"]));
        assert_eq!(decode_request_status(&json, "request-status").unwrap(), value);

        let raw = Value::Unknown("2.0;Success\\; really".to_string());
        assert_eq!(encode_request_status(&raw), json!(["2.0", "Success; really"]));
    }

    #[test]
    fn binary_is_base64() {
        let value = Value::Binary(b"Hello World".to_vec());
        let json = encode_binary(&value);
        assert_eq!(json, json!("SGVsbG8gV29ybGQ="));
        assert_eq!(decode_binary(&json, "attach").unwrap(), value);
        assert!(matches!(
            decode_binary(&json!("not base64!"), "attach"),
            Err(JCalError::MalformedValue { expected: "binary", .. })
        ));
        assert_eq!(encode_binary(&Value::Text("AAEC".to_string())), json!("AAEC"));
    }
}
