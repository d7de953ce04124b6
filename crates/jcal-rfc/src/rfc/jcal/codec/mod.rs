//! Value codecs: native [`Value`]s to jCal JSON values and back.
//!
//! - Temporal: DATE, TIME, DATE-TIME, DURATION, PERIOD, UTC-OFFSET
//! - Scalar: BOOLEAN, FLOAT, INTEGER, text-like types, BINARY, GEO,
//!   REQUEST-STATUS
//! - Recur: RECUR rules as jCal objects
//!
//! Dispatch is a match over [`Codec`]; there is no runtime registry. A value
//! whose native shape does not match the selected codec is rendered as
//! calendar text and re-parsed with the calendar parser.

pub mod recur;
mod scalar;
pub mod temporal;

use jcal_core::policy::NumericPolicy;
use serde_json::Value as JsonValue;

use super::core::JCalParams;
use super::diagnostics::Diagnostics;
use super::error::{JCalError, JCalResult};
use super::infer::Codec;
use crate::rfc::ical::build::serialize_value;
use crate::rfc::ical::core::{Value, ValueType};

/// What a codec needs besides the value: the property it belongs to (for
/// error attribution), the numeric policy and the diagnostics sink.
pub struct CodecContext<'a> {
    pub property: &'a str,
    pub policy: NumericPolicy,
    pub diagnostics: &'a mut Diagnostics,
}

/// Converts one native value to its jCal form.
///
/// Date-time, time and period codecs add or remove the `tzid` parameter in
/// `params`.
///
/// ## Errors
/// Returns an error if the value does not fit the codec, or a numeric value
/// is malformed and the policy raises.
pub fn encode(
    codec: Codec,
    value: &Value,
    params: &mut JCalParams,
    cx: &mut CodecContext<'_>,
) -> JCalResult<JsonValue> {
    let property = cx.property;
    match codec {
        Codec::Geo => scalar::encode_geo(value, cx),
        Codec::RequestStatus => Ok(scalar::encode_request_status(value)),
        Codec::Scalar(value_type) => match value_type {
            ValueType::Date => temporal::encode_date(value, property),
            ValueType::DateTime => temporal::encode_datetime(value, params, property),
            ValueType::Time => temporal::encode_time(value, params, property),
            ValueType::Duration => temporal::encode_duration(value, property),
            ValueType::Period => temporal::encode_period(value, params, property),
            ValueType::UtcOffset => temporal::encode_utc_offset(value, property),
            ValueType::Recur => recur::encode(value, property),
            ValueType::Boolean => scalar::encode_boolean(value, property),
            ValueType::Float => scalar::encode_float(value, cx),
            ValueType::Integer => scalar::encode_integer(value, cx),
            ValueType::Binary => Ok(scalar::encode_binary(value)),
            ValueType::Text | ValueType::Uri | ValueType::CalAddress | ValueType::Unknown => {
                Ok(scalar::encode_text(value))
            }
        },
    }
}

/// Converts one jCal value to a native value.
///
/// Date-time and period codecs read the `tzid` parameter from `params`.
///
/// ## Errors
/// Returns an error if the JSON value does not match the codec's grammar, or
/// a numeric value is malformed and the policy raises.
pub fn decode(
    codec: Codec,
    json: &JsonValue,
    params: &JCalParams,
    cx: &mut CodecContext<'_>,
) -> JCalResult<Value> {
    let property = cx.property;
    match codec {
        Codec::Geo => scalar::decode_geo(json, cx),
        Codec::RequestStatus => scalar::decode_request_status(json, property),
        Codec::Scalar(value_type) => match value_type {
            ValueType::Date => temporal::decode_date(json, property),
            ValueType::DateTime => temporal::decode_datetime(json, params, property),
            ValueType::Time => temporal::decode_time(json, property),
            ValueType::Duration => temporal::decode_duration(json, property),
            ValueType::Period => temporal::decode_period(json, params, property),
            ValueType::UtcOffset => temporal::decode_utc_offset(json, property),
            ValueType::Recur => recur::decode(json, property),
            ValueType::Boolean => scalar::decode_boolean(json, property),
            ValueType::Float => scalar::decode_float(json, cx),
            ValueType::Integer => scalar::decode_integer(json, cx),
            ValueType::Binary => scalar::decode_binary(json, property),
            ValueType::Text => scalar::decode_string(json, property, "text").map(Value::Text),
            ValueType::Uri => scalar::decode_string(json, property, "uri").map(Value::Uri),
            ValueType::CalAddress => {
                scalar::decode_string(json, property, "cal-address").map(Value::CalAddress)
            }
            ValueType::Unknown => Ok(scalar::decode_unknown(json)),
        },
    }
}

/// Calendar text form of a value, for codecs handed a value of another shape.
fn native_text(value: &Value) -> String {
    match value {
        Value::Text(s) | Value::Unknown(s) => s.clone(),
        other => serialize_value(other),
    }
}

fn expect_str<'a>(
    json: &'a JsonValue,
    property: &str,
    expected: &'static str,
) -> JCalResult<&'a str> {
    json.as_str()
        .ok_or_else(|| JCalError::malformed(property, expected, json))
}
