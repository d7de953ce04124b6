use serde_json::Value as JsonValue;

use super::Converter;
use crate::rfc::ical::build::serialize_value;
use crate::rfc::ical::core::{Parameter, Property, Value, ValueType, is_multi_valued, param_names};
use crate::rfc::jcal::codec::{self, CodecContext};
use crate::rfc::jcal::core::{JCalParams, JCalProperty};
use crate::rfc::jcal::diagnostics::Diagnostic;
use crate::rfc::jcal::error::{JCalError, JCalResult};
use crate::rfc::jcal::infer::{Codec, default_codec, infer, infer_from_jcal};

impl Converter {
    /// ## Summary
    /// Converts a native property to a jCal property.
    ///
    /// Parameter names are lower-cased and `VALUE` is consumed by inference.
    /// A value list (CATEGORIES, EXDATE, ...) becomes one jCal property with
    /// one value element per entry; if the entries infer to different types
    /// the first type is used and a [`Diagnostic::MixedValueTypes`] is
    /// recorded.
    ///
    /// ## Errors
    /// Returns an error if a value does not fit its inferred type, or a
    /// numeric value is malformed and the policy raises.
    pub fn property_to_jcal(&mut self, property: &Property) -> JCalResult<JCalProperty> {
        let name = property.name.to_ascii_lowercase();
        let explicit = property.value_type();
        let mut params = JCalParams::from_native(&property.params);

        let elements = match &property.value {
            Value::List(items) => items.as_slice(),
            single => std::slice::from_ref(single),
        };

        let mut cx = CodecContext {
            property: &name,
            policy: self.policy,
            diagnostics: &mut self.diagnostics,
        };
        let mut tag: Option<ValueType> = None;
        let mut values = Vec::with_capacity(elements.len());

        for element in elements {
            let codec = infer(&property.name, explicit, element);
            if codec.tag() == ValueType::Unknown && explicit.is_none() {
                cx.diagnostics.record(Diagnostic::UnrecognizedNativeType {
                    property: name.clone(),
                    value: serialize_value(element),
                });
            }

            values.push(codec::encode(codec, element, &mut params, &mut cx)?);

            match tag {
                None => tag = Some(codec.tag()),
                Some(used) if used != codec.tag() => {
                    cx.diagnostics.record(Diagnostic::MixedValueTypes {
                        property: name.clone(),
                        used,
                        found: codec.tag(),
                    });
                }
                Some(_) => {}
            }
        }

        let value_type =
            tag.ok_or_else(|| JCalError::malformed(&name, "non-empty", "empty value list"))?;
        tracing::trace!(
            property = %name,
            value_type = value_type.jcal_name(),
            "Converted property to jCal"
        );

        Ok(JCalProperty {
            name,
            params,
            value_type,
            values,
        })
    }

    /// ## Summary
    /// Converts a jCal property to a native property.
    ///
    /// Parameter names are upper-cased. `VALUE=<TYPE>` is added when the tag
    /// differs from the property's default type, so that the calendar text
    /// parses back to the same type. BINARY values also get
    /// `ENCODING=BASE64` when it is missing.
    ///
    /// An element of a multi-valued property that does not fit the tag is
    /// decoded by its shape (date, then date-time, then period). Such a list
    /// gets no `VALUE`, so each element is typed by its shape when the text
    /// is parsed again.
    ///
    /// ## Errors
    /// Returns an error if a value does not match the grammar of its tag, or a
    /// numeric value is malformed and the policy raises.
    pub fn property_from_jcal(&mut self, jcal: &JCalProperty) -> JCalResult<Property> {
        let codec = infer_from_jcal(&jcal.name, jcal.value_type);
        let tag = codec.tag();
        let multi_valued = is_multi_valued(&jcal.name);

        let mut cx = CodecContext {
            property: &jcal.name,
            policy: self.policy,
            diagnostics: &mut self.diagnostics,
        };
        let mut uniform = true;
        let mut values = Vec::with_capacity(jcal.values.len());

        for json in &jcal.values {
            let value = match codec::decode(codec, json, &jcal.params, &mut cx) {
                Ok(value) => value,
                Err(err) if multi_valued => {
                    let (found, value) =
                        decode_by_shape(json, &jcal.params, &mut cx).ok_or(err)?;
                    cx.diagnostics.record(Diagnostic::MixedValueTypes {
                        property: jcal.name.clone(),
                        used: tag,
                        found,
                    });
                    uniform = false;
                    value
                }
                Err(err) => return Err(err),
            };
            values.push(value);
        }

        let value = if multi_valued {
            Value::List(values)
        } else {
            match <[Value; 1]>::try_from(values) {
                Ok([single]) => single,
                Err(values) => Value::List(values),
            }
        };

        let mut params = jcal.params.to_native();
        if tag == ValueType::Binary && !params.iter().any(|p| p.is(param_names::ENCODING)) {
            params.push(Parameter::new(param_names::ENCODING, "BASE64"));
        }
        if uniform && needs_value_param(&jcal.name, codec) {
            params.push(Parameter::value_type(tag.as_str()));
        }

        tracing::trace!(
            property = %jcal.name,
            value_type = tag.jcal_name(),
            uniform,
            "Converted property from jCal"
        );

        Ok(Property::new(&jcal.name, params, value))
    }
}

/// Shapes a date list element may take, in the order they are tried.
const LIST_SHAPES: [ValueType; 3] = [ValueType::Date, ValueType::DateTime, ValueType::Period];

/// Decodes a list element that did not fit the property's tag.
fn decode_by_shape(
    json: &JsonValue,
    params: &JCalParams,
    cx: &mut CodecContext<'_>,
) -> Option<(ValueType, Value)> {
    for shape in LIST_SHAPES {
        if let Ok(value) = codec::decode(Codec::Scalar(shape), json, params, cx) {
            return Some((shape, value));
        }
    }
    None
}

/// `VALUE` is needed when the tag differs from the default type. Properties
/// without a default parse as TEXT; `unknown` is never written.
fn needs_value_param(name: &str, codec: Codec) -> bool {
    let tag = codec.tag();
    let default = default_codec(name).map_or(ValueType::Text, Codec::tag);
    tag != ValueType::Unknown && tag != default
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::ical::core::{Date, DateTime, Period};
    use jcal_core::policy::NumericPolicy;
    use serde_json::json;

    fn to_json(converter: &mut Converter, property: &Property) -> serde_json::Value {
        serde_json::to_value(converter.property_to_jcal(property).unwrap()).unwrap()
    }

    #[test]
    fn value_param_is_consumed() {
        let mut converter = Converter::with_policy(NumericPolicy::STRICT);
        let property = Property::date("DTSTART", Date::new(2024, 1, 1));
        assert_eq!(
            to_json(&mut converter, &property),
            json!(["dtstart", {}, "date", "2024-01-01"])
        );
    }

    #[test]
    fn value_param_is_injected_for_non_default_types() {
        let mut converter = Converter::with_policy(NumericPolicy::STRICT);

        let jcal = JCalProperty::new("dtstart", ValueType::Date, json!("2024-01-01"));
        let property = converter.property_from_jcal(&jcal).unwrap();
        assert_eq!(property.name, "DTSTART");
        assert_eq!(property.value_type(), Some("DATE"));

        let jcal = JCalProperty::new("dtstart", ValueType::DateTime, json!("2024-01-01T00:00:00Z"));
        let property = converter.property_from_jcal(&jcal).unwrap();
        assert!(property.params.is_empty());

        let jcal = JCalProperty::new("x-count", ValueType::Integer, json!(3));
        let property = converter.property_from_jcal(&jcal).unwrap();
        assert_eq!(property.value_type(), Some("INTEGER"));
    }

    #[test]
    fn value_param_is_never_injected_for_text_or_unknown_extensions() {
        let mut converter = Converter::with_policy(NumericPolicy::STRICT);
        for jcal in [
            JCalProperty::new("x-note", ValueType::Text, json!("hi")),
            JCalProperty::new("x-raw", ValueType::Unknown, json!("a;b")),
            JCalProperty::new("summary", ValueType::Unknown, json!("x")),
        ] {
            let property = converter.property_from_jcal(&jcal).unwrap();
            assert!(property.params.is_empty(), "{}", jcal.name);
        }
    }

    #[test]
    fn geo_override_keeps_compound_value() {
        let mut converter = Converter::with_policy(NumericPolicy::STRICT);
        let property = Property::new(
            "GEO",
            vec![Parameter::value_type("FLOAT")],
            Value::Geo {
                latitude: 37.5,
                longitude: -122.25,
            },
        );
        let jcal = converter.property_to_jcal(&property).unwrap();
        assert_eq!(
            serde_json::to_value(&jcal).unwrap(),
            json!(["geo", {}, "float", [37.5, -122.25]])
        );

        let back = converter.property_from_jcal(&jcal).unwrap();
        assert!(back.params.is_empty());
        assert_eq!(back.value, property.value);
    }

    #[test]
    fn request_status_has_no_value_param() {
        let mut converter = Converter::with_policy(NumericPolicy::STRICT);
        let jcal = JCalProperty::new("request-status", ValueType::Text, json!(["2.0", "Success"]));
        let property = converter.property_from_jcal(&jcal).unwrap();
        assert!(property.params.is_empty());
        assert_eq!(
            property.value,
            Value::RequestStatus(vec!["2.0".to_string(), "Success".to_string()])
        );
    }

    #[test]
    fn binary_gets_encoding() {
        let mut converter = Converter::with_policy(NumericPolicy::STRICT);
        let jcal = JCalProperty::new("attach", ValueType::Binary, json!("SGVsbG8="));
        let property = converter.property_from_jcal(&jcal).unwrap();
        assert_eq!(
            property.params,
            vec![
                Parameter::new("ENCODING", "BASE64"),
                Parameter::value_type("BINARY")
            ]
        );
        assert_eq!(property.value, Value::Binary(b"Hello".to_vec()));
    }

    #[test]
    fn lists_become_one_property() {
        let mut converter = Converter::with_policy(NumericPolicy::STRICT);
        let property = Property::new(
            "CATEGORIES",
            Vec::new(),
            Value::List(vec![
                Value::Text("FAMILY".to_string()),
                Value::Text("FINANCE".to_string()),
            ]),
        );
        let jcal = converter.property_to_jcal(&property).unwrap();
        assert_eq!(
            serde_json::to_value(&jcal).unwrap(),
            json!(["categories", {}, "text", "FAMILY", "FINANCE"])
        );
        assert_eq!(converter.property_from_jcal(&jcal).unwrap(), property);
    }

    #[test_log::test]
    fn mixed_list_uses_first_type() {
        let mut converter = Converter::with_policy(NumericPolicy::STRICT);
        let start = DateTime::utc(Date::new(2024, 1, 1), 9, 0, 0);
        let property = Property::new(
            "RDATE",
            Vec::new(),
            Value::List(vec![
                Value::Date(Date::new(2024, 1, 1)),
                Value::Period(Period::explicit(start.clone(), start)),
            ]),
        );

        let jcal = converter.property_to_jcal(&property).unwrap();
        assert_eq!(jcal.value_type, ValueType::Date);
        assert_eq!(jcal.values.len(), 2);
        let mixed = Diagnostic::MixedValueTypes {
            property: "rdate".to_string(),
            used: ValueType::Date,
            found: ValueType::Period,
        };
        assert_eq!(converter.take_diagnostics(), vec![mixed.clone()]);

        let back = converter.property_from_jcal(&jcal).unwrap();
        assert!(back.params.is_empty());
        assert_eq!(back.value, property.value);
        assert_eq!(converter.diagnostics(), &[mixed]);
    }

    #[test]
    fn mixed_elements_of_single_valued_properties_are_errors() {
        let mut converter = Converter::with_policy(NumericPolicy::STRICT);
        let jcal = JCalProperty::new("dtstart", ValueType::Date, json!("2024-01-02T09:00:00Z"));
        assert!(matches!(
            converter.property_from_jcal(&jcal),
            Err(JCalError::MalformedValue { expected: "date", .. })
        ));
    }

    #[test]
    fn list_element_of_no_known_shape_keeps_tag_error() {
        let mut converter = Converter::with_policy(NumericPolicy::STRICT);
        let mut jcal = JCalProperty::new("exdate", ValueType::DateTime, json!("2024-01-01T09:00:00Z"));
        jcal.values.push(json!("tomorrow"));
        assert!(matches!(
            converter.property_from_jcal(&jcal),
            Err(JCalError::MalformedValue { expected: "date-time", .. })
        ));
    }

    #[test_log::test]
    fn unrecognized_value_is_kept_verbatim() {
        let mut converter = Converter::with_policy(NumericPolicy::STRICT);
        let property = Property::new("X-RAW", Vec::new(), Value::Unknown("a;b".to_string()));

        assert_eq!(
            to_json(&mut converter, &property),
            json!(["x-raw", {}, "unknown", "a;b"])
        );
        assert!(matches!(
            converter.take_diagnostics().as_slice(),
            [Diagnostic::UnrecognizedNativeType { .. }]
        ));
        assert!(converter.diagnostics().is_empty());
    }

    #[test]
    fn empty_list_is_rejected() {
        let mut converter = Converter::with_policy(NumericPolicy::STRICT);
        let property = Property::new("CATEGORIES", Vec::new(), Value::List(Vec::new()));
        assert!(converter.property_to_jcal(&property).is_err());
    }
}
