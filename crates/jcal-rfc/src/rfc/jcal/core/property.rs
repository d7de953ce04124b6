//! jCal properties (RFC 7265 §3.4) and their parameters (§3.5).

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value as JsonValue;

use crate::rfc::ical::core::{Parameter, ValueType, param_names};
use crate::rfc::jcal::error::{JCalError, JCalResult};

/// Value of a jCal parameter: a string, or an array for multi-valued
/// parameters such as MEMBER.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Single(String),
    Multi(Vec<String>),
}

impl ParamValue {
    /// Returns the first value.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            Self::Multi(values) => values.first().map(String::as_str),
        }
    }

    #[must_use]
    pub fn to_values(&self) -> Vec<String> {
        match self {
            Self::Single(value) => vec![value.clone()],
            Self::Multi(values) => values.clone(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multi(values)
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Single(value) => serializer.serialize_str(value),
            Self::Multi(values) => values.serialize(serializer),
        }
    }
}

/// Parameters of a jCal property, keyed by lower-case name, in insertion
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JCalParams {
    entries: Vec<(String, ParamValue)>,
}

impl JCalParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts native parameters, lower-casing names and dropping `VALUE`.
    /// A name that appears more than once becomes one multi-valued entry at
    /// the position of its first appearance.
    #[must_use]
    pub fn from_native(params: &[Parameter]) -> Self {
        let mut result = Self::new();
        for param in params.iter().filter(|p| !p.is(param_names::VALUE)) {
            let existing = result
                .entries
                .iter_mut()
                .find(|(key, _)| key.eq_ignore_ascii_case(&param.name));
            match existing {
                Some((_, existing)) => {
                    let mut values = existing.to_values();
                    values.extend(param.values.iter().cloned());
                    *existing = ParamValue::Multi(values);
                }
                None => {
                    let value = match param.values.as_slice() {
                        [single] => ParamValue::Single(single.clone()),
                        values => ParamValue::Multi(values.to_vec()),
                    };
                    result.entries.push((param.name.to_ascii_lowercase(), value));
                }
            }
        }
        result
    }

    /// Converts to native parameters with upper-case names. A `value` entry
    /// is skipped; the converter derives `VALUE` from the type tag.
    #[must_use]
    pub fn to_native(&self) -> Vec<Parameter> {
        self.entries
            .iter()
            .filter(|(name, _)| !name.eq_ignore_ascii_case(param_names::VALUE))
            .map(|(name, value)| Parameter::with_values(name.as_str(), value.to_values()))
            .collect()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// Returns the first value of a parameter.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParamValue::first)
    }

    /// Sets a parameter. An existing entry keeps its position.
    pub fn insert(&mut self, name: &str, value: impl Into<ParamValue>) {
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name.to_ascii_lowercase(), value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        let index = self
            .entries
            .iter()
            .position(|(key, _)| key.eq_ignore_ascii_case(name))?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for JCalParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl TryFrom<&JsonValue> for JCalParams {
    type Error = JCalError;

    fn try_from(json: &JsonValue) -> JCalResult<Self> {
        let JsonValue::Object(object) = json else {
            return Err(JCalError::structure(format!(
                "parameters must be an object, got {json}"
            )));
        };

        let mut params = Self::new();
        for (name, value) in object {
            let value = match value {
                JsonValue::Array(items) => ParamValue::Multi(
                    items
                        .iter()
                        .map(|item| param_scalar(name, item))
                        .collect::<JCalResult<_>>()?,
                ),
                scalar => ParamValue::Single(param_scalar(name, scalar)?),
            };
            params.insert(name, value);
        }
        Ok(params)
    }
}

fn param_scalar(name: &str, json: &JsonValue) -> JCalResult<String> {
    match json {
        JsonValue::String(s) => Ok(s.clone()),
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::Bool(b) => Ok(b.to_string()),
        other => Err(JCalError::structure(format!(
            "parameter {name} has a non-scalar value {other}"
        ))),
    }
}

/// A jCal property: `[name, {params}, type, value, ...]`.
///
/// Multi-valued properties (CATEGORIES, EXDATE, ...) carry one element per
/// value after the type.
#[derive(Debug, Clone, PartialEq)]
pub struct JCalProperty {
    /// Property name (lower case).
    pub name: String,
    pub params: JCalParams,
    pub value_type: ValueType,
    pub values: Vec<JsonValue>,
}

impl JCalProperty {
    /// Creates a single-valued property without parameters.
    #[must_use]
    pub fn new(name: &str, value_type: ValueType, value: JsonValue) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            params: JCalParams::new(),
            value_type,
            values: vec![value],
        }
    }

    #[must_use]
    pub fn with_param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name, value);
        self
    }

    /// Returns the first value.
    #[must_use]
    pub fn value(&self) -> Option<&JsonValue> {
        self.values.first()
    }
}

impl Serialize for JCalProperty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(3 + self.values.len()))?;
        seq.serialize_element(&self.name)?;
        seq.serialize_element(&self.params)?;
        seq.serialize_element(self.value_type.jcal_name())?;
        for value in &self.values {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

impl TryFrom<&JsonValue> for JCalProperty {
    type Error = JCalError;

    fn try_from(json: &JsonValue) -> JCalResult<Self> {
        let Some([name, params, value_type, values @ ..]) = json.as_array().map(Vec::as_slice)
        else {
            return Err(JCalError::structure(format!(
                "property must be an array of at least four elements, got {json}"
            )));
        };
        if values.is_empty() {
            return Err(JCalError::structure(format!("property without a value: {json}")));
        }

        let name = name.as_str().ok_or_else(|| {
            JCalError::structure(format!("property name must be a string: {name}"))
        })?;
        let value_type = value_type.as_str().ok_or_else(|| {
            JCalError::structure(format!("type of {name} must be a string: {value_type}"))
        })?;

        Ok(Self {
            name: name.to_ascii_lowercase(),
            params: JCalParams::try_from(params)?,
            value_type: ValueType::parse(value_type),
            values: values.to_vec(),
        })
    }
}

impl<'de> Deserialize<'de> for JCalProperty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = JsonValue::deserialize(deserializer)?;
        Self::try_from(&json).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_as_array() {
        let property =
            JCalProperty::new("DTSTART", ValueType::DateTime, json!("2024-01-01T09:00:00"))
                .with_param("TZID", "Europe/Berlin");
        assert_eq!(
            serde_json::to_value(&property).unwrap(),
            json!(["dtstart", {"tzid": "Europe/Berlin"}, "date-time", "2024-01-01T09:00:00"])
        );
    }

    #[test]
    fn parses_multi_valued_parameters_and_values() {
        let json = json!([
            "categories",
            {"x-tags": ["a", "b"], "language": "en"},
            "text",
            "FAMILY",
            "FINANCE"
        ]);
        let property = JCalProperty::try_from(&json).unwrap();
        assert_eq!(property.values, vec![json!("FAMILY"), json!("FINANCE")]);
        assert_eq!(
            property.params.get("X-TAGS"),
            Some(&ParamValue::Multi(vec!["a".to_string(), "b".to_string()]))
        );
        assert_eq!(property.params.get_str("language"), Some("en"));
        assert_eq!(serde_json::to_value(&property).unwrap(), json);
    }

    #[test]
    fn repeated_native_parameters_are_merged() {
        let params = JCalParams::from_native(&[
            Parameter::new("MEMBER", "mailto:a@example.com"),
            Parameter::new("CN", "Team"),
            Parameter::value_type("TEXT"),
            Parameter::with_values(
                "member",
                vec!["mailto:b@example.com".to_string(), "mailto:c@example.com".to_string()],
            ),
        ]);

        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "member": ["mailto:a@example.com", "mailto:b@example.com", "mailto:c@example.com"],
                "cn": "Team"
            })
        );
        let native = params.to_native();
        assert_eq!(native.len(), 2);
        assert_eq!(native[0].name, "MEMBER");
        assert_eq!(native[0].values.len(), 3);
    }

    #[test]
    fn unknown_type_names_are_unknown() {
        let json = json!(["x-foo", {}, "x-custom", "abc"]);
        let property = JCalProperty::try_from(&json).unwrap();
        assert_eq!(property.value_type, ValueType::Unknown);
    }

    #[test]
    fn rejects_wrong_shapes() {
        for json in [
            json!("summary"),
            json!(["summary", {}, "text"]),
            json!(["summary", [], "text", "x"]),
            json!([1, {}, "text", "x"]),
            json!(["summary", {"cn": {"nested": true}}, "text", "x"]),
        ] {
            assert!(
                matches!(JCalProperty::try_from(&json), Err(JCalError::InvalidStructure(_))),
                "{json}"
            );
        }
    }

    #[test]
    fn params_keep_position_on_insert() {
        let mut params = JCalParams::from_native(&[
            Parameter::tzid("America/New_York"),
            Parameter::value_type("DATE-TIME"),
            Parameter::new("X-A", "1"),
        ]);
        assert_eq!(params.len(), 2);

        params.insert("tzid", "Europe/Paris");
        let names: Vec<_> = params.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["tzid", "x-a"]);

        assert_eq!(params.remove("TZID"), Some(ParamValue::from("Europe/Paris")));
        assert_eq!(params.to_native(), vec![Parameter::new("X-A", "1")]);
    }
}
