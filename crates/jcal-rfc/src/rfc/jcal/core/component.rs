//! jCal components (RFC 7265 §3.3) and top-level documents.

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde_json::Value as JsonValue;

use super::JCalProperty;
use crate::rfc::jcal::error::{JCalError, JCalResult};

/// A jCal component: `[name, [properties], [components]]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JCalComponent {
    /// Component name (lower case).
    pub name: String,
    pub properties: Vec<JCalProperty>,
    pub components: Vec<JCalComponent>,
}

impl JCalComponent {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            properties: Vec::new(),
            components: Vec::new(),
        }
    }

    /// Returns the first property with the given name (case-insensitive).
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&JCalProperty> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

impl Serialize for JCalComponent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(3))?;
        seq.serialize_element(&self.name)?;
        seq.serialize_element(&self.properties)?;
        seq.serialize_element(&self.components)?;
        seq.end()
    }
}

impl TryFrom<&JsonValue> for JCalComponent {
    type Error = JCalError;

    fn try_from(json: &JsonValue) -> JCalResult<Self> {
        let Some([name, properties, components]) = json.as_array().map(Vec::as_slice) else {
            return Err(JCalError::structure(format!(
                "component must be a three-element array, got {json}"
            )));
        };
        let name = name.as_str().ok_or_else(|| {
            JCalError::structure(format!("component name must be a string: {name}"))
        })?;

        let properties = properties
            .as_array()
            .ok_or_else(|| JCalError::structure(format!("properties of {name} must be an array")))?
            .iter()
            .map(JCalProperty::try_from)
            .collect::<JCalResult<_>>()?;
        let components = components
            .as_array()
            .ok_or_else(|| JCalError::structure(format!("components of {name} must be an array")))?
            .iter()
            .map(Self::try_from)
            .collect::<JCalResult<_>>()?;

        Ok(Self {
            name: name.to_ascii_lowercase(),
            properties,
            components,
        })
    }
}

impl<'de> Deserialize<'de> for JCalComponent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = JsonValue::deserialize(deserializer)?;
        Self::try_from(&json).map_err(de::Error::custom)
    }
}

/// A top-level jCal document: one component, or an array of components.
///
/// A conversion producing exactly one component yields [`JCal::Single`].
#[derive(Debug, Clone, PartialEq)]
pub enum JCal {
    Single(JCalComponent),
    Many(Vec<JCalComponent>),
}

impl JCal {
    /// Wraps converted components, collapsing a single one.
    #[must_use]
    pub fn from_components(mut components: Vec<JCalComponent>) -> Self {
        if components.len() == 1
            && let Some(component) = components.pop()
        {
            return Self::Single(component);
        }
        Self::Many(components)
    }

    #[must_use]
    pub fn components(&self) -> &[JCalComponent] {
        match self {
            Self::Single(component) => std::slice::from_ref(component),
            Self::Many(components) => components,
        }
    }

    #[must_use]
    pub fn into_components(self) -> Vec<JCalComponent> {
        match self {
            Self::Single(component) => vec![component],
            Self::Many(components) => components,
        }
    }
}

impl Serialize for JCal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Single(component) => component.serialize(serializer),
            Self::Many(components) => components.serialize(serializer),
        }
    }
}

impl TryFrom<&JsonValue> for JCal {
    type Error = JCalError;

    /// A top-level array whose first element is a string is one component;
    /// otherwise every element must be a component.
    fn try_from(json: &JsonValue) -> JCalResult<Self> {
        let items = json
            .as_array()
            .ok_or_else(|| JCalError::structure(format!("jCal must be an array, got {json}")))?;

        match items.first() {
            None => Err(JCalError::structure("empty jCal document")),
            Some(JsonValue::String(_)) => JCalComponent::try_from(json).map(Self::Single),
            Some(_) => items
                .iter()
                .map(JCalComponent::try_from)
                .collect::<JCalResult<_>>()
                .map(Self::Many),
        }
    }
}

impl<'de> Deserialize<'de> for JCal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = JsonValue::deserialize(deserializer)?;
        Self::try_from(&json).map_err(de::Error::custom)
    }
}
