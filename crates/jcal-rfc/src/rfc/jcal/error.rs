//! jCal conversion errors.

use thiserror::Error;

use crate::rfc::ical::core::ValueType;

/// Result type for jCal conversions.
pub type JCalResult<T> = Result<T, JCalError>;

/// Fatal conversion failures.
///
/// Every variant names the property it came from so a failure inside a large
/// document can be attributed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JCalError {
    /// A value does not match the grammar of its type.
    #[error("Malformed {expected} value in {property}: {value}")]
    MalformedValue {
        property: String,
        expected: &'static str,
        value: String,
    },

    /// A recurrence rule part has the wrong arity or type.
    #[error("Invalid recurrence field {field} in {property}: {reason}")]
    InvalidRecurrenceField {
        property: String,
        field: String,
        reason: String,
    },

    /// A FLOAT or INTEGER failed to parse and the numeric policy raises.
    #[error("Invalid {value_type} value in {property}: {value}")]
    InvalidNumericValue {
        property: String,
        value_type: ValueType,
        value: String,
    },

    /// The jCal document does not have the RFC 7265 array shape.
    #[error("Invalid jCal structure: {0}")]
    InvalidStructure(String),
}

impl JCalError {
    #[must_use]
    pub fn malformed(property: &str, expected: &'static str, value: impl ToString) -> Self {
        Self::MalformedValue {
            property: property.to_string(),
            expected,
            value: value.to_string(),
        }
    }

    #[must_use]
    pub fn recurrence(property: &str, field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidRecurrenceField {
            property: property.to_string(),
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure(message.into())
    }
}
