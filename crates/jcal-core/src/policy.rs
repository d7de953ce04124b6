//! Invalid numeric value policy.
//!
//! FLOAT and INTEGER values that fail to parse either raise an error or are
//! replaced by a configured default. The active policy is process-wide and
//! only changes when a caller swaps it with [`set_numeric_policy`].

use std::fmt;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CoreError, CoreResult};

/// Keyword selecting the raising behaviour.
pub const RAISE_KEYWORD: &str = "raise";

/// What to do with a single malformed numeric value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvalidValue<T> {
    /// Fail the conversion.
    Raise,
    /// Substitute the given value and carry on.
    Default(T),
}

impl<T: Copy> InvalidValue<T> {
    /// Returns the substitute value, or `None` when the policy raises.
    #[must_use]
    pub fn substitute(self) -> Option<T> {
        match self {
            Self::Raise => None,
            Self::Default(value) => Some(value),
        }
    }
}

impl<T: FromStr> FromStr for InvalidValue<T> {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(RAISE_KEYWORD) {
            return Ok(Self::Raise);
        }
        trimmed.parse().map(Self::Default).map_err(|_parse_error| {
            CoreError::InvalidPolicy(format!(
                "expected \"{RAISE_KEYWORD}\" or a numeric default, got {s:?}"
            ))
        })
    }
}

impl<T: fmt::Display> fmt::Display for InvalidValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raise => f.write_str(RAISE_KEYWORD),
            Self::Default(value) => write!(f, "{value}"),
        }
    }
}

impl<T: Serialize> Serialize for InvalidValue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Raise => serializer.serialize_str(RAISE_KEYWORD),
            Self::Default(value) => value.serialize(serializer),
        }
    }
}

/// Wire shape of a policy entry: a literal default or a keyword.
#[derive(Deserialize)]
#[serde(untagged)]
enum Repr<T> {
    Literal(T),
    Keyword(String),
}

impl<'de, T> Deserialize<'de> for InvalidValue<T>
where
    T: Deserialize<'de> + FromStr,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Repr::<T>::deserialize(deserializer)? {
            Repr::Literal(value) => Ok(Self::Default(value)),
            Repr::Keyword(keyword) => keyword.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Per-type handling of malformed FLOAT and INTEGER values.
///
/// Deserializes from a mapping such as `{"float": 0.0, "integer": "raise"}`.
/// Missing entries raise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NumericPolicy {
    pub float: InvalidValue<f64>,
    pub integer: InvalidValue<i64>,
}

impl NumericPolicy {
    /// Raise on every malformed numeric value.
    pub const STRICT: Self = Self {
        float: InvalidValue::Raise,
        integer: InvalidValue::Raise,
    };

    /// Substitute `0.0` for floats and `0` for integers.
    pub const LENIENT: Self = Self {
        float: InvalidValue::Default(0.0),
        integer: InvalidValue::Default(0),
    };
}

impl Default for NumericPolicy {
    fn default() -> Self {
        Self::STRICT
    }
}

static NUMERIC_POLICY: RwLock<NumericPolicy> = RwLock::new(NumericPolicy::STRICT);

/// Returns a snapshot of the process-wide numeric policy.
#[must_use]
pub fn numeric_policy() -> NumericPolicy {
    *NUMERIC_POLICY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Replaces the process-wide numeric policy, returning the previous one.
///
/// Conversions that already took their snapshot are unaffected.
pub fn set_numeric_policy(policy: NumericPolicy) -> NumericPolicy {
    let mut guard = NUMERIC_POLICY
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    let previous = std::mem::replace(&mut *guard, policy);
    tracing::debug!(?previous, current = ?policy, "Numeric policy replaced");
    previous
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_parses_case_insensitively() {
        assert_eq!("RAISE".parse::<InvalidValue<f64>>().unwrap(), InvalidValue::Raise);
        assert_eq!(
            " 1.5 ".parse::<InvalidValue<f64>>().unwrap(),
            InvalidValue::Default(1.5)
        );
        assert!("sometimes".parse::<InvalidValue<i64>>().is_err());
    }

    #[test]
    fn deserialize_mapping() {
        let policy: NumericPolicy =
            serde_json::from_value(serde_json::json!({"float": 0.0, "integer": "raise"}))
                .unwrap();
        assert_eq!(policy.float, InvalidValue::Default(0.0));
        assert_eq!(policy.integer, InvalidValue::Raise);
    }

    #[test]
    fn deserialize_partial_mapping_raises_for_missing() {
        let policy: NumericPolicy =
            serde_json::from_value(serde_json::json!({"integer": 7})).unwrap();
        assert_eq!(policy.float, InvalidValue::Raise);
        assert_eq!(policy.integer, InvalidValue::Default(7));
    }

    #[test]
    fn deserialize_rejects_unknown_types() {
        let result: Result<NumericPolicy, _> =
            serde_json::from_value(serde_json::json!({"double": 0.0}));
        assert!(result.is_err());
    }

    #[test]
    fn serialize_round_trip() {
        let value = serde_json::to_value(NumericPolicy::LENIENT).unwrap();
        assert_eq!(value, serde_json::json!({"float": 0.0, "integer": 0}));

        let value = serde_json::to_value(NumericPolicy::STRICT).unwrap();
        assert_eq!(value, serde_json::json!({"float": "raise", "integer": "raise"}));
    }

    #[test_log::test]
    fn swap_process_policy() {
        let previous = set_numeric_policy(NumericPolicy::LENIENT);
        assert_eq!(numeric_policy(), NumericPolicy::LENIENT);
        set_numeric_policy(previous);
        assert_eq!(numeric_policy(), previous);
    }
}
