//! Typed property values (RFC 5545 §3.3) and the PERIOD value type (§3.3.9).

use std::fmt;

use super::{Date, DateTime, Duration, RRule, Time, UtcOffset};

/// PERIOD value (RFC 5545 §3.3.9).
///
/// A precise period of time, defined by either:
/// - An explicit start and end
/// - A start and a DURATION
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Period {
    Explicit { start: DateTime, end: DateTime },
    Duration { start: DateTime, duration: Duration },
}

impl Period {
    #[must_use]
    pub fn explicit(start: DateTime, end: DateTime) -> Self {
        Self::Explicit { start, end }
    }

    #[must_use]
    pub fn from_duration(start: DateTime, duration: Duration) -> Self {
        Self::Duration { start, duration }
    }

    /// Returns the start of the period.
    #[must_use]
    pub fn start(&self) -> &DateTime {
        match self {
            Self::Explicit { start, .. } | Self::Duration { start, .. } => start,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit { start, end } => write!(f, "{start}/{end}"),
            Self::Duration { start, duration } => write!(f, "{start}/{duration}"),
        }
    }
}

/// Parsed value of a property.
///
/// The variant set is closed; values the parser could not type are kept as
/// [`Value::Unknown`] with their raw text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// BINARY value, already base64-decoded.
    Binary(Vec<u8>),
    Boolean(bool),
    /// CAL-ADDRESS value (typically a `mailto:` URI).
    CalAddress(String),
    Date(Date),
    DateTime(DateTime),
    Duration(Duration),
    Float(f64),
    Integer(i64),
    Period(Period),
    Recur(Box<RRule>),
    /// TEXT value (unescaped).
    Text(String),
    Time(Time),
    Uri(String),
    UtcOffset(UtcOffset),
    /// GEO property value: two FLOATs.
    Geo { latitude: f64, longitude: f64 },
    /// REQUEST-STATUS property value: code, description and optional extra
    /// data, unescaped.
    RequestStatus(Vec<String>),
    /// Comma-separated list of values (EXDATE, RDATE, CATEGORIES, ...).
    List(Vec<Value>),
    /// Unknown or unparsed value, kept verbatim.
    Unknown(String),
}

impl Value {
    /// Returns this value as text, if it is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_recur(&self) -> Option<&RRule> {
        match self {
            Self::Recur(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the elements of a list value.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }

    /// Returns whether this is an unknown/unparsed value.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}
