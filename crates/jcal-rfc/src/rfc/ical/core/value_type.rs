//! iCalendar value data types (RFC 5545 §3.3) and property defaults.

use std::fmt;

/// Value data type of a property.
///
/// The set is closed: anything that is not one of the RFC 5545 value types
/// (including x-name and iana-token types) is [`ValueType::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Binary,
    Boolean,
    CalAddress,
    Date,
    DateTime,
    Duration,
    Float,
    Integer,
    Period,
    Recur,
    Text,
    Time,
    Uri,
    UtcOffset,
    Unknown,
}

impl ValueType {
    /// Every value type, in RFC 5545 section order.
    pub const ALL: [Self; 15] = [
        Self::Binary,
        Self::Boolean,
        Self::CalAddress,
        Self::Date,
        Self::DateTime,
        Self::Duration,
        Self::Float,
        Self::Integer,
        Self::Period,
        Self::Recur,
        Self::Text,
        Self::Time,
        Self::Uri,
        Self::UtcOffset,
        Self::Unknown,
    ];

    /// Returns the `VALUE` parameter spelling (upper case).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "BINARY",
            Self::Boolean => "BOOLEAN",
            Self::CalAddress => "CAL-ADDRESS",
            Self::Date => "DATE",
            Self::DateTime => "DATE-TIME",
            Self::Duration => "DURATION",
            Self::Float => "FLOAT",
            Self::Integer => "INTEGER",
            Self::Period => "PERIOD",
            Self::Recur => "RECUR",
            Self::Text => "TEXT",
            Self::Time => "TIME",
            Self::Uri => "URI",
            Self::UtcOffset => "UTC-OFFSET",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Returns the jCal type identifier (lower case).
    #[must_use]
    pub const fn jcal_name(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Boolean => "boolean",
            Self::CalAddress => "cal-address",
            Self::Date => "date",
            Self::DateTime => "date-time",
            Self::Duration => "duration",
            Self::Float => "float",
            Self::Integer => "integer",
            Self::Period => "period",
            Self::Recur => "recur",
            Self::Text => "text",
            Self::Time => "time",
            Self::Uri => "uri",
            Self::UtcOffset => "utc-offset",
            Self::Unknown => "unknown",
        }
    }

    /// Parses a type name in either spelling (case-insensitive).
    ///
    /// Unrecognized names map to [`ValueType::Unknown`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .unwrap_or(Self::Unknown)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default value types of the RFC 5545 / RFC 7986 properties.
///
/// GEO and REQUEST-STATUS are compound values whose parts are FLOAT and TEXT.
pub const DEFAULT_VALUE_TYPES: &[(&str, ValueType)] = &[
    // Calendar properties
    ("CALSCALE", ValueType::Text),
    ("METHOD", ValueType::Text),
    ("PRODID", ValueType::Text),
    ("VERSION", ValueType::Text),
    // Descriptive
    ("ATTACH", ValueType::Uri),
    ("CATEGORIES", ValueType::Text),
    ("CLASS", ValueType::Text),
    ("COMMENT", ValueType::Text),
    ("DESCRIPTION", ValueType::Text),
    ("GEO", ValueType::Float),
    ("LOCATION", ValueType::Text),
    ("PERCENT-COMPLETE", ValueType::Integer),
    ("PRIORITY", ValueType::Integer),
    ("RESOURCES", ValueType::Text),
    ("STATUS", ValueType::Text),
    ("SUMMARY", ValueType::Text),
    // Date and time
    ("COMPLETED", ValueType::DateTime),
    ("DTEND", ValueType::DateTime),
    ("DUE", ValueType::DateTime),
    ("DTSTART", ValueType::DateTime),
    ("DURATION", ValueType::Duration),
    ("FREEBUSY", ValueType::Period),
    ("TRANSP", ValueType::Text),
    // Time zone
    ("TZID", ValueType::Text),
    ("TZNAME", ValueType::Text),
    ("TZOFFSETFROM", ValueType::UtcOffset),
    ("TZOFFSETTO", ValueType::UtcOffset),
    ("TZURL", ValueType::Uri),
    // Relationship
    ("ATTENDEE", ValueType::CalAddress),
    ("CONTACT", ValueType::Text),
    ("ORGANIZER", ValueType::CalAddress),
    ("RECURRENCE-ID", ValueType::DateTime),
    ("RELATED-TO", ValueType::Text),
    ("URL", ValueType::Uri),
    ("UID", ValueType::Text),
    // Recurrence
    ("EXDATE", ValueType::DateTime),
    ("EXRULE", ValueType::Recur),
    ("RDATE", ValueType::DateTime),
    ("RRULE", ValueType::Recur),
    // Alarm
    ("ACTION", ValueType::Text),
    ("REPEAT", ValueType::Integer),
    ("TRIGGER", ValueType::Duration),
    // Change management
    ("CREATED", ValueType::DateTime),
    ("DTSTAMP", ValueType::DateTime),
    ("LAST-MODIFIED", ValueType::DateTime),
    ("SEQUENCE", ValueType::Integer),
    // Miscellaneous
    ("REQUEST-STATUS", ValueType::Text),
    // RFC 7986
    ("COLOR", ValueType::Text),
    ("CONFERENCE", ValueType::Uri),
    ("IMAGE", ValueType::Uri),
    ("NAME", ValueType::Text),
    ("REFRESH-INTERVAL", ValueType::Duration),
    ("SOURCE", ValueType::Uri),
];

/// Returns the default value type of a property (case-insensitive).
///
/// Returns `None` for x-name and unregistered properties.
#[must_use]
pub fn default_value_type(property_name: &str) -> Option<ValueType> {
    DEFAULT_VALUE_TYPES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(property_name))
        .map(|&(_, value_type)| value_type)
}

/// Returns whether a property carries a comma-separated list of values.
#[must_use]
pub fn is_multi_valued(property_name: &str) -> bool {
    ["CATEGORIES", "RESOURCES", "EXDATE", "RDATE", "FREEBUSY"]
        .iter()
        .any(|name| name.eq_ignore_ascii_case(property_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_both_spellings() {
        assert_eq!(ValueType::parse("DATE-TIME"), ValueType::DateTime);
        assert_eq!(ValueType::parse("date-time"), ValueType::DateTime);
        assert_eq!(ValueType::parse("utc-offset"), ValueType::UtcOffset);
        assert_eq!(ValueType::parse("X-CUSTOM"), ValueType::Unknown);
    }

    #[test]
    fn names_agree() {
        for value_type in ValueType::ALL {
            assert_eq!(
                value_type.as_str().to_ascii_lowercase(),
                value_type.jcal_name()
            );
        }
    }

    #[test]
    fn defaults() {
        assert_eq!(default_value_type("dtstart"), Some(ValueType::DateTime));
        assert_eq!(default_value_type("GEO"), Some(ValueType::Float));
        assert_eq!(default_value_type("TZOFFSETTO"), Some(ValueType::UtcOffset));
        assert_eq!(default_value_type("X-WR-CALNAME"), None);
    }
}
