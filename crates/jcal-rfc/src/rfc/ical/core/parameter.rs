//! iCalendar property parameters (RFC 5545 §3.2).

/// A single property parameter, e.g. `TZID=America/New_York`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name (normalized to uppercase).
    pub name: String,
    /// Parameter values. Most parameters have one value; some (MEMBER,
    /// DELEGATED-TO, ...) carry a comma-separated list.
    pub values: Vec<String>,
}

impl Parameter {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_values(name, vec![value.into()])
    }

    #[must_use]
    pub fn with_values(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values,
        }
    }

    /// Returns the first (and usually only) value.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Returns whether the parameter has the given name (case-insensitive).
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    #[must_use]
    pub fn tzid(tzid: impl Into<String>) -> Self {
        Self::new(names::TZID, tzid)
    }

    #[must_use]
    pub fn value_type(value_type: impl Into<String>) -> Self {
        Self::new(names::VALUE, value_type)
    }
}

/// Parameter names the converters look at.
pub mod names {
    pub const TZID: &str = "TZID";
    pub const VALUE: &str = "VALUE";
    pub const ENCODING: &str = "ENCODING";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_normalized() {
        let param = Parameter::new("tzid", "Europe/London");
        assert_eq!(param.name, "TZID");
        assert!(param.is("TzId"));
        assert_eq!(param.value(), Some("Europe/London"));
    }

    #[test]
    fn multiple_values() {
        let param = Parameter::with_values(
            "MEMBER",
            vec![
                "mailto:a@example.com".to_string(),
                "mailto:b@example.com".to_string(),
            ],
        );
        assert_eq!(param.values.len(), 2);
        assert_eq!(param.value(), Some("mailto:a@example.com"));
    }
}
