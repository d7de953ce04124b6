//! iCalendar content lines and properties (RFC 5545 §3.1, §3.8).

use super::{Parameter, Value, parameter::names};

fn find_param<'a>(params: &'a [Parameter], name: &str) -> Option<&'a str> {
    params.iter().find(|p| p.is(name))?.value()
}

/// One unfolded content line with its value still unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Upper-cased property name.
    pub name: String,
    pub params: Vec<Parameter>,
    /// Value text after unfolding, before unescaping.
    pub raw_value: String,
}

impl ContentLine {
    /// The `VALUE` parameter, if any.
    #[must_use]
    pub fn value_type(&self) -> Option<&str> {
        find_param(&self.params, names::VALUE)
    }

    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        find_param(&self.params, names::TZID)
    }
}

/// A property with a typed value.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Upper-cased property name.
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<Parameter>,
    pub value: Value,
    /// Value text as it appeared on the content line (escaped, unfolded).
    /// Empty for properties built in memory.
    pub raw_value: String,
}

impl Property {
    #[must_use]
    pub fn new(name: impl Into<String>, params: Vec<Parameter>, value: Value) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params,
            value,
            raw_value: String::new(),
        }
    }

    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, Vec::new(), Value::Text(value.into()))
    }

    /// A DATE-TIME property; zoned values get their `TZID` parameter.
    #[must_use]
    pub fn datetime(name: impl Into<String>, dt: super::DateTime) -> Self {
        let params = dt
            .tzid()
            .map(|tzid| vec![Parameter::tzid(tzid)])
            .unwrap_or_default();
        Self::new(name, params, Value::DateTime(dt))
    }

    /// A DATE property with `VALUE=DATE`.
    #[must_use]
    pub fn date(name: impl Into<String>, d: super::Date) -> Self {
        Self::new(name, vec![Parameter::value_type("DATE")], Value::Date(d))
    }

    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        find_param(&self.params, name)
    }

    /// The `VALUE` parameter, if any.
    #[must_use]
    pub fn value_type(&self) -> Option<&str> {
        self.get_param_value(names::VALUE)
    }

    pub fn add_param(&mut self, param: Parameter) {
        self.params.push(param);
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.value.as_text()
    }
}
