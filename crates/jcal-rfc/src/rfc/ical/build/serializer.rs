//! iCalendar serializer (RFC 5545).
//!
//! Serializes iCalendar structures to folded text. Components, properties
//! and parameters are written in the order they are stored.

use base64::{Engine, engine::general_purpose::STANDARD};

use super::text::{escape_param_value, escape_text, fold_line};
use crate::rfc::ical::core::{Component, ICalendar, Parameter, Property, Value};

/// Serializes an iCalendar document to a string.
#[must_use]
pub fn serialize(ical: &ICalendar) -> String {
    serialize_component(&ical.root)
}

/// Serializes several top-level components back to back.
#[must_use]
pub fn serialize_components(components: &[Component]) -> String {
    components.iter().map(serialize_component).collect()
}

/// Serializes a component to a string.
#[must_use]
pub fn serialize_component(component: &Component) -> String {
    let mut result = fold_line(&format!("BEGIN:{}", component.name));

    for prop in &component.properties {
        result.push_str(&serialize_property(prop));
    }
    for child in &component.children {
        result.push_str(&serialize_component(child));
    }

    result.push_str(&fold_line(&format!("END:{}", component.name)));
    result
}

/// Serializes a property to a folded content line.
#[must_use]
pub fn serialize_property(prop: &Property) -> String {
    let mut line = prop.name.clone();

    for param in &prop.params {
        line.push(';');
        line.push_str(&serialize_parameter(param));
    }

    line.push(':');
    line.push_str(&serialize_value(&prop.value));

    fold_line(&line)
}

#[must_use]
pub fn serialize_parameter(param: &Parameter) -> String {
    let values: Vec<String> = param.values.iter().map(|v| escape_param_value(v)).collect();
    format!("{}={}", param.name, values.join(","))
}

/// Renders a typed value in its content line form.
#[must_use]
pub fn serialize_value(value: &Value) -> String {
    match value {
        Value::Text(s) => escape_text(s),
        Value::Binary(bytes) => STANDARD.encode(bytes),
        Value::Boolean(true) => "TRUE".to_string(),
        Value::Boolean(false) => "FALSE".to_string(),
        Value::CalAddress(s) | Value::Uri(s) | Value::Unknown(s) => s.clone(),
        Value::Date(d) => d.to_string(),
        Value::DateTime(dt) => dt.to_string(),
        Value::Duration(d) => d.to_string(),
        Value::Float(n) => n.to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Period(p) => p.to_string(),
        Value::Recur(r) => r.to_string(),
        Value::Time(t) => t.to_string(),
        Value::UtcOffset(o) => o.to_string(),
        Value::Geo {
            latitude,
            longitude,
        } => format!("{latitude};{longitude}"),
        Value::RequestStatus(segments) => segments
            .iter()
            .map(|s| escape_text(s))
            .collect::<Vec<_>>()
            .join(";"),
        Value::List(values) => values
            .iter()
            .map(serialize_value)
            .collect::<Vec<_>>()
            .join(","),
    }
}
