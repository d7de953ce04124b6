//! iCalendar document parser (RFC 5545).
//!
//! Parses complete iCalendar documents into typed structures.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::{parse_content_line, split_lines, split_unescaped};
use super::values::{
    parse_binary, parse_boolean, parse_date, parse_datetime, parse_duration, parse_float,
    parse_integer, parse_period, parse_rrule, parse_time, parse_utc_offset, unescape_text,
};
use crate::rfc::ical::core::{
    Component, ComponentKind, ContentLine, ICalendar, Property, Value, ValueType,
    default_value_type, is_multi_valued,
};

/// Parses an iCalendar document from a string.
///
/// The first top-level component must be a VCALENDAR.
///
/// ## Errors
///
/// Returns an error if the input is not valid iCalendar.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> ParseResult<ICalendar> {
    tracing::debug!("Parsing iCalendar document");

    let root = parse_components(input)?
        .into_iter()
        .next()
        .ok_or_else(|| ParseError::new(ParseErrorKind::MissingBegin, 1, 1))?;

    if root.kind != Some(ComponentKind::Calendar) {
        tracing::warn!(name = %root.name, "Root component is not VCALENDAR");
        return Err(
            ParseError::new(ParseErrorKind::MissingBegin, 1, 1).with_context("expected VCALENDAR")
        );
    }

    tracing::debug!("iCalendar document parsed successfully");

    Ok(ICalendar { root })
}

/// Parses every top-level component of a stream, in order.
///
/// Unlike [`parse`], any component may appear at the top level and there may
/// be several of them (for example a file of concatenated VCALENDARs).
///
/// ## Errors
///
/// Returns an error if a line is malformed, a component is unbalanced, a
/// value does not match its type, or the input holds no component at all.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse_components(input: &str) -> ParseResult<Vec<Component>> {
    let lines = split_lines(input);

    if lines.is_empty() {
        tracing::warn!("Empty iCalendar input");
        return Err(ParseError::new(ParseErrorKind::MissingBegin, 1, 1));
    }

    tracing::trace!(count = lines.len(), "Split lines");

    let mut iter = lines
        .into_iter()
        .map(|(line_num, line)| parse_content_line(&line, line_num).map(|cl| (line_num, cl)));

    let mut components = Vec::new();
    while let Some(next) = iter.next() {
        let (line_num, begin_line) = next?;
        if begin_line.name != "BEGIN" {
            return Err(ParseError::new(ParseErrorKind::MissingBegin, line_num, 1)
                .with_context(format!("unexpected {} outside a component", begin_line.name)));
        }
        let name = begin_line.raw_value.to_ascii_uppercase();
        components.push(parse_component(&mut iter, line_num, &name)?);
    }

    tracing::debug!(count = components.len(), "Parsed top-level components");

    Ok(components)
}

/// Parses the body of a component whose BEGIN line was already consumed.
fn parse_component(
    iter: &mut impl Iterator<Item = ParseResult<(usize, ContentLine)>>,
    begin_line_num: usize,
    component_name: &str,
) -> ParseResult<Component> {
    let mut component = Component {
        kind: Some(ComponentKind::parse(component_name)),
        name: component_name.to_string(),
        properties: Vec::new(),
        children: Vec::new(),
    };

    let mut last_line_num = begin_line_num;

    loop {
        let Some(next) = iter.next() else {
            return Err(
                ParseError::new(ParseErrorKind::MissingEnd, last_line_num, 1)
                    .with_context(format!("missing END:{component_name}")),
            );
        };
        let (line_num, content_line) = next?;
        last_line_num = line_num;

        match content_line.name.as_str() {
            "BEGIN" => {
                let nested_name = content_line.raw_value.to_ascii_uppercase();
                let nested = parse_component(iter, line_num, &nested_name)?;
                component.children.push(nested);
            }
            "END" => {
                let end_name = content_line.raw_value.to_ascii_uppercase();
                if end_name != component_name {
                    return Err(
                        ParseError::new(ParseErrorKind::MismatchedComponent, line_num, 1)
                            .with_context(format!(
                                "expected END:{component_name}, got END:{end_name}"
                            )),
                    );
                }
                break;
            }
            _ => {
                let property = parse_property(content_line, line_num)?;
                component.properties.push(property);
            }
        }
    }

    Ok(component)
}

/// Parses a property from a content line, resolving the value type.
fn parse_property(cl: ContentLine, line_num: usize) -> ParseResult<Property> {
    let explicit = cl.value_type().map(ValueType::parse);
    let tzid = cl.tzid();
    let raw = cl.raw_value.as_str();

    let value = match cl.name.as_str() {
        "GEO" if explicit.is_none_or(|t| t == ValueType::Float) => parse_geo(raw),
        "REQUEST-STATUS" if explicit.is_none_or(|t| t == ValueType::Text) => Value::RequestStatus(
            split_unescaped(raw, ';')
                .into_iter()
                .map(unescape_text)
                .collect(),
        ),
        name if is_multi_valued(name) => Value::List(
            split_unescaped(raw, ',')
                .into_iter()
                .map(|element| {
                    let value_type =
                        explicit.unwrap_or_else(|| list_element_type(name, element));
                    parse_value(element, value_type, tzid, line_num)
                })
                .collect::<ParseResult<_>>()?,
        ),
        _ => parse_value(raw, determine_value_type(&cl), tzid, line_num)?,
    };

    Ok(Property {
        name: cl.name.clone(),
        value,
        params: cl.params,
        raw_value: cl.raw_value,
    })
}

/// Determines the value type of a single-valued property.
fn determine_value_type(cl: &ContentLine) -> ValueType {
    if let Some(value_type) = cl.value_type() {
        return ValueType::parse(value_type);
    }

    match default_value_type(&cl.name) {
        // TRIGGER may be an absolute DATE-TIME; tolerate a missing VALUE parameter.
        Some(ValueType::Duration) if !cl.raw_value.starts_with(['P', '+', '-']) => {
            ValueType::DateTime
        }
        Some(value_type) => value_type,
        None => ValueType::Text,
    }
}

/// Element type of an EXDATE/RDATE/FREEBUSY/CATEGORIES/RESOURCES entry
/// without a VALUE parameter, decided by its shape where the property allows
/// several types.
fn list_element_type(name: &str, element: &str) -> ValueType {
    match default_value_type(name) {
        Some(ValueType::DateTime) if element.contains('/') => ValueType::Period,
        Some(ValueType::DateTime) if element.len() == 8 && !element.contains('T') => {
            ValueType::Date
        }
        Some(value_type) => value_type,
        None => ValueType::Text,
    }
}

/// Parses `latitude;longitude`. Anything else is kept verbatim so the
/// numeric policy can decide at conversion time.
fn parse_geo(raw: &str) -> Value {
    let parsed = raw
        .split_once(';')
        .and_then(|(lat, lon)| Some((parse_float(lat)?, parse_float(lon)?)));
    match parsed {
        Some((latitude, longitude)) => Value::Geo {
            latitude,
            longitude,
        },
        None => {
            tracing::debug!(raw, "GEO value is not two floats");
            Value::Unknown(raw.to_string())
        }
    }
}

/// Parses a raw value string into a typed Value.
fn parse_value(
    raw: &str,
    value_type: ValueType,
    tzid: Option<&str>,
    line_num: usize,
) -> ParseResult<Value> {
    let value = match value_type {
        ValueType::Text => Value::Text(unescape_text(raw)),
        ValueType::DateTime => Value::DateTime(parse_datetime(raw, tzid, line_num, 1)?),
        ValueType::Date => Value::Date(parse_date(raw, line_num, 1)?),
        ValueType::Time => Value::Time(parse_time(raw, line_num, 1)?),
        ValueType::Duration => Value::Duration(parse_duration(raw, line_num, 1)?),
        ValueType::Period => Value::Period(parse_period(raw, tzid, line_num, 1)?),
        ValueType::Integer => parse_integer(raw).map_or_else(
            || lenient_numeric(raw, value_type, line_num),
            Value::Integer,
        ),
        ValueType::Float => parse_float(raw).map_or_else(
            || lenient_numeric(raw, value_type, line_num),
            Value::Float,
        ),
        ValueType::Boolean => Value::Boolean(parse_boolean(raw, line_num, 1)?),
        ValueType::Recur => Value::Recur(Box::new(parse_rrule(raw, line_num, 1)?)),
        ValueType::UtcOffset => Value::UtcOffset(parse_utc_offset(raw, line_num, 1)?),
        ValueType::Uri => Value::Uri(raw.to_string()),
        ValueType::CalAddress => Value::CalAddress(raw.to_string()),
        ValueType::Binary => Value::Binary(parse_binary(raw, line_num, 1)?),
        ValueType::Unknown => Value::Unknown(raw.to_string()),
    };
    Ok(value)
}

fn lenient_numeric(raw: &str, value_type: ValueType, line_num: usize) -> Value {
    tracing::debug!(raw, %value_type, line = line_num, "Keeping malformed numeric value verbatim");
    Value::Unknown(raw.to_string())
}
