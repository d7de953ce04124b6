//! jCal implementation (RFC 7265).
//!
//! Converts parsed iCalendar component trees to the JSON representation of
//! RFC 7265 and back.
//!
//! ## Overview
//!
//! Every property becomes `[name, {params}, type, value, ...]` and every
//! component `[name, [properties], [components]]`. The value type tag is
//! inferred from the `VALUE` parameter, the shape of the value and the RFC
//! 5545 default type of the property, in that order (see [`infer`]).
//!
//! ## Usage
//!
//! ```rust
//! use jcal_rfc::rfc::jcal::{ical_to_jcal_string, jcal_str_to_ical};
//!
//! let input = "\
//! BEGIN:VCALENDAR\r\n\
//! VERSION:2.0\r\n\
//! END:VCALENDAR\r\n";
//!
//! let json = ical_to_jcal_string(input).unwrap();
//! assert_eq!(json, r#"["vcalendar",[["version",{},"text","2.0"]],[]]"#);
//! assert_eq!(jcal_str_to_ical(&json).unwrap(), input);
//! ```
//!
//! ## Numeric Policy
//!
//! Malformed FLOAT and INTEGER values either raise
//! [`JCalError::InvalidNumericValue`] or are replaced by a configured default,
//! per [`jcal_core::policy::NumericPolicy`]. The free functions below use the
//! process-wide policy; build a [`Converter`] with
//! [`Converter::with_policy`] to pick one explicitly and to read the
//! [`Diagnostic`]s a conversion produced.
//!
//! ## Submodules
//!
//! - [`core`] - jCal document types and their JSON shape
//! - [`infer`] - Value type inference
//! - [`codec`] - Per-type value encoders and decoders
//! - [`convert`] - Property and component conversion
//! - [`diagnostics`] - Non-fatal conversion findings

pub mod codec;
pub mod convert;
pub mod core;
pub mod diagnostics;
pub mod error;
pub mod infer;

#[cfg(test)]
mod tests;

pub use convert::Converter;
pub use core::{JCal, JCalComponent, JCalParams, JCalProperty, ParamValue};
pub use diagnostics::Diagnostic;
pub use error::{JCalError, JCalResult};
pub use infer::{Codec, infer, infer_from_jcal};

use crate::error::RfcResult;
use crate::rfc::ical::build::serialize_components;
use crate::rfc::ical::core::Component;
use crate::rfc::ical::parse::parse_components;

/// Parses calendar text and converts every top-level component to jCal.
///
/// ## Errors
///
/// Returns an error if the text does not parse or a value cannot be
/// converted.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn ical_to_jcal(input: &str) -> RfcResult<JCal> {
    tracing::debug!("Converting iCalendar text to jCal");

    let components = parse_components(input)?;
    Ok(components_to_jcal(&components)?)
}

/// Converts native components to jCal using the process-wide numeric policy.
///
/// ## Errors
///
/// Returns the first conversion error.
pub fn components_to_jcal(components: &[Component]) -> JCalResult<JCal> {
    Converter::new().to_jcal(components)
}

/// Converts calendar text to compact jCal JSON text.
///
/// ## Errors
///
/// Returns an error if the text does not parse or a value cannot be
/// converted.
pub fn ical_to_jcal_string(input: &str) -> RfcResult<String> {
    let jcal = ical_to_jcal(input)?;
    Ok(serde_json::to_string(&jcal)?)
}

/// Parses jCal JSON text into a [`JCal`] document.
///
/// ## Errors
///
/// Returns an error if the text is not JSON or does not have the jCal array
/// shape.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse_jcal(input: &str) -> RfcResult<JCal> {
    let json: serde_json::Value = serde_json::from_str(input)?;
    Ok(JCal::try_from(&json)?)
}

/// Converts a jCal document to native components using the process-wide
/// numeric policy.
///
/// ## Errors
///
/// Returns the first conversion error.
pub fn jcal_to_components(jcal: &JCal) -> JCalResult<Vec<Component>> {
    Converter::new().from_jcal(jcal)
}

/// Converts a jCal document to calendar text.
///
/// ## Errors
///
/// Returns the first conversion error.
#[tracing::instrument(skip(jcal), fields(components = jcal.components().len()))]
pub fn jcal_to_ical(jcal: &JCal) -> JCalResult<String> {
    tracing::debug!("Converting jCal to iCalendar text");

    let components = jcal_to_components(jcal)?;
    Ok(serialize_components(&components))
}

/// Converts jCal JSON text to calendar text.
///
/// ## Errors
///
/// Returns an error if the JSON is malformed or a value cannot be converted.
pub fn jcal_str_to_ical(input: &str) -> RfcResult<String> {
    let jcal = parse_jcal(input)?;
    Ok(jcal_to_ical(&jcal)?)
}
