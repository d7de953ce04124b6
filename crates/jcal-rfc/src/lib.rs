//! Calendar text (RFC 5545) and jCal (RFC 7265) handling.
//!
//! [`rfc::ical`] parses and serializes calendar text; [`rfc::jcal`] converts
//! the parsed component trees to and from jCal.

pub mod error;
pub mod rfc;
