//! jCal document model (RFC 7265).
//!
//! The types mirror the JSON shapes one to one and serialize to them with
//! `serde`. Parsing goes through `TryFrom<&serde_json::Value>` so shape
//! errors surface as [`JCalError::InvalidStructure`].
//!
//! [`JCalError::InvalidStructure`]: crate::rfc::jcal::JCalError::InvalidStructure

mod component;
mod property;

pub use component::{JCal, JCalComponent};
pub use property::{JCalParams, JCalProperty, ParamValue};
