//! iCalendar serialization (RFC 5545).
//!
//! - Text: value and parameter escaping, line folding at 75 octets
//! - Serializer: order-preserving document serialization

mod serializer;
mod text;

pub use serializer::{
    serialize, serialize_component, serialize_components, serialize_parameter,
    serialize_property, serialize_value,
};
pub use text::{escape_param_value, escape_text, fold_line};
