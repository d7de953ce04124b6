//! Non-fatal conversion conditions.
//!
//! Conversions never print. Each condition is recorded as a [`Diagnostic`]
//! on the converter that hit it and emitted as a `tracing` warning.

use std::fmt;

use crate::rfc::ical::core::ValueType;

/// A condition the conversion recovered from.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// No codec matched the value; it was carried verbatim as `unknown`.
    UnrecognizedNativeType { property: String, value: String },

    /// Elements of a multi-valued property inferred to different types.
    /// The property is tagged with the first type.
    MixedValueTypes {
        property: String,
        used: ValueType,
        found: ValueType,
    },

    /// A malformed numeric value was replaced by the policy default.
    NumericDefaultSubstituted {
        property: String,
        value_type: ValueType,
        value: String,
        substitute: String,
    },
}

impl Diagnostic {
    /// Name of the property the diagnostic is about.
    #[must_use]
    pub fn property(&self) -> &str {
        match self {
            Self::UnrecognizedNativeType { property, .. }
            | Self::MixedValueTypes { property, .. }
            | Self::NumericDefaultSubstituted { property, .. } => property,
        }
    }

    fn emit(&self) {
        match self {
            Self::UnrecognizedNativeType { property, value } => {
                tracing::warn!(%property, %value, "Value has no codec, keeping it as unknown");
            }
            Self::MixedValueTypes {
                property,
                used,
                found,
            } => {
                tracing::warn!(
                    %property,
                    used = used.jcal_name(),
                    found = found.jcal_name(),
                    "Multi-valued property mixes value types"
                );
            }
            Self::NumericDefaultSubstituted {
                property,
                value_type,
                value,
                substitute,
            } => {
                tracing::warn!(
                    %property,
                    value_type = value_type.jcal_name(),
                    %value,
                    %substitute,
                    "Substituted default for malformed numeric value"
                );
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedNativeType { property, value } => {
                write!(f, "{property}: unrecognized value {value:?} kept as unknown")
            }
            Self::MixedValueTypes {
                property,
                used,
                found,
            } => write!(
                f,
                "{property}: mixed value types, tagged {} but found {}",
                used.jcal_name(),
                found.jcal_name()
            ),
            Self::NumericDefaultSubstituted {
                property,
                value_type,
                value,
                substitute,
            } => write!(
                f,
                "{property}: malformed {} {value:?} replaced by {substitute}",
                value_type.jcal_name()
            ),
        }
    }
}

/// Collected diagnostics of one converter.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Records a diagnostic and emits it as a warning.
    pub fn record(&mut self, diagnostic: Diagnostic) {
        diagnostic.emit();
        self.entries.push(diagnostic);
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drains the collected diagnostics.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.entries)
    }
}
