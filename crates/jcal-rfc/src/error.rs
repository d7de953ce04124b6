use thiserror::Error;

use crate::rfc::ical::ParseError;
use crate::rfc::jcal::JCalError;

/// Errors of the document-level entry points
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),

    #[error("Conversion error: {0}")]
    JCalError(#[from] JCalError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
