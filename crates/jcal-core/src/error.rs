use thiserror::Error;

/// Core-level errors
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
