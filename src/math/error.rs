// src/math/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl MathError {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        MathError::InvalidConfiguration {
            message: message.into(),
        }
    }
}

pub type MathResult<T> = Result<T, MathError>;
