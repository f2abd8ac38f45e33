//! Domain-specific error types and error handling.

mod types;


pub use types::TokenError;

use km_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use std::path::PathBuf;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Failed to load key {}: {message}", .path.display())]
    KeyLoad { path: PathBuf, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error(transparent)]
    Token(#[from] TokenError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            DomainError::KeyLoad { path, .. } => {
                ErrorResponse::new(error_codes::KEY_LOAD_ERROR, self.to_string())
                    .add_detail("path", path.display().to_string())
            }
            DomainError::Configuration { .. } => {
                ErrorResponse::new(error_codes::CONFIGURATION_ERROR, self.to_string())
            }
            DomainError::Token(err) => err.clone().into(),
        }
    }
}
