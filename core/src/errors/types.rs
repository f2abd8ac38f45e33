//! Token-related error types
//!
//! Every variant maps to a stable error code so front ends can report
//! failures without matching on message text.

use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use km_shared::errors::{error_codes, ErrorResponse};
use thiserror::Error;

use crate::domain::entities::token::Scope;

/// Token validation and issuance failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Malformed token: {reason}")]
    MalformedToken { reason: String },

    #[error("Invalid token scope: {scope}")]
    InvalidScope { scope: Scope },

    #[error("Token signing failed: {message}")]
    Signing { message: String },

    #[error("Invalid verification key: {message}")]
    InvalidVerificationKey { message: String },
}

impl TokenError {
    /// Stable machine-readable code for the error
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::Expired => error_codes::TOKEN_EXPIRED,
            TokenError::InvalidSignature => error_codes::TOKEN_INVALID_SIGNATURE,
            TokenError::MalformedToken { .. } => error_codes::TOKEN_MALFORMED,
            TokenError::InvalidScope { .. } => error_codes::TOKEN_INVALID_SCOPE,
            TokenError::Signing { .. } => error_codes::TOKEN_SIGNING_FAILED,
            TokenError::InvalidVerificationKey { .. } => {
                error_codes::TOKEN_INVALID_VERIFICATION_KEY
            }
        }
    }

    /// Whether the caller can recover by going through the refresh flow
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TokenError::Expired)
    }
}

/// Classifies `jsonwebtoken` failures raised while decoding a token
impl From<JwtError> for TokenError {
    fn from(err: JwtError) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                TokenError::InvalidSignature
            }
            ErrorKind::InvalidRsaKey(_) | ErrorKind::InvalidKeyFormat => {
                TokenError::InvalidVerificationKey {
                    message: err.to_string(),
                }
            }
            _ => TokenError::MalformedToken {
                reason: err.to_string(),
            },
        }
    }
}

impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        let response = ErrorResponse::new(err.code(), err.to_string());
        match err {
            TokenError::InvalidScope { scope } => response.add_detail("scope", scope.as_str()),
            _ => response,
        }
    }
}
