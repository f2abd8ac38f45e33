//! Token lifetime and key location configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default access token lifetime (1 hour)
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 3600;

/// Default refresh token lifetime (1 hour)
pub const DEFAULT_REFRESH_TOKEN_EXPIRY: i64 = 3600;

/// JWT lifetime configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_token_expiry: DEFAULT_ACCESS_TOKEN_EXPIRY,
            refresh_token_expiry: DEFAULT_REFRESH_TOKEN_EXPIRY,
        }
    }
}

impl JwtConfig {
    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes.saturating_mul(60);
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days.saturating_mul(86_400);
        self
    }
}

/// Location of the PEM-encoded RSA key pair
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyConfig {
    /// Path to the private (signing) key
    pub private_key_path: PathBuf,

    /// Path to the public (verification) key
    pub public_key_path: PathBuf,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            private_key_path: PathBuf::from("keys/rsa.private"),
            public_key_path: PathBuf::from("keys/rsa.pub"),
        }
    }
}
