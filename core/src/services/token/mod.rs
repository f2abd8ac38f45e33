//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - RS256 access and refresh token issuance
//! - Signature, expiry and scope verification
//! - Refresh token exchange for fresh access tokens
//! - Key material loading with lazy key parsing

mod clock;
mod config;
mod key_manager;
mod service;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{TokenServiceConfig, MAX_TOKEN_LIFETIME_DAYS};
pub use key_manager::{KeyMaterial, Rs256KeyManager};
pub use service::TokenService;
