//! # KeyMint Core
//!
//! Token lifecycle engine for KeyMint. This crate issues RS256-signed access
//! and refresh tokens for a user identity, verifies them against a public key,
//! enforces the access/refresh scope split and exchanges refresh tokens for
//! fresh access tokens.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
