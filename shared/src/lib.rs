//! Shared configuration and error types for KeyMint
//!
//! This crate provides common functionality used across all KeyMint crates:
//! - Configuration types and the layered configuration loader
//! - Error response structure and error codes

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{AppConfig, Environment, JwtConfig, KeyConfig, LogFormat, LoggingConfig};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
