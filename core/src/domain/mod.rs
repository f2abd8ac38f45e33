//! Domain layer containing the token entities.

pub mod entities;

pub use entities::{Claims, Scope, TokenPair, ACCESS_TOKEN_SCOPE, REFRESH_TOKEN_SCOPE};
