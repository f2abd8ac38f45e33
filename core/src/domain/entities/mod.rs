//! Domain entities representing the signed token payload.

pub mod token;

pub use token::{Claims, Scope, TokenPair, ACCESS_TOKEN_SCOPE, REFRESH_TOKEN_SCOPE};
