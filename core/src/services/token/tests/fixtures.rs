//! RSA key pairs shared by the token service tests

/// Signing key of the primary test pair
pub const PRIMARY_PRIVATE_KEY: &str = include_str!("../../../../tests/fixtures/primary_private.pem");

/// Verification key of the primary test pair
pub const PRIMARY_PUBLIC_KEY: &str = include_str!("../../../../tests/fixtures/primary_public.pem");

/// Signing key of an unrelated second pair
pub const OTHER_PRIVATE_KEY: &str = include_str!("../../../../tests/fixtures/other_private.pem");

/// Verification key of an unrelated second pair
pub const OTHER_PUBLIC_KEY: &str = include_str!("../../../../tests/fixtures/other_public.pem");
