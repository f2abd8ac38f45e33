//! Main token service implementation

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};
use tracing::{debug, warn};

use crate::domain::entities::token::{Claims, Scope, TokenPair};
use crate::errors::TokenError;

use super::clock::{Clock, SystemClock};
use super::config::TokenServiceConfig;
use super::key_manager::{KeyMaterial, Rs256KeyManager};

/// Service issuing and validating RS256-signed access and refresh tokens
///
/// The service holds no mutable state besides its lazily parsed keys, so a
/// single instance can be shared across threads.
#[derive(Debug)]
pub struct TokenService<C: Clock = SystemClock> {
    keys: Rs256KeyManager,
    config: TokenServiceConfig,
    validation: Validation,
    clock: C,
}

impl TokenService<SystemClock> {
    /// Creates a new token service reading wall-clock time
    ///
    /// Key material is not validated here; an unusable private key surfaces
    /// as [`TokenError::Signing`] on the first issue call and an unusable
    /// public key as [`TokenError::InvalidVerificationKey`] on the first
    /// decode.
    pub fn new(keys: KeyMaterial, config: TokenServiceConfig) -> Self {
        Self::with_clock(keys, config, SystemClock)
    }
}

impl<C: Clock> TokenService<C> {
    /// Creates a new token service with an explicit time source
    pub fn with_clock(keys: KeyMaterial, config: TokenServiceConfig, clock: C) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        // Expiry is checked against `clock`, not the system time.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            keys: Rs256KeyManager::new(keys),
            config,
            validation,
            clock,
        }
    }

    /// Lifetimes this service issues tokens with
    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Issues an access token
    ///
    /// # Arguments
    ///
    /// * `subject` - The user identifier
    /// * `email` - The user's display email
    /// * `roles` - The user's roles
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The signed token
    /// * `Err(TokenError::Signing)` - The private key is unusable
    pub fn issue_access(
        &self,
        subject: &str,
        email: &str,
        roles: &[String],
    ) -> Result<String, TokenError> {
        self.issue(Scope::Access, subject, email, roles)
    }

    /// Issues a refresh token, valid for the configured refresh lifetime
    pub fn issue_refresh(
        &self,
        subject: &str,
        email: &str,
        roles: &[String],
    ) -> Result<String, TokenError> {
        self.issue(Scope::Refresh, subject, email, roles)
    }

    /// Issues an access token and a refresh token for the same identity
    pub fn issue_pair(
        &self,
        subject: &str,
        email: &str,
        roles: &[String],
    ) -> Result<TokenPair, TokenError> {
        let access_token = self.issue_access(subject, email, roles)?;
        let refresh_token = self.issue_refresh(subject, email, roles)?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_lifetime(),
            self.config.refresh_token_lifetime(),
        ))
    }

    /// Verifies a token of any scope and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature is valid and the token has not expired
    /// * `Err(TokenError::InvalidSignature)` - Tampered, wrong key or not RS256
    /// * `Err(TokenError::Expired)` - The current time is at or past `exp`
    /// * `Err(TokenError::MalformedToken)` - The token cannot be parsed or its
    ///   timestamps fall outside the supported date range
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify(token).inspect_err(|err| {
            warn!(code = err.code(), error = %err, "Rejected token");
        })
    }

    /// Verifies an access token and returns its claims
    ///
    /// Fails with [`TokenError::InvalidScope`] for a valid refresh token.
    pub fn decode_access(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = self.decode(token)?;
        require_scope(claims, Scope::Access)
    }

    /// Exchanges a refresh token for a new access token
    ///
    /// The new token carries the subject, email and roles of the refresh
    /// token with a fresh `jti` and issue time. The refresh token stays
    /// usable until it expires.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The new access token
    /// * `Err(TokenError::InvalidScope)` - The token is a valid access token
    /// * `Err(TokenError)` - Any failure of [`TokenService::decode`] or signing
    pub fn refresh(&self, refresh_token: &str) -> Result<String, TokenError> {
        let claims = require_scope(self.decode(refresh_token)?, Scope::Refresh)?;

        debug!(jti = %claims.jti, sub = %claims.sub, "Exchanging refresh token");
        self.issue_access(&claims.sub, &claims.email, &claims.roles)
    }

    /// Time left before the token expires
    ///
    /// Expired tokens are rejected by [`TokenService::decode`] first, so a
    /// successful result is always positive.
    pub fn time_remaining(&self, token: &str) -> Result<Duration, TokenError> {
        let claims = self.decode(token)?;
        claims
            .remaining_at(self.clock.now())
            .ok_or_else(timestamp_out_of_range)
    }

    fn issue(
        &self,
        scope: Scope,
        subject: &str,
        email: &str,
        roles: &[String],
    ) -> Result<String, TokenError> {
        let claims = Claims::new(
            subject,
            email,
            roles.to_vec(),
            scope,
            self.clock.now(),
            self.config.lifetime_for(scope),
        );
        let token = self.encode_jwt(&claims)?;

        debug!(jti = %claims.jti, scope = %scope, exp = claims.exp, "Issued token");
        Ok(token)
    }

    /// Encodes claims into a JWT
    fn encode_jwt(&self, claims: &Claims) -> Result<String, TokenError> {
        let encoding_key = self.keys.encoding_key()?;
        encode(&Header::new(Algorithm::RS256), claims, encoding_key).map_err(|e| {
            TokenError::Signing {
                message: e.to_string(),
            }
        })
    }

    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let decoding_key = self.keys.decoding_key()?;
        let claims = decode::<Claims>(token, decoding_key, &self.validation)?.claims;

        if !claims.has_valid_timestamps() {
            return Err(timestamp_out_of_range());
        }
        if claims.is_expired_at(self.clock.now()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

fn timestamp_out_of_range() -> TokenError {
    TokenError::MalformedToken {
        reason: "iat or exp is outside the supported date range".to_string(),
    }
}

fn require_scope(claims: Claims, expected: Scope) -> Result<Claims, TokenError> {
    if claims.has_scope(expected) {
        Ok(claims)
    } else {
        warn!(
            expected = %expected,
            actual = %claims.scope,
            jti = %claims.jti,
            "Token scope mismatch"
        );
        Err(TokenError::InvalidScope {
            scope: claims.scope,
        })
    }
}
