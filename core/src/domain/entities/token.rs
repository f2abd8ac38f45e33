//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Wire value of the access token scope
pub const ACCESS_TOKEN_SCOPE: &str = "access_token";

/// Wire value of the refresh token scope
pub const REFRESH_TOKEN_SCOPE: &str = "refresh_token";

/// Purpose of a token, fixed at issuance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// Short-lived credential authorizing resource access
    #[serde(rename = "access_token")]
    Access,
    /// Credential used solely to obtain a new access token
    #[serde(rename = "refresh_token")]
    Refresh,
}

impl Scope {
    /// Returns the wire representation of the scope
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Access => ACCESS_TOKEN_SCOPE,
            Scope::Refresh => REFRESH_TOKEN_SCOPE,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ACCESS_TOKEN_SCOPE => Ok(Scope::Access),
            REFRESH_TOKEN_SCOPE => Ok(Scope::Refresh),
            _ => Err(format!("Invalid scope: {}", s)),
        }
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Display email of the subject
    #[serde(default)]
    pub email: String,

    /// Roles granted to the subject, in order
    #[serde(default)]
    pub roles: Vec<String>,

    /// Token purpose
    pub scope: Scope,

    /// Issued at timestamp (seconds)
    pub iat: i64,

    /// Expiration timestamp (seconds)
    pub exp: i64,

    /// JWT ID (unique identifier for the token)
    pub jti: Uuid,
}

impl Claims {
    /// Creates new claims issued at `issued_at` and valid for `lifetime`
    ///
    /// Timestamps are truncated to whole seconds. A fresh `jti` is generated
    /// for every call.
    ///
    /// # Arguments
    ///
    /// * `subject` - The user identifier
    /// * `email` - The user's display email
    /// * `roles` - The user's roles
    /// * `scope` - Purpose of the token
    /// * `issued_at` - Issuance instant
    /// * `lifetime` - Validity window; callers keep it at one second or more
    pub fn new(
        subject: impl Into<String>,
        email: impl Into<String>,
        roles: Vec<String>,
        scope: Scope,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        let iat = issued_at.timestamp();

        Self {
            sub: subject.into(),
            email: email.into(),
            roles,
            scope,
            iat,
            exp: iat.saturating_add(lifetime.num_seconds()),
            jti: Uuid::new_v4(),
        }
    }

    /// Checks whether the claims have expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Issuance instant, if the timestamp is representable
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.iat, 0).single()
    }

    /// Expiry instant, if the timestamp is representable
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// Time left until expiry as seen at `now`; negative once expired
    ///
    /// `None` when `exp` lies outside the representable date range.
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.expires_at().map(|expires_at| expires_at - now)
    }

    /// Whether both `iat` and `exp` map onto representable instants
    pub fn has_valid_timestamps(&self) -> bool {
        self.issued_at().is_some() && self.expires_at().is_some()
    }

    /// Whether the claims carry the given scope
    pub fn has_scope(&self, scope: Scope) -> bool {
        self.scope == scope
    }

    /// Gets the user ID from the claims
    ///
    /// # Returns
    ///
    /// `Ok(Uuid)` if the subject can be parsed as a UUID, `Err` otherwise
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_lifetime: Duration,
        refresh_lifetime: Duration,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in: access_lifetime.num_seconds(),
            refresh_expires_in: refresh_lifetime.num_seconds(),
        }
    }
}
