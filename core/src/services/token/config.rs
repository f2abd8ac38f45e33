//! Configuration for the token service

use chrono::Duration;
use km_shared::config::JwtConfig;

use crate::domain::entities::token::Scope;
use crate::errors::{DomainError, DomainResult};

/// Token lifetimes used by the token service
///
/// Both lifetimes are at least one second, so every issued token satisfies
/// `exp > iat` after truncation to whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenServiceConfig {
    access_token_lifetime: Duration,
    refresh_token_lifetime: Duration,
}

impl TokenServiceConfig {
    /// Creates a configuration from explicit lifetimes
    ///
    /// # Returns
    ///
    /// * `Ok(TokenServiceConfig)` - Both lifetimes are one second or longer
    /// * `Err(DomainError::Configuration)` - A lifetime is shorter than one second
    pub fn new(
        access_token_lifetime: Duration,
        refresh_token_lifetime: Duration,
    ) -> DomainResult<Self> {
        check_lifetime("access", access_token_lifetime)?;
        check_lifetime("refresh", refresh_token_lifetime)?;

        Ok(Self {
            access_token_lifetime,
            refresh_token_lifetime,
        })
    }

    /// Creates a configuration from the shared JWT settings (seconds)
    pub fn from_jwt_config(config: &JwtConfig) -> DomainResult<Self> {
        Self::new(
            seconds("access", config.access_token_expiry)?,
            seconds("refresh", config.refresh_token_expiry)?,
        )
    }

    /// Access token lifetime
    pub fn access_token_lifetime(&self) -> Duration {
        self.access_token_lifetime
    }

    /// Refresh token lifetime
    pub fn refresh_token_lifetime(&self) -> Duration {
        self.refresh_token_lifetime
    }

    /// Lifetime applied to tokens of the given scope
    pub fn lifetime_for(&self, scope: Scope) -> Duration {
        match scope {
            Scope::Access => self.access_token_lifetime,
            Scope::Refresh => self.refresh_token_lifetime,
        }
    }
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            access_token_lifetime: Duration::hours(1),
            refresh_token_lifetime: Duration::hours(1),
        }
    }
}

/// Longest accepted lifetime; keeps every issued `exp` inside the date range
/// that [`TokenService::decode`](super::TokenService::decode) accepts.
pub const MAX_TOKEN_LIFETIME_DAYS: i64 = 36_500;

fn seconds(name: &str, value: i64) -> DomainResult<Duration> {
    Duration::try_seconds(value).ok_or_else(|| DomainError::Configuration {
        message: format!("{} token lifetime of {}s is out of range", name, value),
    })
}

fn check_lifetime(name: &str, lifetime: Duration) -> DomainResult<()> {
    if lifetime < Duration::seconds(1) {
        return Err(DomainError::Configuration {
            message: format!(
                "{} token lifetime must be at least one second, got {}s",
                name,
                lifetime.num_seconds()
            ),
        });
    }
    if lifetime > Duration::days(MAX_TOKEN_LIFETIME_DAYS) {
        return Err(DomainError::Configuration {
            message: format!(
                "{} token lifetime must not exceed {} days, got {}s",
                name,
                MAX_TOKEN_LIFETIME_DAYS,
                lifetime.num_seconds()
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lifetimes() {
        let config = TokenServiceConfig::default();
        assert_eq!(config.access_token_lifetime(), Duration::hours(1));
        assert_eq!(config.refresh_token_lifetime(), Duration::hours(1));
    }

    #[test]
    fn test_lifetime_for_scope() {
        let config = TokenServiceConfig::new(Duration::minutes(15), Duration::days(7)).unwrap();
        assert_eq!(config.lifetime_for(Scope::Access), Duration::minutes(15));
        assert_eq!(config.lifetime_for(Scope::Refresh), Duration::days(7));
    }

    #[test]
    fn test_rejects_sub_second_lifetimes() {
        assert!(TokenServiceConfig::new(Duration::zero(), Duration::hours(1)).is_err());
        assert!(TokenServiceConfig::new(Duration::hours(1), Duration::milliseconds(500)).is_err());
        assert!(TokenServiceConfig::new(Duration::seconds(-5), Duration::hours(1)).is_err());
    }

    #[test]
    fn test_from_jwt_config() {
        let jwt = JwtConfig::default()
            .with_access_expiry_minutes(30)
            .with_refresh_expiry_days(14);
        let config = TokenServiceConfig::from_jwt_config(&jwt).unwrap();

        assert_eq!(config.access_token_lifetime(), Duration::minutes(30));
        assert_eq!(config.refresh_token_lifetime(), Duration::days(14));
    }

    #[test]
    fn test_from_jwt_config_rejects_unrepresentable_lifetimes() {
        let jwt = JwtConfig {
            access_token_expiry: i64::MAX,
            ..JwtConfig::default()
        };
        let err = TokenServiceConfig::from_jwt_config(&jwt).unwrap_err();
        assert!(matches!(err, DomainError::Configuration { .. }));

        let jwt = JwtConfig {
            refresh_token_expiry: i64::MIN,
            ..JwtConfig::default()
        };
        assert!(matches!(
            TokenServiceConfig::from_jwt_config(&jwt),
            Err(DomainError::Configuration { .. })
        ));
    }

    #[test]
    fn test_rejects_lifetimes_beyond_maximum() {
        let max = Duration::days(MAX_TOKEN_LIFETIME_DAYS);
        assert!(TokenServiceConfig::new(Duration::hours(1), max).is_ok());
        assert!(TokenServiceConfig::new(max + Duration::seconds(1), Duration::hours(1)).is_err());
    }
}
