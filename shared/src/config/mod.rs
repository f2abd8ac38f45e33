//! Configuration module
//!
//! - `auth` - Token lifetimes and key file locations
//! - `environment` - Environment detection and logging configuration
//!
//! [`AppConfig::load`] layers its sources in this order, later sources winning:
//! built-in defaults, `keymint.toml`, the environment-specific file
//! (`keymint.<env>.toml`), an explicitly given file, then `KEYMINT_*`
//! environment variables (nested keys separated by `__`, e.g.
//! `KEYMINT_JWT__ACCESS_TOKEN_EXPIRY=900`).

pub mod auth;
pub mod environment;

use ::config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use ::config::ConfigError;
pub use auth::{JwtConfig, KeyConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};

/// Base name of the optional configuration file
pub const CONFIG_FILE_NAME: &str = "keymint";

/// Prefix of the environment variables read by the loader
pub const ENV_PREFIX: &str = "KEYMINT";

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Token lifetimes
    #[serde(default)]
    pub jwt: JwtConfig,

    /// Key pair location
    #[serde(default)]
    pub keys: KeyConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            jwt: JwtConfig::default(),
            keys: KeyConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment variables
    ///
    /// `.env` files are read first (`.env.<env>` then `.env`) so their
    /// values participate in the environment variable layer.
    ///
    /// # Arguments
    ///
    /// * `explicit_file` - Optional configuration file that must exist
    pub fn load(explicit_file: Option<&Path>) -> Result<Self, ConfigError> {
        let initial = Environment::from_env();
        dotenvy::from_filename(initial.env_file()).ok();
        dotenvy::dotenv().ok();

        // `.env` may itself set KEYMINT_ENV
        Self::load_for(Environment::from_env(), explicit_file)
    }

    /// Load configuration for a given environment without touching `.env` files
    pub fn load_for(
        environment: Environment,
        explicit_file: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let jwt = JwtConfig::default();
        let keys = KeyConfig::default();
        let logging = LoggingConfig::for_environment(environment);

        let mut builder = Config::builder()
            .set_default("environment", environment.to_string())?
            .set_default("jwt.access_token_expiry", jwt.access_token_expiry)?
            .set_default("jwt.refresh_token_expiry", jwt.refresh_token_expiry)?
            .set_default(
                "keys.private_key_path",
                keys.private_key_path.to_string_lossy().into_owned(),
            )?
            .set_default(
                "keys.public_key_path",
                keys.public_key_path.to_string_lossy().into_owned(),
            )?
            .set_default("logging.level", logging.level)?
            .set_default("logging.format", format_name(logging.format))?
            .set_default("logging.source_location", logging.source_location)?
            .add_source(File::with_name(CONFIG_FILE_NAME).required(false))
            .add_source(File::with_name(environment.config_file()).required(false));

        if let Some(path) = explicit_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

fn format_name(format: LogFormat) -> &'static str {
    match format {
        LogFormat::Json => "json",
        LogFormat::Pretty => "pretty",
        LogFormat::Compact => "compact",
    }
}
