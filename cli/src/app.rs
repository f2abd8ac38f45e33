//! Wiring of configuration, keys and the token service

use anyhow::Context;
use km_core::{DomainError, KeyMaterial, TokenError, TokenService, TokenServiceConfig};
use km_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use km_shared::AppConfig;
use tracing::debug;

use crate::args::Cli;
use crate::{commands, logging};

/// Runs the command line request and returns the text to print on stdout
pub fn run(cli: Cli) -> anyhow::Result<String> {
    let mut config =
        AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(path) = cli.private_key {
        config.keys.private_key_path = path;
    }
    if let Some(path) = cli.public_key {
        config.keys.public_key_path = path;
    }

    logging::init(&config.logging);
    debug!(environment = %config.environment, "Configuration loaded");

    let service = build_service(&config)?;
    let output = commands::execute(&service, cli.command.unwrap_or_default())?;

    Ok(serde_json::to_string_pretty(&output)?)
}

/// Creates the token service described by the configuration
pub fn build_service(config: &AppConfig) -> Result<TokenService, DomainError> {
    let keys = KeyMaterial::from_files(&config.keys.private_key_path, &config.keys.public_key_path)?;
    let token_config = TokenServiceConfig::from_jwt_config(&config.jwt)?;

    Ok(TokenService::new(keys, token_config))
}

/// Converts a failure into the JSON report printed on stderr
pub fn error_response(err: &anyhow::Error) -> ErrorResponse {
    if let Some(domain) = err.downcast_ref::<DomainError>() {
        return domain.to_error_response();
    }
    if let Some(token) = err.downcast_ref::<TokenError>() {
        return token.clone().into();
    }
    if err.downcast_ref::<km_shared::config::ConfigError>().is_some() {
        return ErrorResponse::new(error_codes::CONFIGURATION_ERROR, format!("{:#}", err));
    }

    ErrorResponse::new(error_codes::INTERNAL_ERROR, format!("{:#}", err))
}
