//! Configuration validation
//!
//! Validates configuration values and ensures consistency

use thiserror::Error;

use crate::{AuthConfig, Config, ObservabilityConfig, ServerConfig};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["pretty", "compact", "json"];

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid port number: {0}")]
    InvalidPort(u16),

    #[error("Invalid host: {0:?}")]
    InvalidHost(String),

    #[error("Invalid log level: {0} (must be one of: trace, debug, info, warn, error)")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0} (must be one of: pretty, compact, json)")]
    InvalidLogFormat(String),

    #[error("Invalid max token lifetime: {0} (must be > 0)")]
    InvalidMaxLifetime(i64),

    #[error("Public key path must not be empty")]
    MissingPublicKeyPath,

    #[error("Identity claim name must not be empty")]
    MissingIdentityClaim,

    #[error("Multiple validation errors: {0:?}")]
    Multiple(Vec<ValidationError>),
}

/// Validation result type
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate complete configuration
pub fn validate(config: &Config) -> ValidationResult<()> {
    let mut errors = Vec::new();

    if let Err(e) = validate_server(&config.server) {
        errors.push(e);
    }

    if let Err(e) = validate_observability(&config.observability) {
        errors.push(e);
    }

    if let Err(e) = validate_auth(&config.auth) {
        errors.push(e);
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

/// Validate server configuration
pub fn validate_server(config: &ServerConfig) -> ValidationResult<()> {
    if config.port == 0 {
        return Err(ValidationError::InvalidPort(config.port));
    }

    if config.host.trim().is_empty() {
        return Err(ValidationError::InvalidHost(config.host.clone()));
    }

    Ok(())
}

/// Validate observability configuration
pub fn validate_observability(config: &ObservabilityConfig) -> ValidationResult<()> {
    if !LOG_LEVELS.contains(&config.log_level.to_lowercase().as_str()) {
        return Err(ValidationError::InvalidLogLevel(config.log_level.clone()));
    }

    if !LOG_FORMATS.contains(&config.log_format.to_lowercase().as_str()) {
        return Err(ValidationError::InvalidLogFormat(config.log_format.clone()));
    }

    Ok(())
}

/// Validate authentication configuration
pub fn validate_auth(config: &AuthConfig) -> ValidationResult<()> {
    if config.max_lifetime_seconds <= 0 {
        return Err(ValidationError::InvalidMaxLifetime(config.max_lifetime_seconds));
    }

    if config.public_key_path.as_os_str().is_empty() {
        return Err(ValidationError::MissingPublicKeyPath);
    }

    if config.identity_claim.trim().is_empty() {
        return Err(ValidationError::MissingIdentityClaim);
    }

    Ok(())
}
