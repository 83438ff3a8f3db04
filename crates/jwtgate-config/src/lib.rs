//! # jwtgate Config - Configuration Management
//!
//! Handles configuration loading from files and environment variables.
//! The resulting [`Config`] is built once at startup and shared read-only
//! by every request afterwards.

pub mod validation;

use std::path::{Path, PathBuf};

use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Environment variable prefix, e.g. `JWTGATE_AUTH__MAX_LIFETIME_SECONDS=3600`
pub const ENV_PREFIX: &str = "JWTGATE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// One of `pretty`, `compact`, `json`
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self { log_level: default_log_level(), log_format: default_log_format() }
    }
}

/// How custom-check errors combine with the temporal checks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    /// The custom check only runs once the temporal checks reported nothing
    #[default]
    TemporalFirst,
    /// The custom check always runs; its errors come first, followed by the
    /// temporal (or missing-field) error
    Aggregate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Path to the PEM-encoded RSA public key used to verify RS256 signatures
    #[serde(default = "default_public_key_path")]
    pub public_key_path: PathBuf,

    /// Maximum token age in seconds, measured from `iat`
    #[serde(default = "default_max_lifetime_seconds")]
    pub max_lifetime_seconds: i64,

    /// Claim carrying the user identifier
    #[serde(default = "default_identity_claim")]
    pub identity_claim: String,

    #[serde(default)]
    pub validation_policy: ValidationPolicy,
}

fn default_public_key_path() -> PathBuf {
    PathBuf::from("keys/public_key.pem")
}

fn default_max_lifetime_seconds() -> i64 {
    86400 // 24 hours
}

fn default_identity_claim() -> String {
    "sub".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            public_key_path: default_public_key_path(),
            max_lifetime_seconds: default_max_lifetime_seconds(),
            identity_claim: default_identity_claim(),
            validation_policy: ValidationPolicy::default(),
        }
    }
}

impl Config {
    /// Validate the whole configuration, collecting every problem found
    pub fn validate(&self) -> validation::ValidationResult<()> {
        validation::validate(self)
    }
}

/// Load configuration from file and environment
pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let builder = ConfigBuilder::builder()
        .add_source(File::from(path.as_ref()).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    builder.try_deserialize()
}

/// Load configuration with defaults
pub fn load_or_default<P: AsRef<Path>>(path: P) -> Config {
    load(path).unwrap_or_default()
}
