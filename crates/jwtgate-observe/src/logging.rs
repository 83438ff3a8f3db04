//! Structured logging utilities for jwtgate
//!
//! Provides logging initialization with selectable output formats and a
//! span helper for per-request authorization context.

use std::str::FromStr;

use tracing::Span;
use tracing_subscriber::EnvFilter;

/// Default filter when neither `RUST_LOG` nor an explicit filter is set
const DEFAULT_FILTER: &str = "info,jwtgate=debug";

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors (for development)
    Pretty,
    /// Compact format without colors
    Compact,
    /// JSON format (for production)
    Json,
}

#[allow(clippy::derivable_impls)]
impl Default for LogFormat {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        {
            LogFormat::Pretty
        }
        #[cfg(not(debug_assertions))]
        {
            LogFormat::Json
        }
    }
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow::anyhow!("Unknown log format: {}", other)),
        }
    }
}

/// Configuration for logging behavior
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Output format
    pub format: LogFormat,
    /// Whether to include file/line numbers
    pub include_location: bool,
    /// Whether to include target module
    pub include_target: bool,
    /// Environment filter (e.g., "info,jwtgate_auth=debug")
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            include_location: cfg!(debug_assertions),
            include_target: true,
            filter: None,
        }
    }
}

impl LogConfig {
    /// Build a config from a level name and format name, as found in the
    /// service configuration file
    pub fn from_level_and_format(level: &str, format: &str) -> anyhow::Result<Self> {
        Ok(Self {
            format: format.parse()?,
            filter: Some(level.to_ascii_lowercase()),
            ..Self::default()
        })
    }
}

/// Initialize structured logging with configuration
pub fn init_logging(config: LogConfig) -> anyhow::Result<()> {
    let env_filter = match config.filter {
        Some(filter) => EnvFilter::try_new(filter)?,
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(config.include_target)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    match config.format {
        LogFormat::Pretty => {
            subscriber
                .pretty()
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize pretty logger: {}", e))?;
        },
        LogFormat::Compact => {
            subscriber
                .compact()
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize compact logger: {}", e))?;
        },
        LogFormat::Json => {
            subscriber
                .json()
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize JSON logger: {}", e))?;
        },
    }

    tracing::info!(
        format = ?config.format,
        location = config.include_location,
        target = config.include_target,
        "Logging initialized"
    );

    Ok(())
}

/// Helper to create a span for one request passing through the auth layer
///
/// `identity` and `decision` are recorded once the pipeline has decided.
pub fn request_span(method: &str, path: &str) -> Span {
    tracing::info_span!(
        "auth_request",
        http.method = method,
        http.route = path,
        identity = tracing::field::Empty,
        decision = tracing::field::Empty,
    )
}
