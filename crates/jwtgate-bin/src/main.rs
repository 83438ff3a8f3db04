//! # jwtgate Server Binary
//!
//! Main entrypoint for the jwtgate authorization server.

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use jwtgate_auth::AuthPipeline;
use jwtgate_config::load_or_default;
use jwtgate_observe::{LogConfig, init_logging};

#[derive(Parser, Debug)]
#[command(name = "jwtgate")]
#[command(about = "Bearer-token authorization gateway", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml", env = "JWTGATE_CONFIG")]
    config: PathBuf,

    /// Server port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// PEM public key used to verify tokens (overrides config)
    #[arg(long)]
    public_key: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = load_or_default(&args.config);

    // Override with CLI args
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(public_key) = args.public_key {
        config.auth.public_key_path = public_key;
    }

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        std::process::exit(1);
    }

    init_logging(LogConfig::from_level_and_format(
        &config.observability.log_level,
        &config.observability.log_format,
    )?)?;

    tracing::info!(
        public_key = %config.auth.public_key_path.display(),
        max_lifetime_seconds = config.auth.max_lifetime_seconds,
        identity_claim = %config.auth.identity_claim,
        policy = ?config.auth.validation_policy,
        "Starting jwtgate"
    );

    let pipeline = AuthPipeline::from_config(&config.auth)
        .context("Failed to build authorization pipeline")?;

    jwtgate_bin::serve(&config, Arc::new(pipeline)).await
}
