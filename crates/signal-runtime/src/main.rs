//! Signalboard server binary.
//!
//! ## Startup sequence
//!
//! 1. Initialize logging (`RUST_LOG` controls the filter)
//! 2. Load configuration from the environment
//! 3. Validate configuration (admin credentials are mandatory)
//! 4. Serve the gateway until Ctrl-C
//!
//! ## Environment
//!
//! - `SIGNAL_ADMIN_USER` / `SIGNAL_ADMIN_PASS` - admin Basic credentials
//!   (required; the server refuses to start without them)
//! - `SIGNAL_DATA_DIR` - directory for `pending.json` and `approved.json`
//!   (default `data`)
//! - `SIGNAL_HOST` / `SIGNAL_PORT` - bind address (default `0.0.0.0:8310`)

use anyhow::{Context, Result};
use signal_gateway::{GatewayConfig, GatewayService};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Build configuration from environment variables over the defaults.
fn load_config() -> GatewayConfig {
    let mut config = GatewayConfig::default();

    if let Ok(identity) = std::env::var("SIGNAL_ADMIN_USER") {
        config.admin.identity = identity;
    }
    if let Ok(secret) = std::env::var("SIGNAL_ADMIN_PASS") {
        config.admin.secret = secret;
    }

    if let Ok(dir) = std::env::var("SIGNAL_DATA_DIR") {
        config.storage.data_dir = dir.into();
    }

    if let Ok(host) = std::env::var("SIGNAL_HOST") {
        match host.parse() {
            Ok(h) => config.http.host = h,
            Err(_) => warn!(host = %host, "Ignoring unparseable SIGNAL_HOST"),
        }
    }
    if let Ok(port) = std::env::var("SIGNAL_PORT") {
        match port.parse() {
            Ok(p) => config.http.port = p,
            Err(_) => warn!(port = %port, "Ignoring unparseable SIGNAL_PORT"),
        }
    }

    config
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = load_config();
    info!(
        addr = %config.http_addr(),
        data_dir = %config.storage.data_dir.display(),
        "Starting signalboard"
    );

    let service = GatewayService::new(config)
        .context("invalid configuration (are SIGNAL_ADMIN_USER/SIGNAL_ADMIN_PASS set?)")?;

    tokio::select! {
        result = service.serve() => {
            result.context("gateway stopped unexpectedly")?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl-C, shutting down");
        }
    }

    Ok(())
}
