//! Log output setup
//!
//! Logs go to stderr: stdout carries the MCP protocol.

use crate::config::LogSettings;
use anyhow::{Result, anyhow};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter from `RUST_LOG`, falling back to the configured level
pub fn env_filter(settings: &LogSettings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level))
}

/// Install the global subscriber; fails if one is already installed
pub fn init_logging(settings: &LogSettings) -> Result<()> {
    let filter = env_filter(settings);
    let registry = tracing_subscriber::registry().with(filter);
    let installed = if settings.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
    installed.map_err(|e| anyhow!("failed to install log subscriber: {}", e))
}
