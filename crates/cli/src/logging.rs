use std::str::FromStr;

use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Parse a log level from a string
pub fn parse_log_level(level: &str) -> Result<Level> {
    Level::from_str(level).map_err(|_| anyhow!("Invalid log level: {}", level))
}

/// Install the global subscriber. `RUST_LOG` directives are added on top of
/// `level`. Logs go to stderr so SDP output on stdout stays clean.
pub fn init(level: Level) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}
