//! TOML configuration file
//!
//! ```toml
//! mdns_enabled = true
//! local_candidate_policy = "pass-through"
//! max_content_size = 20480
//! ```
//!
//! Missing keys keep their defaults. Command-line flags are applied on top.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use peer_sdp_core::SdpConfig;

/// Load an [`SdpConfig`] from a TOML file
pub fn load(path: &Path) -> Result<SdpConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse(&text).with_context(|| format!("Invalid config file {}", path.display()))
}

/// Parse and validate TOML configuration text
pub fn parse(text: &str) -> Result<SdpConfig> {
    let config: SdpConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}
