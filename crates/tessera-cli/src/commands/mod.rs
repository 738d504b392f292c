pub mod config;
pub mod info;
pub mod region;
pub mod replay;

use std::path::Path;

use anyhow::{Context, Result};
use tessera_core::config::ViewerConfig;

/// Load a TOML viewer config, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<ViewerConfig> {
    let Some(path) = path else {
        return Ok(ViewerConfig::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: ViewerConfig = toml::from_str(&contents).context("Invalid viewer config")?;
    config.validate()?;
    Ok(config)
}
