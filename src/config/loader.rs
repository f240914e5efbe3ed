// Configuration loader
// Reads ~/.studyhall/config.toml; every setting has an inline default

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use super::settings::Config;

/// Load configuration, falling back to defaults when no file exists.
///
/// A missing file is normal (first run); a file that exists but does
/// not parse or validate is an error worth surfacing.
pub fn load_config() -> Result<Config> {
    match config_path() {
        Some(path) if path.exists() => {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let config = parse_config(&contents)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            Ok(config)
        }
        _ => Ok(Config::default()),
    }
}

/// Location of the user config file, if a home directory exists
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".studyhall").join("config.toml"))
}

fn parse_config(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents).context("Invalid TOML")?;
    config.validate().context("Configuration validation failed")?;
    Ok(config)
}
