//! Configuration file discovery and loading.
//!
//! The config lives at `$XDG_CONFIG_HOME/salatr/salatr.toml` (via `dirs`),
//! unless an explicit base directory was supplied with `--config`. A missing
//! file is not an error: a commented default is generated so the operator
//! has something concrete to edit over SSH.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::OnceLock;

use super::{Config, builder, validation};

/// Explicit config directory from `--config`, set once at startup.
static CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Record the custom config directory before the first load. A second call
/// is ignored, matching the once-per-process CLI lifetime.
pub fn set_config_dir(dir: Option<String>) {
    let _ = CONFIG_DIR.set(dir.map(PathBuf::from));
}

/// The custom config directory, if one was set.
pub fn get_custom_config_dir() -> Option<PathBuf> {
    CONFIG_DIR.get().cloned().flatten()
}

/// Full path of the active config file.
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(custom) = get_custom_config_dir() {
        return Ok(custom.join("salatr.toml"));
    }

    let config_home = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_home.join("salatr").join("salatr.toml"))
}

/// Load and validate the configuration, generating a default file when none
/// exists yet.
pub fn load() -> Result<Config> {
    let path = get_config_path()?;
    if !path.exists() {
        builder::create_default_config(&path)?;
        log_block_start!("Created default configuration: {}", path.display());
    }
    load_from_path(&path)
}

/// Load and validate a specific config file.
pub fn load_from_path(path: &std::path::Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    validation::validate_config(&config)
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;

    Ok(config)
}
