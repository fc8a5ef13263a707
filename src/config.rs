//! Configuration for gate thresholds and input limits.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variable (CONTENTGATE_CONFIG, a path to a YAML file)
//! 2. Config file (.contentgate/config.yaml)
//! 3. User config file (~/.contentgate/config.yaml)
//! 4. Built-in defaults
//!
//! Config file discovery:
//! - Searches current directory and parents for .contentgate/config.yaml
//! - Every key is optional; missing keys keep their default values

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{GateThresholds, InputLimits};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "CONTENTGATE_CONFIG";

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub thresholds: GateThresholds,
    #[serde(default)]
    pub limits: InputLimits,
}

/// Resolved configuration
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolvedConfig {
    pub thresholds: GateThresholds,
    pub limits: InputLimits,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".contentgate").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// The per-user config file, if present
fn user_config_file() -> Option<PathBuf> {
    let path = dirs::home_dir()?.join(".contentgate").join("config.yaml");
    path.exists().then_some(path)
}

/// Pick the config file by source priority
fn locate_config_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    find_config_file().or_else(user_config_file)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve configuration from an explicit file, or defaults when none
pub fn load_config_from(path: Option<&Path>) -> Result<ResolvedConfig> {
    let Some(path) = path else {
        return Ok(ResolvedConfig::default());
    };

    let file = load_config_file(path)?;
    Ok(ResolvedConfig {
        thresholds: file.thresholds,
        limits: file.limits,
        config_file: Some(path.to_path_buf()),
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    load_config_from(locate_config_file().as_deref())
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}
