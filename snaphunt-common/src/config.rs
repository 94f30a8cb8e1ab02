//! Configuration loading for SnapHunt services
//!
//! Two-tier configuration:
//! 1. **Environment variables** (highest priority, e.g. the provider API key)
//! 2. **TOML configuration file** (per-module, bootstrap settings)
//!
//! TOML settings cannot change while a service is running; a restart picks up
//! edits. Resolution of individual settings against the environment is the
//! owning service's concern; this module supplies the file format and paths.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Bootstrap configuration loaded from a TOML file
///
/// **Minimal by design** - bootstrap concerns only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Inference provider API key
    ///
    /// Environment variable takes priority over this field; the key must
    /// never appear in source or logs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,

    /// Inference provider model identifier (optional override)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Inference provider base URL (optional override, e.g. a proxy)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,

    /// HTTP bind address
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path to a JSON catalogue file overriding the built-in catalogue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalogue_path: Option<PathBuf>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            model: None,
            api_base_url: None,
            bind_address: default_bind_address(),
            port: default_port(),
            catalogue_path: None,
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5731 // snaphunt-qm standard port
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Default configuration file path for a module
///
/// Linux: `~/.config/snaphunt/<module>.toml`, falling back to
/// `/etc/snaphunt/<module>.toml`. Other platforms use the OS config
/// directory.
pub fn default_config_path(module: &str) -> Option<PathBuf> {
    let file_name = format!("{}.toml", module);

    let user_config = dirs::config_dir().map(|d| d.join("snaphunt").join(&file_name));

    if cfg!(target_os = "linux") {
        if let Some(path) = &user_config {
            if path.exists() {
                return user_config;
            }
        }
        let system_config = PathBuf::from("/etc/snaphunt").join(&file_name);
        if system_config.exists() {
            return Some(system_config);
        }
    }

    user_config
}

/// Load configuration from a TOML file
///
/// A missing file yields the built-in defaults; a present but malformed file
/// is an error (misconfiguration should not be silently ignored).
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("read {}: {}", path.display(), e)))?;
    toml::from_str(&content).map_err(|e| Error::Config(format!("parse {}: {}", path.display(), e)))
}

/// Write configuration to a TOML file (temp file + rename)
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("serialize config: {}", e)))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("toml.tmp");
    std::fs::write(&tmp_path, content)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}
