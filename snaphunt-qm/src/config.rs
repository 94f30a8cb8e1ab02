//! Configuration resolution for snaphunt-qm
//!
//! Provides two-tier API key resolution with ENV -> TOML priority. The key
//! value itself is never logged; only the source it was loaded from.

use snaphunt_common::config::TomlConfig;
use snaphunt_common::{Error, Result};
use tracing::{info, warn};

/// Environment variable carrying the inference provider API key
pub const API_KEY_ENV: &str = "SNAPHUNT_OPENAI_API_KEY";

/// Resolve the OpenAI API key from 2-tier configuration
///
/// **Priority:** ENV -> TOML
pub fn resolve_openai_api_key(toml_config: &TomlConfig) -> Result<String> {
    let env_key = std::env::var(API_KEY_ENV).ok();
    resolve_from(env_key, toml_config.openai_api_key.clone())
}

fn resolve_from(env_key: Option<String>, toml_key: Option<String>) -> Result<String> {
    let mut sources = Vec::new();

    if env_key.as_deref().is_some_and(is_valid_key) {
        sources.push("environment");
    }
    if toml_key.as_deref().is_some_and(is_valid_key) {
        sources.push("TOML");
    }

    // Warn if multiple sources (potential misconfiguration)
    if sources.len() > 1 {
        warn!(
            "OpenAI API key found in multiple sources: {}. Using environment (highest priority).",
            sources.join(", ")
        );
    }

    if let Some(key) = env_key {
        if is_valid_key(&key) {
            info!("OpenAI API key loaded from environment variable");
            return Ok(key);
        }
    }

    if let Some(key) = toml_key {
        if is_valid_key(&key) {
            info!("OpenAI API key loaded from TOML config");
            return Ok(key);
        }
    }

    Err(Error::Config(format!(
        "OpenAI API key not configured. Please configure using one of:\n\
         1. Environment: {}=your-key-here\n\
         2. TOML config: ~/.config/snaphunt/snaphunt-qm.toml (openai_api_key = \"your-key\")",
        API_KEY_ENV
    )))
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}
