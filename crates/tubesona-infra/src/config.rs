//! Service configuration loader.
//!
//! Generation and server settings come from an optional `tubesona.toml`
//! (missing or malformed files fall back to defaults with a warning).
//! API keys come from the environment only and are required: a missing
//! key is a [`ConfigError`] at startup, never a per-request failure.

use std::path::Path;

use secrecy::SecretString;

use tubesona_types::config::{GenerationConfig, GlobalConfig, ServerConfig};
use tubesona_types::error::ConfigError;

/// Fully resolved service settings.
///
/// API keys are wrapped in [`SecretString`] and never logged or included
/// in Debug output (`Settings` intentionally does not derive Debug).
pub struct Settings {
    pub youtube_api_key: SecretString,
    pub openai_api_key: SecretString,
    pub generation: GenerationConfig,
    pub server: ServerConfig,
}

impl Settings {
    /// Load settings from `config_path` plus the environment.
    ///
    /// Requires `YOUTUBE_API_KEY` and `OPENAI_API_KEY` env vars.
    pub async fn load(config_path: &Path) -> Result<Self, ConfigError> {
        let file = load_file_config(config_path).await;
        Ok(Self {
            youtube_api_key: require_env("YOUTUBE_API_KEY")?,
            openai_api_key: require_env("OPENAI_API_KEY")?,
            generation: file.generation,
            server: file.server,
        })
    }
}

/// Load the optional file config, falling back to defaults.
///
/// - Missing file: defaults, logged at debug.
/// - Unreadable or unparseable file: defaults, logged at warn.
pub async fn load_file_config(path: &Path) -> GlobalConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("no config file at {}, using defaults", path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("failed to read {}: {err}, using defaults", path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("failed to parse {}: {err}, using defaults", path.display());
            GlobalConfig::default()
        }
    }
}

fn require_env(key: &'static str) -> Result<SecretString, ConfigError> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(SecretString::from(value)),
        _ => Err(ConfigError::MissingKey(key)),
    }
}
