//! # Application Configuration
//!
//! This module defines the configuration of the `flashgen` CLI and loads it in layers:
//! built-in defaults, an optional YAML file, then `FLASHGEN_*` environment variables.
//! `${VAR}` placeholders in the YAML file are replaced with environment values.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use flashgen::constants::DEFAULT_GEMINI_MODEL;
use flashgen::{ProviderKind, ProviderSettings};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use tracing::info;

/// The file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "flashgen.yml";

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `flashgen.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Which AI backend to use. Loaded from `FLASHGEN_PROVIDER`.
    pub provider: ProviderKind,
    /// The model identifier. Loaded from `FLASHGEN_MODEL`.
    pub model: String,
    /// Overrides the provider endpoint. Required for `local`.
    #[serde(default)]
    pub api_url: Option<String>,
    /// Fallback API key, used when `GEMINI_API_KEY` is not set.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Where the CLI writes its logs.
    pub log_file: String,
}

impl AppConfig {
    pub fn provider_settings(&self) -> ProviderSettings {
        ProviderSettings {
            provider: self.provider,
            model: self.model.clone(),
            api_url: self.api_url.clone(),
            api_key: self.api_key.clone(),
        }
    }
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(e.to_string()))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration.
///
/// - An explicit `config_path_override` must exist; otherwise `flashgen.yml` in the
///   working directory is used if present.
/// - Keys are overridden by `FLASHGEN_...` variables (e.g., `FLASHGEN_MODEL`).
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    // Layer 1: Programmatic defaults.
    let mut builder = ConfigBuilder::builder()
        .set_default("provider", "gemini")?
        .set_default("model", DEFAULT_GEMINI_MODEL)?
        .set_default("log_file", "flashgen.log")?;

    // Layer 2: Config file (optional unless named explicitly).
    let file_content = match config_path_override {
        Some(path) => Some(read_and_substitute(path)?.ok_or_else(|| {
            ConfigError::NotFound(format!("Config file not found at '{path}'."))
        })?),
        None => read_and_substitute(DEFAULT_CONFIG_FILE)?,
    };
    if let Some(content) = file_content {
        info!(
            "Loading configuration from '{}'.",
            config_path_override.unwrap_or(DEFAULT_CONFIG_FILE)
        );
        builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
    }

    // Layer 3: Prefixed environment variables.
    let settings = builder
        .add_source(
            Environment::with_prefix("FLASHGEN")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    Ok(config)
}
