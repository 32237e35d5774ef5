//! # Application Configuration
//!
//! Configuration for `dbchat-server`, loaded by layering an optional
//! `config.yml` over built-in defaults, with environment variables on top.
//! The AI API credential is supplied through the environment at runtime and
//! is never persisted.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;
use std::env;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path of the bundled sample SQLite database. `SAMPLE_DB_PATH` env var.
    #[serde(default = "default_sample_db_path")]
    pub sample_db_path: String,
    /// The AI provider powering the agent.
    #[serde(default)]
    pub ai: ProviderConfig,
}

fn default_port() -> u16 {
    9090
}

fn default_sample_db_path() -> String {
    "db/sample.db".to_string()
}

/// Configuration for the AI provider instance.
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// The type of provider ("gemini" or "local").
    #[serde(default = "default_provider")]
    pub provider: String,
    /// The API URL. Optional for Gemini where it can be derived from the model.
    pub api_url: Option<String>,
    /// The API key. Optional for local providers.
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model_name: String,
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_url: None,
            api_key: None,
            model_name: default_model(),
        }
    }
}

/// Loads the application configuration.
///
/// Layers, lowest first: serde defaults, an optional YAML file, top-level
/// environment variables (`PORT`, `SAMPLE_DB_PATH`), and `DBCHAT_`-prefixed
/// variables for nested overrides (e.g. `DBCHAT_AI__API_KEY`).
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder();

    let config_path = config_path_override
        .map(str::to_string)
        .unwrap_or_else(|| "config.yml".to_string());
    if std::path::Path::new(&config_path).exists() {
        tracing::info!("Loading configuration from '{config_path}'.");
        builder = builder.add_source(File::new(&config_path, FileFormat::Yaml));
    }

    let settings = builder
        .add_source(Environment::default())
        .add_source(
            Environment::with_prefix("DBCHAT")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    // The credential is accepted from AI_API_KEY as a convenience; it is only
    // ever held in memory.
    if config.ai.api_key.is_none() {
        if let Ok(key) = env::var("AI_API_KEY") {
            if !key.is_empty() {
                config.ai.api_key = Some(key);
            }
        }
    }

    Ok(config)
}
