//! # Application Configuration
//!
//! Loads server configuration from an optional `config.yml` file layered
//! under plain environment variables, so a bare `PORT`/`AI_API_URL`
//! environment is enough to run the server.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;

/// The root configuration structure.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT`.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The path to the SQLite database file. Loaded from `DB_URL`.
    #[serde(default = "default_db_url")]
    pub db_url: String,
    /// Which completion backend to use: "openai" (any OpenAI-compatible API,
    /// e.g. Groq) or "gemini". Loaded from `AI_PROVIDER`.
    #[serde(default = "default_ai_provider")]
    pub ai_provider: String,
    /// The completion API endpoint. Required for the openai provider; for
    /// gemini it can be derived from the model name. Loaded from `AI_API_URL`.
    #[serde(default)]
    pub ai_api_url: Option<String>,
    /// The completion API key. Loaded from `AI_API_KEY`.
    #[serde(default)]
    pub ai_api_key: Option<String>,
    /// The model identifier to request. Loaded from `AI_MODEL`.
    #[serde(default)]
    pub ai_model: Option<String>,
    /// Per-completion-call timeout in seconds. A hung model call would
    /// otherwise block the whole chunk loop.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// How many insert attempts the storage retry policy allows.
    #[serde(default = "default_storage_max_attempts")]
    pub storage_max_attempts: usize,
}

fn default_port() -> u16 {
    9090
}

fn default_db_url() -> String {
    "db/synthgen.db".to_string()
}

fn default_ai_provider() -> String {
    "openai".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_storage_max_attempts() -> usize {
    3
}

/// Loads the application configuration.
///
/// An optional `config.yml` provides the base layer; environment variables
/// override it key by key.
pub fn get_config() -> anyhow::Result<AppConfig> {
    let settings = ConfigBuilder::builder()
        .add_source(File::new("config.yml", FileFormat::Yaml).required(false))
        .add_source(Environment::default())
        .build()?;

    Ok(settings.try_deserialize()?)
}
