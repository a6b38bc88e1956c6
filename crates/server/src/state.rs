//! # Application State
//!
//! The shared state (`AppState`) and the logic for building it at startup.
//! All shared resources are constructed once and injected explicitly into
//! handlers through axum's `State` extractor; there are no ambient globals.

use crate::{config::AppConfig, storage};
use std::{sync::Arc, time::Duration};
use synthgen::{
    providers::ai::{gemini::GeminiProvider, openai::OpenAiProvider, CompletionProvider},
    GenerationClient, GenerationClientBuilder,
};
use turso::{Builder, Database};

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// The generation client driving the chunk loop.
    pub generation_client: Arc<GenerationClient>,
    /// The SQLite database for persisting generation results.
    pub db: Arc<Database>,
    /// Bounds storage insert retries.
    pub retry_policy: storage::RetryPolicy,
    /// Mutates colliding keys between storage attempts.
    pub collision_strategy: Arc<dyn storage::CollisionStrategy>,
}

/// Builds the shared application state from the configuration.
///
/// This instantiates the configured completion provider, the generation
/// client, and the database, and ensures the schema exists.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let request_timeout = Duration::from_secs(config.request_timeout_secs);

    let provider: Box<dyn CompletionProvider> = match config.ai_provider.as_str() {
        "gemini" => {
            let api_key = config
                .ai_api_key
                .clone()
                .ok_or_else(|| anyhow::anyhow!("AI_API_KEY is required for the gemini provider"))?;
            // If no URL is configured, derive it from the model name.
            let api_url = config.ai_api_url.clone().unwrap_or_else(|| {
                format!(
                    "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
                    config.ai_model.as_deref().unwrap_or("gemini-2.0-flash")
                )
            });
            Box::new(GeminiProvider::new(api_url, api_key, request_timeout)?)
        }
        "openai" => {
            let api_url = config.ai_api_url.clone().ok_or_else(|| {
                anyhow::anyhow!("AI_API_URL is required for the openai provider")
            })?;
            Box::new(OpenAiProvider::new(
                api_url,
                config.ai_api_key.clone(),
                config.ai_model.clone(),
                request_timeout,
            )?)
        }
        other => {
            return Err(anyhow::anyhow!("Unsupported AI provider: {other}"));
        }
    };

    let generation_client = GenerationClientBuilder::new()
        .completion_provider(provider)
        .build()?;

    let db = Builder::new_local(&config.db_url).build().await?;
    storage::initialize_schema(&db).await?;
    tracing::info!(db_path = %config.db_url, "Initialized generation storage (SQLite).");

    let retry_policy = storage::RetryPolicy {
        max_attempts: config.storage_max_attempts,
    };

    Ok(AppState {
        config: Arc::new(config),
        generation_client: Arc::new(generation_client),
        db: Arc::new(db),
        retry_policy,
        collision_strategy: Arc::new(storage::UniqueSuffixStrategy),
    })
}
