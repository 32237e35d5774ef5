//! # Application State
//!
//! The shared state holds the configuration, the instantiated SQL agent, and
//! the single chat session. The session sits behind a `tokio::sync::Mutex`
//! so turns run to completion one at a time — there are never overlapping
//! in-flight turns against the same database handle.

use crate::config::AppConfig;
use dbchat::providers::ai::{gemini::GeminiProvider, local::LocalAiProvider, AiProvider};
use dbchat::{Session, SqlAgent};
use std::sync::Arc;
use tokio::sync::Mutex;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// The agent delegating questions to the AI provider.
    pub agent: Arc<SqlAgent>,
    /// The single logical session: handle, temp slot, and transcript.
    pub session: Arc<Mutex<Session>>,
}

/// Builds the shared application state from the configuration.
pub fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let provider: Box<dyn AiProvider> = match config.ai.provider.as_str() {
        "gemini" => {
            let api_key = config
                .ai
                .api_key
                .clone()
                .ok_or_else(|| anyhow::anyhow!("an API key is required for the gemini provider"))?;
            // If api_url is not provided, construct it from the model name.
            let api_url = config.ai.api_url.clone().unwrap_or_else(|| {
                format!(
                    "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
                    config.ai.model_name
                )
            });
            Box::new(GeminiProvider::new(api_url, api_key)?)
        }
        "local" => {
            let api_url = config.ai.api_url.clone().ok_or_else(|| {
                anyhow::anyhow!("ai.api_url is required for the local provider")
            })?;
            Box::new(LocalAiProvider::new(
                api_url,
                config.ai.api_key.clone(),
                Some(config.ai.model_name.clone()),
            )?)
        }
        other => {
            return Err(anyhow::anyhow!("Unsupported AI provider: {other}"));
        }
    };

    Ok(AppState {
        config: Arc::new(config),
        agent: Arc::new(SqlAgent::new(provider)),
        session: Arc::new(Mutex::new(Session::new())),
    })
}
