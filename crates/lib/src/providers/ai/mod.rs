pub mod gemini;
pub mod local;

use crate::errors::AgentError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with an AI provider.
///
/// This defines a common interface for generating text from a system and
/// user prompt using different Large Language Models (Gemini, Groq, local
/// OpenAI-compatible servers).
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response from the given system and user prompt.
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, AgentError>;
}

dyn_clone::clone_trait_object!(AiProvider);
