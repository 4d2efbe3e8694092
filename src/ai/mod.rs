//! Prompt improvement oracles
//!
//! This module turns a raw prompt into an improved one. The main backend is an
//! OpenAI-compatible chat completion API (DeepSeek by default) using the BYOK
//! (bring your own key) model; API keys are read from environment variables
//! or the user config.
//!
//! # Environment Variables
//!
//! - `DEEPSEEK_API_KEY`: Required for the DeepSeek backend (default)
//! - `OPENAI_API_KEY`: Required for the OpenAI backend
//! - `OPENROUTER_API_KEY`: Required for the OpenRouter backend
//! - `OLLAMA_MODEL`: Optional model override for a local Ollama
//!
//! # Example
//!
//! ```rust,ignore
//! use better_prompt::ai::{AiClient, AiConfig, PromptImprover};
//!
//! let client = AiClient::with_key(AiConfig::default(), None)?;
//! let improved = client.improve("напиши письмо начальнику")?;
//! ```

mod client;
mod prompts;
mod remote;
mod template;

pub use client::{AiClient, AiConfig, LlmBackend, Message, Role};
pub use prompts::{user_message, SYSTEM_PROMPT};
pub use remote::RemoteClient;
pub use template::{TemplateImprover, DEFAULT_TEMPLATE_LINES, DEFAULT_TIMESTAMP_FORMAT};

use thiserror::Error;

/// Errors that can occur while improving a prompt
#[derive(Error, Debug)]
pub enum AiError {
    #[error("Missing API key: {env_var} not set. Get your key at {signup_url}")]
    MissingApiKey { env_var: String, signup_url: String },

    #[error("Prompt required")]
    EmptyPrompt,

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("Model returned an empty completion")]
    EmptyCompletion,

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

pub type AiResult<T> = Result<T, AiError>;

/// Anything that can rewrite a prompt into a clearer instruction.
///
/// Implementations block on I/O; async callers should run them on a
/// blocking thread.
pub trait PromptImprover: Send + Sync {
    fn improve(&self, prompt: &str) -> AiResult<String>;

    /// Short human-readable name, e.g. `deepseek (deepseek-chat)`
    fn name(&self) -> String;
}

/// Reject prompts that are empty after trimming
pub(crate) fn require_prompt(prompt: &str) -> AiResult<&str> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        Err(AiError::EmptyPrompt)
    } else {
        Ok(trimmed)
    }
}
