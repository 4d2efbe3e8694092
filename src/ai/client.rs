//! LLM API client for OpenAI-compatible chat completion backends
//!
//! DeepSeek, OpenAI, OpenRouter and a local Ollama all speak the same
//! `/chat/completions` dialect, so one request path serves them all.
//! Sync HTTP via ureq; async callers wrap calls in `spawn_blocking`.

use super::prompts::{user_message, SYSTEM_PROMPT};
use super::{require_prompt, AiError, AiResult, PromptImprover};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

/// Supported LLM backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmBackend {
    #[default]
    DeepSeek,
    OpenAi,
    OpenRouter,
    Ollama,
}

impl LlmBackend {
    pub fn name(&self) -> &'static str {
        match self {
            LlmBackend::DeepSeek => "deepseek",
            LlmBackend::OpenAi => "openai",
            LlmBackend::OpenRouter => "openrouter",
            LlmBackend::Ollama => "ollama",
        }
    }

    pub fn env_key(&self) -> &'static str {
        match self {
            LlmBackend::DeepSeek => "DEEPSEEK_API_KEY",
            LlmBackend::OpenAi => "OPENAI_API_KEY",
            LlmBackend::OpenRouter => "OPENROUTER_API_KEY",
            LlmBackend::Ollama => "OLLAMA_MODEL",
        }
    }

    pub fn signup_url(&self) -> &'static str {
        match self {
            LlmBackend::DeepSeek => "https://platform.deepseek.com/api_keys",
            LlmBackend::OpenAi => "https://platform.openai.com/api-keys",
            LlmBackend::OpenRouter => "https://openrouter.ai/keys",
            LlmBackend::Ollama => "https://ollama.ai (no key needed, just run locally)",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            LlmBackend::DeepSeek => "deepseek-chat",
            LlmBackend::OpenAi => "gpt-4o-mini",
            LlmBackend::OpenRouter => "deepseek/deepseek-chat",
            LlmBackend::Ollama => "qwen2.5:7b",
        }
    }

    pub fn api_url(&self) -> &'static str {
        match self {
            LlmBackend::DeepSeek => "https://api.deepseek.com/chat/completions",
            LlmBackend::OpenAi => "https://api.openai.com/v1/chat/completions",
            LlmBackend::OpenRouter => "https://openrouter.ai/api/v1/chat/completions",
            LlmBackend::Ollama => "http://localhost:11434/v1/chat/completions",
        }
    }

    pub fn requires_api_key(&self) -> bool {
        !matches!(self, LlmBackend::Ollama)
    }

    /// Display name used in upstream error fallbacks
    fn display_name(&self) -> &'static str {
        match self {
            LlmBackend::DeepSeek => "DeepSeek",
            LlmBackend::OpenAi => "OpenAI",
            LlmBackend::OpenRouter => "OpenRouter",
            LlmBackend::Ollama => "Ollama",
        }
    }
}

impl FromStr for LlmBackend {
    type Err = AiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deepseek" => Ok(LlmBackend::DeepSeek),
            "openai" => Ok(LlmBackend::OpenAi),
            "openrouter" => Ok(LlmBackend::OpenRouter),
            "ollama" => Ok(LlmBackend::Ollama),
            other => Err(AiError::ConfigError(format!(
                "Unknown backend '{}'. Valid backends: deepseek, openai, openrouter, ollama",
                other
            ))),
        }
    }
}

impl std::fmt::Display for LlmBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub backend: LlmBackend,
    pub model: Option<String>,
    /// Overrides the backend's default endpoint (self-hosted proxies, tests)
    pub api_url: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            backend: LlmBackend::default(),
            model: None,
            api_url: None,
            max_tokens: 900,
            temperature: 0.4,
            timeout_secs: 120,
        }
    }
}

impl AiConfig {
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.backend.default_model())
    }

    pub fn api_url(&self) -> &str {
        self.api_url
            .as_deref()
            .unwrap_or_else(|| self.backend.api_url())
    }
}

/// Chat completion client over sync HTTP
pub struct AiClient {
    config: AiConfig,
    api_key: String,
    agent: ureq::Agent,
}

pub(crate) fn make_agent(timeout_secs: u64) -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false) // status codes are mapped to AiError by hand
        .timeout_global(Some(Duration::from_secs(timeout_secs)))
        .build()
        .new_agent()
}

impl AiClient {
    pub fn new(config: AiConfig, api_key: impl Into<String>) -> Self {
        let agent = make_agent(config.timeout_secs);
        Self {
            config,
            api_key: api_key.into(),
            agent,
        }
    }

    /// Build a client, preferring the backend's environment variable over
    /// `configured_key` (usually from the user config file).
    pub fn with_key(mut config: AiConfig, configured_key: Option<String>) -> AiResult<Self> {
        if !config.backend.requires_api_key() {
            if config.model.is_none() {
                if let Ok(model) = env::var("OLLAMA_MODEL") {
                    config.model = Some(model);
                }
            }
            return Ok(Self::new(config, "ollama"));
        }

        let env_key = config.backend.env_key();
        let api_key = env::var(env_key)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or(configured_key.filter(|k| !k.trim().is_empty()))
            .ok_or_else(|| AiError::MissingApiKey {
                env_var: env_key.to_string(),
                signup_url: config.backend.signup_url().to_string(),
            })?;

        Ok(Self::new(config, api_key))
    }

    pub fn backend(&self) -> LlmBackend {
        self.config.backend
    }

    pub fn model(&self) -> &str {
        self.config.model()
    }

    /// Request body for a completion call
    fn request_body(&self, messages: Vec<Message>) -> ChatRequest {
        ChatRequest {
            model: self.config.model().to_string(),
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            stream: false,
        }
    }

    /// Run one chat completion and return the first choice's content (sync)
    pub fn generate(&self, messages: Vec<Message>) -> AiResult<String> {
        let body = self.request_body(messages);
        debug!(
            "Requesting completion from {} ({}) at {}",
            self.config.backend,
            body.model,
            self.config.api_url()
        );

        let mut req = self
            .agent
            .post(self.config.api_url())
            .header("Content-Type", "application/json");

        if self.config.backend.requires_api_key() {
            req = req.header("Authorization", &format!("Bearer {}", self.api_key));
        }

        let response = req
            .send_json(&body)
            .map_err(|e| AiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let error_text = response.into_body().read_to_string().unwrap_or_default();
            let message = api_error_message(&error_text, self.config.backend)?;
            warn!("{} returned {}: {}", self.config.backend, status, message);
            return Err(AiError::ApiError { status, message });
        }

        let resp: ChatResponse = response
            .into_body()
            .read_json()
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        Ok(resp
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }
}

impl PromptImprover for AiClient {
    fn improve(&self, prompt: &str) -> AiResult<String> {
        let prompt = require_prompt(prompt)?;
        let messages = vec![
            Message::system(SYSTEM_PROMPT),
            Message::user(user_message(prompt)),
        ];

        let output = self.generate(messages)?;
        let output = output.trim();
        if output.is_empty() {
            return Err(AiError::EmptyCompletion);
        }
        Ok(output.to_string())
    }

    fn name(&self) -> String {
        format!("{} ({})", self.config.backend, self.config.model())
    }
}

/// Pull a human-readable message out of an upstream error body.
///
/// Understands `{"error": {"message": ...}}` and `{"error": "..."}`; other
/// JSON falls back to a generic "<Backend> error". A body that is not JSON at
/// all is a [`AiError::ParseError`], not an upstream verdict.
pub(crate) fn api_error_message(body: &str, backend: LlmBackend) -> AiResult<String> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        AiError::ParseError(format!("{} error body: {}", backend.display_name(), e))
    })?;
    let error = &value["error"];
    Ok(error["message"]
        .as_str()
        .or_else(|| error.as_str())
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} error", backend.display_name())))
}

// OpenAI-compatible API types
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_defaults() {
        assert_eq!(LlmBackend::default(), LlmBackend::DeepSeek);
        assert_eq!(LlmBackend::DeepSeek.default_model(), "deepseek-chat");
        assert_eq!(
            LlmBackend::DeepSeek.api_url(),
            "https://api.deepseek.com/chat/completions"
        );
        assert!(!LlmBackend::Ollama.requires_api_key());
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("DeepSeek".parse::<LlmBackend>().unwrap(), LlmBackend::DeepSeek);
        assert_eq!("openai".parse::<LlmBackend>().unwrap(), LlmBackend::OpenAi);
        assert_eq!(" ollama ".parse::<LlmBackend>().unwrap(), LlmBackend::Ollama);
        assert!(matches!(
            "claude".parse::<LlmBackend>(),
            Err(AiError::ConfigError(_))
        ));
    }

    #[test]
    fn test_config_overrides() {
        let config = AiConfig::default();
        assert_eq!(config.model(), "deepseek-chat");
        assert_eq!(config.max_tokens, 900);
        assert!((config.temperature - 0.4).abs() < f32::EPSILON);

        let config = AiConfig {
            model: Some("custom-model".to_string()),
            api_url: Some("http://127.0.0.1:9/v1/chat/completions".to_string()),
            ..Default::default()
        };
        assert_eq!(config.model(), "custom-model");
        assert_eq!(config.api_url(), "http://127.0.0.1:9/v1/chat/completions");
    }

    #[test]
    fn test_request_body_shape() {
        let client = AiClient::new(AiConfig::default(), "sk-test");
        let body = client.request_body(vec![
            Message::system(SYSTEM_PROMPT),
            Message::user(user_message("план")),
        ]);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "deepseek-chat");
        assert_eq!(json["stream"], false);
        assert_eq!(json["max_tokens"], 900);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "Исходный запрос:\nплан");
    }

    #[test]
    fn test_api_error_message_variants() {
        let nested = r#"{"error":{"message":"Insufficient Balance","type":"unknown_error"}}"#;
        assert_eq!(
            api_error_message(nested, LlmBackend::DeepSeek).unwrap(),
            "Insufficient Balance"
        );
        assert_eq!(
            api_error_message(r#"{"error":"model not found"}"#, LlmBackend::Ollama).unwrap(),
            "model not found"
        );
        assert_eq!(
            api_error_message("{}", LlmBackend::OpenAi).unwrap(),
            "OpenAI error"
        );
    }

    #[test]
    fn test_api_error_message_non_json_is_parse_error() {
        for body in ["<html>Bad Gateway</html>", ""] {
            assert!(matches!(
                api_error_message(body, LlmBackend::DeepSeek),
                Err(AiError::ParseError(_))
            ));
        }
    }

    #[test]
    fn test_with_key_uses_configured_key() {
        let client = AiClient::with_key(AiConfig::default(), Some("sk-config".into())).unwrap();
        assert_eq!(client.backend(), LlmBackend::DeepSeek);
        assert_eq!(client.name(), "deepseek (deepseek-chat)");
    }

    #[test]
    fn test_with_key_missing() {
        let config = AiConfig {
            backend: LlmBackend::OpenRouter,
            ..Default::default()
        };
        if env::var("OPENROUTER_API_KEY").is_err() {
            let err = AiClient::with_key(config, Some("   ".into()))
                .err()
                .expect("blank key must be rejected");
            assert!(matches!(err, AiError::MissingApiKey { .. }));
        }
    }

    #[test]
    fn test_ollama_needs_no_key() {
        let config = AiConfig {
            backend: LlmBackend::Ollama,
            model: Some("llama3".into()),
            ..Default::default()
        };
        let client = AiClient::with_key(config, None).unwrap();
        assert_eq!(client.model(), "llama3");
    }

    #[test]
    fn test_improve_rejects_empty_prompt_without_network() {
        let client = AiClient::new(AiConfig::default(), "sk-test");
        assert!(matches!(client.improve("   "), Err(AiError::EmptyPrompt)));
    }
}
