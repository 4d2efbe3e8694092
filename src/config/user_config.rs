//! User-level configuration for better-prompt
//!
//! Supports loading config from:
//! - Environment variables
//! - ~/.config/better-prompt/config.toml

use crate::ai::{AiClient, AiConfig, AiResult, LlmBackend, TemplateImprover};
use crate::models::ScoreAxis;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct UserConfig {
    #[serde(default)]
    pub ai: AiSection,
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub labels: LabelsSection,
    #[serde(default)]
    pub template: TemplateSection,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct AiSection {
    /// Backend: "deepseek" (default), "openai", "openrouter", "ollama"
    pub backend: Option<String>,

    /// API key for the selected backend (the backend's env var wins)
    pub api_key: Option<String>,

    /// Model override (default depends on backend)
    pub model: Option<String>,

    /// Endpoint override for proxies or self-hosted gateways
    pub api_url: Option<String>,

    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,

    /// Base URL of a shared better-prompt server used by `improve`
    pub remote_url: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct LabelsSection {
    pub header: Option<String>,
    pub efficiency: Option<String>,
    pub length: Option<String>,
    pub clarity: Option<String>,
    pub structure: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct TemplateSection {
    pub lines: Option<Vec<String>>,
    pub timestamp_format: Option<String>,
}

/// Display labels for the four score axes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreLabels {
    pub header: String,
    pub efficiency: String,
    pub length: String,
    pub clarity: String,
    pub structure: String,
}

impl Default for ScoreLabels {
    fn default() -> Self {
        Self {
            header: "Оценка промпта".to_string(),
            efficiency: "Эффективность".to_string(),
            length: "Длина".to_string(),
            clarity: "Ясность".to_string(),
            structure: "Структура".to_string(),
        }
    }
}

impl ScoreLabels {
    pub fn label(&self, axis: ScoreAxis) -> &str {
        match axis {
            ScoreAxis::Efficiency => &self.efficiency,
            ScoreAxis::Length => &self.length,
            ScoreAxis::Clarity => &self.clarity,
            ScoreAxis::Structure => &self.structure,
        }
    }
}

impl UserConfig {
    /// Load config from all sources, with priority:
    /// 1. Environment variables (highest)
    /// 2. User config (~/.config/better-prompt/config.toml)
    pub fn load() -> Result<Self> {
        let mut config = UserConfig::default();

        if let Some(path) = Self::user_config_path().filter(|p| p.exists()) {
            if let Some(user_config) = Self::read_file(&path) {
                config.merge(user_config);
            }
        }

        config.apply_env();
        Ok(config)
    }

    /// Parse a config file, logging and skipping it when unreadable or invalid
    fn read_file(path: &Path) -> Option<UserConfig> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                return None;
            }
        };
        match toml::from_str::<UserConfig>(&content) {
            Ok(config) => {
                debug!("Loaded user config from {}", path.display());
                Some(config)
            }
            Err(e) => {
                warn!("Ignoring invalid config {}: {}", path.display(), e);
                None
            }
        }
    }

    fn apply_env(&mut self) {
        if let Ok(backend) = std::env::var("BETTER_PROMPT_BACKEND") {
            self.ai.backend = Some(backend);
        }
        if let Ok(url) = std::env::var("BETTER_PROMPT_SERVER") {
            self.server.remote_url = Some(url);
        }
    }

    /// Get the user config directory path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("better-prompt").join("config.toml"))
    }

    /// Merge another config into this one (other takes priority)
    fn merge(&mut self, other: UserConfig) {
        let UserConfig {
            ai,
            server,
            labels,
            template,
        } = other;

        merge_opt(&mut self.ai.backend, ai.backend);
        merge_opt(&mut self.ai.api_key, ai.api_key);
        merge_opt(&mut self.ai.model, ai.model);
        merge_opt(&mut self.ai.api_url, ai.api_url);
        merge_opt(&mut self.ai.temperature, ai.temperature);
        merge_opt(&mut self.ai.max_tokens, ai.max_tokens);
        merge_opt(&mut self.ai.timeout_secs, ai.timeout_secs);

        merge_opt(&mut self.server.host, server.host);
        merge_opt(&mut self.server.port, server.port);
        merge_opt(&mut self.server.remote_url, server.remote_url);

        merge_opt(&mut self.labels.header, labels.header);
        merge_opt(&mut self.labels.efficiency, labels.efficiency);
        merge_opt(&mut self.labels.length, labels.length);
        merge_opt(&mut self.labels.clarity, labels.clarity);
        merge_opt(&mut self.labels.structure, labels.structure);

        merge_opt(&mut self.template.lines, template.lines);
        merge_opt(&mut self.template.timestamp_format, template.timestamp_format);
    }

    pub fn backend(&self) -> AiResult<LlmBackend> {
        match self.ai.backend.as_deref() {
            Some(name) => name.parse(),
            None => Ok(LlmBackend::default()),
        }
    }

    /// Completion settings with defaults filled in
    pub fn ai_config(&self) -> AiResult<AiConfig> {
        let defaults = AiConfig::default();
        Ok(AiConfig {
            backend: self.backend()?,
            model: self.ai.model.clone(),
            api_url: self.ai.api_url.clone(),
            max_tokens: self.ai.max_tokens.unwrap_or(defaults.max_tokens),
            temperature: self.ai.temperature.unwrap_or(defaults.temperature),
            timeout_secs: self.ai.timeout_secs.unwrap_or(defaults.timeout_secs),
        })
    }

    /// Build the LLM client for `ai` using the configured key as a fallback
    pub fn ai_client(&self, ai: AiConfig) -> AiResult<AiClient> {
        AiClient::with_key(ai, self.ai.api_key.clone())
    }

    pub fn template_improver(&self) -> TemplateImprover {
        match (&self.template.lines, &self.template.timestamp_format) {
            (None, None) => TemplateImprover::default(),
            (lines, format) => TemplateImprover::new(
                lines.clone().unwrap_or_else(|| {
                    crate::ai::DEFAULT_TEMPLATE_LINES
                        .iter()
                        .map(|l| l.to_string())
                        .collect()
                }),
                format
                    .clone()
                    .unwrap_or_else(|| crate::ai::DEFAULT_TIMESTAMP_FORMAT.to_string()),
            ),
        }
    }

    pub fn server_host(&self) -> &str {
        self.server.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn server_port(&self) -> u16 {
        self.server.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn remote_url(&self) -> Option<&str> {
        self.server.remote_url.as_deref().filter(|u| !u.trim().is_empty())
    }

    pub fn timeout_secs(&self) -> u64 {
        self.ai.timeout_secs.unwrap_or(AiConfig::default().timeout_secs)
    }

    pub fn labels(&self) -> ScoreLabels {
        let defaults = ScoreLabels::default();
        let pick = |value: &Option<String>, default: String| value.clone().unwrap_or(default);
        ScoreLabels {
            header: pick(&self.labels.header, defaults.header),
            efficiency: pick(&self.labels.efficiency, defaults.efficiency),
            length: pick(&self.labels.length, defaults.length),
            clarity: pick(&self.labels.clarity, defaults.clarity),
            structure: pick(&self.labels.structure, defaults.structure),
        }
    }

    /// Serialize the effective config with the API key masked
    pub fn to_masked_toml(&self) -> Result<String> {
        let mut shown = self.clone();
        if let Some(key) = shown.ai.api_key.as_mut() {
            *key = mask_secret(key);
        }
        Ok(toml::to_string_pretty(&shown)?)
    }

    /// Initialize user config directory and create example config
    pub fn init_user_config() -> Result<PathBuf> {
        let config_path = Self::user_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Self::write_example(&config_path)?;
        Ok(config_path)
    }

    /// Write the example config to `path` unless a file already exists there
    pub fn write_example(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, EXAMPLE_CONFIG)?;
        Ok(true)
    }
}

fn merge_opt<T>(target: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *target = value;
    }
}

/// Keep the first four characters of a secret, hide the rest
fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}****")
}

const EXAMPLE_CONFIG: &str = r#"# better-prompt User Configuration

[ai]
# Backend: "deepseek" (default), "openai", "openrouter" or "ollama" (free, local)
# backend = "deepseek"

# Key for the selected backend. DEEPSEEK_API_KEY / OPENAI_API_KEY /
# OPENROUTER_API_KEY take priority when set.
# api_key = "sk-..."

# model = "deepseek-chat"
# api_url = "https://api.deepseek.com/chat/completions"
# temperature = 0.4
# max_tokens = 900
# timeout_secs = 120

[server]
# host = "0.0.0.0"
# port = 3000
# Shared server used by `better-prompt improve` (or BETTER_PROMPT_SERVER)
# remote_url = "http://localhost:3000"

[labels]
# header = "Оценка промпта"
# efficiency = "Эффективность"
# length = "Длина"
# clarity = "Ясность"
# structure = "Структура"

[template]
# Offline scaffold; {{input}} and {{timestamp}} are substituted
# lines = ["Задача: {{input}}", "Сформировано: {{timestamp}}"]
# timestamp_format = "%d.%m.%Y, %H:%M"
"#;
