//! Configuration module for better-prompt
//!
//! This module handles:
//! - User-level configuration (~/.config/better-prompt/config.toml)
//! - Environment variable overrides
//! - Score labels used by the reporters
//! - Offline template settings

mod user_config;

pub use user_config::{
    AiSection, LabelsSection, ScoreLabels, ServerSection, TemplateSection, UserConfig,
    DEFAULT_HOST, DEFAULT_PORT,
};
