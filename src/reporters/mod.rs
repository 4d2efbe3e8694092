//! Output reporters for improved prompts and their scores
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with colored score bars
//! - `json` - Machine-readable `{output, scores}` JSON
//! - `chat` - Chat-bot reply with one labeled percentage line per axis
//!
//! Every format hides the score section when no scores are present, so a
//! failed or skipped scoring never shows up as a row of zeros.

mod chat;
mod json;
mod text;

use crate::config::ScoreLabels;
use crate::models::{ImproveResponse, ScoreRecord};
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Chat,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "chat" | "bot" => Ok(OutputFormat::Chat),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, chat",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Chat => write!(f, "chat"),
        }
    }
}

/// Render a response in the specified format
pub fn report(response: &ImproveResponse, format: &str, labels: &ScoreLabels) -> Result<String> {
    let fmt = OutputFormat::from_str(format)?;
    report_with_format(response, fmt, labels)
}

/// Render a response using an OutputFormat enum
pub fn report_with_format(
    response: &ImproveResponse,
    format: OutputFormat,
    labels: &ScoreLabels,
) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(response, labels),
        OutputFormat::Json => json::render(response),
        OutputFormat::Chat => chat::render(response, labels),
    }
}

/// Render only the score section, for scoring text without an improvement
pub fn report_scores(
    scores: &ScoreRecord,
    format: OutputFormat,
    labels: &ScoreLabels,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_scores(scores, labels)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(scores)?),
        OutputFormat::Chat => Ok(chat::render_scores(scores, labels)),
    }
}
