//! Offline template improver
//!
//! Wraps the prompt into a fixed scaffold of instruction lines instead of
//! calling a model. Used with `--offline` and whenever no API key exists but
//! a result is still wanted.

use super::{require_prompt, AiResult, PromptImprover};
use chrono::{DateTime, Local, TimeZone};

/// Default scaffold. `{{input}}` becomes the quoted prompt and `{{timestamp}}`
/// the local time; only the first occurrence on each line is replaced.
pub const DEFAULT_TEMPLATE_LINES: [&str; 8] = [
    "Роль: опытный эксперт в теме запроса.",
    "Задача: {{input}}",
    "",
    "Требования:",
    "- Дай структурированный ответ с заголовками и списками.",
    "- Укажи допущения, если данных недостаточно.",
    "- Заверши кратким выводом.",
    "Сформировано: {{timestamp}}",
];

/// Short date and time, as ru-RU locales print them
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%d.%m.%Y, %H:%M";

#[derive(Debug, Clone)]
pub struct TemplateImprover {
    lines: Vec<String>,
    timestamp_format: String,
}

impl Default for TemplateImprover {
    fn default() -> Self {
        Self {
            lines: DEFAULT_TEMPLATE_LINES.iter().map(|l| l.to_string()).collect(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl TemplateImprover {
    pub fn new(lines: Vec<String>, timestamp_format: impl Into<String>) -> Self {
        Self {
            lines,
            timestamp_format: timestamp_format.into(),
        }
    }

    /// Render the scaffold for `prompt` at a fixed point in time
    pub fn render_at<Tz: TimeZone>(&self, prompt: &str, now: &DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        let cleaned = collapse_whitespace(prompt);
        let quoted = format!("\"{cleaned}\"");
        let timestamp = now.format(&self.timestamp_format).to_string();

        self.lines
            .iter()
            .map(|line| {
                line.replacen("{{input}}", &quoted, 1)
                    .replacen("{{timestamp}}", &timestamp, 1)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl PromptImprover for TemplateImprover {
    fn improve(&self, prompt: &str) -> AiResult<String> {
        let prompt = require_prompt(prompt)?;
        Ok(self.render_at(prompt, &Local::now()))
    }

    fn name(&self) -> String {
        "offline template".to_string()
    }
}

/// Trim and squeeze every whitespace run into one space
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
