//! Chat-bot reply reporter
//!
//! Plain text, no ANSI codes: the improved prompt, then a header and one
//! `label: value%` line per axis in display order.

use crate::config::ScoreLabels;
use crate::models::{ImproveResponse, ScoreRecord};
use anyhow::Result;

pub fn render(response: &ImproveResponse, labels: &ScoreLabels) -> Result<String> {
    let mut out = response.output.trim().to_string();
    if let Some(scores) = &response.scores {
        out.push_str("\n\n");
        out.push_str(&render_scores(scores, labels));
    }
    Ok(out)
}

/// Header line plus the four labeled percentage lines
pub fn render_scores(scores: &ScoreRecord, labels: &ScoreLabels) -> String {
    let mut lines = vec![format!("📊 {}:", labels.header)];
    for (axis, value) in scores.entries() {
        lines.push(format!("{}: {}%", labels.label(axis), value));
    }
    lines.join("\n")
}
