//! Text (terminal) reporter with colors and score bars

use crate::config::ScoreLabels;
use crate::models::{ImproveResponse, ScoreRecord};
use anyhow::Result;

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Width of a full score bar in cells
const BAR_WIDTH: usize = 20;

/// Render response as formatted terminal output
pub fn render(response: &ImproveResponse, labels: &ScoreLabels) -> Result<String> {
    let mut out = String::new();

    out.push_str(&format!("\n{BOLD}Prompt{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(response.output.trim());
    out.push_str("\n\n");

    if let Some(scores) = &response.scores {
        out.push_str(&render_scores(scores, labels));
        out.push('\n');
    }

    Ok(out)
}

/// Header plus one bar line per axis
pub fn render_scores(scores: &ScoreRecord, labels: &ScoreLabels) -> String {
    let mut out = format!("{BOLD}{}{RESET}\n", labels.header.to_uppercase());
    let width = scores
        .entries()
        .iter()
        .map(|(axis, _)| labels.label(*axis).chars().count())
        .max()
        .unwrap_or(0);

    for (axis, value) in scores.entries() {
        let label = labels.label(axis);
        let pad = width - label.chars().count();
        out.push_str(&format!(
            "  {}{}  {}  {}\n",
            label,
            " ".repeat(pad),
            score_bar(value),
            format_score(value)
        ));
    }
    out
}

/// Filled and empty cells proportional to the percentage
fn score_bar(value: u8) -> String {
    let filled = (usize::from(value.min(100)) * BAR_WIDTH + 50) / 100;
    format!(
        "{}{DIM}{}{RESET}",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled)
    )
}

/// Format score with color
fn format_score(value: u8) -> String {
    let color = if value >= 80 {
        "\x1b[32m"
    } else if value >= 60 {
        "\x1b[33m"
    } else {
        "\x1b[31m"
    };
    format!("{color}{:>3}%{RESET}", value)
}
