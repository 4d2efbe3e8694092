//! Prompt scorer
//!
//! Pure text-in, record-out scoring. No state, no I/O, safe to call from any
//! thread or context.

use super::patterns;
use crate::models::ScoreRecord;

/// Word count that earns the best length score
const TARGET_WORD_COUNT: f64 = 180.0;
const LENGTH_PENALTY_PER_WORD: f64 = 0.35;
const LENGTH_FLOOR: f64 = 45.0;
const LENGTH_CEILING: f64 = 95.0;

/// Average sentence length (in words) that earns the best clarity score
const TARGET_SENTENCE_LENGTH: f64 = 18.0;
const CLARITY_PENALTY_PER_WORD: f64 = 3.0;
const CLARITY_FLOOR: f64 = 50.0;
const CLARITY_CEILING: f64 = 96.0;

const STRUCTURE_BASE: f64 = 40.0;
const NEWLINE_BONUS: f64 = 15.0;
const LIST_MARKER_BONUS: f64 = 30.0;
const SECTION_HEADING_BONUS: f64 = 10.0;
const PARAGRAPH_BREAK_BONUS: f64 = 10.0;
const STRUCTURE_FLOOR: f64 = 45.0;
const STRUCTURE_CEILING: f64 = 98.0;

const DIRECTIVE_BONUS: f64 = 6.0;
const EFFICIENCY_FLOOR: f64 = 50.0;
const EFFICIENCY_CEILING: f64 = 98.0;

/// Word and sentence counts of a trimmed text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStats {
    pub word_count: usize,
    /// Never zero, so the average below is always defined
    pub sentence_count: usize,
}

impl TextStats {
    pub fn from_text(text: &str) -> Self {
        let word_count = text.split_whitespace().count();
        let sentences = patterns::sentence_terminators()
            .split(text)
            .filter(|fragment| !fragment.trim().is_empty())
            .count();

        Self {
            word_count,
            sentence_count: sentences.max(1),
        }
    }

    pub fn avg_sentence_length(&self) -> f64 {
        self.word_count as f64 / self.sentence_count as f64
    }
}

/// Structuring signals detected in a text. Each one is independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StructureSignals {
    pub has_newline: bool,
    pub has_list_marker: bool,
    pub has_section_heading: bool,
    pub has_paragraph_break: bool,
}

impl StructureSignals {
    pub fn detect(text: &str) -> Self {
        Self {
            has_newline: text.contains('\n'),
            has_list_marker: patterns::list_marker().is_match(text),
            has_section_heading: patterns::section_heading().is_match(text),
            has_paragraph_break: patterns::paragraph_break().is_match(text),
        }
    }

    /// Sum of the bonuses earned on top of the base
    pub fn bonus(&self) -> f64 {
        let mut bonus = 0.0;
        if self.has_newline {
            bonus += NEWLINE_BONUS;
        }
        if self.has_list_marker {
            bonus += LIST_MARKER_BONUS;
        }
        if self.has_section_heading {
            bonus += SECTION_HEADING_BONUS;
        }
        if self.has_paragraph_break {
            bonus += PARAGRAPH_BREAK_BONUS;
        }
        bonus
    }
}

/// Symmetric penalty around the target word count, kept within [45, 95]
pub fn length_score(word_count: usize) -> f64 {
    let deviation = (word_count as f64 - TARGET_WORD_COUNT).abs();
    (100.0 - deviation * LENGTH_PENALTY_PER_WORD).clamp(LENGTH_FLOOR, LENGTH_CEILING)
}

/// Penalty on average sentence length, kept within [50, 96]
pub fn clarity_score(avg_sentence_length: f64) -> f64 {
    let deviation = (avg_sentence_length - TARGET_SENTENCE_LENGTH).abs();
    (100.0 - deviation * CLARITY_PENALTY_PER_WORD).clamp(CLARITY_FLOOR, CLARITY_CEILING)
}

/// Base plus detected bonuses, kept within [45, 98]
pub fn structure_score(signals: &StructureSignals) -> f64 {
    (STRUCTURE_BASE + signals.bonus()).clamp(STRUCTURE_FLOOR, STRUCTURE_CEILING)
}

/// Mean of the other three axes plus the directive bonus, kept within [50, 98]
pub fn efficiency_score(length: f64, clarity: f64, structure: f64, has_directive: bool) -> f64 {
    let mean = (length + clarity + structure) / 3.0;
    let bonus = if has_directive { DIRECTIVE_BONUS } else { 0.0 };
    (mean + bonus).clamp(EFFICIENCY_FLOOR, EFFICIENCY_CEILING)
}

/// Score a prompt text on all four axes.
///
/// Total over its input: empty or whitespace-only text yields
/// [`ScoreRecord::ZERO`], anything else a record within the per-axis ranges.
pub fn score(text: &str) -> ScoreRecord {
    let text = text.trim();
    if text.is_empty() {
        return ScoreRecord::ZERO;
    }

    let stats = TextStats::from_text(text);
    let length = length_score(stats.word_count);
    let clarity = clarity_score(stats.avg_sentence_length());
    let structure = structure_score(&StructureSignals::detect(text));
    let efficiency = efficiency_score(length, clarity, structure, patterns::has_directive(text));

    ScoreRecord {
        efficiency: to_percent(efficiency),
        length: to_percent(length),
        clarity: to_percent(clarity),
        structure: to_percent(structure),
    }
}

fn to_percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
