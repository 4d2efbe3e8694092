//! Heuristic Prompt Scoring System
//!
//! This module assigns a quality score to any prompt text along four axes
//! without calling any external service. It is the single implementation
//! shared by the HTTP server, the CLI and the client-side fallback.
//!
//! # Scoring Formula
//!
//! ```text
//! Length     = clamp(100 - |words - 180| × 0.35, 45, 95)
//! Clarity    = clamp(100 - |words/sentences - 18| × 3, 50, 96)
//! Structure  = clamp(40 + bonuses, 45, 98)
//! Efficiency = clamp(mean(Length, Clarity, Structure) + directive, 50, 98)
//! ```
//!
//! All four values are rounded to the nearest integer at the very end.
//! Empty or whitespace-only text scores exactly 0 on every axis.
//!
//! # Structure Bonuses (independent, additive)
//!
//! - **Newline** (+15): text spans more than one line
//! - **List marker** (+30): a line starts with `1.`, `-` or `•`
//! - **Section heading** (+10): a capitalized line ending with a colon
//! - **Paragraph break** (+10): a blank line separates two blocks
//!
//! # Directive Bonus
//!
//! Efficiency gains a flat +6 when the text contains an imperative task verb
//! such as "сделай" or "опиши"; see [`patterns::DIRECTIVE_STEMS`].
//!
//! # Example
//!
//! A 13-word, five-sentence prompt with a numbered list:
//! - Length: 100 - 167 × 0.35 = 41.55 → floor 45
//! - Clarity: 100 - |2.6 - 18| × 3 = 53.8 → 54
//! - Structure: 40 + 15 + 30 = 85
//! - Efficiency: (45 + 53.8 + 85) / 3 + 6 = 67.27 → 67

pub mod patterns;
mod prompt_scorer;

pub use prompt_scorer::{
    clarity_score, efficiency_score, length_score, score, structure_score, StructureSignals,
    TextStats,
};
