//! Better Prompt - heuristic prompt scoring and LLM-backed prompt improvement
//!
//! The [`scoring`] module rates a prompt on four axes (efficiency, length,
//! clarity, structure) without any network access. The [`ai`] module rewrites
//! prompts through an OpenAI-compatible chat API or an offline template, and
//! [`server`] exposes both over a small JSON API.

pub mod ai;
pub mod config;
pub mod models;
pub mod reporters;
pub mod scoring;
pub mod server;
