//! JSON reporter
//!
//! Outputs the `{output, scores}` bundle as pretty-printed JSON, the same
//! shape the HTTP API returns.

use crate::models::ImproveResponse;
use anyhow::Result;

/// Render response as JSON
pub fn render(response: &ImproveResponse) -> Result<String> {
    Ok(serde_json::to_string_pretty(response)?)
}
