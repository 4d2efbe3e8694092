//! Client for a running better-prompt server
//!
//! Lets the CLI delegate improvement to a shared deployment that owns the
//! API key. The server normally bundles scores with the output; when it does
//! not, the caller fills them in locally with the same scorer.

use super::client::make_agent;
use super::{require_prompt, AiError, AiResult};
use crate::models::{ErrorBody, ImproveRequest, ImproveResponse};
use tracing::debug;

pub struct RemoteClient {
    base_url: String,
    agent: ureq::Agent,
}

impl RemoteClient {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            agent: make_agent(timeout_secs),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn improve_url(&self) -> String {
        format!("{}/api/improve", self.base_url)
    }

    /// POST the prompt to `/api/improve`; `scores` may be absent in the result
    pub fn improve(&self, prompt: &str) -> AiResult<ImproveResponse> {
        let prompt = require_prompt(prompt)?;
        let url = self.improve_url();
        debug!("Delegating improvement to {}", url);

        let response = self
            .agent
            .post(&url)
            .header("Content-Type", "application/json")
            .send_json(&ImproveRequest {
                prompt: prompt.to_string(),
            })
            .map_err(|e| AiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let text = response.into_body().read_to_string().unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error)
                .unwrap_or_else(|_| format!("server returned {status}"));
            return Err(AiError::ApiError { status, message });
        }

        response
            .into_body()
            .read_json::<ImproveResponse>()
            .map_err(|e| AiError::ParseError(e.to_string()))
    }
}
