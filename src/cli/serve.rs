//! Serve command handler

use anyhow::Result;
use better_prompt::ai::{AiError, PromptImprover};
use better_prompt::config::UserConfig;
use better_prompt::server::{self, AppState, ServerConfig};
use std::sync::Arc;
use tracing::warn;

/// Start the HTTP API and block until Ctrl-C
pub fn run(host: Option<String>, port: Option<u16>, offline: bool) -> Result<()> {
    let config = UserConfig::load()?;
    let improver = build_improver(&config, offline)?;

    let server_config = ServerConfig {
        host: host.unwrap_or_else(|| config.server_host().to_string()),
        port: port.unwrap_or_else(|| config.server_port()),
    };

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(server::serve(server_config, AppState::new(improver)))
}

/// A missing API key still lets the server start; each improve request then fails
fn build_improver(config: &UserConfig, offline: bool) -> Result<Option<Arc<dyn PromptImprover>>> {
    if offline {
        return Ok(Some(Arc::new(config.template_improver())));
    }

    let ai = config.ai_config()?;
    match config.ai_client(ai) {
        Ok(client) => Ok(Some(Arc::new(client))),
        Err(e @ AiError::MissingApiKey { .. }) => {
            warn!("{}", e);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
