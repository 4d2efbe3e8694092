//! Improve command - rewrite a prompt and score the result

use super::input::read_input;
use anyhow::{Context, Result};
use better_prompt::ai::{AiConfig, LlmBackend, PromptImprover, RemoteClient};
use better_prompt::config::UserConfig;
use better_prompt::models::ImproveResponse;
use better_prompt::reporters;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug)]
pub struct ImproveArgs {
    pub text: Option<String>,
    pub file: Option<PathBuf>,
    pub format: String,
    pub server: Option<String>,
    pub offline: bool,
    pub backend: Option<String>,
    pub model: Option<String>,
}

pub fn run(args: ImproveArgs) -> Result<()> {
    let input = read_input(args.text.clone(), args.file.as_deref())?;
    let config = UserConfig::load()?;

    let remote = args
        .server
        .as_deref()
        .or(config.remote_url())
        .filter(|_| !args.offline);

    let response = match remote {
        Some(url) => {
            let client = RemoteClient::new(url, config.timeout_secs());
            info!("Improving prompt via {}", client.improve_url());
            client
                .improve(&input)
                .with_context(|| format!("Server {} failed", client.base_url()))?
                .ensure_scores()
        }
        None => {
            let improver = local_improver(&config, &args)?;
            info!("Improving prompt with {}", improver.name());
            let output = improver.improve(&input)?;
            ImproveResponse::scored(output)
        }
    };

    let out = reporters::report(&response, &args.format, &config.labels())?;
    println!("{}", out.trim_end());
    Ok(())
}

/// Offline template or a direct LLM client, honoring --backend / --model
fn local_improver(config: &UserConfig, args: &ImproveArgs) -> Result<Box<dyn PromptImprover>> {
    if args.offline {
        return Ok(Box::new(config.template_improver()));
    }

    let ai = apply_overrides(
        config.ai_config()?,
        args.backend.as_deref(),
        args.model.clone(),
    )?;
    Ok(Box::new(config.ai_client(ai)?))
}

/// Switching backend drops model and URL settings meant for the old one
fn apply_overrides(
    mut ai: AiConfig,
    backend: Option<&str>,
    model: Option<String>,
) -> Result<AiConfig> {
    if let Some(name) = backend {
        let backend: LlmBackend = name.parse()?;
        if backend != ai.backend {
            ai.model = None;
            ai.api_url = None;
        }
        ai.backend = backend;
    }
    if model.is_some() {
        ai.model = model;
    }
    Ok(ai)
}
