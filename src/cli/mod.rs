//! CLI command definitions and handlers

mod config;
mod doctor;
mod improve;
mod input;
mod score;
mod serve;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Better Prompt - score prompts and rewrite them into clear instructions
#[derive(Parser, Debug)]
#[command(name = "better-prompt")]
#[command(
    version,
    about = "Score prompts on efficiency, length, clarity and structure, and rewrite them with an LLM",
    long_about = "better-prompt rates a prompt with a fast local heuristic (no network) \
and can rewrite it into a structured instruction through DeepSeek, OpenAI, \
OpenRouter or a local Ollama. Run it as a CLI or as a small HTTP service.",
    after_help = "\
Examples:
  better-prompt score \"Сделай краткое резюме\"      Score a prompt locally
  better-prompt score --file prompt.txt -f json     JSON scores for scripting
  better-prompt improve \"напиши письмо\"            Rewrite with the configured LLM
  better-prompt improve --offline \"напиши письмо\"  Rewrite with the offline template
  better-prompt serve --port 8080                   Start the HTTP API"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a prompt without calling any model
    #[command(after_help = "\
Examples:
  better-prompt score \"Сделай резюме в 3 пунктах\"
  better-prompt score --file prompt.txt --format chat
  cat prompt.txt | better-prompt score -f json")]
    Score {
        /// Prompt text (default: read --file or stdin)
        #[arg(conflicts_with = "file")]
        text: Option<String>,

        /// Read the prompt from a file
        #[arg(long)]
        file: Option<PathBuf>,

        /// Output format: text, json, chat
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json", "chat"])]
        format: String,
    },

    /// Rewrite a prompt into a clear instruction and score the result
    #[command(after_help = "\
Examples:
  better-prompt improve \"напиши пост про кофе\"
  better-prompt improve --backend ollama --model llama3 \"...\"
  better-prompt improve --server http://localhost:3000 \"...\"
  better-prompt improve --offline --format chat \"...\"")]
    Improve {
        /// Prompt text (default: read --file or stdin)
        #[arg(conflicts_with = "file")]
        text: Option<String>,

        /// Read the prompt from a file
        #[arg(long)]
        file: Option<PathBuf>,

        /// Output format: text, json, chat
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json", "chat"])]
        format: String,

        /// Use a running better-prompt server instead of calling the LLM directly
        #[arg(long, conflicts_with = "offline")]
        server: Option<String>,

        /// Use the offline template instead of an LLM
        #[arg(long)]
        offline: bool,

        /// LLM backend override
        #[arg(long, value_parser = ["deepseek", "openai", "openrouter", "ollama"])]
        backend: Option<String>,

        /// Model override
        #[arg(long)]
        model: Option<String>,
    },

    /// Start the HTTP API (POST /api/improve, POST /api/score, GET /api/health)
    Serve {
        /// Interface to bind (default: config or 0.0.0.0)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (default: config or 3000)
        #[arg(long, env = "PORT")]
        port: Option<u16>,

        /// Answer /api/improve with the offline template
        #[arg(long)]
        offline: bool,
    },

    /// Manage configuration (init or show)
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Check configuration and available LLM backends
    Doctor,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create the user config file with example settings
    Init,
    /// Show config path and effective settings (API key masked)
    Show,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Score { text, file, format } => score::run(text, file.as_deref(), &format),

        Commands::Improve {
            text,
            file,
            format,
            server,
            offline,
            backend,
            model,
        } => improve::run(improve::ImproveArgs {
            text,
            file,
            format,
            server,
            offline,
            backend,
            model,
        }),

        Commands::Serve {
            host,
            port,
            offline,
        } => serve::run(host, port, offline),

        Commands::Config { action } => match action {
            ConfigAction::Init => config::init(),
            ConfigAction::Show => config::show(),
        },

        Commands::Doctor => doctor::run(),
    }
}
