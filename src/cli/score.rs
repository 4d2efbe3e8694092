//! Score command - rate a prompt locally

use super::input::read_input;
use anyhow::Result;
use better_prompt::config::UserConfig;
use better_prompt::reporters::{self, OutputFormat};
use better_prompt::scoring;
use std::path::Path;
use tracing::debug;

pub fn run(text: Option<String>, file: Option<&Path>, format: &str) -> Result<()> {
    let input = read_input(text, file)?;
    let format: OutputFormat = format.parse()?;

    let scores = scoring::score(&input);
    debug!("Scored {} chars: {:?}", input.chars().count(), scores);

    let config = UserConfig::load()?;
    let out = reporters::report_scores(&scores, format, &config.labels())?;
    println!("{}", out.trim_end());
    Ok(())
}
