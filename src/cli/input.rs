//! Prompt input: positional argument, file, or piped stdin

use anyhow::{bail, Context, Result};
use std::io::{IsTerminal, Read};
use std::path::Path;

/// Resolve the prompt text for a command.
///
/// The argument wins, then `--file`, then stdin. An interactive terminal with
/// nothing piped is an error rather than a silent wait.
pub fn read_input(text: Option<String>, file: Option<&Path>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read prompt from {}", path.display()));
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        bail!("No prompt given. Pass TEXT, use --file, or pipe it on stdin");
    }
    let mut buf = String::new();
    stdin
        .read_to_string(&mut buf)
        .context("Failed to read prompt from stdin")?;
    Ok(buf)
}
