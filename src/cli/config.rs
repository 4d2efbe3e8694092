//! Config command - init and show the user config

use anyhow::Result;
use better_prompt::config::UserConfig;

pub fn init() -> Result<()> {
    let path = UserConfig::init_user_config()?;
    println!("✅ Config at: {}", path.display());
    println!("\nEdit it to pick a backend and add your API key, or set via environment:");
    println!("  export DEEPSEEK_API_KEY=\"sk-...\"");
    Ok(())
}

pub fn show() -> Result<()> {
    let config = UserConfig::load()?;

    println!("📁 Config path:");
    match UserConfig::user_config_path() {
        Some(path) => {
            let status = if path.exists() { "✓" } else { "(not found)" };
            println!("  {} {}", path.display(), status);
        }
        None => println!("  (no config directory on this platform)"),
    }
    println!();

    println!("⚙️  Effective settings:");
    let toml = config.to_masked_toml()?;
    if toml.trim().is_empty() {
        println!("  (all defaults)");
    } else {
        for line in toml.lines() {
            println!("  {}", line);
        }
    }
    Ok(())
}
