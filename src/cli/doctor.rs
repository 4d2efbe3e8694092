//! Doctor command - check environment

use anyhow::Result;
use better_prompt::ai::LlmBackend;
use better_prompt::config::UserConfig;

const BACKENDS: [LlmBackend; 4] = [
    LlmBackend::DeepSeek,
    LlmBackend::OpenAi,
    LlmBackend::OpenRouter,
    LlmBackend::Ollama,
];

pub fn run() -> Result<()> {
    println!("🩺 Better Prompt Doctor\n");

    let config = UserConfig::load()?;
    match UserConfig::user_config_path() {
        Some(path) if path.exists() => println!("✓ Config: {}", path.display()),
        Some(path) => println!("○ Config: {} (not found, defaults apply)", path.display()),
        None => println!("○ Config: no config directory"),
    }

    println!("✓ Scorer: OK (local, no network)");

    let mut ok = true;
    match config.ai_config() {
        Ok(ai) => {
            println!("✓ Backend: {} ({})", ai.backend, ai.model());
            match config.ai_client(ai) {
                Ok(_) => println!("✓ API key: found"),
                Err(e) => {
                    ok = false;
                    println!("✗ API key: {}", e);
                }
            }
        }
        Err(e) => {
            ok = false;
            println!("✗ Backend: {}", e);
        }
    }

    let available: Vec<&str> = BACKENDS
        .iter()
        .filter(|b| b.requires_api_key() && std::env::var(b.env_key()).is_ok())
        .map(|b| b.name())
        .collect();
    if available.is_empty() {
        println!("○ Keys in environment: none");
    } else {
        println!("✓ Keys in environment: {}", available.join(", "));
    }

    if let Some(url) = config.remote_url() {
        println!("✓ Remote server: {}", url);
    }

    if ok {
        println!("\n✅ All checks passed!");
    } else {
        println!("\n⚠️  `improve` will fail until the backend is configured (--offline still works)");
    }
    Ok(())
}
