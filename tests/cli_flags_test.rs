//! CLI flag contract tests
//!
//! Runs the compiled binary with an isolated HOME so the developer's own
//! config and API keys never leak into the results.

use std::path::Path;
use std::process::{Command, Output};

const EXAMPLE: &str = "Сделай краткое резюме текста в 3 пунктах.\n1. Первое\n2. Второе\n3. Третье";

fn better_prompt_bin() -> String {
    env!("CARGO_BIN_EXE_better-prompt").to_string()
}

/// Command with config and key lookups pointed at `home`
fn command(home: &Path) -> Command {
    let mut cmd = Command::new(better_prompt_bin());
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("RUST_LOG", "error");
    for var in [
        "DEEPSEEK_API_KEY",
        "OPENAI_API_KEY",
        "OPENROUTER_API_KEY",
        "BETTER_PROMPT_BACKEND",
        "BETTER_PROMPT_SERVER",
        "PORT",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn run(home: &Path, args: &[&str]) -> Output {
    command(home).args(args).output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn score_json_matches_worked_example() {
    let home = tempfile::tempdir().unwrap();
    let output = run(home.path(), &["score", "--format", "json", EXAMPLE]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["efficiency"], 67);
    assert_eq!(json["length"], 45);
    assert_eq!(json["clarity"], 54);
    assert_eq!(json["structure"], 85);
}

#[test]
fn score_chat_lists_axes_in_order() {
    let home = tempfile::tempdir().unwrap();
    let output = run(home.path(), &["score", "-f", "chat", EXAMPLE]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim_end(),
        "📊 Оценка промпта:\nЭффективность: 67%\nДлина: 45%\nЯсность: 54%\nСтруктура: 85%"
    );
}

#[test]
fn score_reads_file() {
    let home = tempfile::tempdir().unwrap();
    let prompt = home.path().join("prompt.txt");
    std::fs::write(&prompt, EXAMPLE).unwrap();

    let output = run(
        home.path(),
        &["score", "--file", prompt.to_str().unwrap(), "-f", "json"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["structure"], 85);
}

#[test]
fn score_empty_input_prints_zeros() {
    let home = tempfile::tempdir().unwrap();
    let output = run(home.path(), &["score", "-f", "json", "   "]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    for axis in ["efficiency", "length", "clarity", "structure"] {
        assert_eq!(json[axis], 0, "axis {}", axis);
    }
}

#[test]
fn score_rejects_unknown_format() {
    let home = tempfile::tempdir().unwrap();
    let output = run(home.path(), &["score", "--format", "sarif", "text"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("sarif"));
}

#[test]
fn score_uses_configured_labels() {
    let home = tempfile::tempdir().unwrap();
    let config_dir = home.path().join(".config").join("better-prompt");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[labels]\nheader = \"Prompt score\"\nefficiency = \"Efficiency\"\n",
    )
    .unwrap();

    let output = run(home.path(), &["score", "-f", "chat", EXAMPLE]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with("📊 Prompt score:\nEfficiency: 67%\nДлина: 45%"));
}

#[test]
fn improve_offline_renders_template_with_scores() {
    let home = tempfile::tempdir().unwrap();
    let output = run(
        home.path(),
        &["improve", "--offline", "-f", "json", "напиши   письмо\nначальнику"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let text = json["output"].as_str().unwrap();
    assert!(text.contains("Задача: \"напиши письмо начальнику\""));
    assert!(!text.contains("{{timestamp}}"));
    assert!(json["scores"]["structure"].as_u64().unwrap() >= 45);
}

#[test]
fn improve_offline_rejects_blank_prompt() {
    let home = tempfile::tempdir().unwrap();
    let output = run(home.path(), &["improve", "--offline", "  "]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Prompt required"));
}

#[test]
fn improve_without_key_names_env_var() {
    let home = tempfile::tempdir().unwrap();
    let output = run(home.path(), &["improve", "напиши письмо"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("DEEPSEEK_API_KEY"));
}

#[test]
fn config_init_does_not_overwrite() {
    let home = tempfile::tempdir().unwrap();
    let path = home
        .path()
        .join(".config")
        .join("better-prompt")
        .join("config.toml");

    let output = run(home.path(), &["config", "init"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(path.exists());

    std::fs::write(&path, "[ai]\nbackend = \"ollama\"\n").unwrap();
    let output = run(home.path(), &["config", "init"]);
    assert!(output.status.success());
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "[ai]\nbackend = \"ollama\"\n"
    );
}

#[test]
fn config_show_masks_api_key() {
    let home = tempfile::tempdir().unwrap();
    let config_dir = home.path().join(".config").join("better-prompt");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[ai]\napi_key = \"sk-secret-123456\"\n",
    )
    .unwrap();

    let output = run(home.path(), &["config", "show"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("sk-s****"));
    assert!(!out.contains("secret-123456"));
}

#[test]
fn doctor_reports_missing_key() {
    let home = tempfile::tempdir().unwrap();
    let output = run(home.path(), &["doctor"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("deepseek (deepseek-chat)"));
    assert!(out.contains("DEEPSEEK_API_KEY"));
}
