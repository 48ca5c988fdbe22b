// Credential validation against the OpenAI API
//
// Key precedence: --key flag, then OPENAI_API_KEY, then a hidden prompt.

use anyhow::{bail, Context, Result};
use dialoguer::Password;

use crate::llm::OpenAiClient;

pub async fn run_check_key(key: Option<String>) -> Result<()> {
    println!("OpenAI API Key Tester");
    println!("=====================");

    let api_key = resolve_key(key)?;

    let client = OpenAiClient::new(api_key)?;

    println!("Testing API key...");
    match client.validate_key().await {
        Ok(report) => {
            println!(
                "✓ API key is valid! Response time: {:.2} seconds",
                report.elapsed.as_secs_f64()
            );
            println!("Response: {}", report.reply);
            println!();
            println!("You can use this API key in the web app.");
            println!("Set it as OPENAI_API_KEY or add it to ~/.promptlens/config.toml.");
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ API key validation failed: {e:#}");
            eprintln!();
            eprintln!("Please check your API key and try again.");
            eprintln!("If you're sure the key is correct, check your OpenAI account status.");
            bail!("API key validation failed");
        }
    }
}

fn resolve_key(flag: Option<String>) -> Result<String> {
    if let Some(key) = flag.filter(|k| !k.trim().is_empty()) {
        return Ok(key.trim().to_string());
    }

    if let Ok(key) = std::env::var("OPENAI_API_KEY") {
        if !key.trim().is_empty() {
            return Ok(key.trim().to_string());
        }
    }

    let key = Password::new()
        .with_prompt("Enter your OpenAI API key")
        .allow_empty_password(true)
        .interact()
        .context("Failed to read API key from terminal")?;

    let key = key.trim().to_string();
    if key.is_empty() {
        bail!("No API key provided");
    }
    Ok(key)
}
