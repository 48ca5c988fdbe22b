// Configuration loader
// Loads settings from ~/.promptlens/config.toml and a local .env file

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use super::settings::Config;

/// Load configuration. A missing config file is not an error; defaults
/// apply. A `.env` in the working directory is folded into the process
/// environment first so OPENAI_API_KEY set there is visible everywhere.
pub fn load_config() -> Result<Config> {
    // Ignore a missing .env; setup generates one with a placeholder.
    let _ = dotenvy::dotenv();

    let Some(path) = config_path() else {
        return Ok(Config::default());
    };

    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    tracing::info!("Loaded configuration from {}", path.display());
    Ok(config)
}

fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".promptlens").join("config.toml"))
}
