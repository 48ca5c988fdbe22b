// Environment bootstrap
//
// Verifies required tooling, installs the feedback component, scaffolds a
// .env file, and launches the web UI. Mirrors the web app's expectations:
// the component is a Node package resolved by the adapter at startup.

use anyhow::{bail, Context, Result};
use std::path::Path;
use tokio::process::Command;

use crate::chain::resolve_chain;
use crate::config::Config;
use crate::server::AppServer;

const COMPONENT_PACKAGE: &str = "langchain-prompt-feedback";

#[derive(Debug, Clone, Copy, Default)]
pub struct SetupOptions {
    /// Only install dependencies, don't launch the app
    pub install_only: bool,
    /// Only launch the app, skip installation
    pub run_only: bool,
}

pub async fn run_setup(config: Config, options: SetupOptions) -> Result<()> {
    if options.install_only && options.run_only {
        bail!("--install-only and --run-only are mutually exclusive");
    }

    println!("🔧 Setting up the Prompt Feedback web app...");

    check_node().await?;

    if !options.run_only {
        check_npm().await?;
        install_component().await?;
        setup_env_file()?;
    }

    if options.install_only {
        println!();
        println!("✓ Setup completed successfully! Run the app with: promptlens serve");
        return Ok(());
    }

    // Resolve the component before binding the port so a missing install
    // fails with guidance instead of a half-started server.
    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let resolved = resolve_chain(&cwd, config.feedback.service_url.as_deref())?;
    println!("✓ Feedback component: {}", resolved.import_info());

    println!("🚀 Starting the web app...");
    AppServer::new(config, resolved).serve().await
}

/// The component runs on Node; its absence is unrecoverable.
async fn check_node() -> Result<()> {
    match Command::new("node").arg("--version").output().await {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
            println!("✓ node version: {}", version);
            Ok(())
        }
        _ => bail!(
            "node is not installed or not working properly.\n\
             Please install Node.js (https://nodejs.org) and try again."
        ),
    }
}

async fn check_npm() -> Result<()> {
    match Command::new("npm").arg("--version").output().await {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
            println!("✓ npm version: {}", version);
            Ok(())
        }
        _ => bail!("npm is not installed or not working properly. Please install npm and try again."),
    }
}

/// Install the feedback component: `npm install` inside a checkout,
/// otherwise fetch the published package.
async fn install_component() -> Result<()> {
    println!("📦 Installing the feedback component...");

    let status = if Path::new("package.json").exists() {
        Command::new("npm")
            .arg("install")
            .status()
            .await
            .context("Failed to run npm install")?
    } else {
        Command::new("npm")
            .args(["install", COMPONENT_PACKAGE])
            .status()
            .await
            .with_context(|| format!("Failed to run npm install {COMPONENT_PACKAGE}"))?
    };

    if !status.success() {
        bail!("Failed to install the feedback component. Please install it manually.");
    }

    println!("✓ Feedback component installed");
    Ok(())
}

/// Create a placeholder .env unless one already exists.
fn setup_env_file() -> Result<()> {
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("ℹ .env file already exists");
        return Ok(());
    }

    println!("🔑 Creating .env file for API keys...");
    std::fs::write(
        env_file,
        "# OpenAI API Key\nOPENAI_API_KEY=\n\n# Add other environment variables below\n",
    )
    .context("Failed to write .env file")?;

    println!("✓ Created .env file. Please edit it to add your API keys.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflicting_flags_rejected() {
        let options = SetupOptions {
            install_only: true,
            run_only: true,
        };
        let result = tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(run_setup(Config::default(), options));
        assert!(result.is_err());
    }
}
