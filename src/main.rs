// Promptlens - Prompt critique web tool
// Main entry point

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use promptlens::chain::resolve_chain;
use promptlens::cli::{run_check_key, run_setup, SetupOptions};
use promptlens::config::load_config;
use promptlens::server::AppServer;

#[derive(Parser)]
#[command(name = "promptlens", version, about = "Web UI for structured LLM prompt feedback")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web UI (default)
    Serve {
        /// Bind address, e.g. 127.0.0.1:8501
        #[arg(long)]
        bind: Option<String>,
    },
    /// Install dependencies, scaffold .env, and launch the app
    Setup {
        /// Only install requirements without running the app
        #[arg(long, conflicts_with = "run_only")]
        install_only: bool,
        /// Only run the app without installing requirements
        #[arg(long)]
        run_only: bool,
    },
    /// Validate an OpenAI API key with one upstream call
    CheckKey {
        /// API key to test (falls back to OPENAI_API_KEY, then a prompt)
        #[arg(long)]
        key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = load_config()?;

    match cli.command {
        Some(Commands::Setup {
            install_only,
            run_only,
        }) => {
            run_setup(
                config,
                SetupOptions {
                    install_only,
                    run_only,
                },
            )
            .await
        }
        Some(Commands::CheckKey { key }) => run_check_key(key).await,
        Some(Commands::Serve { bind }) => {
            let mut config = config;
            if let Some(bind) = bind {
                config.server.bind_address = bind;
            }
            serve(config).await
        }
        None => serve(config).await,
    }
}

async fn serve(config: promptlens::config::Config) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let resolved = resolve_chain(&cwd, config.feedback.service_url.as_deref())?;
    AppServer::new(config, resolved).serve().await
}
