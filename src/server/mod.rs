// Promptlens - Web UI server module
// Serves the prompt form and the JSON API in front of the feedback component

mod cache;
mod handlers;
mod history;

pub use cache::FeedbackCache;
pub use handlers::{
    create_router, handle_clear_history, handle_feedback, handle_history, health_check,
};
pub use history::{HistoryEntry, HistoryStore};

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

use crate::chain::{FeedbackChain, ResolvedChain};
use crate::config::Config;

/// Shared application state behind every handler.
pub struct AppState {
    /// Resolved feedback component transport
    pub chain: Arc<dyn FeedbackChain>,
    /// Where the component resolved from, for /health
    pub import_info: String,
    /// Loaded configuration (form defaults, key precedence)
    pub config: Config,
    /// Response cache keyed by (prompt, config)
    pub cache: FeedbackCache,
    /// Session history, cleared on restart
    pub history: HistoryStore,
}

impl AppState {
    pub fn new(config: Config, chain: Arc<dyn FeedbackChain>, import_info: String) -> Self {
        let ttl = Duration::from_secs(config.feedback.cache_ttl_secs);
        Self {
            chain,
            import_info,
            config,
            cache: FeedbackCache::new(ttl),
            history: HistoryStore::new(),
        }
    }
}

/// The web server wrapping router construction and listening.
pub struct AppServer {
    state: Arc<AppState>,
    bind_address: String,
}

impl AppServer {
    pub fn new(config: Config, resolved: ResolvedChain) -> Self {
        let bind_address = config.server.bind_address.clone();
        let import_info = resolved.import_info().to_string();
        let state = Arc::new(AppState::new(config, resolved.chain(), import_info));
        Self {
            state,
            bind_address,
        }
    }

    /// Start the HTTP server. Runs until the process is stopped.
    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = self.bind_address.parse()?;

        // Body limit guards against oversized payloads; prompts are small.
        let app = create_router(self.state)
            .layer(axum::extract::DefaultBodyLimit::max(1024 * 1024)) // 1MB
            .layer(TraceLayer::new_for_http());

        tracing::info!("Starting promptlens web UI on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
