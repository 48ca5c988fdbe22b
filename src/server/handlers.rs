// HTTP handlers for the web UI and JSON API

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::chain::{ChainConfig, FeedbackCriteria, FeedbackRequest};
use crate::server::history::HistoryEntry;
use crate::server::AppState;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Build the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/api/feedback", post(handle_feedback))
        .route(
            "/api/history",
            get(handle_history).delete(handle_clear_history),
        )
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "component": state.import_info,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackApiRequest {
    pub prompt: String,
    #[serde(default)]
    pub criteria: Option<FeedbackCriteria>,
    #[serde(default)]
    pub use_llm: Option<bool>,
    #[serde(default)]
    pub llm_model: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

/// POST /api/feedback — run the prompt through the feedback component,
/// consulting the response cache first.
pub async fn handle_feedback(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FeedbackApiRequest>,
) -> Response {
    let prompt = request.prompt.trim();
    if prompt.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Please enter a prompt to receive feedback.",
        );
    }

    let settings = &state.config.feedback;
    let use_llm = request.use_llm.unwrap_or(settings.use_llm);

    // Resolved per request and handed to the transport; the process
    // environment is never written, so one caller's key cannot outlive
    // its own request.
    let api_key = if use_llm {
        match state.config.resolve_api_key(request.api_key.as_deref()) {
            Some(key) => Some(key),
            None => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "Please enter your OpenAI API key to use LLM-based feedback.",
                );
            }
        }
    } else {
        None
    };

    let criteria = request.criteria.unwrap_or_else(|| settings.criteria.clone());
    let model = request
        .llm_model
        .unwrap_or_else(|| settings.llm_model.clone());

    let mut config = ChainConfig::new(criteria, use_llm, Some(model));
    config.debounce_time = settings.debounce_ms;

    let cache_key = crate::server::FeedbackCache::key(prompt, &config, api_key.as_deref());

    if let Some(feedback) = state.cache.get(&cache_key) {
        tracing::debug!("Feedback cache hit");
        // Cached or not, a successful request lands in history.
        state
            .history
            .append(HistoryEntry::new(prompt, &feedback))
            .await;
        return Json(json!({ "feedback": feedback, "cached": true })).into_response();
    }

    let chain_request = FeedbackRequest {
        config,
        input: prompt.to_string(),
        api_key,
    };

    let feedback = match state.chain.call(&chain_request).await {
        Ok(feedback) => feedback,
        Err(e) => {
            tracing::warn!("Feedback component call failed: {:#}", e);
            return error_response(
                StatusCode::BAD_GATEWAY,
                &format!(
                    "An error occurred: {e:#}\nIf you're using LLM-based feedback, please check your API key."
                ),
            );
        }
    };

    state.cache.insert(cache_key, feedback.clone());
    state
        .history
        .append(HistoryEntry::new(prompt, &feedback))
        .await;

    Json(json!({ "feedback": feedback, "cached": false })).into_response()
}

pub async fn handle_history(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let entries = state.history.snapshot().await;
    Json(json!({ "entries": entries }))
}

pub async fn handle_clear_history(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let cleared = state.history.clear().await;
    tracing::info!("History cleared ({} entries)", cleared);
    Json(json!({ "cleared": cleared }))
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
