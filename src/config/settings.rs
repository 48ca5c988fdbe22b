// Configuration types

use serde::{Deserialize, Serialize};

use crate::chain::FeedbackCriteria;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8501";
pub const DEFAULT_LLM_MODEL: &str = "gpt-3.5-turbo";

/// Top-level configuration, read from ~/.promptlens/config.toml when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub feedback: FeedbackSettings,
    /// OpenAI API key from the config file. Environment takes precedence;
    /// a key supplied through the UI is the last resort.
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

/// Defaults for the feedback form and the response cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackSettings {
    /// Base URL of a running feedback service. Overridden by the
    /// PROMPT_FEEDBACK_URL environment variable.
    #[serde(default)]
    pub service_url: Option<String>,
    #[serde(default = "default_true")]
    pub use_llm: bool,
    #[serde(default = "default_llm_model")]
    pub llm_model: String,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u32,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default)]
    pub criteria: FeedbackCriteria,
}

impl Default for FeedbackSettings {
    fn default() -> Self {
        Self {
            service_url: None,
            use_llm: true,
            llm_model: default_llm_model(),
            debounce_ms: default_debounce_ms(),
            cache_ttl_secs: default_cache_ttl_secs(),
            criteria: FeedbackCriteria::default(),
        }
    }
}

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

fn default_llm_model() -> String {
    DEFAULT_LLM_MODEL.to_string()
}

fn default_true() -> bool {
    true
}

fn default_debounce_ms() -> u32 {
    300
}

fn default_cache_ttl_secs() -> u64 {
    300
}

impl Config {
    /// Resolve the API key for a request: environment first, then the
    /// config file, then whatever the caller (UI form, --key flag) supplied.
    pub fn resolve_api_key(&self, supplied: Option<&str>) -> Option<String> {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                return Some(key);
            }
        }
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.is_empty()) {
            return Some(key.to_string());
        }
        supplied
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from)
    }
}
