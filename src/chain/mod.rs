// Consumed contract of the prompt-feedback component.
//
// The component itself (criteria evaluation, LLM prompting, response
// parsing) lives outside this repository. This module only defines the
// wire types it accepts and returns, the transport trait, and the two
// transports the adapter can resolve.

mod adapter;
mod node;
mod remote;

pub use adapter::{resolve_chain, AdapterError, ResolvedChain, SERVICE_URL_ENV};
pub use node::NodeChain;
pub use remote::RemoteChain;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Boolean flags selecting which aspects of a prompt to critique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedbackCriteria {
    pub clarity: bool,
    pub context: bool,
    pub constraints: bool,
    pub examples: bool,
    pub format: bool,
}

impl Default for FeedbackCriteria {
    fn default() -> Self {
        Self {
            clarity: true,
            context: true,
            constraints: true,
            examples: true,
            format: true,
        }
    }
}

/// Configuration handed to the component on every call.
///
/// Field names are camelCase on the wire; `llmModel` is omitted when
/// `useLLM` is false, matching what the component expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    pub criteria: FeedbackCriteria,
    #[serde(rename = "useLLM")]
    pub use_llm: bool,
    #[serde(rename = "debounceTime")]
    pub debounce_time: u32,
    #[serde(rename = "llmModel", skip_serializing_if = "Option::is_none")]
    pub llm_model: Option<String>,
}

impl ChainConfig {
    pub fn new(criteria: FeedbackCriteria, use_llm: bool, llm_model: Option<String>) -> Self {
        Self {
            criteria,
            use_llm,
            debounce_time: 300,
            llm_model: if use_llm { llm_model } else { None },
        }
    }
}

/// Structured critique returned by the component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improved_prompt: Option<String>,
}

/// Request envelope sent to a transport.
///
/// The API key rides alongside but never serializes: each transport
/// forwards it out-of-band (child environment, auth header) so it stays
/// scoped to the one call instead of the whole process.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackRequest {
    pub config: ChainConfig,
    pub input: String,
    #[serde(skip)]
    pub api_key: Option<String>,
}

/// Response envelope: the component wraps its result under a `feedback` key.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackResponse {
    pub feedback: Feedback,
}

/// Transport to a resolved prompt-feedback component.
#[async_trait]
pub trait FeedbackChain: Send + Sync {
    /// Submit a prompt and wait for the structured critique.
    async fn call(&self, request: &FeedbackRequest) -> anyhow::Result<Feedback>;

    /// Human-readable description of where this chain resolved from.
    fn describe(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criteria_default_all_enabled() {
        let c = FeedbackCriteria::default();
        assert!(c.clarity && c.context && c.constraints && c.examples && c.format);
    }

    #[test]
    fn test_config_drops_model_without_llm() {
        let config = ChainConfig::new(
            FeedbackCriteria::default(),
            false,
            Some("gpt-4".to_string()),
        );
        assert!(config.llm_model.is_none());

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["useLLM"], false);
        assert_eq!(json["debounceTime"], 300);
        assert!(json.get("llmModel").is_none());
    }

    #[test]
    fn test_config_wire_names() {
        let config = ChainConfig::new(
            FeedbackCriteria::default(),
            true,
            Some("gpt-3.5-turbo".to_string()),
        );
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["llmModel"], "gpt-3.5-turbo");
        assert_eq!(json["criteria"]["clarity"], true);
    }

    #[test]
    fn test_feedback_tolerates_sparse_response() {
        // The component may omit any field; everything defaults.
        let parsed: FeedbackResponse =
            serde_json::from_str(r#"{"feedback": {"score": 82, "improvedPrompt": "better"}}"#)
                .unwrap();
        assert_eq!(parsed.feedback.score, 82);
        assert!(parsed.feedback.strengths.is_empty());
        assert_eq!(parsed.feedback.improved_prompt.as_deref(), Some("better"));
    }
}
