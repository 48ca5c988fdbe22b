// HTTP client for the OpenAI API

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::{Duration, Instant};

use super::types::{ChatRequest, ChatResponse};

const OPENAI_API_URL: &str = "https://api.openai.com/v1";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// What a successful key check observed.
#[derive(Debug)]
pub struct KeyCheckReport {
    pub reply: String,
    pub elapsed: Duration,
}

pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, OPENAI_API_URL)
    }

    /// Point the client at a different endpoint. Tests use this to target
    /// a local mock server.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Send one chat-completion request.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!("Sending chat request to {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .context("Failed to reach the OpenAI API")?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("OpenAI API request failed\n\nStatus: {}\nBody: {}", status, error_body);
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .context("Failed to parse OpenAI API response")?;

        Ok(parsed)
    }

    /// Validate the configured key with one minimal probe call, measuring
    /// wall-clock latency. An empty choice list counts as a failure.
    pub async fn validate_key(&self) -> Result<KeyCheckReport> {
        let started = Instant::now();
        let response = self.chat(&ChatRequest::probe()).await?;
        let elapsed = started.elapsed();

        if response.choices.is_empty() {
            anyhow::bail!("Unexpected response format: no choices returned");
        }

        Ok(KeyCheckReport {
            reply: response.text().to_string(),
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OpenAiClient::new("sk-test".to_string());
        assert!(client.is_ok());
    }
}
