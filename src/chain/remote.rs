// HTTP transport to a running prompt-feedback service

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::{Feedback, FeedbackChain, FeedbackRequest, FeedbackResponse};

const REQUEST_TIMEOUT_SECS: u64 = 60;

pub struct RemoteChain {
    client: Client,
    base_url: String,
}

impl RemoteChain {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl FeedbackChain for RemoteChain {
    async fn call(&self, request: &FeedbackRequest) -> Result<Feedback> {
        let url = format!("{}/feedback", self.base_url);
        tracing::debug!("Sending feedback request to {}", url);

        let mut builder = self.client.post(&url).json(request);
        if let Some(key) = request.api_key.as_deref() {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .context("Failed to reach the feedback service")?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "Feedback service request failed\n\nStatus: {}\nBody: {}",
                status,
                error_body
            );
        }

        let parsed: FeedbackResponse = response
            .json()
            .await
            .context("Failed to parse feedback service response")?;

        Ok(parsed.feedback)
    }

    fn describe(&self) -> String {
        format!("remote service at {}", self.base_url)
    }
}
