//! Anthropic-style Completion Client
//!
//! Legacy prompt/completion protocol: `{"prompt", "max_tokens", "model", "temperature"}`
//! in, `{"completion"}` out, with bearer-token authentication.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{CompletionClient, http_client, read_success_body, require, validate_endpoint};
use crate::config::AnthropicConfig;
use crate::constants::remote::{MAX_TOKENS, TEMPERATURE};
use crate::types::{BackendError, Result};

pub struct AnthropicClient {
    access_key: SecretString,
    url: String,
    model: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for AnthropicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicClient")
            .field("access_key", &"[REDACTED]")
            .field("url", &self.url)
            .field("model", &self.model)
            .finish()
    }
}

impl AnthropicClient {
    pub fn new(config: &AnthropicConfig, timeout: Duration) -> Result<Self> {
        let url = require(config.url.as_deref(), "anthropic", "url")?;
        let access_key = require(config.access_key.as_deref(), "anthropic", "access_key")?;

        Ok(Self {
            access_key: SecretString::from(access_key),
            url: validate_endpoint("anthropic", &url)?,
            model: config.model.clone(),
            client: http_client(timeout)?,
        })
    }
}

#[async_trait]
impl CompletionClient for AnthropicClient {
    async fn complete(
        &self,
        signature: &str,
        _cancel: &CancellationToken,
    ) -> std::result::Result<String, BackendError> {
        let request = CompletionRequest {
            prompt: format!(
                "Generate a detailed comment in English for the following Go function:\n{}",
                signature
            ),
            max_tokens: MAX_TOKENS,
            model: &self.model,
            temperature: TEMPERATURE,
        };
        debug!("Sending request to Anthropic-style API (model: {})", self.model);

        let response = self
            .client
            .post(&self.url)
            .header(
                "Authorization",
                format!("Bearer {}", self.access_key.expose_secret()),
            )
            .json(&request)
            .send()
            .await?;
        let body = read_success_body(response).await?;

        let parsed: CompletionResponse = serde_json::from_str(&body).map_err(|e| {
            BackendError::decode(
                format!("Failed to parse completion response: {}", e),
                body.as_str(),
            )
        })?;
        Ok(parsed.completion)
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    prompt: String,
    max_tokens: u32,
    model: &'a str,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    completion: String,
}
