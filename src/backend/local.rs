//! Local Inference Service Client
//!
//! Client for a self-hosted comment model exposing `GET /ping` and `POST /tokenize`.
//! Readiness is polled once before the first request. The outcome is cached either
//! way, so a service that never came up fails every later request immediately.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{
    CompletionClient, LivenessPolicy, http_client, read_success_body, require, validate_endpoint,
    wait_until_ready,
};
use crate::config::LocalConfig;
use crate::constants::remote::{PING_PATH, TOKENIZE_PATH};
use crate::types::{BackendError, Result};

pub struct LocalClient {
    base_url: String,
    version: u32,
    liveness: LivenessPolicy,
    /// Terminal liveness outcome; cancellation is never cached
    ready: OnceCell<std::result::Result<(), BackendError>>,
    client: reqwest::Client,
}

impl std::fmt::Debug for LocalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalClient")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("ready", &self.ready.initialized())
            .finish()
    }
}

impl LocalClient {
    pub fn new(config: &LocalConfig, liveness: LivenessPolicy, timeout: Duration) -> Result<Self> {
        let url = require(config.url.as_deref(), "local", "url")?;
        Ok(Self {
            base_url: validate_endpoint("local", &url)?,
            version: config.model_version(),
            liveness,
            ready: OnceCell::new(),
            client: http_client(timeout)?,
        })
    }

    async fn ensure_ready(
        &self,
        cancel: &CancellationToken,
    ) -> std::result::Result<(), BackendError> {
        let ping_url = format!("{}{}", self.base_url, PING_PATH);
        let outcome = self
            .ready
            .get_or_try_init(|| async {
                match wait_until_ready(&self.client, &ping_url, &self.liveness, cancel).await {
                    Err(e) if e.is_cancelled() => Err(e),
                    outcome => Ok(outcome),
                }
            })
            .await?;
        outcome.clone()
    }
}

#[async_trait]
impl CompletionClient for LocalClient {
    async fn complete(
        &self,
        signature: &str,
        cancel: &CancellationToken,
    ) -> std::result::Result<String, BackendError> {
        self.ensure_ready(cancel).await?;

        let request = TokenizeRequest {
            text: signature,
            version: self.version,
        };
        let url = format!("{}{}", self.base_url, TOKENIZE_PATH);
        debug!("Sending request to local inference service");

        let response = self.client.post(&url).json(&request).send().await?;
        let body = read_success_body(response).await?;

        let parsed: TokenizeResponse = serde_json::from_str(&body).map_err(|e| {
            BackendError::decode(format!("Failed to parse tokenize response: {}", e), body.as_str())
        })?;
        Ok(parsed.comment)
    }

    fn name(&self) -> &str {
        "local"
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct TokenizeRequest<'a> {
    text: &'a str,
    version: u32,
}

#[derive(Debug, Deserialize)]
struct TokenizeResponse {
    comment: String,
}
