//! Comment Backends
//!
//! Defines the CommentBackend trait and the strategy selection between the offline
//! heuristic composer and remote text-generation services.
//!
//! ## Modules
//!
//! - `heuristic`: offline composer backend (never fails)
//! - `openai`, `anthropic`, `local`: remote completion clients
//! - `liveness`: bounded, cancellable readiness polling
//! - `signature`: Go signature rendering for remote prompts

mod anthropic;
mod heuristic;
mod liveness;
mod local;
mod openai;
mod signature;

pub use anthropic::AnthropicClient;
pub use heuristic::HeuristicBackend;
pub use liveness::{LivenessPolicy, wait_until_ready};
pub use local::LocalClient;
pub use openai::OpenAiClient;
pub use signature::render_signature;

use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::synth::{Composer, ComposerOptions, Subject};
use crate::types::{AutocommentError, BackendError, Result};

/// Shared backend type, built once per run and used read-only for every declaration.
pub type SharedBackend = Arc<dyn CommentBackend>;

// =============================================================================
// Backend Traits
// =============================================================================

/// Produces the comment text of one declaration subject
#[async_trait]
pub trait CommentBackend: Send + Sync {
    /// Comment text without comment markers
    async fn comment(
        &self,
        subject: Subject<'_>,
        cancel: &CancellationToken,
    ) -> std::result::Result<String, BackendError>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Text-generation service answering for a rendered function signature
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        signature: &str,
        cancel: &CancellationToken,
    ) -> std::result::Result<String, BackendError>;

    fn name(&self) -> &str;
}

// =============================================================================
// Remote Backend
// =============================================================================

/// Comments functions and methods through a completion client. Every other
/// declaration kind is composed offline.
pub struct RemoteBackend<C> {
    client: C,
    fallback: Composer,
}

impl<C: CompletionClient> RemoteBackend<C> {
    pub fn new(client: C, fallback: Composer) -> Self {
        Self { client, fallback }
    }
}

#[async_trait]
impl<C: CompletionClient> CommentBackend for RemoteBackend<C> {
    async fn comment(
        &self,
        subject: Subject<'_>,
        cancel: &CancellationToken,
    ) -> std::result::Result<String, BackendError> {
        let Some((func, receiver)) = subject.callable() else {
            return Ok(self.fallback.compose_subject(subject));
        };

        let signature = render_signature(func, receiver);
        debug!("Requesting comment from {}: {}", self.client.name(), signature);

        let text = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(BackendError::cancelled()),
            result = self.client.complete(&signature, cancel) => result,
        }
        .map_err(|e| {
            e.backend(self.client.name())
                .declaration(subject.identifier())
        })?;

        Ok(normalize_response(&text))
    }

    fn name(&self) -> &str {
        self.client.name()
    }
}

/// Trim trailing whitespace and end the text with exactly one period
pub fn normalize_response(text: &str) -> String {
    let trimmed = text.trim();
    let body = trimmed.trim_end_matches('.');
    if body.is_empty() {
        return String::new();
    }
    format!("{}.", body)
}

// =============================================================================
// Backend Selection
// =============================================================================

/// Build the active backend from configuration.
///
/// The first active remote backend wins (openai, anthropic, local); without one the
/// heuristic backend is used. An active backend missing its URL or credential is
/// a configuration error, raised before any declaration is processed.
pub fn create_backend(config: &Config) -> Result<SharedBackend> {
    let composer = Composer::new(ComposerOptions {
        examples: config.examples,
    });
    let timeout = config.timeout();

    let backend: SharedBackend = if config.openai.active {
        Arc::new(RemoteBackend::new(
            OpenAiClient::new(&config.openai, timeout)?,
            composer,
        ))
    } else if config.anthropic.active {
        Arc::new(RemoteBackend::new(
            AnthropicClient::new(&config.anthropic, timeout)?,
            composer,
        ))
    } else if config.local.active {
        Arc::new(RemoteBackend::new(
            LocalClient::new(&config.local, LivenessPolicy::from(&config.liveness), timeout)?,
            composer,
        ))
    } else {
        Arc::new(HeuristicBackend::new(composer))
    };

    info!("Using {} comment backend", backend.name());
    Ok(backend)
}

/// Validate a remote endpoint URL, allowing only http and https
fn validate_endpoint(backend: &str, endpoint: &str) -> Result<String> {
    let url = url::Url::parse(endpoint).map_err(|e| {
        AutocommentError::config(format!(
            "Invalid {} endpoint URL '{}': {}",
            backend, endpoint, e
        ))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AutocommentError::config(format!(
            "{} endpoint must use http or https scheme, got: {}",
            backend,
            url.scheme()
        )));
    }

    if url.scheme() == "http"
        && let Some(host) = url.host_str()
        && !matches!(host, "localhost" | "127.0.0.1" | "[::1]")
    {
        warn!(
            "{} endpoint is plain http on a remote host: {}. Credentials travel unencrypted.",
            backend, host
        );
    }

    let mut result = url.to_string();
    if result.ends_with('/') {
        result.pop();
    }
    Ok(result)
}

/// Required setting of an active backend
fn require(value: Option<&str>, backend: &str, key: &str) -> Result<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            AutocommentError::config(format!(
                "{} backend is active but `{}.{}` is not set",
                backend, backend, key
            ))
        })
}

fn http_client(timeout: std::time::Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AutocommentError::config(format!("Failed to create HTTP client: {}", e)))
}

/// Read a response body, mapping non-success statuses to a status error
async fn read_success_body(
    response: reqwest::Response,
) -> std::result::Result<String, BackendError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(BackendError::status(status.as_u16(), body));
    }
    Ok(body)
}
