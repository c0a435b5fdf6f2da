//! Remote Service Readiness
//!
//! Polls a health endpoint until the service reports ready. Polling is bounded by an
//! attempt budget and an overall deadline, and a cancellation token aborts any wait.

use std::time::Duration;

use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::LivenessConfig;
use crate::types::BackendError;

/// Retry schedule for readiness polling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LivenessPolicy {
    /// Wait after a transport failure
    pub connect_retry_delay: Duration,
    /// Wait after a non-200 answer
    pub unhealthy_retry_delay: Duration,
    pub max_attempts: u32,
    pub deadline: Duration,
}

impl Default for LivenessPolicy {
    fn default() -> Self {
        Self::from(&LivenessConfig::default())
    }
}

impl From<&LivenessConfig> for LivenessPolicy {
    fn from(config: &LivenessConfig) -> Self {
        Self {
            connect_retry_delay: Duration::from_millis(config.connect_retry_ms),
            unhealthy_retry_delay: Duration::from_millis(config.unhealthy_retry_ms),
            max_attempts: config.max_attempts.max(1),
            deadline: Duration::from_secs(config.deadline_secs),
        }
    }
}

/// Outcome of a single probe
enum Probe {
    Ready,
    Unreachable(String),
    Unhealthy(StatusCode),
}

async fn probe(client: &reqwest::Client, url: &str) -> Probe {
    match client.get(url).send().await {
        Ok(resp) if resp.status() == StatusCode::OK => Probe::Ready,
        Ok(resp) => Probe::Unhealthy(resp.status()),
        Err(e) => Probe::Unreachable(e.to_string()),
    }
}

/// Wait until `GET {url}` answers 200.
///
/// Returns `Unavailable` when the attempts or the deadline run out and `Cancelled`
/// as soon as `cancel` fires.
pub async fn wait_until_ready(
    client: &reqwest::Client,
    url: &str,
    policy: &LivenessPolicy,
    cancel: &CancellationToken,
) -> Result<(), BackendError> {
    let polling = async {
        for attempt in 1..=policy.max_attempts {
            let delay = match probe(client, url).await {
                Probe::Ready => {
                    info!("Remote service ready: {}", url);
                    return Ok(());
                }
                Probe::Unreachable(reason) => {
                    debug!(
                        "Liveness probe {}/{} failed to connect: {}",
                        attempt, policy.max_attempts, reason
                    );
                    policy.connect_retry_delay
                }
                Probe::Unhealthy(status) => {
                    debug!(
                        "Liveness probe {}/{} unhealthy: {}",
                        attempt, policy.max_attempts, status
                    );
                    policy.unhealthy_retry_delay
                }
            };

            if attempt < policy.max_attempts {
                tokio::time::sleep(delay).await;
            }
        }

        Err(BackendError::unavailable(format!(
            "{} not ready after {} attempts",
            url, policy.max_attempts
        )))
    };

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(BackendError::cancelled()),
        outcome = tokio::time::timeout(policy.deadline, polling) => {
            outcome.unwrap_or_else(|_| {
                Err(BackendError::unavailable(format!(
                    "{} not ready within {:?}",
                    url, policy.deadline
                )))
            })
        }
    }
}
