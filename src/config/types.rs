//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/autocomment/) and project (.autocomment/) level configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{liveness, remote};
use crate::types::{AutocommentError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Author footer appended to generated comments (`Author: {signature}.`)
    pub signature: Option<String>,

    /// Append usage examples to function comments
    pub examples: bool,

    /// Request timeout for remote backends in seconds
    pub timeout_secs: u64,

    /// OpenAI-style chat completion backend
    pub openai: OpenAiConfig,

    /// Anthropic-style completion backend
    pub anthropic: AnthropicConfig,

    /// Local inference service backend
    pub local: LocalConfig,

    /// Readiness polling of the local inference service
    pub liveness: LivenessConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            signature: None,
            examples: false,
            timeout_secs: remote::DEFAULT_TIMEOUT_SECS,
            openai: OpenAiConfig::default(),
            anthropic: AnthropicConfig::default(),
            local: LocalConfig::default(),
            liveness: LivenessConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `AutocommentError::Config` on validation failure.
    ///
    /// Backend activation requirements are checked when the backend is built.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(AutocommentError::config(
                "timeout_secs must be greater than 0",
            ));
        }

        if self.liveness.max_attempts == 0 {
            return Err(AutocommentError::config(
                "liveness.max_attempts must be greater than 0",
            ));
        }

        if self.liveness.deadline_secs == 0 {
            return Err(AutocommentError::config(
                "liveness.deadline_secs must be greater than 0",
            ));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Configured author signature, ignoring blank values
    pub fn signature(&self) -> Option<&str> {
        self.signature
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

// =============================================================================
// Remote Backends
// =============================================================================

/// OpenAI-style backend settings
///
/// Note: the API key is never serialized to output and is redacted in debug output.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub active: bool,
    /// Full completion endpoint URL
    pub url: Option<String>,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            active: false,
            url: None,
            api_key: None,
            model: remote::OPENAI_DEFAULT_MODEL.to_string(),
        }
    }
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("active", &self.active)
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .finish()
    }
}

/// Anthropic-style backend settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnthropicConfig {
    pub active: bool,
    /// Full completion endpoint URL
    pub url: Option<String>,
    #[serde(skip_serializing)]
    pub access_key: Option<String>,
    pub model: String,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            active: false,
            url: None,
            access_key: None,
            model: remote::ANTHROPIC_DEFAULT_MODEL.to_string(),
        }
    }
}

impl std::fmt::Debug for AnthropicConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicConfig")
            .field("active", &self.active)
            .field("url", &self.url)
            .field("access_key", &self.access_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .finish()
    }
}

/// Local inference service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    pub active: bool,
    /// Service base URL; `/ping` and `/tokenize` are resolved against it
    pub url: Option<String>,
    /// Protocol version sent with every request (0 means the default)
    pub api_model_version: u32,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            active: false,
            url: None,
            api_model_version: remote::LOCAL_DEFAULT_MODEL_VERSION,
        }
    }
}

impl LocalConfig {
    pub fn model_version(&self) -> u32 {
        if self.api_model_version == 0 {
            remote::LOCAL_DEFAULT_MODEL_VERSION
        } else {
            self.api_model_version
        }
    }
}

// =============================================================================
// Liveness
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LivenessConfig {
    /// Delay after a connection failure (milliseconds)
    pub connect_retry_ms: u64,
    /// Delay while the service reports unhealthy (milliseconds)
    pub unhealthy_retry_ms: u64,
    /// Maximum number of probes
    pub max_attempts: u32,
    /// Overall deadline in seconds
    pub deadline_secs: u64,
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self {
            connect_retry_ms: liveness::CONNECT_RETRY_MS,
            unhealthy_retry_ms: liveness::UNHEALTHY_RETRY_MS,
            max_attempts: liveness::MAX_ATTEMPTS,
            deadline_secs: liveness::DEADLINE_SECS,
        }
    }
}
