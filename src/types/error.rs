//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//!
//! ## Error Taxonomy
//!
//! - **Config**: a remote backend is enabled without its required settings (fatal at startup)
//! - **Backend**: a remote backend call failed for one declaration (skip and continue)
//! - **Cancelled**: the run was cancelled while waiting on a remote service
//! - **Io / Json / Yaml / Toml**: collaborator-level failures reading or writing manifests
//!
//! Heuristic composition never fails; malformed shapes degrade to "unknown" text and
//! unmappable example types suppress the example block.

use thiserror::Error;

// =============================================================================
// Backend Error
// =============================================================================

/// Failure classes of a remote backend call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendErrorKind {
    /// Non-2xx HTTP status
    Status(u16),
    /// Response body could not be decoded into the expected shape
    Decode,
    /// Network or transport failure
    Transport,
    /// Remote service never became ready within the liveness policy
    Unavailable,
    /// The caller cancelled the operation
    Cancelled,
}

impl std::fmt::Display for BackendErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status(code) => write!(f, "STATUS_{}", code),
            Self::Decode => write!(f, "DECODE"),
            Self::Transport => write!(f, "TRANSPORT"),
            Self::Unavailable => write!(f, "UNAVAILABLE"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Error produced by a comment backend for a single declaration
#[derive(Debug, Clone)]
pub struct BackendError {
    /// Failure class
    pub kind: BackendErrorKind,
    /// Detailed error message
    pub message: String,
    /// Backend that produced the error
    pub backend: Option<String>,
    /// Identifier of the declaration being commented
    pub declaration: Option<String>,
    /// Raw response body, kept for diagnostics
    pub body: Option<String>,
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.backend {
            Some(backend) => write!(f, "[{}:{}] {}", backend, self.kind, self.message)?,
            None => write!(f, "[{}] {}", self.kind, self.message)?,
        }
        if let Some(declaration) = &self.declaration {
            write!(f, " (declaration {})", declaration)?;
        }
        Ok(())
    }
}

impl std::error::Error for BackendError {}

impl BackendError {
    /// Create a new backend error
    pub fn new(kind: BackendErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            backend: None,
            declaration: None,
            body: None,
        }
    }

    /// Error for a non-success HTTP status, keeping the response body
    pub fn status(code: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        Self::new(
            BackendErrorKind::Status(code),
            format!("request failed with status code {}", code),
        )
        .with_body(body)
    }

    /// Error for an undecodable response, keeping the response body
    pub fn decode(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Decode, message).with_body(body)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Transport, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Unavailable, message)
    }

    pub fn cancelled() -> Self {
        Self::new(BackendErrorKind::Cancelled, "operation cancelled")
    }

    /// Add backend context
    pub fn backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = Some(backend.into());
        self
    }

    /// Attach the identifier of the declaration being commented
    pub fn declaration(mut self, identifier: impl Into<String>) -> Self {
        self.declaration = Some(identifier.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// HTTP status code, if the failure was a status error
    pub fn status_code(&self) -> Option<u16> {
        match self.kind {
            BackendErrorKind::Status(code) => Some(code),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == BackendErrorKind::Cancelled
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::new(BackendErrorKind::Decode, err.to_string())
        } else if let Some(status) = err.status() {
            BackendError::new(BackendErrorKind::Status(status.as_u16()), err.to_string())
        } else {
            BackendError::transport(err.to_string())
        }
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum AutocommentError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Manifest error in {path}: {message}")]
    Manifest { path: String, message: String },

    #[error("Run cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, AutocommentError>;

impl AutocommentError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn manifest(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Manifest {
            path: path.into(),
            message: message.into(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
