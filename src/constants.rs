//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Comment composition constants
pub mod composer {
    /// Marker inserted before unexported identifiers
    pub const PRIVATE_MARKER: &str = "private ";

    /// Identifier prefix that routes functions to the constructor template
    pub const CONSTRUCTOR_PREFIX: &str = "New";

    /// Functions that never receive a generated comment
    pub const SKIPPED_FUNCTIONS: [&str; 2] = ["main", "init"];

    /// Minimum number of segmented words before a name is explained
    pub const MIN_EXPLAINED_WORDS: usize = 2;

    /// Deepest type nesting kept when parsing type text
    pub const MAX_TYPE_DEPTH: usize = 64;
}

/// Remote backend constants
pub mod remote {
    /// Default request timeout for remote backends (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

    /// Maximum tokens requested from text-generation services
    pub const MAX_TOKENS: u32 = 150;

    /// Sampling temperature requested from text-generation services
    pub const TEMPERATURE: f32 = 0.7;

    /// Default OpenAI-style model
    pub const OPENAI_DEFAULT_MODEL: &str = "gpt-3.5-turbo";

    /// Default Anthropic-style model
    pub const ANTHROPIC_DEFAULT_MODEL: &str = "claude-v1";

    /// Default protocol version sent to the local inference service
    pub const LOCAL_DEFAULT_MODEL_VERSION: u32 = 1;

    /// Liveness path of the local inference service
    pub const PING_PATH: &str = "/ping";

    /// Generation path of the local inference service
    pub const TOKENIZE_PATH: &str = "/tokenize";
}

/// Liveness polling constants
pub mod liveness {
    /// Delay after a transport failure (milliseconds)
    pub const CONNECT_RETRY_MS: u64 = 1_000;

    /// Delay while the service answers but is not healthy (milliseconds)
    pub const UNHEALTHY_RETRY_MS: u64 = 10_000;

    /// Maximum number of probes before giving up
    pub const MAX_ATTEMPTS: u32 = 30;

    /// Overall deadline for the service to become ready (seconds)
    pub const DEADLINE_SECS: u64 = 120;
}
