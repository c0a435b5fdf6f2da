//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/autocomment/config.toml)
//! 3. Project config (.autocomment/config.toml)
//! 4. Environment variables (AUTOCOMMENT_*)
//! 5. Explicit `--config` file (highest priority)

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
