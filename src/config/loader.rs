//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/autocomment/config.toml)
//! 3. Project config (.autocomment/config.toml)
//! 4. Environment variables (AUTOCOMMENT_* prefix, `__` separates nested keys)
//! 5. Explicit `--config` file

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::types::{AutocommentError, Result};

const ENV_PREFIX: &str = "AUTOCOMMENT_";
const APP_DIR: &str = "autocomment";
const PROJECT_DIR: &str = ".autocomment";
const CONFIG_FILE: &str = "config.toml";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → project → env vars → explicit file
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        Self::load_layers(
            Self::global_config_path(),
            Self::project_config_path(),
            explicit,
        )
    }

    fn load_layers(
        global: Option<PathBuf>,
        project: PathBuf,
        explicit: Option<&Path>,
    ) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = global
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        if project.exists() {
            debug!("Loading project config from: {}", project.display());
            figment = figment.merge(Toml::file(&project));
        }

        // AUTOCOMMENT_OPENAI__API_KEY -> openai.api_key
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true));

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(AutocommentError::config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            debug!("Loading explicit config from: {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        let config: Config = figment
            .extract()
            .map_err(|e| AutocommentError::config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/autocomment/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                directories::BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf())
            })
            .map(|p| p.join(APP_DIR))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join(CONFIG_FILE))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        Self::project_dir().join(CONFIG_FILE)
    }

    pub fn project_dir() -> PathBuf {
        PathBuf::from(PROJECT_DIR)
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Render the effective configuration as TOML or JSON
    pub fn render_config(config: &Config, as_json: bool) -> Result<String> {
        if as_json {
            Ok(serde_json::to_string_pretty(config)?)
        } else {
            Ok(toml::to_string_pretty(config)?)
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize global configuration
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            AutocommentError::config("Cannot determine global config directory")
        })?;
        Self::write_default(&global_dir, force)
    }

    /// Initialize project configuration
    pub fn init_project(force: bool) -> Result<PathBuf> {
        Self::write_default(&Self::project_dir(), force)
    }

    fn write_default(dir: &Path, force: bool) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;

        let config_path = dir.join(CONFIG_FILE);
        if !config_path.exists() || force {
            fs::write(&config_path, Self::default_config())?;
            info!("Created config: {}", config_path.display());
        } else {
            info!("Config exists: {}", config_path.display());
        }

        Ok(config_path)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Generate default config content (TOML)
    fn default_config() -> String {
        r#"# autocomment Configuration
# Project settings in .autocomment/config.toml override user-wide defaults.

# Author footer appended to generated comments
# signature = "Jane Doe"

# Append usage examples to function comments
examples = false

# Remote backend request timeout
timeout_secs = 60

# The first active backend wins: openai, anthropic, local.
# Without an active backend, comments are composed offline.
[openai]
active = false
# url = "https://api.openai.com/v1/chat/completions"
# api_key = "..."  (or OPENAI_API_KEY)
model = "gpt-3.5-turbo"

[anthropic]
active = false
# url = "..."
# access_key = "..."  (or AUTOCOMMENT_ANTHROPIC__ACCESS_KEY)
model = "claude-v1"

[local]
active = false
# url = "http://localhost:5000"
api_model_version = 1

[liveness]
connect_retry_ms = 1000
unhealthy_retry_ms = 10000
max_attempts = 30
deadline_secs = 120
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn missing(dir: &TempDir) -> PathBuf {
        dir.path().join("missing.toml")
    }

    #[test]
    fn test_load_defaults_without_files() {
        let dir = TempDir::new().unwrap();
        let config = ConfigLoader::load_layers(None, missing(&dir), None).unwrap();
        assert!(!config.examples);
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.liveness.max_attempts, 30);
    }

    #[test]
    fn test_project_overrides_global() {
        let dir = TempDir::new().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("project.toml");
        fs::write(&global, "signature = \"Global\"\nexamples = true\n").unwrap();
        fs::write(&project, "signature = \"Project\"\n").unwrap();

        let config = ConfigLoader::load_layers(Some(global), project, None).unwrap();
        assert_eq!(config.signature(), Some("Project"));
        assert!(config.examples);
    }

    #[test]
    fn test_explicit_file_wins() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("project.toml");
        let explicit = dir.path().join("explicit.toml");
        fs::write(&project, "[local]\nactive = false\n").unwrap();
        fs::write(
            &explicit,
            "[local]\nactive = true\nurl = \"http://127.0.0.1:5000\"\n",
        )
        .unwrap();

        let config = ConfigLoader::load_layers(None, project, Some(&explicit)).unwrap();
        assert!(config.local.active);
        assert_eq!(config.local.url.as_deref(), Some("http://127.0.0.1:5000"));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let result = ConfigLoader::load_layers(None, missing(&dir), Some(&missing(&dir)));
        assert!(matches!(result, Err(AutocommentError::Config(_))));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = TempDir::new().unwrap();
        let explicit = dir.path().join("bad.toml");
        fs::write(&explicit, "timeout_secs = 0\n").unwrap();
        let result = ConfigLoader::load_layers(None, missing(&dir), Some(&explicit));
        assert!(matches!(result, Err(AutocommentError::Config(_))));
    }

    #[test]
    fn test_env_override() {
        let dir = TempDir::new().unwrap();
        // SAFETY: no other test reads this variable
        unsafe {
            env::set_var("AUTOCOMMENT_LIVENESS__DEADLINE_SECS", "7");
        }
        let config = ConfigLoader::load_layers(None, missing(&dir), None).unwrap();
        unsafe {
            env::remove_var("AUTOCOMMENT_LIVENESS__DEADLINE_SECS");
        }
        assert_eq!(config.liveness.deadline_secs, 7);
    }

    #[test]
    fn test_default_config_parses() {
        let dir = TempDir::new().unwrap();
        let path = ConfigLoader::write_default(dir.path(), false).unwrap();
        let config = ConfigLoader::load_layers(None, path, None).unwrap();
        assert!(!config.openai.active);
        assert_eq!(config.local.api_model_version, 1);
    }

    #[test]
    fn test_write_default_respects_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "examples = true\n").unwrap();

        ConfigLoader::write_default(dir.path(), false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "examples = true\n");

        ConfigLoader::write_default(dir.path(), true).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("[liveness]"));
    }

    #[test]
    fn test_render_config_formats() {
        let config = Config::default();
        let toml = ConfigLoader::render_config(&config, false).unwrap();
        assert!(toml.contains("[liveness]"));
        let json = ConfigLoader::render_config(&config, true).unwrap();
        assert!(json.contains("\"liveness\""));
    }
}
