//! Config Command
//!
//! Manage autocomment configuration.
//!
//! Usage:
//!   autocomment config show [-f json]
//!   autocomment config path
//!   autocomment config init [-g] [--force]

use std::path::Path;

use crate::config::ConfigLoader;
use crate::types::Result;

/// Show the merged effective configuration
pub fn show(explicit: Option<&Path>, format: &str) -> Result<()> {
    let config = ConfigLoader::load(explicit)?;
    println!(
        "{}",
        ConfigLoader::render_config(&config, format == "json")?
    );
    Ok(())
}

/// Show configuration paths
pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

/// Initialize global or project configuration
pub fn init(global: bool, force: bool) -> Result<()> {
    let path = if global {
        ConfigLoader::init_global(force)?
    } else {
        ConfigLoader::init_project(force)?
    };
    println!(
        "✓ Initialized {} configuration",
        if global { "global" } else { "project" }
    );
    println!("  Config: {}", path.display());
    Ok(())
}
