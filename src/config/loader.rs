//! Configuration file discovery and loading.
//!
//! The project configuration lives at `.stencil/config.yml` under the
//! project root. A `--config` override replaces that location entirely.

use crate::config::schema::StencilConfig;
use crate::config::validator::validate;
use crate::error::{Result, StencilError};
use crate::registry::TemplateRegistry;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding project configuration.
pub const CONFIG_DIR: &str = ".stencil";

/// Configuration file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yml";

/// Expected location of the project config.
pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Find the project root by walking up from `start`.
///
/// Looks for:
/// 1. `.stencil` directory (primary indicator)
/// 2. `.git` directory (fallback)
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_DIR).is_dir() {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load a single config file and parse it into StencilConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<StencilConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StencilError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            StencilError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into StencilConfig.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<StencilConfig> {
    if content.trim().is_empty() {
        return Ok(StencilConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| StencilError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and validate config, with optional path override.
///
/// Without an override, reads `.stencil/config.yml` under `project_root`.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<StencilConfig> {
    let path = match config_override {
        Some(path) => path.to_path_buf(),
        None => config_path(project_root),
    };

    let config = load_config_file(&path)?;
    validate(&config)?;
    tracing::debug!(
        "Loaded config from {} ({} repositories)",
        path.display(),
        config.repositories.len()
    );
    Ok(config)
}

/// Build a registry holding every template of every configured repository.
///
/// Relative checkout paths are resolved against `project_root`.
pub fn load_registry(config: &StencilConfig, project_root: &Path) -> Result<TemplateRegistry> {
    let registry = TemplateRegistry::new();
    for repository in &config.repositories {
        let directory = repository.resolved_path(project_root);
        registry.load(&repository.url, &directory)?;
    }
    Ok(registry)
}
