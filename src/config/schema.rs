//! Configuration schema definitions for Stencil.
//!
//! This module contains the struct definitions that map to
//! `.stencil/config.yml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for `.stencil/config.yml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StencilConfig {
    /// Template repositories checked out on disk
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub repositories: Vec<RepositoryConfig>,

    /// Global settings
    pub settings: Settings,
}

/// A template repository and the directory holding its checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Repository URL, in SCP-like or URL form
    pub url: String,

    /// Checkout directory, relative to the project root or absolute
    pub path: PathBuf,
}

impl RepositoryConfig {
    pub fn new(url: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            path: path.into(),
        }
    }

    /// Checkout directory resolved against the project root.
    pub fn resolved_path(&self, project_root: &Path) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            project_root.join(&self.path)
        }
    }
}

/// Global settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default output mode: verbose, normal, quiet, silent
    pub default_output: OutputMode,
}

/// Output verbosity mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Verbose,
    #[default]
    Normal,
    Quiet,
    Silent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let yaml = r#"
repositories:
  - url: https://github.com/acme/templates
    path: vendor/templates
  - url: git@gitlab.com:other/blueprints.git
    path: /srv/blueprints
settings:
  default_output: quiet
"#;
        let config: StencilConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.repositories.len(), 2);
        assert_eq!(config.repositories[1].path, PathBuf::from("/srv/blueprints"));
        assert_eq!(config.settings.default_output, OutputMode::Quiet);
    }

    #[test]
    fn empty_mapping_uses_defaults() {
        let config: StencilConfig = serde_yaml::from_str("{}").unwrap();
        assert!(config.repositories.is_empty());
        assert_eq!(config.settings.default_output, OutputMode::Normal);
    }

    #[test]
    fn repository_requires_url_and_path() {
        let result: std::result::Result<StencilConfig, _> =
            serde_yaml::from_str("repositories:\n  - url: https://github.com/acme/templates\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_output_mode_is_rejected() {
        let result: std::result::Result<Settings, _> = serde_yaml::from_str("default_output: loud");
        assert!(result.is_err());
    }

    #[test]
    fn relative_path_resolves_against_root() {
        let repo = RepositoryConfig::new("https://github.com/acme/templates", "vendor/templates");
        assert_eq!(
            repo.resolved_path(Path::new("/work/project")),
            PathBuf::from("/work/project/vendor/templates")
        );
    }

    #[test]
    fn absolute_path_is_kept() {
        let repo = RepositoryConfig::new("https://github.com/acme/templates", "/srv/templates");
        assert_eq!(
            repo.resolved_path(Path::new("/work/project")),
            PathBuf::from("/srv/templates")
        );
    }
}
