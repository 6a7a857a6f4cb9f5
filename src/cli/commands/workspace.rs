//! Project context shared by commands that read templates.

use std::path::{Path, PathBuf};

use crate::config::{load_config, load_registry, RepositoryConfig, StencilConfig};
use crate::error::{Result, StencilError};
use crate::registry::TemplateRegistry;
use crate::ui::{OutputMode, UserInterface};

/// Project root plus an optional config file override.
#[derive(Debug, Clone)]
pub struct Workspace {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
}

impl Workspace {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            config_override: None,
        }
    }

    pub fn with_config(mut self, config: Option<PathBuf>) -> Self {
        self.config_override = config;
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Load the configured repositories plus `extra` into a fresh registry.
    ///
    /// A missing project config is tolerated when `extra` names at least one
    /// repository and no explicit config file was requested. Returns `None`
    /// after reporting a missing config to the user.
    pub fn open_registry(
        &self,
        extra: &[RepositoryConfig],
        ui: &mut dyn UserInterface,
    ) -> Result<Option<TemplateRegistry>> {
        let config = match load_config(&self.project_root, self.config_override.as_deref()) {
            Ok(config) => config,
            Err(StencilError::ConfigNotFound { .. })
                if !extra.is_empty() && self.config_override.is_none() =>
            {
                tracing::debug!("No project config, using --source repositories only");
                StencilConfig::default()
            }
            Err(StencilError::ConfigNotFound { path }) => {
                ui.error(&format!("No configuration found at {}", path.display()));
                ui.show_hint("Create .stencil/config.yml or pass --source URL=DIR");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        // Apply config default_output when no CLI flag was explicitly set
        if ui.output_mode() == OutputMode::Normal {
            ui.set_output_mode(config.settings.default_output.into());
        }

        let registry = load_registry(&config, &self.project_root)?;
        for repository in extra {
            registry.load(&repository.url, repository.resolved_path(&self.project_root))?;
        }

        Ok(Some(registry))
    }
}
