//! Template discovery in a checked-out repository directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, StencilError};
use crate::registry::identifier::{Origin, TemplateIdentifier};
use crate::registry::template::{Template, TemplateDescriptor};

/// Scans a repository checkout for templates.
///
/// Every immediate subdirectory holding a descriptor is one template, named
/// after the subdirectory.
#[derive(Debug, Clone)]
pub struct LocalLoader {
    origin: Origin,
    root: PathBuf,
}

impl LocalLoader {
    /// Create a loader for a checkout of the repository identified by `origin`.
    pub fn new(origin: Origin, root: impl Into<PathBuf>) -> Self {
        Self {
            origin,
            root: root.into(),
        }
    }

    /// Discover all templates, sorted by name.
    pub fn discover(&self) -> Result<Vec<Template>> {
        if !self.root.is_dir() {
            return Err(StencilError::DirectoryNotFound {
                path: self.root.clone(),
            });
        }

        let mut dirs = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_dir() {
                dirs.push(path);
            }
        }
        dirs.sort();

        let mut templates = Vec::new();
        for dir in dirs {
            if let Some(template) = self.load_template(&dir)? {
                templates.push(template);
            }
        }

        Ok(templates)
    }

    fn load_template(&self, dir: &Path) -> Result<Option<Template>> {
        let Some(name) = dir.file_name().and_then(|n| n.to_str()) else {
            tracing::warn!(
                "Skipping template directory with non UTF-8 name: {}",
                dir.display()
            );
            return Ok(None);
        };

        if name.starts_with('.') {
            return Ok(None);
        }

        let Some(descriptor_path) = TemplateDescriptor::find(dir) else {
            tracing::debug!("No template descriptor in {}, skipping", dir.display());
            return Ok(None);
        };

        let descriptor = TemplateDescriptor::load(&descriptor_path)?;
        let version = descriptor.parsed_version()?;
        let identifier = TemplateIdentifier::from_parts(Some(self.origin.clone()), name, version);

        // Names must survive a render/parse round trip to be addressable.
        TemplateIdentifier::parse(&identifier.to_string())?;

        tracing::debug!("Discovered template {} in {}", identifier, dir.display());

        Ok(Some(Template {
            identifier,
            directory: dir.to_path_buf(),
            description: descriptor.description,
        }))
    }
}
