//! Template definitions.
//!
//! A template is a directory holding a descriptor file (`template.yml`)
//! next to whatever content the orchestration service needs. The registry
//! only reads the descriptor's declared version and description.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, StencilError};
use crate::registry::identifier::{TemplateIdentifier, Version};

/// File names recognized as a template descriptor, in lookup order.
pub const DESCRIPTOR_FILES: [&str; 2] = ["template.yml", "template.yaml"];

/// Contents of a template descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDescriptor {
    /// Declared version (`major.minor.patch`)
    #[serde(default)]
    pub version: Option<String>,

    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,
}

impl TemplateDescriptor {
    /// Locate the descriptor inside a template directory.
    pub fn find(dir: &Path) -> Option<PathBuf> {
        DESCRIPTOR_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Read and parse a descriptor file.
    ///
    /// An empty file is a valid descriptor with no version.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|e| StencilError::DescriptorParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// The declared version, parsed.
    pub fn parsed_version(&self) -> Result<Option<Version>> {
        self.version.as_deref().map(str::parse::<Version>).transpose()
    }
}

/// A template known to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Fully qualified identifier
    pub identifier: TemplateIdentifier,

    /// Directory holding the template
    pub directory: PathBuf,

    /// Description from the descriptor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Template {
    /// Template name.
    pub fn name(&self) -> &str {
        self.identifier.name()
    }

    /// Declared version, if any.
    pub fn version(&self) -> Option<Version> {
        self.identifier.version()
    }
}
