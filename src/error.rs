//! Error types for Stencil operations.
//!
//! This module defines [`StencilError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `StencilError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `StencilError::Other`) for unexpected errors
//! - Conflict errors carry every colliding identifier so callers can disambiguate

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::registry::identifier::TemplateIdentifier;

/// Core error type for Stencil operations.
#[derive(Debug, Error)]
pub enum StencilError {
    /// Repository URL matches none of the recognized dialects.
    #[error("Malformed repository URL: {url}")]
    MalformedUrl { url: String },

    /// Identifier string has the wrong number of segments or a bad version.
    #[error("Invalid template identifier '{input}': {reason}")]
    InvalidIdentifier { input: String, reason: String },

    /// Ordering requested between identifiers of different families.
    #[error("Cannot compare template identifiers {left} and {right}")]
    Incomparable {
        left: TemplateIdentifier,
        right: TemplateIdentifier,
    },

    /// Template directory does not exist or is not a directory.
    #[error("Template directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Duplicate identifier at load time, or ambiguous query at resolve time.
    #[error("Template conflict between: {}", IdentifierList(.identifiers))]
    TemplateConflict { identifiers: Vec<TemplateIdentifier> },

    /// No registered template matches the query.
    #[error("Template not found: {query}")]
    TemplateNotFound { query: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Failed to parse a template descriptor.
    #[error("Failed to parse template descriptor at {path}: {message}")]
    DescriptorParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Stencil operations.
pub type Result<T> = std::result::Result<T, StencilError>;

struct IdentifierList<'a>(&'a [TemplateIdentifier]);

impl fmt::Display for IdentifierList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", id)?;
        }
        Ok(())
    }
}
