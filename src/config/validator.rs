//! Configuration validation rules.
//!
//! - Repository URLs must normalize
//! - Checkout paths must be non-empty
//! - A repository may be listed only once

use crate::config::schema::StencilConfig;
use crate::error::{Result, StencilError};
use crate::registry::RepositoryUrl;
use std::collections::HashSet;

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Position of the offending entry in `repositories`
    pub repository: Option<usize>,
}

impl ValidationError {
    fn repository(rule: &str, index: usize, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
            repository: Some(index),
        }
    }
}

/// Validate a configuration and return all errors.
///
/// This function collects all validation errors rather than stopping
/// at the first one, allowing users to fix multiple issues at once.
pub fn validate_config(config: &StencilConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, repository) in config.repositories.iter().enumerate() {
        match RepositoryUrl::parse(&repository.url) {
            Ok(url) => {
                let origin = url.origin().to_string();
                if !seen.insert(origin.clone()) {
                    errors.push(ValidationError::repository(
                        "duplicate-repository",
                        index,
                        format!("Repository '{}' is configured more than once", origin),
                    ));
                }
            }
            Err(_) => errors.push(ValidationError::repository(
                "malformed-url",
                index,
                format!("Repository URL '{}' is not recognized", repository.url),
            )),
        }

        if repository.path.as_os_str().is_empty() {
            errors.push(ValidationError::repository(
                "empty-path",
                index,
                format!("Repository '{}' has an empty path", repository.url),
            ));
        }
    }

    errors
}

/// Validate and return Result.
pub fn validate(config: &StencilConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(StencilError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
