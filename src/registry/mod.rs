//! Template registry for Stencil.
//!
//! This module handles addressing, discovering and resolving templates:
//! - [`identifier`] - the `host/account/repository/name/version` grammar
//! - [`source`] - repository URL normalization
//! - [`template`] - template and descriptor definitions
//! - [`local`] - discovery in a repository checkout
//! - [`resolver`] - the registry and partial-identifier resolution
//!
//! # Example
//!
//! ```
//! use stencil::registry::{normalize, TemplateIdentifier};
//!
//! let (_, host, account, repository) = normalize("git@github.com:acme/templates.git").unwrap();
//! let id: TemplateIdentifier = format!("{host}/{account}/{repository}/node/1.0.0").parse().unwrap();
//! assert_eq!(id.tuple(), ["github.com", "acme", "templates", "node", "1.0.0"]);
//! ```

pub mod identifier;
pub mod local;
pub mod resolver;
pub mod source;
pub mod template;

// Re-exports
pub use identifier::{Origin, TemplateIdentifier, Version};
pub use local::LocalLoader;
pub use resolver::{Resolution, TemplateFilter, TemplateQuery, TemplateRegistry};
pub use source::{normalize, RepositoryUrl};
pub use template::{Template, TemplateDescriptor};
