//! Configuration loading, parsing, and validation for Stencil.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use stencil::config::{load_config, load_registry};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let stencil_dir = temp.path().join(".stencil");
//! fs::create_dir_all(&stencil_dir).unwrap();
//! fs::create_dir_all(temp.path().join("templates/node")).unwrap();
//! fs::write(temp.path().join("templates/node/template.yml"), "version: 1.0.0").unwrap();
//! fs::write(
//!     stencil_dir.join("config.yml"),
//!     "repositories:\n  - url: https://github.com/acme/templates\n    path: templates\n",
//! )
//! .unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! let registry = load_registry(&config, temp.path()).unwrap();
//! assert_eq!(registry.len(), 1);
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

// Schema re-exports
pub use schema::{OutputMode, RepositoryConfig, Settings, StencilConfig};

// Loader re-exports
pub use loader::{
    config_path, find_project_root, load_config, load_config_file, load_registry, parse_config,
    CONFIG_DIR, CONFIG_FILE,
};

// Validator re-exports
pub use validator::{validate, validate_config, ValidationError};
