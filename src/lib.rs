//! Stencil - Template registry for orchestration services.
//!
//! Stencil discovers templates in checked-out git repositories and resolves
//! full or partial identifiers of the form
//! `host/account/repository/name/major.minor.patch` to exactly one of them.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`registry`] - Identifiers, URL normalization, discovery and resolution
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use stencil::registry::TemplateIdentifier;
//!
//! let newer: TemplateIdentifier = "node/1.0.1".parse().unwrap();
//! let older: TemplateIdentifier = "node/0.9.1".parse().unwrap();
//! assert!(newer.try_gt(&older).unwrap());
//!
//! let other: TemplateIdentifier = "vm/0.9.1".parse().unwrap();
//! assert!(newer.try_gt(&other).is_err());
//! ```
//!
//! For loading templates from disk, see [`registry::TemplateRegistry`].

pub mod cli;
pub mod config;
pub mod error;
pub mod registry;
pub mod ui;

pub use error::{Result, StencilError};
