//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::RepositoryConfig;
use crate::registry::TemplateFilter;

/// Stencil - Template registry for orchestration services.
#[derive(Debug, Parser)]
#[command(name = "stencil")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .stencil/config.yml)
    #[arg(short, long, global = true, env = "STENCIL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List registered templates (default if no command specified)
    List(ListArgs),

    /// Resolve a full or partial identifier to one template
    Resolve(ResolveArgs),

    /// Parse an identifier and show its fields
    Parse(ParseArgs),

    /// Normalize a repository URL
    Normalize(NormalizeArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Repositories to load in addition to the configured ones.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SourceArgs {
    /// Extra repository checkout, as URL=DIR (repeatable)
    #[arg(long = "source", value_name = "URL=DIR", value_parser = parse_source)]
    pub sources: Vec<RepositoryConfig>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Only templates from this host
    #[arg(long)]
    pub host: Option<String>,

    /// Only templates from this account
    #[arg(long)]
    pub account: Option<String>,

    /// Only templates from this repository
    #[arg(long)]
    pub repository: Option<String>,

    /// Only templates with this name
    #[arg(long)]
    pub name: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

impl ListArgs {
    /// Field filter built from the flags.
    pub fn filter(&self) -> TemplateFilter {
        TemplateFilter {
            host: self.host.clone(),
            account: self.account.clone(),
            repository: self.repository.clone(),
            name: self.name.clone(),
            version: None,
        }
    }
}

/// Arguments for the `resolve` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ResolveArgs {
    /// Identifier: name, name/version, host/account/repository/name[/version]
    pub identifier: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the `parse` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ParseArgs {
    /// Identifier to parse
    pub identifier: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `normalize` command.
#[derive(Debug, Clone, clap::Args)]
pub struct NormalizeArgs {
    /// Repository URL (SCP-like or URL-style)
    pub url: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}

/// Split `URL=DIR` at the last `=`, so query strings in the URL survive.
fn parse_source(value: &str) -> Result<RepositoryConfig, String> {
    match value.rsplit_once('=') {
        Some((url, dir)) if !url.is_empty() && !dir.is_empty() => {
            Ok(RepositoryConfig::new(url, dir))
        }
        _ => Err(format!("expected URL=DIR, got '{}'", value)),
    }
}
