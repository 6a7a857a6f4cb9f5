//! Resolve command implementation.
//!
//! `stencil resolve <IDENTIFIER>` resolves a full or partial identifier
//! against the registry. Exit codes:
//!
//! - 0: exactly one template
//! - 1: no template, or an invalid identifier
//! - 2: ambiguous, candidates are printed

use crate::cli::args::ResolveArgs;
use crate::error::Result;
use crate::registry::{Resolution, Template, TemplateIdentifier};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::workspace::Workspace;

/// Exit code for an ambiguous identifier.
pub const EXIT_AMBIGUOUS: i32 = 2;

/// The resolve command implementation.
pub struct ResolveCommand {
    workspace: Workspace,
    args: ResolveArgs,
}

impl ResolveCommand {
    /// Create a new resolve command.
    pub fn new(workspace: Workspace, args: ResolveArgs) -> Self {
        Self { workspace, args }
    }

    fn show_found(&self, ui: &mut dyn UserInterface, template: &Template) -> Result<()> {
        if self.args.json {
            let json = serde_json::to_string_pretty(template).map_err(anyhow::Error::from)?;
            ui.emit(&json);
            return Ok(());
        }

        ui.emit(&template.identifier.to_string());
        ui.show_detail("directory", &template.directory.display().to_string());
        if let Some(description) = &template.description {
            ui.show_detail("description", description);
        }
        Ok(())
    }

    fn show_conflict(
        &self,
        ui: &mut dyn UserInterface,
        query: &TemplateIdentifier,
        candidates: &[TemplateIdentifier],
    ) -> Result<()> {
        ui.error(&format!(
            "'{}' matches {} templates",
            query,
            candidates.len()
        ));

        if self.args.json {
            let json = serde_json::to_string_pretty(candidates).map_err(anyhow::Error::from)?;
            ui.emit(&json);
        } else {
            for candidate in candidates {
                ui.emit(&candidate.to_string());
            }
        }

        ui.show_hint("Use one of the fully qualified identifiers above");
        Ok(())
    }
}

impl Command for ResolveCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let query = match TemplateIdentifier::parse(&self.args.identifier) {
            Ok(query) => query,
            Err(e) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(1));
            }
        };

        let Some(registry) = self.workspace.open_registry(&self.args.source.sources, ui)? else {
            return Ok(CommandResult::failure(1));
        };

        match registry.resolve(&query) {
            Resolution::Found(template) => {
                tracing::debug!("Resolved {} to {}", query, template.identifier);
                self.show_found(ui, &template)?;
                Ok(CommandResult::success())
            }
            Resolution::NotFound => {
                ui.error(&format!("Template not found: {}", query));
                Ok(CommandResult::failure(1))
            }
            Resolution::Conflict(candidates) => {
                self.show_conflict(ui, &query, &candidates)?;
                Ok(CommandResult::failure(EXIT_AMBIGUOUS))
            }
        }
    }
}
