//! List command implementation.
//!
//! The `stencil list` command lists registered templates, optionally
//! narrowed by host, account, repository or name.

use console::measure_text_width;

use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::registry::Template;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::workspace::Workspace;

/// The list command implementation.
pub struct ListCommand {
    workspace: Workspace,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(workspace: Workspace, args: ListArgs) -> Self {
        Self { workspace, args }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(registry) = self.workspace.open_registry(&self.args.source.sources, ui)? else {
            return Ok(CommandResult::failure(1));
        };

        let templates = registry.find(&self.args.filter());

        if self.args.json {
            let json = serde_json::to_string_pretty(&templates).map_err(anyhow::Error::from)?;
            ui.emit(&json);
            return Ok(CommandResult::success());
        }

        if templates.is_empty() {
            ui.warning("No templates found");
            return Ok(CommandResult::success());
        }

        ui.show_header(&format!("Templates ({})", templates.len()));
        for line in render_rows(&templates) {
            ui.emit(&line);
        }
        for template in &templates {
            ui.show_detail(
                &template.identifier.to_string(),
                &template.directory.display().to_string(),
            );
        }

        Ok(CommandResult::success())
    }
}

/// One line per template, descriptions aligned after the widest identifier.
fn render_rows(templates: &[Template]) -> Vec<String> {
    let ids: Vec<String> = templates.iter().map(|t| t.identifier.to_string()).collect();
    let width = ids.iter().map(|id| measure_text_width(id)).max().unwrap_or(0);

    ids.iter()
        .zip(templates)
        .map(|(id, template)| match &template.description {
            Some(description) => {
                let pad = width - measure_text_width(id);
                format!("{}{}  {}", id, " ".repeat(pad), description)
            }
            None => id.clone(),
        })
        .collect()
}
