//! Parse command implementation.
//!
//! `stencil parse <IDENTIFIER>` prints the canonical form of an identifier
//! followed by its fields.

use serde::Serialize;

use crate::cli::args::ParseArgs;
use crate::error::Result;
use crate::registry::TemplateIdentifier;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The parse command implementation.
pub struct ParseCommand {
    args: ParseArgs,
}

/// Fields of a parsed identifier, as printed.
#[derive(Debug, Serialize)]
struct ParsedIdentifier<'a> {
    canonical: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    host: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    account: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    repository: Option<&'a str>,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

impl<'a> From<&'a TemplateIdentifier> for ParsedIdentifier<'a> {
    fn from(id: &'a TemplateIdentifier) -> Self {
        Self {
            canonical: id.to_string(),
            host: id.host(),
            account: id.account(),
            repository: id.repository(),
            name: id.name(),
            version: id.version().map(|v| v.to_string()),
        }
    }
}

impl ParseCommand {
    /// Create a new parse command.
    pub fn new(args: ParseArgs) -> Self {
        Self { args }
    }
}

impl Command for ParseCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let id = match TemplateIdentifier::parse(&self.args.identifier) {
            Ok(id) => id,
            Err(e) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(1));
            }
        };
        let parsed = ParsedIdentifier::from(&id);

        if self.args.json {
            let json = serde_json::to_string_pretty(&parsed).map_err(anyhow::Error::from)?;
            ui.emit(&json);
            return Ok(CommandResult::success());
        }

        ui.emit(&parsed.canonical);
        let fields = [
            ("host", parsed.host),
            ("account", parsed.account),
            ("repository", parsed.repository),
            ("name", Some(parsed.name)),
            ("version", parsed.version.as_deref()),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                ui.emit(&format!("  {}: {}", key, value));
            }
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;

    fn run(identifier: &str, json: bool) -> (CommandResult, MockUI) {
        let args = ParseArgs {
            identifier: identifier.to_string(),
            json,
        };
        let mut ui = MockUI::new();
        let result = ParseCommand::new(args).execute(&mut ui).unwrap();
        (result, ui)
    }

    #[test]
    fn parses_full_identifier() {
        let (result, ui) = run("github.com/jumpscale/0-robot/node/0.0.1", false);

        assert!(result.success);
        assert_eq!(
            ui.emitted(),
            [
                "github.com/jumpscale/0-robot/node/0.0.1",
                "  host: github.com",
                "  account: jumpscale",
                "  repository: 0-robot",
                "  name: node",
                "  version: 0.0.1",
            ]
        );
    }

    #[test]
    fn parses_name_only() {
        let (_, ui) = run("node", false);
        assert_eq!(ui.emitted(), ["node", "  name: node"]);
    }

    #[test]
    fn strips_scheme() {
        let (_, ui) = run("https://github.com/acme/templates/node", false);
        assert_eq!(ui.emitted()[0], "github.com/acme/templates/node");
    }

    #[test]
    fn invalid_identifier_fails() {
        let (result, ui) = run("a/b/c", false);

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("found 3"));
    }

    #[test]
    fn json_omits_missing_fields() {
        let (_, ui) = run("node/1.2.3", true);

        let value: serde_json::Value = serde_json::from_str(&ui.emitted()[0]).unwrap();
        assert_eq!(value["canonical"], "node/1.2.3");
        assert_eq!(value["version"], "1.2.3");
        assert!(value.get("host").is_none());
    }
}
