//! Normalize command implementation.
//!
//! `stencil normalize <URL>` reduces a repository URL to protocol, host,
//! account and repository.

use crate::cli::args::NormalizeArgs;
use crate::error::Result;
use crate::registry::RepositoryUrl;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

const URL_FORMS: &str =
    "Expected user@host:account/repository or scheme://host/account/repository";

/// The normalize command implementation.
pub struct NormalizeCommand {
    args: NormalizeArgs,
}

impl NormalizeCommand {
    /// Create a new normalize command.
    pub fn new(args: NormalizeArgs) -> Self {
        Self { args }
    }
}

impl Command for NormalizeCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let url = match RepositoryUrl::parse(&self.args.url) {
            Ok(url) => url,
            Err(e) => {
                ui.error(&e.to_string());
                ui.show_hint(URL_FORMS);
                return Ok(CommandResult::failure(1));
            }
        };

        if self.args.json {
            let json = serde_json::to_string_pretty(&url).map_err(anyhow::Error::from)?;
            ui.emit(&json);
            return Ok(CommandResult::success());
        }

        ui.emit(&format!("protocol: {}", url.protocol));
        ui.emit(&format!("host: {}", url.host));
        ui.emit(&format!("account: {}", url.account));
        ui.emit(&format!("repository: {}", url.repository));

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;

    fn run(url: &str, json: bool) -> (CommandResult, MockUI) {
        let args = NormalizeArgs {
            url: url.to_string(),
            json,
        };
        let mut ui = MockUI::new();
        let result = NormalizeCommand::new(args).execute(&mut ui).unwrap();
        (result, ui)
    }

    #[test]
    fn normalizes_ssh_url() {
        let (result, ui) = run("ssh://git@docs.example.com:10022/Org/repo.git", false);

        assert!(result.success);
        assert_eq!(
            ui.emitted(),
            [
                "protocol: git",
                "host: docs.example.com",
                "account: Org",
                "repository: repo",
            ]
        );
    }

    #[test]
    fn json_output() {
        let (_, ui) = run("https://hostname/account/repo", true);

        let value: serde_json::Value = serde_json::from_str(&ui.emitted()[0]).unwrap();
        assert_eq!(value["protocol"], "https");
        assert_eq!(value["repository"], "repo");
    }

    #[test]
    fn malformed_url_fails() {
        let (result, ui) = run("/not/existing/path", false);

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("Malformed repository URL"));
        assert_eq!(ui.hints().len(), 1);
    }
}
