//! Repository URL normalization.
//!
//! Template repositories are reached through two URL dialects:
//!
//! - SCP-like: `git@github.com:acme/templates.git`
//! - URL-style: `https://github.com/acme/templates` or
//!   `ssh://git@git.example.com:10022/acme/templates.git`
//!
//! Both normalize to the same `(protocol, host, account, repository)` tuple,
//! which is what template identifiers are built from. Host and path segments
//! are kept as written in every dialect: no case folding, no percent-encoding.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use url::Url;

use crate::error::{Result, StencilError};
use crate::registry::identifier::Origin;

/// Protocol reported for SCP-like addresses and for URLs using the `git` user.
pub const GIT_PROTOCOL: &str = "git";

/// `user@host:path`, with no scheme.
static SCP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<user>[^@/:\s]+)@(?P<host>[^@/:\s]+):(?P<path>[^\s]+)$")
        .expect("SCP_REGEX must compile")
});

/// A repository URL reduced to the parts that identify it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryUrl {
    /// Transport protocol (`git`, `https`, ...). Informational only.
    pub protocol: String,
    /// Host name, without port.
    pub host: String,
    /// Account or organization owning the repository.
    pub account: String,
    /// Repository name, without a `.git` suffix.
    pub repository: String,
}

impl RepositoryUrl {
    /// Normalize a repository URL in either supported dialect.
    pub fn parse(url: &str) -> Result<Self> {
        let url = url.trim();
        if url.contains("://") {
            Self::parse_url_style(url)
        } else {
            Self::parse_scp_like(url)
        }
    }

    /// The origin used when building template identifiers.
    pub fn origin(&self) -> Origin {
        Origin::new(&self.host, &self.account, &self.repository)
    }

    /// The normalized tuple `(protocol, host, account, repository)`.
    pub fn into_parts(self) -> (String, String, String, String) {
        (self.protocol, self.host, self.account, self.repository)
    }

    fn parse_scp_like(input: &str) -> Result<Self> {
        let caps = SCP_REGEX.captures(input).ok_or_else(|| malformed(input))?;
        let segments: Vec<&str> = caps["path"]
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        let (account, repository) =
            split_account_repository(&segments).ok_or_else(|| malformed(input))?;

        Ok(Self {
            protocol: GIT_PROTOCOL.to_string(),
            host: caps["host"].to_string(),
            account,
            repository,
        })
    }

    fn parse_url_style(input: &str) -> Result<Self> {
        let parsed = Url::parse(input).map_err(|e| {
            tracing::debug!("Failed to parse repository URL {}: {}", input, e);
            malformed(input)
        })?;

        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(malformed(input));
        }

        // Host and path are sliced from the input; `Url` lowercases special
        // scheme hosts and percent-encodes segments.
        let (_, rest) = input.split_once("://").ok_or_else(|| malformed(input))?;
        let rest = rest.split(['?', '#']).next().unwrap_or(rest);
        let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
        let host = host_as_written(authority)
            .ok_or_else(|| malformed(input))?
            .to_string();

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let (account, repository) =
            split_account_repository(&segments).ok_or_else(|| malformed(input))?;

        let protocol = if parsed.username() == GIT_PROTOCOL {
            GIT_PROTOCOL.to_string()
        } else {
            parsed.scheme().to_string()
        };

        Ok(Self {
            protocol,
            host,
            account,
            repository,
        })
    }
}

impl fmt::Display for RepositoryUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}://{}/{}/{}",
            self.protocol, self.host, self.account, self.repository
        )
    }
}

/// Normalize a repository URL into `(protocol, host, account, repository)`.
///
/// ```
/// use stencil::registry::normalize;
///
/// let (protocol, host, account, repository) =
///     normalize("ssh://git@docs.example.com:10022/Org/repo.git").unwrap();
/// assert_eq!(protocol, "git");
/// assert_eq!(host, "docs.example.com");
/// assert_eq!(account, "Org");
/// assert_eq!(repository, "repo");
/// ```
pub fn normalize(url: &str) -> Result<(String, String, String, String)> {
    RepositoryUrl::parse(url).map(RepositoryUrl::into_parts)
}

fn malformed(url: &str) -> StencilError {
    StencilError::MalformedUrl {
        url: url.to_string(),
    }
}

/// Host part of a raw `userinfo@host:port` authority, without user or port.
fn host_as_written(authority: &str) -> Option<&str> {
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    let host = if host_port.starts_with('[') {
        &host_port[..=host_port.find(']')?]
    } else {
        host_port.split(':').next().unwrap_or(host_port)
    };
    (!host.is_empty()).then_some(host)
}

/// Take the last two path segments as account and repository.
fn split_account_repository(segments: &[&str]) -> Option<(String, String)> {
    let &[.., account, repository] = segments else {
        return None;
    };
    let repository = repository.strip_suffix(".git").unwrap_or(repository);
    if repository.is_empty() {
        return None;
    }
    Some((account.to_string(), repository.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(url: &str) -> (String, String, String, String) {
        normalize(url).unwrap()
    }

    fn tuple(p: &str, h: &str, a: &str, r: &str) -> (String, String, String, String) {
        (p.into(), h.into(), a.into(), r.into())
    }

    #[test]
    fn parses_scp_like() {
        assert_eq!(
            parts("git@hostname:account/repo"),
            tuple("git", "hostname", "account", "repo")
        );
    }

    #[test]
    fn parses_https() {
        assert_eq!(
            parts("https://hostname/account/repo"),
            tuple("https", "hostname", "account", "repo")
        );
    }

    #[test]
    fn ssh_with_git_user_reports_git_protocol() {
        assert_eq!(
            parts("ssh://git@docs.example.com:10022/Org/repo.git"),
            tuple("git", "docs.example.com", "Org", "repo")
        );
    }

    #[test]
    fn ssh_with_other_user_keeps_scheme() {
        assert_eq!(
            parts("ssh://deploy@example.com/acme/templates"),
            tuple("ssh", "example.com", "acme", "templates")
        );
    }

    #[test]
    fn strips_git_suffix_and_trailing_slash() {
        assert_eq!(
            parts("https://github.com/acme/templates.git/"),
            tuple("https", "github.com", "acme", "templates")
        );
        assert_eq!(
            parts("git@github.com:acme/templates.git"),
            tuple("git", "github.com", "acme", "templates")
        );
    }

    #[test]
    fn uses_last_two_path_segments() {
        assert_eq!(
            parts("https://gitlab.com/group/subgroup/project"),
            tuple("https", "gitlab.com", "subgroup", "project")
        );
    }

    #[test]
    fn https_port_is_dropped() {
        let url = RepositoryUrl::parse("https://example.com:8443/acme/templates").unwrap();
        assert_eq!(url.host, "example.com");
    }

    #[test]
    fn rejects_unrecognized_dialects() {
        for input in [
            "/not/existing/path",
            "hostname:account/repo",
            "https://hostname/repo",
            "https://hostname",
            "git@hostname:repo",
            "file:///srv/git/acme/templates",
            "",
        ] {
            assert!(
                matches!(
                    RepositoryUrl::parse(input),
                    Err(StencilError::MalformedUrl { .. })
                ),
                "{} should be rejected",
                input
            );
        }
    }

    #[test]
    fn dialects_agree_on_mixed_case_host() {
        let origins: Vec<Origin> = [
            "https://GitHub.com/Acme/T",
            "ssh://git@GitHub.com/Acme/T",
            "git@GitHub.com:Acme/T",
        ]
        .into_iter()
        .map(|url| RepositoryUrl::parse(url).unwrap().origin())
        .collect();
        assert_eq!(origins[0], Origin::new("GitHub.com", "Acme", "T"));
        assert_eq!(origins[0], origins[1]);
        assert_eq!(origins[1], origins[2]);
    }

    #[test]
    fn non_ascii_path_is_not_percent_encoded() {
        let https = RepositoryUrl::parse("https://host/acme/tëmplates").unwrap();
        let scp = RepositoryUrl::parse("git@host:acme/tëmplates").unwrap();
        assert_eq!(https.repository, "tëmplates");
        assert_eq!(https.origin(), scp.origin());
    }

    #[test]
    fn query_and_fragment_are_ignored() {
        assert_eq!(
            parts("https://example.com/acme/templates.git?ref=main#readme"),
            tuple("https", "example.com", "acme", "templates")
        );
    }

    #[test]
    fn ipv6_host_keeps_brackets() {
        let url = RepositoryUrl::parse("ssh://git@[::1]:2222/acme/templates").unwrap();
        assert_eq!(url.host, "[::1]");
    }

    #[test]
    fn origin_drops_protocol() {
        let url = RepositoryUrl::parse("git@github.com:acme/templates").unwrap();
        assert_eq!(url.origin(), Origin::new("github.com", "acme", "templates"));
    }

    #[test]
    fn display_uses_normalized_parts() {
        let url = RepositoryUrl::parse("ssh://git@example.com:22/acme/templates.git").unwrap();
        assert_eq!(url.to_string(), "git://example.com/acme/templates");
    }
}
