//! Template identifiers.
//!
//! A template is addressed by up to five `/`-separated fields:
//!
//! ```text
//! [host/account/repository/]name[/major.minor.patch]
//! ```
//!
//! Exactly four shapes are valid: `name`, `name/version`,
//! `host/account/repository/name` and the fully qualified
//! `host/account/repository/name/version`. [`TemplateIdentifier`] is a sum
//! type over those shapes, so an identifier with a host but no repository
//! cannot be constructed.
//!
//! # Example
//!
//! ```
//! use stencil::registry::TemplateIdentifier;
//!
//! let older: TemplateIdentifier = "github.com/acme/templates/node/1.0.0".parse().unwrap();
//! let newer: TemplateIdentifier = "github.com/acme/templates/node/1.0.1".parse().unwrap();
//!
//! assert!(older.try_lt(&newer).unwrap());
//! assert_eq!(older.to_string(), "github.com/acme/templates/node/1.0.0");
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, StencilError};

/// A `major.minor.patch` template version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a new version.
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    fn parse_component(part: &str) -> Option<u64> {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        part.parse().ok()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = StencilError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || StencilError::InvalidIdentifier {
            input: s.to_string(),
            reason: "version must be three dot-separated integers (major.minor.patch)".into(),
        };

        let mut parts = s.split('.');
        let major = parts.next().and_then(Self::parse_component);
        let minor = parts.next().and_then(Self::parse_component);
        let patch = parts.next().and_then(Self::parse_component);

        match (major, minor, patch, parts.next()) {
            (Some(major), Some(minor), Some(patch), None) => Ok(Self::new(major, minor, patch)),
            _ => Err(invalid()),
        }
    }
}

/// The repository a fully qualified template comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Origin {
    pub host: String,
    pub account: String,
    pub repository: String,
}

impl Origin {
    /// Create a new origin.
    pub fn new(
        host: impl Into<String>,
        account: impl Into<String>,
        repository: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            account: account.into(),
            repository: repository.into(),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.host, self.account, self.repository)
    }
}

/// Address of a template, with one of four levels of specificity.
///
/// Equality is structural: two identifiers are equal only if they have the
/// same shape and the same field values. There is no `PartialOrd`; use
/// [`compare`](Self::compare) or the `try_*` helpers, which fail with
/// [`StencilError::Incomparable`] across families.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TemplateIdentifier {
    /// `name`
    Name { name: String },
    /// `name/version`
    Versioned { name: String, version: Version },
    /// `host/account/repository/name`
    Qualified { origin: Origin, name: String },
    /// `host/account/repository/name/version`
    QualifiedVersioned {
        origin: Origin,
        name: String,
        version: Version,
    },
}

impl TemplateIdentifier {
    /// Build an identifier from its optional parts.
    pub fn from_parts(
        origin: Option<Origin>,
        name: impl Into<String>,
        version: Option<Version>,
    ) -> Self {
        let name = name.into();
        match (origin, version) {
            (None, None) => Self::Name { name },
            (None, Some(version)) => Self::Versioned { name, version },
            (Some(origin), None) => Self::Qualified { origin, name },
            (Some(origin), Some(version)) => Self::QualifiedVersioned {
                origin,
                name,
                version,
            },
        }
    }

    /// Parse an identifier string.
    ///
    /// A leading `scheme://` is ignored. The remaining text must have 1, 2, 4
    /// or 5 segments; in the 2 and 5 segment forms the last segment is the
    /// version.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: String| StencilError::InvalidIdentifier {
            input: input.to_string(),
            reason,
        };

        let body = match input.split_once("://") {
            Some((scheme, rest)) if !scheme.contains('/') => rest,
            _ => input,
        };

        let segments: Vec<&str> = if body.is_empty() {
            Vec::new()
        } else {
            body.split('/').collect()
        };

        if segments.iter().any(|s| s.is_empty()) {
            return Err(invalid("identifier contains an empty segment".into()));
        }

        let parse_version = |s: &str| {
            s.parse::<Version>().map_err(|_| {
                invalid(format!(
                    "'{}' is not a valid version (expected major.minor.patch)",
                    s
                ))
            })
        };

        let (origin, name, version) = match segments.as_slice() {
            [name] => (None, *name, None),
            [name, version] => (None, *name, Some(parse_version(version)?)),
            [host, account, repository, name] => {
                (Some(Origin::new(*host, *account, *repository)), *name, None)
            }
            [host, account, repository, name, version] => (
                Some(Origin::new(*host, *account, *repository)),
                *name,
                Some(parse_version(version)?),
            ),
            other => {
                return Err(invalid(format!(
                    "expected 1, 2, 4 or 5 segments, found {}",
                    other.len()
                )))
            }
        };

        // A version in the name slot means a field was left out upstream of it.
        if name.parse::<Version>().is_ok() {
            return Err(invalid(format!(
                "'{}' is a version, not a template name",
                name
            )));
        }

        Ok(Self::from_parts(origin, name, version))
    }

    /// Template name.
    pub fn name(&self) -> &str {
        match self {
            Self::Name { name }
            | Self::Versioned { name, .. }
            | Self::Qualified { name, .. }
            | Self::QualifiedVersioned { name, .. } => name,
        }
    }

    /// Template version, if present.
    pub fn version(&self) -> Option<Version> {
        match self {
            Self::Versioned { version, .. } | Self::QualifiedVersioned { version, .. } => {
                Some(*version)
            }
            Self::Name { .. } | Self::Qualified { .. } => None,
        }
    }

    /// Source repository, if present.
    pub fn origin(&self) -> Option<&Origin> {
        match self {
            Self::Qualified { origin, .. } | Self::QualifiedVersioned { origin, .. } => {
                Some(origin)
            }
            Self::Name { .. } | Self::Versioned { .. } => None,
        }
    }

    pub fn host(&self) -> Option<&str> {
        self.origin().map(|o| o.host.as_str())
    }

    pub fn account(&self) -> Option<&str> {
        self.origin().map(|o| o.account.as_str())
    }

    pub fn repository(&self) -> Option<&str> {
        self.origin().map(|o| o.repository.as_str())
    }

    /// Whether host, account and repository are all present.
    pub fn is_qualified(&self) -> bool {
        self.origin().is_some()
    }

    /// Present fields in declaration order, version rendered as a string.
    pub fn tuple(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(5);
        if let Some(origin) = self.origin() {
            fields.push(origin.host.clone());
            fields.push(origin.account.clone());
            fields.push(origin.repository.clone());
        }
        fields.push(self.name().to_string());
        if let Some(version) = self.version() {
            fields.push(version.to_string());
        }
        fields
    }

    /// This identifier with its version dropped.
    pub fn family(&self) -> TemplateIdentifier {
        Self::from_parts(self.origin().cloned(), self.name(), None)
    }

    /// Whether both identifiers address the same template, ignoring version.
    ///
    /// Origins are only compared when both sides carry one.
    pub fn same_family(&self, other: &TemplateIdentifier) -> bool {
        if self.name() != other.name() {
            return false;
        }
        match (self.origin(), other.origin()) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        }
    }

    /// Whether `candidate` agrees with every field present in `self`.
    ///
    /// Fields absent from `self` are unconstrained.
    pub fn matches(&self, candidate: &TemplateIdentifier) -> bool {
        if self.name() != candidate.name() {
            return false;
        }
        if let Some(origin) = self.origin() {
            if candidate.origin() != Some(origin) {
                return false;
            }
        }
        if let Some(version) = self.version() {
            if candidate.version() != Some(version) {
                return false;
            }
        }
        true
    }

    /// Compare two identifiers of the same family by version.
    ///
    /// Fails with [`StencilError::Incomparable`] when the families differ or
    /// when only one side has a version. Two unversioned identifiers of the
    /// same family compare equal.
    pub fn compare(&self, other: &TemplateIdentifier) -> Result<Ordering> {
        let incomparable = || StencilError::Incomparable {
            left: self.clone(),
            right: other.clone(),
        };

        if !self.same_family(other) {
            return Err(incomparable());
        }

        match (self.version(), other.version()) {
            (Some(a), Some(b)) => Ok(a.cmp(&b)),
            (None, None) => Ok(Ordering::Equal),
            _ => Err(incomparable()),
        }
    }

    pub fn try_lt(&self, other: &TemplateIdentifier) -> Result<bool> {
        Ok(self.compare(other)? == Ordering::Less)
    }

    pub fn try_le(&self, other: &TemplateIdentifier) -> Result<bool> {
        Ok(self.compare(other)? != Ordering::Greater)
    }

    pub fn try_gt(&self, other: &TemplateIdentifier) -> Result<bool> {
        Ok(self.compare(other)? == Ordering::Greater)
    }

    pub fn try_ge(&self, other: &TemplateIdentifier) -> Result<bool> {
        Ok(self.compare(other)? != Ordering::Less)
    }
}

impl fmt::Display for TemplateIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(origin) = self.origin() {
            write!(f, "{}/", origin)?;
        }
        f.write_str(self.name())?;
        if let Some(version) = self.version() {
            write!(f, "/{}", version)?;
        }
        Ok(())
    }
}

impl FromStr for TemplateIdentifier {
    type Err = StencilError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TemplateIdentifier {
    type Error = StencilError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for TemplateIdentifier {
    type Error = StencilError;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<TemplateIdentifier> for String {
    fn from(id: TemplateIdentifier) -> Self {
        id.to_string()
    }
}
