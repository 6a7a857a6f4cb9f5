//! The template registry and partial-identifier resolution.
//!
//! Lookup order for a query:
//! 1. Exact canonical match (direct map lookup)
//! 2. Scan for entries agreeing with every field the query specifies
//! 3. With several matches and no version in the query, the newest version
//!    of a single family wins; anything else is a conflict

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Result, StencilError};
use crate::registry::identifier::{Origin, TemplateIdentifier, Version};
use crate::registry::local::LocalLoader;
use crate::registry::source::RepositoryUrl;
use crate::registry::template::Template;

type Catalog = BTreeMap<String, Template>;

/// Outcome of resolving a query against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one template matched.
    Found(Template),
    /// Nothing matched.
    NotFound,
    /// The query is ambiguous between these identifiers.
    Conflict(Vec<TemplateIdentifier>),
}

impl Resolution {
    /// Convert into a `Result`, using `query` to describe a miss.
    pub fn into_result(self, query: &TemplateIdentifier) -> Result<Template> {
        match self {
            Self::Found(template) => Ok(template),
            Self::NotFound => Err(StencilError::TemplateNotFound {
                query: query.to_string(),
            }),
            Self::Conflict(identifiers) => Err(StencilError::TemplateConflict { identifiers }),
        }
    }

    /// Whether a template was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Anything that can be turned into a lookup identifier.
pub trait TemplateQuery {
    fn to_identifier(&self) -> Result<Cow<'_, TemplateIdentifier>>;
}

impl TemplateQuery for TemplateIdentifier {
    fn to_identifier(&self) -> Result<Cow<'_, TemplateIdentifier>> {
        Ok(Cow::Borrowed(self))
    }
}

impl TemplateQuery for str {
    fn to_identifier(&self) -> Result<Cow<'_, TemplateIdentifier>> {
        TemplateIdentifier::parse(self).map(Cow::Owned)
    }
}

impl TemplateQuery for String {
    fn to_identifier(&self) -> Result<Cow<'_, TemplateIdentifier>> {
        self.as_str().to_identifier()
    }
}

impl<T: TemplateQuery + ?Sized> TemplateQuery for &T {
    fn to_identifier(&self) -> Result<Cow<'_, TemplateIdentifier>> {
        (**self).to_identifier()
    }
}

/// Filter on individual identifier fields. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateFilter {
    pub host: Option<String>,
    pub account: Option<String>,
    pub repository: Option<String>,
    pub name: Option<String>,
    pub version: Option<Version>,
}

impl TemplateFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    /// Whether `id` satisfies every set field.
    pub fn matches(&self, id: &TemplateIdentifier) -> bool {
        fn field(want: &Option<String>, have: Option<&str>) -> bool {
            want.as_deref().is_none_or(|w| have == Some(w))
        }

        field(&self.host, id.host())
            && field(&self.account, id.account())
            && field(&self.repository, id.repository())
            && field(&self.name, Some(id.name()))
            && self.version.is_none_or(|v| id.version() == Some(v))
    }
}

impl From<&TemplateIdentifier> for TemplateFilter {
    fn from(id: &TemplateIdentifier) -> Self {
        Self {
            host: id.host().map(String::from),
            account: id.account().map(String::from),
            repository: id.repository().map(String::from),
            name: Some(id.name().to_string()),
            version: id.version(),
        }
    }
}

/// Catalog of templates discovered in repository checkouts.
///
/// Keys are canonical identifier strings. The catalog is guarded by a
/// read-write lock, so a registry can be shared across threads behind an
/// `Arc`; `load` holds the write lock for its whole check-and-insert step.
///
/// # Example
///
/// ```
/// use stencil::registry::TemplateRegistry;
/// use std::fs;
/// use tempfile::TempDir;
///
/// let checkout = TempDir::new().unwrap();
/// let node = checkout.path().join("node");
/// fs::create_dir_all(&node).unwrap();
/// fs::write(node.join("template.yml"), "version: 0.0.1").unwrap();
///
/// let registry = TemplateRegistry::new();
/// registry.load("https://github.com/acme/templates", checkout.path()).unwrap();
///
/// let template = registry.get("node").unwrap();
/// assert_eq!(template.identifier.to_string(), "github.com/acme/templates/node/0.0.1");
/// ```
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: RwLock<Catalog>,
}

impl TemplateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every template found in `directory`, a checkout of `repository_url`.
    ///
    /// Nothing is inserted if any discovered identifier is already registered;
    /// the error then lists every colliding identifier.
    pub fn load(
        &self,
        repository_url: &str,
        directory: impl AsRef<Path>,
    ) -> Result<Vec<TemplateIdentifier>> {
        let templates = Self::discover(repository_url, directory.as_ref())?;

        let mut catalog = self.write();
        Self::insert_all(&mut catalog, templates)
    }

    /// Replace every template from `repository_url` with a fresh scan of `directory`.
    pub fn refresh(
        &self,
        repository_url: &str,
        directory: impl AsRef<Path>,
    ) -> Result<Vec<TemplateIdentifier>> {
        let origin = RepositoryUrl::parse(repository_url)?.origin();
        let templates = Self::discover(repository_url, directory.as_ref())?;

        let mut catalog = self.write();
        let mut updated = catalog.clone();
        let removed = Self::remove_origin(&mut updated, &origin);
        let loaded = Self::insert_all(&mut updated, templates)?;
        *catalog = updated;

        tracing::debug!(
            "Refreshed {}: {} removed, {} loaded",
            origin,
            removed,
            loaded.len()
        );
        Ok(loaded)
    }

    /// Remove every template from `repository_url`. Returns how many were removed.
    pub fn unload(&self, repository_url: &str) -> Result<usize> {
        let origin = RepositoryUrl::parse(repository_url)?.origin();
        let removed = Self::remove_origin(&mut self.write(), &origin);
        tracing::info!("Unloaded {} template(s) from {}", removed, origin);
        Ok(removed)
    }

    /// Resolve a query to exactly one template.
    ///
    /// Fails with [`StencilError::TemplateNotFound`] when nothing matches and
    /// [`StencilError::TemplateConflict`] when the query is ambiguous.
    pub fn get<Q: TemplateQuery>(&self, query: Q) -> Result<Template> {
        let query = query.to_identifier()?;
        self.resolve(&query).into_result(&query)
    }

    /// Resolve a query without raising.
    pub fn resolve(&self, query: &TemplateIdentifier) -> Resolution {
        let catalog = self.read();

        if let Some(template) = catalog.get(&query.to_string()) {
            return Resolution::Found(template.clone());
        }

        let candidates: Vec<&Template> = catalog
            .values()
            .filter(|t| query.matches(&t.identifier))
            .collect();

        match candidates.as_slice() {
            [] => Resolution::NotFound,
            [only] => Resolution::Found((*only).clone()),
            _ => {
                let newest = if query.version().is_none() {
                    newest_in_single_family(&candidates)
                } else {
                    None
                };
                match newest {
                    Some(template) => Resolution::Found(template.clone()),
                    None => Resolution::Conflict(
                        candidates.iter().map(|t| t.identifier.clone()).collect(),
                    ),
                }
            }
        }
    }

    /// All templates, ordered by canonical identifier.
    pub fn list(&self) -> Vec<Template> {
        self.read().values().cloned().collect()
    }

    /// All registered identifiers, ordered.
    pub fn identifiers(&self) -> Vec<TemplateIdentifier> {
        self.read().values().map(|t| t.identifier.clone()).collect()
    }

    /// Templates matching a field filter.
    pub fn find(&self, filter: &TemplateFilter) -> Vec<Template> {
        self.read()
            .values()
            .filter(|t| filter.matches(&t.identifier))
            .cloned()
            .collect()
    }

    /// Whether any template matches a field filter.
    pub fn exists(&self, filter: &TemplateFilter) -> bool {
        self.read().values().any(|t| filter.matches(&t.identifier))
    }

    /// Whether an exact identifier is registered.
    pub fn contains(&self, identifier: &TemplateIdentifier) -> bool {
        self.read().contains_key(&identifier.to_string())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn discover(repository_url: &str, directory: &Path) -> Result<Vec<Template>> {
        if !directory.is_dir() {
            return Err(StencilError::DirectoryNotFound {
                path: directory.to_path_buf(),
            });
        }

        let url = RepositoryUrl::parse(repository_url)?;
        tracing::debug!(
            "Scanning {} for templates from {} (protocol {})",
            directory.display(),
            url.origin(),
            url.protocol
        );

        LocalLoader::new(url.origin(), directory).discover()
    }

    fn insert_all(
        catalog: &mut Catalog,
        templates: Vec<Template>,
    ) -> Result<Vec<TemplateIdentifier>> {
        let conflicts: Vec<TemplateIdentifier> = templates
            .iter()
            .filter(|t| catalog.contains_key(&t.identifier.to_string()))
            .map(|t| t.identifier.clone())
            .collect();

        if !conflicts.is_empty() {
            return Err(StencilError::TemplateConflict {
                identifiers: conflicts,
            });
        }

        let mut loaded = Vec::with_capacity(templates.len());
        for template in templates {
            loaded.push(template.identifier.clone());
            catalog.insert(template.identifier.to_string(), template);
        }

        tracing::info!("Loaded {} template(s)", loaded.len());
        Ok(loaded)
    }

    fn remove_origin(catalog: &mut Catalog, origin: &Origin) -> usize {
        let before = catalog.len();
        catalog.retain(|_, t| t.identifier.origin() != Some(origin));
        before - catalog.len()
    }

    fn read(&self) -> RwLockReadGuard<'_, Catalog> {
        self.templates.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Catalog> {
        self.templates.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// The newest candidate, if all candidates belong to one family.
///
/// An unversioned entry ranks below every versioned entry of its family.
fn newest_in_single_family<'a>(candidates: &[&'a Template]) -> Option<&'a Template> {
    let family = candidates.first()?.identifier.family();
    if candidates.iter().any(|t| t.identifier.family() != family) {
        return None;
    }
    candidates
        .iter()
        .copied()
        .max_by_key(|t| t.identifier.version())
}
