//! Named configuration lookup with per-name memoization.

use crate::{Error, ErrorContext, Result};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// A place configuration values can be read from.
pub trait ConfigSource: Send + Sync {
    fn get(&self, name: &str) -> Option<String>;
}

/// Reads from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl EnvSource {
    pub fn new() -> Self {
        Self
    }

    /// Loads a `.env` file into the process environment before reading it.
    ///
    /// A missing `.env` file is not an error; variables already present in
    /// the environment take precedence over the file.
    pub fn with_dotenv() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("failed to load .env file: {}", e),
        }
        Self
    }
}

impl ConfigSource for EnvSource {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// In-memory values, typically read from a flat YAML file.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Parses a flat YAML mapping of scalar values, e.g. `BOOK_API_KEY: abc`.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let raw: HashMap<String, serde_yaml::Value> = serde_yaml::from_str(yaml).map_err(|e| {
            Error::configuration_with_context(
                "invalid YAML configuration",
                ErrorContext::new()
                    .with_details(e.to_string())
                    .with_source("config"),
            )
        })?;

        let mut values = HashMap::with_capacity(raw.len());
        for (name, value) in raw {
            let value = match value {
                serde_yaml::Value::String(s) => s,
                serde_yaml::Value::Number(n) => n.to_string(),
                serde_yaml::Value::Bool(b) => b.to_string(),
                serde_yaml::Value::Null => continue,
                _ => {
                    return Err(Error::configuration_with_context(
                        "configuration values must be scalars",
                        ErrorContext::new().with_field_path(name).with_source("config"),
                    ))
                }
            };
            values.insert(name, value);
        }
        Ok(Self { values })
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }
}

impl ConfigSource for MapSource {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    Url,
    ApiKey,
}

/// A resolved URL or API key.
///
/// Clones share the same allocation as the resolver's cache entry.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    kind: CredentialKind,
    name: String,
    value: Arc<str>,
}

impl Credential {
    pub fn new(kind: CredentialKind, name: impl Into<String>, value: impl Into<Arc<str>>) -> Self {
        Self {
            kind,
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn kind(&self) -> CredentialKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expose(&self) -> &str {
        &self.value
    }

    /// True when both credentials point at the same cached value.
    pub fn shares_value_with(&self, other: &Credential) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value: &str = match self.kind {
            CredentialKind::Url => &self.value,
            CredentialKind::ApiKey => "<redacted>",
        };
        f.debug_struct("Credential")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("value", &value)
            .finish()
    }
}

/// Resolves named values from its sources, reading each name at most once.
///
/// Sources are consulted in the order they were added; the first non-blank
/// value wins. Successful lookups are cached for the resolver's lifetime,
/// failed ones are not.
pub struct ConfigResolver {
    sources: Vec<Box<dyn ConfigSource>>,
    cache: RwLock<HashMap<String, Arc<str>>>,
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Resolver over the process environment, after loading `.env`.
    pub fn from_env() -> Self {
        Self::new().with_source(EnvSource::with_dotenv())
    }

    pub fn with_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn resolve(&self, name: &str, kind: CredentialKind) -> Result<Credential> {
        match self.lookup(name) {
            Some(value) => Ok(Credential {
                kind,
                name: name.to_string(),
                value,
            }),
            None => Err(match kind {
                CredentialKind::Url => Error::MissingUrl {
                    name: name.to_string(),
                },
                CredentialKind::ApiKey => Error::MissingApiKey {
                    name: name.to_string(),
                },
            }),
        }
    }

    pub fn resolve_url(&self, name: &str) -> Result<Credential> {
        self.resolve(name, CredentialKind::Url)
    }

    pub fn resolve_api_key(&self, name: &str) -> Result<Credential> {
        self.resolve(name, CredentialKind::ApiKey)
    }

    /// Same caching as [`resolve`](Self::resolve) for settings that have defaults.
    pub fn resolve_optional(&self, name: &str) -> Option<Arc<str>> {
        self.lookup(name)
    }

    fn lookup(&self, name: &str) -> Option<Arc<str>> {
        if let Some(hit) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return Some(hit.clone());
        }

        // Re-check under the write lock so concurrent misses read the source once.
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(hit) = cache.get(name) {
            return Some(hit.clone());
        }

        let value = self
            .sources
            .iter()
            .find_map(|source| source.get(name).filter(|v| !v.trim().is_empty()))?;
        tracing::debug!(name, "resolved configuration value");
        let value: Arc<str> = Arc::from(value);
        cache.insert(name.to_string(), value.clone());
        Some(value)
    }
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cached = self
            .cache
            .read()
            .map(|c| c.len())
            .unwrap_or_default();
        f.debug_struct("ConfigResolver")
            .field("sources", &self.sources.len())
            .field("cached", &cached)
            .finish()
    }
}
