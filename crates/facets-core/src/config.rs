//! Configuration loader and facet document.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `FACETS_*`
//! env vars. The facet document lists facet sources, facets and routes and
//! is validated before use.
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::types::{Facet, FacetSource};

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> { Self::load_from(Path::new(".")) }

    /// Merges `config.toml`, `config.<env>.toml` and `FACETS_*` variables,
    /// with files read from `dir`.
    pub fn load_from(dir: &Path) -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file(dir.join("config.toml")));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file(dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("FACETS_").split("__"));

        Ok(Self { figment })
    }

    pub fn from_toml_str(document: &str) -> Self {
        Self { figment: Figment::new().merge(Toml::string(document)) }
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// The whole facet document, validated.
    pub fn facets(&self) -> anyhow::Result<FacetsConfig> {
        let config: FacetsConfig = self
            .figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to read facet configuration: {}", e))?;
        config.validate()?;
        Ok(config)
    }
}

/// URL processors a facet source can be configured with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlProcessorKind {
    #[default]
    QueryString,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    pub path: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacetsConfig {
    #[serde(default)]
    pub url_processor: UrlProcessorKind,
    #[serde(default)]
    pub facet_sources: Vec<FacetSource>,
    #[serde(default)]
    pub facets: Vec<Facet>,
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

impl FacetsConfig {
    pub fn validate(&self) -> crate::error::Result<()> {
        let invalid = |msg: String| Err(Error::InvalidConfig(msg));

        let mut source_ids = HashSet::new();
        for source in &self.facet_sources {
            if source.id.is_empty() { return invalid("facet source with empty id".into()); }
            if !source_ids.insert(source.id.as_str()) { return invalid(format!("duplicate facet source '{}'", source.id)); }
        }

        let mut ids = HashSet::new();
        let mut aliases = HashSet::new();
        for facet in &self.facets {
            if facet.id.is_empty() { return invalid("facet with empty id".into()); }
            if facet.url_alias.is_empty() { return invalid(format!("facet '{}' has an empty url alias", facet.id)); }
            if facet.filter_key.is_empty() { return invalid(format!("facet '{}' has an empty filter key", facet.id)); }
            if facet.url_alias.contains(facet.separator) {
                return invalid(format!("url alias '{}' of facet '{}' contains its separator '{}'", facet.url_alias, facet.id, facet.separator));
            }
            if !source_ids.contains(facet.facet_source_id.as_str()) {
                return invalid(format!("facet '{}' references unknown facet source '{}'", facet.id, facet.facet_source_id));
            }
            if !ids.insert((facet.facet_source_id.as_str(), facet.id.as_str())) {
                return invalid(format!("duplicate facet '{}' in facet source '{}'", facet.id, facet.facet_source_id));
            }
            if !aliases.insert((facet.facet_source_id.as_str(), facet.url_alias.as_str())) {
                return invalid(format!("url alias '{}' is used twice in facet source '{}'", facet.url_alias, facet.facet_source_id));
            }
        }

        for route in &self.routes {
            if !route.path.starts_with('/') { return invalid(format!("route '{}' path must start with '/': '{}'", route.name, route.path)); }
        }
        Ok(())
    }

    pub fn facet(&self, facet_id: &str) -> Option<&Facet> { self.facets.iter().find(|f| f.id == facet_id) }

    pub fn facet_source(&self, facet_source_id: &str) -> Option<&FacetSource> {
        self.facet_sources.iter().find(|s| s.id == facet_source_id)
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
