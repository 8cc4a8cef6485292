//! Domain types shared by the codec, the link builder and the collaborators.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::query::QueryParams;

pub type FacetId = String;
pub type FacetSourceId = String;

fn default_separator() -> char { ':' }
fn default_filter_key() -> String { "f".to_string() }

/// A filterable dimension, as stored by the facet configuration.
///
/// - `url_alias`: short token used in the query string, unique per source
/// - `separator`: joins alias and raw value in a filter token
/// - `filter_key`: name of the query parameter list carrying the tokens
/// - `use_hierarchy`: values form a tree; enabling one value clears its
///   ancestors and descendants from the link
/// - `enable_parent_when_child_gets_disabled`: disabling the last active
///   child re-enables its parent
/// - `show_only_one_result`: single-select facet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    pub id: FacetId,
    #[serde(default)]
    pub name: String,
    pub url_alias: String,
    #[serde(default = "default_separator")]
    pub separator: char,
    #[serde(default = "default_filter_key")]
    pub filter_key: String,
    #[serde(default)]
    pub use_hierarchy: bool,
    #[serde(default)]
    pub enable_parent_when_child_gets_disabled: bool,
    #[serde(default)]
    pub show_only_one_result: bool,
    pub facet_source_id: FacetSourceId,
}

impl Facet {
    pub fn new(id: impl Into<String>, url_alias: impl Into<String>, facet_source_id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            url_alias: url_alias.into(),
            separator: default_separator(),
            filter_key: default_filter_key(),
            use_hierarchy: false,
            enable_parent_when_child_gets_disabled: false,
            show_only_one_result: false,
            facet_source_id: facet_source_id.into(),
        }
    }
}

/// The search context a facet is attached to. An empty `path` means the
/// facet filters the page currently being viewed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSource {
    pub id: FacetSourceId,
    #[serde(default)]
    pub path: String,
}

impl FacetSource {
    pub fn new(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self { id: id.into(), path: path.into() }
    }
}

/// A single facet value as returned by the search backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetResult {
    /// `None` for informational rows that carry no filter.
    pub raw_value: Option<String>,
    #[serde(default)]
    pub display_value: String,
    pub count: Option<u64>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub children: Vec<FacetResult>,
    /// Assigned by the link builder.
    #[serde(default, skip_deserializing)]
    pub url: Option<Url>,
}

impl FacetResult {
    pub fn new(raw_value: impl Into<String>, display_value: impl Into<String>, count: u64) -> Self {
        Self { raw_value: Some(raw_value.into()), display_value: display_value.into(), count: Some(count), ..Self::default() }
    }

    pub fn informational(display_value: impl Into<String>) -> Self {
        Self { display_value: display_value.into(), ..Self::default() }
    }

    pub fn with_active(mut self, active: bool) -> Self { self.active = active; self }

    pub fn with_children(mut self, children: Vec<FacetResult>) -> Self { self.children = children; self }

    pub fn raw_value(&self) -> Option<&str> { self.raw_value.as_deref() }

    /// Rendered URL, if one was assigned.
    pub fn href(&self) -> Option<String> { self.url.as_ref().map(Url::to_string) }
}

/// A destination produced by routing: a path plus the query it is rendered
/// with and the link attributes attached to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Url {
    pub path: String,
    /// Name of the route that matched `path`; `None` for literal paths.
    pub route_name: Option<String>,
    pub route_parameters: BTreeMap<String, String>,
    pub query: QueryParams,
    pub attributes: BTreeMap<String, String>,
}

impl Url {
    pub fn routed(path: impl Into<String>, route_name: impl Into<String>, route_parameters: BTreeMap<String, String>) -> Self {
        Self { path: path.into(), route_name: Some(route_name.into()), route_parameters, ..Self::default() }
    }

    pub fn literal(path: impl Into<String>) -> Self {
        Self { path: path.into(), ..Self::default() }
    }

    pub fn with_query(mut self, query: QueryParams) -> Self { self.query = query; self }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

impl std::fmt::Display for Url {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        Ok(())
    }
}

/// The request a link set is built for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub path: String,
    pub query: QueryParams,
    /// Request format attribute (`_format`), e.g. `json`.
    pub format: Option<String>,
}

impl RequestContext {
    pub fn new(path: impl Into<String>, query: QueryParams) -> Self {
        Self { path: path.into(), query, format: None }
    }

    /// Splits `/path?query` into a request.
    pub fn from_uri(uri: &str) -> Self {
        let (path, query) = uri.split_once('?').unwrap_or((uri, ""));
        let query = QueryParams::parse(query);
        let format = query.get(crate::query::FORMAT_PARAM).and_then(|v| v.as_scalar()).map(str::to_string);
        Self { path: path.to_string(), query, format }
    }
}
