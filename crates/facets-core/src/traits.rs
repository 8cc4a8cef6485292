use std::collections::BTreeMap;

use crate::types::{Facet, FacetSource};

/// Facet configuration storage.
///
/// `Ok(None)` means the combination does not exist; `Err` is reserved for
/// storage faults.
pub trait FacetStore: Send + Sync {
    fn find_by_alias(&self, facet_source_id: &str, url_alias: &str) -> anyhow::Result<Option<Facet>>;
    fn find_by_id(&self, facet_source_id: &str, facet_id: &str) -> anyhow::Result<Option<Facet>>;
    fn facet_source(&self, facet_source_id: &str) -> anyhow::Result<Option<FacetSource>>;
    fn facets_for_source(&self, facet_source_id: &str) -> anyhow::Result<Vec<Facet>>;
}

/// Tree relationships between the values of one facet.
///
/// Values the policy knows nothing about have no ancestors and no
/// descendants.
pub trait HierarchyPolicy {
    /// Ancestors ordered from the nearest parent up to the root.
    fn ancestors_of(&self, value: &str) -> Vec<String>;
    /// All transitive children, in no particular order.
    fn descendants_of(&self, value: &str) -> Vec<String>;
}

/// A path that matched a route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMatch {
    pub route_name: String,
    pub parameters: BTreeMap<String, String>,
}

/// Maps a request path to a route.
///
/// `Ok(None)` means no route matches; `Err` is reserved for faults of the
/// routing backend itself.
pub trait Router: Send + Sync {
    fn match_path(&self, path: &str) -> anyhow::Result<Option<RouteMatch>>;
}
