//! Active filters decoded from an incoming query string.
//!
//! Tokens that cannot be decoded or whose alias is unknown in the facet
//! source are dropped one by one; the remaining tokens still apply.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::alias::UrlAliasRegistry;
use crate::codec;
use crate::error::{Error, Result};
use crate::query::QueryParams;
use crate::types::{Facet, FacetId, FacetResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActiveFilterSet {
    filters: BTreeMap<FacetId, Vec<String>>,
}

impl ActiveFilterSet {
    pub fn new() -> Self { Self::default() }

    /// Decodes `query[facet.filter_key]` using the facet's separator,
    /// resolving aliases within the facet's source.
    ///
    /// Only a storage fault behind the registry is returned as an error.
    pub fn from_query(query: &QueryParams, facet: &Facet, registry: &UrlAliasRegistry) -> Result<Self> {
        let mut active = Self::new();
        // A scalar where a list belongs means a hand-edited URL.
        let Some(tokens) = query.get(&facet.filter_key).and_then(|v| v.as_list()) else {
            return Ok(active);
        };
        for token in tokens {
            let decoded = match codec::decode(token, facet.separator) {
                Ok(decoded) => decoded,
                Err(err) => {
                    debug!(%err, "dropping filter token");
                    continue;
                }
            };
            match registry.facet_id(&decoded.alias, &facet.facet_source_id) {
                Ok(facet_id) => active.push(facet_id, decoded.value),
                Err(err @ Error::UnknownAlias { .. }) => debug!(%err, "dropping filter token"),
                Err(err) => return Err(err),
            }
        }
        Ok(active)
    }

    pub fn push(&mut self, facet_id: impl Into<FacetId>, value: impl Into<String>) {
        self.filters.entry(facet_id.into()).or_default().push(value.into());
    }

    pub fn values(&self, facet_id: &str) -> &[String] {
        self.filters.get(facet_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_active(&self, facet_id: &str, value: &str) -> bool { self.values(facet_id).iter().any(|v| v == value) }

    pub fn iter(&self) -> impl Iterator<Item = (&FacetId, &Vec<String>)> { self.filters.iter() }

    pub fn is_empty(&self) -> bool { self.filters.values().all(Vec::is_empty) }

    /// Flags every result of `facet` whose raw value is active, at any depth.
    pub fn mark_active(&self, facet: &Facet, results: &mut [FacetResult]) {
        for result in results {
            if result.raw_value().is_some_and(|raw| self.is_active(&facet.id, raw)) { result.active = true; }
            self.mark_active(facet, &mut result.children);
        }
    }
}
