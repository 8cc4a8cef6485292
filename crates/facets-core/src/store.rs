use std::collections::HashMap;

use crate::config::FacetsConfig;
use crate::traits::FacetStore;
use crate::types::{Facet, FacetSource};

/// Facet configuration held in memory, indexed per facet source.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFacetStore {
    sources: HashMap<String, FacetSource>,
    facets: Vec<Facet>,
}

impl InMemoryFacetStore {
    pub fn new(sources: Vec<FacetSource>, facets: Vec<Facet>) -> Self {
        let sources = sources.into_iter().map(|s| (s.id.clone(), s)).collect();
        Self { sources, facets }
    }

    /// Expects a validated document.
    pub fn from_config(config: &FacetsConfig) -> Self {
        Self::new(config.facet_sources.clone(), config.facets.clone())
    }
}

impl FacetStore for InMemoryFacetStore {
    fn find_by_alias(&self, facet_source_id: &str, url_alias: &str) -> anyhow::Result<Option<Facet>> {
        Ok(self.facets.iter().find(|f| f.facet_source_id == facet_source_id && f.url_alias == url_alias).cloned())
    }

    fn find_by_id(&self, facet_source_id: &str, facet_id: &str) -> anyhow::Result<Option<Facet>> {
        Ok(self.facets.iter().find(|f| f.facet_source_id == facet_source_id && f.id == facet_id).cloned())
    }

    fn facet_source(&self, facet_source_id: &str) -> anyhow::Result<Option<FacetSource>> {
        Ok(self.sources.get(facet_source_id).cloned())
    }

    fn facets_for_source(&self, facet_source_id: &str) -> anyhow::Result<Vec<Facet>> {
        Ok(self.facets.iter().filter(|f| f.facet_source_id == facet_source_id).cloned().collect())
    }
}
