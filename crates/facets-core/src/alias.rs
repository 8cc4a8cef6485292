//! Memoized alias ↔ facet id lookups, scoped per facet source.
//!
//! Only successful lookups are cached. Entries are never invalidated; a
//! registry lives as long as the facet configuration it fronts.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

use crate::error::{Error, Result};
use crate::traits::FacetStore;
use crate::types::FacetId;

type ScopedKey = (String, String);

pub struct UrlAliasRegistry {
    store: Arc<dyn FacetStore>,
    ids_by_alias: RwLock<HashMap<ScopedKey, FacetId>>,
    aliases_by_id: RwLock<HashMap<ScopedKey, String>>,
}

impl UrlAliasRegistry {
    pub fn new(store: Arc<dyn FacetStore>) -> Self {
        Self { store, ids_by_alias: RwLock::new(HashMap::new()), aliases_by_id: RwLock::new(HashMap::new()) }
    }

    pub fn store(&self) -> &Arc<dyn FacetStore> { &self.store }

    /// Facet id for `url_alias` within `facet_source_id`.
    ///
    /// Fails with [`Error::UnknownAlias`] when no facet of that source uses
    /// the alias, and with [`Error::Backend`] when the store itself fails.
    pub fn facet_id(&self, url_alias: &str, facet_source_id: &str) -> Result<FacetId> {
        let key = (facet_source_id.to_string(), url_alias.to_string());
        if let Some(id) = self.ids_by_alias.read().get(&key) {
            trace!(alias = url_alias, source = facet_source_id, "alias cache hit");
            return Ok(id.clone());
        }
        let facet = self.store.find_by_alias(facet_source_id, url_alias)?.ok_or_else(|| Error::UnknownAlias {
            alias: url_alias.to_string(),
            facet_source_id: facet_source_id.to_string(),
        })?;
        self.ids_by_alias.write().insert(key, facet.id.clone());
        Ok(facet.id)
    }

    /// Url alias of `facet_id` within `facet_source_id`.
    pub fn url_alias(&self, facet_id: &str, facet_source_id: &str) -> Result<String> {
        let key = (facet_source_id.to_string(), facet_id.to_string());
        if let Some(alias) = self.aliases_by_id.read().get(&key) {
            trace!(facet = facet_id, source = facet_source_id, "facet id cache hit");
            return Ok(alias.clone());
        }
        let facet = self
            .store
            .find_by_id(facet_source_id, facet_id)?
            .ok_or_else(|| Error::NotFound(format!("facet '{}' in facet source '{}'", facet_id, facet_source_id)))?;
        self.aliases_by_id.write().insert(key, facet.url_alias.clone());
        Ok(facet.url_alias)
    }
}

impl std::fmt::Debug for UrlAliasRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlAliasRegistry")
            .field("ids_by_alias", &self.ids_by_alias.read().len())
            .field("aliases_by_id", &self.aliases_by_id.read().len())
            .finish()
    }
}
