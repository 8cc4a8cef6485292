//! Request-scoped entry points.
//!
//! A processor is created once per facet and request: it decodes the active
//! filters from the request at construction and then builds links for the
//! facet's results against them.

use std::sync::Arc;
use tracing::debug;

use facets_core::config::{FacetsConfig, UrlProcessorKind};
use facets_core::error::Result;
use facets_core::store::InMemoryFacetStore;
use facets_core::traits::{FacetStore, HierarchyPolicy, Router};
use facets_core::{ActiveFilterSet, Facet, FacetResult, FacetSource, RequestContext, UrlAliasRegistry};

use crate::builder::{LinkContext, ResultLinkBuilder};
use crate::hooks::HookChain;
use crate::path_cache::RequestPathCache;
use crate::routing::StaticRouter;

/// Long-lived collaborators and caches shared by all requests.
#[derive(Debug)]
pub struct FacetServices {
    pub registry: UrlAliasRegistry,
    pub paths: RequestPathCache,
    pub hooks: HookChain,
}

impl FacetServices {
    pub fn new(store: Arc<dyn FacetStore>, router: Arc<dyn Router>) -> Self {
        Self { registry: UrlAliasRegistry::new(store), paths: RequestPathCache::new(router), hooks: HookChain::new() }
    }

    /// In-memory store and static router from a validated document.
    pub fn from_config(config: &FacetsConfig) -> Self {
        Self::new(Arc::new(InMemoryFacetStore::from_config(config)), Arc::new(StaticRouter::from_config(&config.routes)))
    }

    pub fn with_hooks(mut self, hooks: HookChain) -> Self { self.hooks = hooks; self }

    pub fn store(&self) -> &Arc<dyn FacetStore> { self.registry.store() }

    /// An unknown facet source filters the current page.
    pub fn facet_source(&self, facet_source_id: &str) -> Result<FacetSource> {
        match self.store().facet_source(facet_source_id)? {
            Some(source) => Ok(source),
            None => {
                debug!(source = facet_source_id, "facet source not configured, linking to the current page");
                Ok(FacetSource::new(facet_source_id, ""))
            }
        }
    }

    pub fn link_builder(&self) -> ResultLinkBuilder<'_> { ResultLinkBuilder::new(&self.registry, &self.paths, &self.hooks) }
}

#[derive(Debug)]
pub struct QueryStringProcessor<'a> {
    services: &'a FacetServices,
    facet: Facet,
    request: RequestContext,
    active: ActiveFilterSet,
}

impl<'a> QueryStringProcessor<'a> {
    pub fn new(services: &'a FacetServices, facet: &Facet, request: RequestContext) -> Result<Self> {
        let active = ActiveFilterSet::from_query(&request.query, facet, &services.registry)?;
        Ok(Self { services, facet: facet.clone(), request, active })
    }

    pub fn active_filters(&self) -> &ActiveFilterSet { &self.active }

    pub fn request(&self) -> &RequestContext { &self.request }

    pub fn mark_active(&self, results: &mut [FacetResult]) { self.active.mark_active(&self.facet, results); }

    pub fn build_urls(&mut self, hierarchy: &dyn HierarchyPolicy, results: Vec<FacetResult>) -> Result<Vec<FacetResult>> {
        let source = self.services.facet_source(&self.facet.facet_source_id)?;
        let ctx = LinkContext { facet: &self.facet, facet_source: &source, hierarchy, active: &self.active };
        self.services.link_builder().build_urls(&ctx, &mut self.request, results)
    }
}

/// The configured URL processor for a facet.
#[derive(Debug)]
pub enum UrlProcessor<'a> {
    QueryString(QueryStringProcessor<'a>),
}

impl<'a> UrlProcessor<'a> {
    pub fn new(kind: UrlProcessorKind, services: &'a FacetServices, facet: &Facet, request: RequestContext) -> Result<Self> {
        match kind {
            UrlProcessorKind::QueryString => Ok(Self::QueryString(QueryStringProcessor::new(services, facet, request)?)),
        }
    }

    pub fn active_filters(&self) -> &ActiveFilterSet {
        match self {
            Self::QueryString(p) => p.active_filters(),
        }
    }

    pub fn request(&self) -> &RequestContext {
        match self {
            Self::QueryString(p) => p.request(),
        }
    }

    pub fn mark_active(&self, results: &mut [FacetResult]) {
        match self {
            Self::QueryString(p) => p.mark_active(results),
        }
    }

    pub fn build_urls(&mut self, hierarchy: &dyn HierarchyPolicy, results: Vec<FacetResult>) -> Result<Vec<FacetResult>> {
        match self {
            Self::QueryString(p) => p.build_urls(hierarchy, results),
        }
    }
}
