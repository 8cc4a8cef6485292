#![allow(dead_code)]

use std::sync::Arc;

use facets_core::store::InMemoryFacetStore;
use facets_core::traits::HierarchyPolicy;
use facets_core::{ActiveFilterSet, Facet, FacetResult, FacetSource, RequestContext};
use facets_url::{FacetServices, LinkContext, StaticRouter};

pub fn search_source() -> FacetSource { FacetSource::new("page", "/search") }

pub fn color() -> Facet { Facet::new("color", "c", "page") }

pub fn size() -> Facet {
    let mut facet = Facet::new("size", "s", "page");
    facet.show_only_one_result = true;
    facet
}

pub fn category() -> Facet {
    let mut facet = Facet::new("category", "cat", "page");
    facet.use_hierarchy = true;
    facet
}

pub fn router() -> StaticRouter {
    let mut router = StaticRouter::new();
    router.add("/search", "search.page");
    router
}

pub fn services() -> FacetServices {
    let store = InMemoryFacetStore::new(vec![search_source()], vec![color(), size(), category()]);
    FacetServices::new(Arc::new(store), Arc::new(router()))
}

/// Decodes the request, flags active results and builds their links.
pub fn build(
    services: &FacetServices,
    facet: &Facet,
    hierarchy: &dyn HierarchyPolicy,
    request: &mut RequestContext,
    mut results: Vec<FacetResult>,
) -> Vec<FacetResult> {
    let active = ActiveFilterSet::from_query(&request.query, facet, &services.registry).expect("decode");
    active.mark_active(facet, &mut results);
    let source = search_source();
    let ctx = LinkContext { facet, facet_source: &source, hierarchy, active: &active };
    services.link_builder().build_urls(&ctx, request, results).expect("build urls")
}

pub fn href(result: &FacetResult) -> String { result.href().expect("url assigned") }

pub fn find<'a>(results: &'a [FacetResult], raw: &str) -> &'a FacetResult {
    results.iter().find(|r| r.raw_value() == Some(raw)).expect("result present")
}
