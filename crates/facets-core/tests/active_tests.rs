use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use facets_core::query::QueryParams;
use facets_core::store::InMemoryFacetStore;
use facets_core::traits::FacetStore;
use facets_core::{ActiveFilterSet, Error, Facet, FacetResult, FacetSource, UrlAliasRegistry};

fn store() -> InMemoryFacetStore {
    InMemoryFacetStore::new(
        vec![FacetSource::new("page", "/search"), FacetSource::new("other", "/other")],
        vec![Facet::new("color", "c", "page"), Facet::new("size", "s", "page"), Facet::new("brand", "c", "other")],
    )
}

fn registry() -> UrlAliasRegistry { UrlAliasRegistry::new(Arc::new(store())) }

/// Counts store lookups and can fail on demand.
struct CountingStore {
    inner: InMemoryFacetStore,
    calls: AtomicUsize,
    fail: bool,
}

impl FacetStore for CountingStore {
    fn find_by_alias(&self, facet_source_id: &str, url_alias: &str) -> anyhow::Result<Option<Facet>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail { anyhow::bail!("storage offline"); }
        self.inner.find_by_alias(facet_source_id, url_alias)
    }
    fn find_by_id(&self, facet_source_id: &str, facet_id: &str) -> anyhow::Result<Option<Facet>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(facet_source_id, facet_id)
    }
    fn facet_source(&self, facet_source_id: &str) -> anyhow::Result<Option<FacetSource>> { self.inner.facet_source(facet_source_id) }
    fn facets_for_source(&self, facet_source_id: &str) -> anyhow::Result<Vec<Facet>> { self.inner.facets_for_source(facet_source_id) }
}

#[test]
fn decodes_tokens_per_facet_in_url_order() {
    let facet = Facet::new("color", "c", "page");
    let query = QueryParams::parse("f[]=c:red&f[]=s:xl&f[]=c:blue");
    let active = ActiveFilterSet::from_query(&query, &facet, &registry()).expect("decode");
    assert_eq!(active.values("color"), ["red", "blue"]);
    assert_eq!(active.values("size"), ["xl"]);
    assert!(active.is_active("color", "blue"));
    assert!(!active.is_active("size", "blue"));
}

#[test]
fn malformed_token_yields_empty_set() {
    let facet = Facet::new("color", "c", "page");
    let query = QueryParams::parse("?f[]=bogustoken");
    let active = ActiveFilterSet::from_query(&query, &facet, &registry()).expect("malformed input is not an error");
    assert!(active.is_empty());
}

#[test]
fn bad_tokens_do_not_drop_good_ones() {
    let facet = Facet::new("color", "c", "page");
    let query = QueryParams::parse("f[]=bogus&f[]=zz:stale&f[]=c:blue");
    let active = ActiveFilterSet::from_query(&query, &facet, &registry()).expect("decode");
    assert_eq!(active.values("color"), ["blue"]);
    assert_eq!(active.iter().count(), 1, "unknown alias is dropped");
}

#[test]
fn scalar_filter_key_means_no_filters() {
    let facet = Facet::new("color", "c", "page");
    let query = QueryParams::parse("f=c:blue");
    let active = ActiveFilterSet::from_query(&query, &facet, &registry()).expect("decode");
    assert!(active.is_empty());
}

#[test]
fn aliases_resolve_within_the_facet_source() {
    let facet = Facet::new("brand", "c", "other");
    let query = QueryParams::parse("f[]=c:acme&f[]=s:xl");
    let active = ActiveFilterSet::from_query(&query, &facet, &registry()).expect("decode");
    assert_eq!(active.values("brand"), ["acme"], "'c' means brand in this source");
    assert!(active.values("color").is_empty());
    assert!(active.values("size").is_empty(), "'s' is not defined in this source");
}

#[test]
fn value_with_separator_survives_decoding() {
    let facet = Facet::new("color", "c", "page");
    let query = QueryParams::parse("f[]=c:rgb:10:20:30");
    let active = ActiveFilterSet::from_query(&query, &facet, &registry()).expect("decode");
    assert_eq!(active.values("color"), ["rgb:10:20:30"]);
}

#[test]
fn registry_memoizes_hits() {
    let counting = Arc::new(CountingStore { inner: store(), calls: AtomicUsize::new(0), fail: false });
    let registry = UrlAliasRegistry::new(counting.clone());
    for _ in 0..3 {
        assert_eq!(registry.facet_id("c", "page").expect("alias"), "color");
        assert_eq!(registry.url_alias("color", "page").expect("id"), "c");
    }
    assert_eq!(counting.calls.load(Ordering::SeqCst), 2, "one store lookup per direction");
}

#[test]
fn registry_reports_unknown_alias() {
    let registry = registry();
    assert!(matches!(registry.facet_id("nope", "page"), Err(Error::UnknownAlias { .. })));
    assert!(matches!(registry.url_alias("color", "other"), Err(Error::NotFound(_))));
}

#[test]
fn storage_fault_propagates() {
    let failing = Arc::new(CountingStore { inner: store(), calls: AtomicUsize::new(0), fail: true });
    let registry = UrlAliasRegistry::new(failing);
    let facet = Facet::new("color", "c", "page");
    let query = QueryParams::parse("f[]=c:blue");
    let err = ActiveFilterSet::from_query(&query, &facet, &registry).expect_err("store failure");
    assert!(matches!(err, Error::Backend(_)));
}

#[test]
fn mark_active_flags_nested_results() {
    let facet = Facet::new("category", "cat", "page");
    let mut active = ActiveFilterSet::new();
    active.push("category", "shoes");
    let mut results = vec![
        FacetResult::new("clothing", "Clothing", 4).with_children(vec![FacetResult::new("shoes", "Shoes", 2), FacetResult::new("hats", "Hats", 2)]),
        FacetResult::informational("Other"),
    ];
    active.mark_active(&facet, &mut results);
    assert!(!results[0].active);
    assert!(results[0].children[0].active);
    assert!(!results[0].children[1].active);
    assert!(!results[1].active);
}
