use std::sync::Arc;

use facets_core::config::{Config, UrlProcessorKind};
use facets_core::hierarchy::FlatHierarchy;
use facets_core::query::{QueryValue, PAGE_PARAM};
use facets_core::store::InMemoryFacetStore;
use facets_core::{Facet, FacetResult, RequestContext, TreeHierarchy};
use facets_url::{FacetServices, QueryStringProcessor, StaticRouter, UrlProcessor};

const DOCUMENT: &str = r#"
[[facet_sources]]
id = "page"
path = "/search"

[[routes]]
path = "/search"
name = "search.page"

[[facets]]
id = "color"
name = "Color"
url_alias = "c"
facet_source_id = "page"

[[facets]]
id = "category"
name = "Category"
url_alias = "cat"
use_hierarchy = true
enable_parent_when_child_gets_disabled = true
facet_source_id = "page"
"#;

#[test]
fn processor_decodes_marks_and_links() {
    let facets = Config::from_toml_str(DOCUMENT).facets().expect("config");
    let services = FacetServices::from_config(&facets);
    let facet = facets.facet("category").expect("category");
    let request = RequestContext::from_uri("/search?f[]=cat:shoes&f[]=c:blue&page=2");

    let mut processor = UrlProcessor::new(UrlProcessorKind::QueryString, &services, facet, request).expect("processor");
    assert_eq!(processor.active_filters().values("category"), ["shoes"]);
    assert_eq!(processor.active_filters().values("color"), ["blue"]);

    let mut results: Vec<FacetResult> = serde_json::from_str(
        r#"[{"raw_value": "clothing", "display_value": "Clothing", "count": 3,
             "children": [{"raw_value": "shoes", "display_value": "Shoes", "count": 2},
                          {"raw_value": "hats", "display_value": "Hats", "count": 1}]}]"#,
    )
    .expect("results json");
    processor.mark_active(&mut results);
    let tree = TreeHierarchy::from_results(&results);
    let results = processor.build_urls(&tree, results).expect("build");

    let shoes = &results[0].children[0];
    assert!(shoes.active);
    assert_eq!(shoes.href().as_deref(), Some("/search?f[]=c:blue&f[]=cat:clothing"), "last child re-enables the parent");
    assert_eq!(results[0].children[1].href().as_deref(), Some("/search?f[]=c:blue&f[]=cat:hats&f[]=cat:shoes"));
    assert_eq!(processor.request().query.get(PAGE_PARAM), Some(&QueryValue::Scalar("2".into())));
}

#[test]
fn unconfigured_facet_source_links_to_current_page() {
    let store = InMemoryFacetStore::new(Vec::new(), vec![Facet::new("color", "c", "ghost")]);
    let services = FacetServices::new(Arc::new(store), Arc::new(StaticRouter::new()));
    let facet = Facet::new("color", "c", "ghost");
    let mut processor = QueryStringProcessor::new(&services, &facet, RequestContext::from_uri("/catalog?f[]=c:blue")).expect("processor");

    let results = processor.build_urls(&FlatHierarchy, vec![FacetResult::new("red", "Red", 1)]).expect("build");
    assert_eq!(results[0].href().as_deref(), Some("/catalog?f[]=c:blue&f[]=c:red"));
}
