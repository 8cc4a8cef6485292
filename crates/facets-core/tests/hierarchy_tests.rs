use facets_core::hierarchy::FlatHierarchy;
use facets_core::traits::HierarchyPolicy;
use facets_core::{FacetResult, TreeHierarchy};

fn sorted(mut values: Vec<String>) -> Vec<String> { values.sort(); values }

#[test]
fn ancestors_run_from_parent_to_root() {
    let tree = TreeHierarchy::from_edges([("sneakers", "shoes"), ("shoes", "clothing")]);
    assert_eq!(tree.ancestors_of("sneakers"), ["shoes", "clothing"]);
    assert!(tree.ancestors_of("clothing").is_empty());
}

#[test]
fn descendants_are_transitive() {
    let tree = TreeHierarchy::from_edges([("sneakers", "shoes"), ("boots", "shoes"), ("shoes", "clothing"), ("hats", "clothing")]);
    assert_eq!(sorted(tree.descendants_of("clothing")), ["boots", "hats", "shoes", "sneakers"]);
    assert_eq!(sorted(tree.descendants_of("shoes")), ["boots", "sneakers"]);
}

#[test]
fn unknown_values_have_no_relatives() {
    let tree = TreeHierarchy::from_edges([("shoes", "clothing")]);
    assert!(tree.ancestors_of("books").is_empty());
    assert!(tree.descendants_of("books").is_empty());
    assert!(FlatHierarchy.ancestors_of("shoes").is_empty());
}

#[test]
fn reparenting_moves_the_child() {
    let mut tree = TreeHierarchy::from_edges([("shoes", "clothing")]);
    tree.insert("shoes", "footwear");
    assert_eq!(tree.ancestors_of("shoes"), ["footwear"]);
    assert!(tree.descendants_of("clothing").is_empty());
}

#[test]
fn cycles_terminate() {
    let tree = TreeHierarchy::from_edges([("a", "b"), ("b", "a")]);
    assert_eq!(tree.ancestors_of("a"), ["b"]);
    assert_eq!(tree.descendants_of("a"), ["b"]);
}

#[test]
fn hierarchy_follows_result_nesting() {
    let results = vec![
        FacetResult::new("clothing", "Clothing", 5).with_children(vec![
            FacetResult::new("shoes", "Shoes", 3).with_children(vec![FacetResult::new("boots", "Boots", 1)]),
        ]),
        FacetResult::informational("n/a").with_children(vec![FacetResult::new("orphan", "Orphan", 1)]),
    ];
    let tree = TreeHierarchy::from_results(&results);
    assert_eq!(tree.ancestors_of("boots"), ["shoes", "clothing"]);
    assert!(tree.ancestors_of("orphan").is_empty(), "children of informational rows are roots");
}
