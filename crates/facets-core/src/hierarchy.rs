//! In-memory value hierarchy.

use std::collections::{HashMap, HashSet};

use crate::traits::HierarchyPolicy;
use crate::types::FacetResult;

/// Child → parent edges; every value has at most one parent.
#[derive(Debug, Clone, Default)]
pub struct TreeHierarchy {
    parents: HashMap<String, String>,
    children: HashMap<String, Vec<String>>,
}

impl TreeHierarchy {
    pub fn new() -> Self { Self::default() }

    /// Builds from `(child, parent)` pairs. A later edge for the same child
    /// replaces the earlier one.
    pub fn from_edges<I, C, P>(edges: I) -> Self
    where
        I: IntoIterator<Item = (C, P)>,
        C: Into<String>,
        P: Into<String>,
    {
        let mut tree = Self::new();
        for (child, parent) in edges { tree.insert(child, parent); }
        tree
    }

    /// Derives the hierarchy from the nesting of a result tree.
    pub fn from_results(results: &[FacetResult]) -> Self {
        let mut tree = Self::new();
        tree.collect(results, None);
        tree
    }

    pub fn insert(&mut self, child: impl Into<String>, parent: impl Into<String>) {
        let child = child.into();
        let parent = parent.into();
        if let Some(previous) = self.parents.insert(child.clone(), parent.clone()) {
            if let Some(siblings) = self.children.get_mut(&previous) { siblings.retain(|c| c != &child); }
        }
        self.children.entry(parent).or_default().push(child);
    }

    pub fn is_empty(&self) -> bool { self.parents.is_empty() }

    fn collect(&mut self, results: &[FacetResult], parent: Option<&str>) {
        for result in results {
            match result.raw_value() {
                Some(value) => {
                    if let Some(parent) = parent { self.insert(value, parent); }
                    self.collect(&result.children, Some(value));
                }
                // Children of informational rows become roots.
                None => self.collect(&result.children, None),
            }
        }
    }
}

impl HierarchyPolicy for TreeHierarchy {
    fn ancestors_of(&self, value: &str) -> Vec<String> {
        let mut trail = Vec::new();
        let mut seen = HashSet::new();
        let mut current = value;
        while let Some(parent) = self.parents.get(current) {
            // Malformed edge sets may loop; a tree never revisits a node.
            if !seen.insert(parent.as_str()) || parent == value { break; }
            trail.push(parent.clone());
            current = parent.as_str();
        }
        trail
    }

    fn descendants_of(&self, value: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut seen: HashSet<&str> = HashSet::from([value]);
        let mut stack = vec![value];
        while let Some(node) = stack.pop() {
            for child in self.children.get(node).into_iter().flatten() {
                if seen.insert(child.as_str()) {
                    out.push(child.clone());
                    stack.push(child.as_str());
                }
            }
        }
        out
    }
}

/// Policy for facets without a hierarchy.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatHierarchy;

impl HierarchyPolicy for FlatHierarchy {
    fn ancestors_of(&self, _value: &str) -> Vec<String> { Vec::new() }
    fn descendants_of(&self, _value: &str) -> Vec<String> { Vec::new() }
}
