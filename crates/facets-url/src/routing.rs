use std::collections::{BTreeMap, HashMap};

use facets_core::config::RouteConfig;
use facets_core::traits::{RouteMatch, Router};

/// Exact-path router.
#[derive(Debug, Clone, Default)]
pub struct StaticRouter {
    routes: HashMap<String, String>,
}

impl StaticRouter {
    pub fn new() -> Self { Self::default() }

    pub fn from_config(routes: &[RouteConfig]) -> Self {
        let mut router = Self::new();
        for route in routes { router.add(&route.path, &route.name); }
        router
    }

    pub fn add(&mut self, path: &str, name: &str) {
        self.routes.insert(normalize(path).to_string(), name.to_string());
    }
}

impl Router for StaticRouter {
    fn match_path(&self, path: &str) -> anyhow::Result<Option<RouteMatch>> {
        let path = path.split_once('?').map_or(path, |(p, _)| p);
        Ok(self.routes.get(normalize(path)).map(|name| RouteMatch { route_name: name.clone(), parameters: BTreeMap::new() }))
    }
}

// `/search/` and `/search` name the same route.
fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}
