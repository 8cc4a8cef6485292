//! Destination URL per facet source path.
//!
//! Resolved entries for non-empty paths are memoized for the lifetime of
//! the cache, keyed by path and request format. The empty path means "the
//! current page" and resolves against the request at hand every time.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

use facets_core::error::{Error, Result};
use facets_core::query::{QueryParams, FORMAT_PARAM};
use facets_core::traits::Router;
use facets_core::types::{RequestContext, Url};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// The request the facet links are built for.
    pub request: RequestContext,
    /// Base URL onto which filter parameters are layered.
    pub url: Url,
}

// The format travels into the synthetic request and the literal fallback.
type PathKey = (String, Option<String>);

pub struct RequestPathCache {
    router: Arc<dyn Router>,
    by_path: RwLock<HashMap<PathKey, ResolvedPath>>,
}

impl RequestPathCache {
    pub fn new(router: Arc<dyn Router>) -> Self { Self { router, by_path: RwLock::new(HashMap::new()) } }

    pub fn resolve(&self, facet_source_path: &str, current: &RequestContext) -> Result<ResolvedPath> {
        if facet_source_path.is_empty() {
            let url = self.url_for(&current.path, current)?;
            return Ok(ResolvedPath { request: current.clone(), url });
        }
        let key = (facet_source_path.to_string(), current.format.clone());
        if let Some(hit) = self.by_path.read().get(&key) {
            trace!(path = facet_source_path, format = ?current.format, "request path cache hit");
            return Ok(hit.clone());
        }
        let request = RequestContext { path: facet_source_path.to_string(), query: QueryParams::new(), format: current.format.clone() };
        let url = self.url_for(facet_source_path, &request)?;
        let resolved = ResolvedPath { request, url };
        self.by_path.write().insert(key, resolved.clone());
        Ok(resolved)
    }

    pub fn len(&self) -> usize { self.by_path.read().len() }

    pub fn is_empty(&self) -> bool { self.by_path.read().is_empty() }

    /// Drops every memoized entry.
    pub fn clear(&self) { self.by_path.write().clear(); }

    fn url_for(&self, path: &str, request: &RequestContext) -> Result<Url> {
        let url = match self.router.match_path(path)? {
            Some(route) => Url::routed(path, route.route_name, route.parameters),
            None => {
                debug!(err = %Error::UnroutablePath(path.to_string()), "using literal facet source url");
                let mut query = QueryParams::new();
                if let Some(format) = &request.format { query.set(FORMAT_PARAM, format.as_str()); }
                Url::literal(path).with_query(query)
            }
        };
        Ok(url.with_attribute("rel", "nofollow"))
    }
}

impl std::fmt::Debug for RequestPathCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestPathCache").field("entries", &self.len()).finish()
    }
}
