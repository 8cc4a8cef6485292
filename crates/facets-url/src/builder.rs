//! Toggle links for a facet's result tree.
//!
//! Every result gets the URL the page would navigate to if that result were
//! switched: active results link to the set without them, inactive results
//! link to the set with them. Hierarchy and single-select rules adjust the
//! token list, hooks may rewrite it, and the final list is naturally sorted
//! so equal filter sets always serialize to the same URL.

use std::collections::HashSet;
use tracing::debug;

use facets_core::codec;
use facets_core::error::{Error, Result};
use facets_core::natural::natural_sort;
use facets_core::query::{QueryParams, PAGE_PARAM, WRAPPER_FORMAT_PARAM};
use facets_core::traits::HierarchyPolicy;
use facets_core::{ActiveFilterSet, Facet, FacetResult, FacetSource, RequestContext, Url, UrlAliasRegistry};

use crate::hooks::{HookChain, HookContext};
use crate::path_cache::RequestPathCache;

/// The facet a link set is built for and the state it is built against.
#[derive(Clone, Copy)]
pub struct LinkContext<'a> {
    pub facet: &'a Facet,
    pub facet_source: &'a FacetSource,
    /// Consulted only when `facet.use_hierarchy` is set.
    pub hierarchy: &'a dyn HierarchyPolicy,
    pub active: &'a ActiveFilterSet,
}

/// An active filter together with its encoded token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFilter {
    pub facet_id: String,
    pub value: String,
    pub token: String,
}

pub struct ResultLinkBuilder<'a> {
    registry: &'a UrlAliasRegistry,
    paths: &'a RequestPathCache,
    hooks: &'a HookChain,
}

// Shared by every result of one build.
struct Level<'a> {
    ctx: &'a LinkContext<'a>,
    original: &'a [String],
    query: &'a QueryParams,
    base: &'a Url,
}

impl<'a> ResultLinkBuilder<'a> {
    pub fn new(registry: &'a UrlAliasRegistry, paths: &'a RequestPathCache, hooks: &'a HookChain) -> Self {
        Self { registry, paths, hooks }
    }

    /// Assigns `url` to every result, children included.
    ///
    /// `page` is taken out of `request.query` for the duration of the build
    /// and put back afterwards, also when the build fails.
    pub fn build_urls(&self, ctx: &LinkContext<'_>, request: &mut RequestContext, results: Vec<FacetResult>) -> Result<Vec<FacetResult>> {
        if results.is_empty() { return Ok(results); }
        let current_page = request.query.remove(PAGE_PARAM);
        let built = self.build_all(ctx, request, results);
        if let Some(page) = current_page { request.query.insert(PAGE_PARAM, page); }
        built
    }

    /// Every active filter of `active` encoded with the aliases of
    /// `facet_source_id`. Facets that no longer exist in the source are
    /// skipped, and a token repeated in the incoming URL is kept once, at
    /// its first occurrence.
    pub fn encoded_filters(&self, active: &ActiveFilterSet, facet_source_id: &str, separator: char) -> Result<Vec<EncodedFilter>> {
        let mut encoded = Vec::new();
        let mut seen = HashSet::new();
        for (facet_id, values) in active.iter() {
            let alias = match self.registry.url_alias(facet_id, facet_source_id) {
                Ok(alias) => alias,
                Err(err @ (Error::NotFound(_) | Error::UnknownAlias { .. })) => {
                    debug!(%err, "skipping active filter");
                    continue;
                }
                Err(err) => return Err(err),
            };
            for value in values {
                let token = codec::encode(&alias, separator, value);
                if seen.insert(token.clone()) {
                    encoded.push(EncodedFilter { facet_id: facet_id.clone(), value: value.clone(), token });
                }
            }
        }
        Ok(encoded)
    }

    fn build_all(&self, ctx: &LinkContext<'_>, request: &RequestContext, mut results: Vec<FacetResult>) -> Result<Vec<FacetResult>> {
        let original: Vec<String> = self
            .encoded_filters(ctx.active, &ctx.facet.facet_source_id, ctx.facet.separator)?
            .into_iter()
            .map(|f| f.token)
            .collect();
        let resolved = self.paths.resolve(&ctx.facet_source.path, request)?;
        let level = Level { ctx, original: &original, query: &request.query, base: &resolved.url };
        self.build_level(&level, &mut results);
        Ok(results)
    }

    fn build_level(&self, level: &Level<'_>, results: &mut [FacetResult]) {
        for index in 0..results.len() {
            if !results[index].children.is_empty() {
                let mut children = std::mem::take(&mut results[index].children);
                self.build_level(level, &mut children);
                results[index].children = children;
            }
            let url = self.result_url(level, results, index);
            results[index].url = Some(url);
        }
    }

    fn result_url(&self, level: &Level<'_>, siblings: &[FacetResult], index: usize) -> Url {
        let LinkContext { facet, hierarchy, active, .. } = *level.ctx;
        let result = &siblings[index];
        let token = |value: &str| codec::encode(&facet.url_alias, facet.separator, value);
        let filter_string = result.raw_value().map(token);
        let mut params = level.original.to_vec();

        if result.active {
            if let Some(own) = &filter_string { params.retain(|p| p != own); }
            if facet.use_hierarchy && facet.enable_parent_when_child_gets_disabled {
                let parent = result.raw_value().and_then(|raw| hierarchy.ancestors_of(raw).into_iter().next());
                if let Some(parent) = parent.filter(|p| !p.is_empty()) {
                    if !has_active_sibling(hierarchy, siblings, result, &parent) { push_unique(&mut params, token(parent.as_str())); }
                }
            }
        } else {
            if let Some(own) = filter_string { push_unique(&mut params, own); }
            if facet.use_hierarchy {
                if let Some(raw) = result.raw_value() {
                    let ancestors = hierarchy.ancestors_of(raw);
                    let descendants = hierarchy.descendants_of(raw);
                    let related: HashSet<String> = ancestors.iter().chain(descendants.iter()).map(|v| token(v.as_str())).collect();
                    params.retain(|p| !related.contains(p));
                }
            }
            if facet.show_only_one_result {
                let selected: HashSet<String> = siblings.iter().filter(|r| r.active).filter_map(FacetResult::raw_value).map(token).collect();
                params.retain(|p| !selected.contains(p));
            }
        }

        let mut query = level.query.clone();
        let params = self.hooks.apply(&mut query, params, &HookContext { result, active, facet });
        compose_url(level.base, query, params, &facet.filter_key)
    }
}

impl std::fmt::Debug for ResultLinkBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultLinkBuilder").field("registry", self.registry).field("paths", self.paths).field("hooks", self.hooks).finish()
    }
}

/// Layers the sorted `params` onto `query` under `filter_key` and the
/// result onto `base`. Page and wrapper-format parameters never survive.
pub(crate) fn compose_url(base: &Url, mut query: QueryParams, mut params: Vec<String>, filter_key: &str) -> Url {
    natural_sort(&mut params);
    if params.is_empty() {
        query.remove(filter_key);
    } else {
        query.set_list(filter_key, params);
    }
    query.remove(PAGE_PARAM);
    query.remove(WRAPPER_FORMAT_PARAM);

    let mut url = base.clone();
    if !query.is_empty() { url.query = query; }
    url
}

// Only `level` is scanned. Active descendants of `parent` that sit on a
// deeper level do not keep the parent out.
fn has_active_sibling(hierarchy: &dyn HierarchyPolicy, level: &[FacetResult], result: &FacetResult, parent: &str) -> bool {
    let children = hierarchy.descendants_of(parent);
    if children.is_empty() { return false; }
    level.iter().any(|other| {
        other.active
            && other.raw_value != result.raw_value
            && other.raw_value().is_some_and(|v| children.iter().any(|c| c == v))
    })
}

fn push_unique(params: &mut Vec<String>, token: String) {
    if !params.contains(&token) { params.push(token); }
}
