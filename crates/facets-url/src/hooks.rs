//! Filter parameter hooks.
//!
//! Hooks run in registration order after the toggle rules and before the
//! final sort. Each receives the per-result query (to add unrelated
//! parameters) and the candidate filter tokens, and returns the tokens to
//! continue with.

use facets_core::query::QueryParams;
use facets_core::{ActiveFilterSet, Facet, FacetResult};

/// What a hook gets to look at besides the tokens.
#[derive(Debug, Clone, Copy)]
pub struct HookContext<'a> {
    pub result: &'a FacetResult,
    pub active: &'a ActiveFilterSet,
    pub facet: &'a Facet,
}

pub trait FilterParamsHook: Send + Sync {
    fn alter(&self, query: &mut QueryParams, filter_params: Vec<String>, ctx: &HookContext<'_>) -> Vec<String>;
}

impl<F> FilterParamsHook for F
where
    F: Fn(&mut QueryParams, Vec<String>, &HookContext<'_>) -> Vec<String> + Send + Sync,
{
    fn alter(&self, query: &mut QueryParams, filter_params: Vec<String>, ctx: &HookContext<'_>) -> Vec<String> {
        self(query, filter_params, ctx)
    }
}

#[derive(Default)]
pub struct HookChain {
    hooks: Vec<Box<dyn FilterParamsHook>>,
}

impl HookChain {
    pub fn new() -> Self { Self::default() }

    pub fn with(mut self, hook: impl FilterParamsHook + 'static) -> Self {
        self.push(hook);
        self
    }

    pub fn with_fn<F>(self, hook: F) -> Self
    where
        F: Fn(&mut QueryParams, Vec<String>, &HookContext<'_>) -> Vec<String> + Send + Sync + 'static,
    {
        self.with(hook)
    }

    pub fn push(&mut self, hook: impl FilterParamsHook + 'static) { self.hooks.push(Box::new(hook)); }

    pub fn len(&self) -> usize { self.hooks.len() }

    pub fn is_empty(&self) -> bool { self.hooks.is_empty() }

    pub fn apply(&self, query: &mut QueryParams, filter_params: Vec<String>, ctx: &HookContext<'_>) -> Vec<String> {
        self.hooks.iter().fold(filter_params, |params, hook| hook.alter(query, params, ctx))
    }
}

impl std::fmt::Debug for HookChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookChain").field("hooks", &self.hooks.len()).finish()
    }
}
