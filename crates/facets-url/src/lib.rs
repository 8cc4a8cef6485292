//! facets-url
//!
//! Query-string link building for facet results: per-result toggle URLs,
//! the active filter summary, and the caches and hooks they rely on.
pub mod builder;
pub mod hooks;
pub mod path_cache;
pub mod processor;
pub mod routing;
pub mod summary;

pub use builder::{LinkContext, ResultLinkBuilder};
pub use hooks::{FilterParamsHook, HookChain, HookContext};
pub use path_cache::{RequestPathCache, ResolvedPath};
pub use processor::{FacetServices, QueryStringProcessor, UrlProcessor};
pub use routing::StaticRouter;
pub use summary::{FacetsSummary, SummaryItem};
