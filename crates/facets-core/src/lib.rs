#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod active;
pub mod alias;
pub mod codec;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod natural;
pub mod query;
pub mod store;
pub mod traits;
pub mod types;

pub use active::ActiveFilterSet;
pub use alias::UrlAliasRegistry;
pub use error::{Error, Result};
pub use hierarchy::TreeHierarchy;
pub use query::{QueryParams, QueryValue};
pub use types::{Facet, FacetResult, FacetSource, RequestContext, Url};
