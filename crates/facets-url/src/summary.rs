//! Summary of the active filters of a facet source.
//!
//! Each active value of the listed facets gets a link that removes just
//! that value; the optional reset link removes every value of the listed
//! facets and keeps filters of facets not listed.

use serde::Serialize;
use std::collections::HashSet;

use facets_core::error::Result;
use facets_core::{ActiveFilterSet, Facet, RequestContext, Url};

use crate::builder::compose_url;
use crate::processor::FacetServices;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryItem {
    pub facet_id: String,
    pub label: String,
    pub raw_value: String,
    pub url: Url,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetsSummary {
    pub items: Vec<SummaryItem>,
    pub reset_url: Option<Url>,
}

impl FacetsSummary {
    /// `facets` all belong to one facet source and share its filter key
    /// and separator; the first one decodes the request.
    pub fn build(services: &FacetServices, facets: &[Facet], request: &RequestContext, show_reset_link: bool) -> Result<Self> {
        let Some(first) = facets.first() else {
            return Ok(Self::default());
        };
        let active = ActiveFilterSet::from_query(&request.query, first, &services.registry)?;
        if active.is_empty() { return Ok(Self::default()); }

        let source = services.facet_source(&first.facet_source_id)?;
        let base = services.paths.resolve(&source.path, request)?.url;
        let encoded = services.link_builder().encoded_filters(&active, &first.facet_source_id, first.separator)?;
        let all: Vec<String> = encoded.iter().map(|f| f.token.clone()).collect();

        let mut items = Vec::new();
        let mut listed = HashSet::new();
        for facet in facets {
            for filter in encoded.iter().filter(|f| f.facet_id == facet.id) {
                listed.insert(filter.token.as_str());
                let params = all.iter().filter(|t| **t != filter.token).cloned().collect();
                items.push(SummaryItem {
                    facet_id: facet.id.clone(),
                    label: if facet.name.is_empty() { facet.id.clone() } else { facet.name.clone() },
                    raw_value: filter.value.clone(),
                    url: compose_url(&base, request.query.clone(), params, &first.filter_key),
                });
            }
        }

        let reset_url = (show_reset_link && !items.is_empty()).then(|| {
            let params = all.iter().filter(|t| !listed.contains(t.as_str())).cloned().collect();
            compose_url(&base, request.query.clone(), params, &first.filter_key)
        });
        Ok(Self { items, reset_url })
    }
}
