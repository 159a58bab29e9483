//! Catalog search: filter resolution, backend fetch, client-side refinement.

pub mod filters;
pub mod refine;
pub mod types;

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

pub use filters::{resolve, FilterInputs, FilterQuery, Page, SortOrder, DEFAULT_PAGE_SIZE};
pub use refine::{refine, sort_tours};
pub use types::{CatalogPage, Tour};

use crate::core::backend::CatalogBackend;
use crate::core::error::Result;

/// What the storefront displays for one search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogView {
    /// Tours left after client-side narrowing, in display order.
    pub items: Vec<Tour>,
    /// Total reported by the server for the resolved query.
    pub total: u64,
    /// The server query that produced `items`.
    pub query: FilterQuery,
}

/// Runs the filter chain against a [`CatalogBackend`].
#[derive(Clone)]
pub struct CatalogService {
    backend: Arc<dyn CatalogBackend>,
}

impl CatalogService {
    pub fn new(backend: Arc<dyn CatalogBackend>) -> Self {
        Self { backend }
    }

    pub async fn search(&self, inputs: &FilterInputs) -> Result<CatalogView> {
        let query = resolve(inputs);
        let page = self.backend.fetch_catalog(&query).await?;
        let fetched = page.items.len();
        let items = refine(page.items, inputs);

        debug!(
            mode = query.mode_name(),
            fetched,
            shown = items.len(),
            total = page.total,
            "Catalog search resolved"
        );

        Ok(CatalogView {
            items,
            total: page.total,
            query,
        })
    }
}
