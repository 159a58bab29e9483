//! Backend seams consumed by the client core.
//!
//! The core never speaks HTTP directly. Each concern goes through one of
//! these traits so the planner, materializer, favorites controller and
//! catalog service can be driven by the real [`crate::api::ApiClient`] or by
//! a test double.

use async_trait::async_trait;
use bytes::Bytes;
#[cfg(test)]
use mockall::automock;

use crate::core::catalog::{CatalogPage, FilterQuery};
use crate::core::error::Result;
use crate::core::gallery::{LocalBlob, RemoteUrl};

/// Raw bytes of a remote resource plus the content type it was served with.
#[derive(Debug, Clone)]
pub struct FetchedBlob {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

/// Catalog reads. Exactly one filter mode per call.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    async fn fetch_catalog(&self, query: &FilterQuery) -> Result<CatalogPage>;
}

/// Favorite status per tour. Add and remove are idempotent for the caller.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FavoritesBackend: Send + Sync {
    async fn check_favorite(&self, tour_id: &str) -> Result<bool>;

    async fn add_favorite(&self, tour_id: &str) -> Result<()>;

    async fn remove_favorite(&self, tour_id: &str) -> Result<()>;
}

/// Ordered image collection of one owner (a tour).
///
/// There is no delete-by-index and no move primitive: only append,
/// replace-all, and an order-metadata update over existing locators.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ResourceBackend: Send + Sync {
    /// Download an existing resource so it can be resubmitted.
    async fn fetch_bytes(&self, locator: &RemoteUrl) -> Result<FetchedBlob>;

    /// Upload blobs, appending or replacing the whole set. Returns the final
    /// locators in backend order.
    async fn upload_resources(
        &self,
        owner_id: &str,
        items: Vec<LocalBlob>,
        replace_existing: bool,
    ) -> Result<Vec<RemoteUrl>>;

    /// Persist a new order over existing locators.
    async fn update_order(&self, owner_id: &str, order: &[RemoteUrl]) -> Result<Vec<RemoteUrl>>;
}
