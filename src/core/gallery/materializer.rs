//! Executes an [`UploadPlan`] against a [`ResourceBackend`].

use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, info, warn};

use super::planner::UploadPlan;
use super::slot::{infer_extension, LocalBlob, RemoteUrl, ResourceSlot, DEFAULT_CONTENT_TYPE};
use crate::core::backend::ResourceBackend;
use crate::core::error::{Result, TourdeskError};

/// Turns plans into backend calls.
#[derive(Clone)]
pub struct Materializer {
    backend: Arc<dyn ResourceBackend>,
}

impl Materializer {
    pub fn new(backend: Arc<dyn ResourceBackend>) -> Self {
        Self { backend }
    }

    /// Run `plan` for `owner_id`.
    ///
    /// Returns the backend's final locators, or `None` for a no-op plan.
    /// On error nothing is rolled back locally; the caller keeps its edit
    /// state so the user can retry.
    pub async fn execute(&self, owner_id: &str, plan: &UploadPlan) -> Result<Option<Vec<RemoteUrl>>> {
        let final_locators = match plan {
            UploadPlan::NoOp => {
                debug!(owner_id, "Nothing to reconcile");
                return Ok(None);
            }
            UploadPlan::ReorderOnly { order } => {
                info!(owner_id, count = order.len(), "Persisting new image order");
                self.backend.update_order(owner_id, order).await?
            }
            UploadPlan::AppendOnly { items } => {
                info!(owner_id, count = items.len(), "Appending new images");
                self.backend
                    .upload_resources(owner_id, items.clone(), false)
                    .await?
            }
            UploadPlan::ReplaceAll { items } => {
                let blobs = self.materialize(items).await?;
                info!(owner_id, count = blobs.len(), "Replacing full image set");
                self.backend.upload_resources(owner_id, blobs, true).await?
            }
        };
        Ok(Some(final_locators))
    }

    /// Resolve every slot to uploadable bytes, preserving display order.
    ///
    /// Existing slots are re-fetched concurrently. The first failure aborts
    /// the whole assembly; a partial list is never returned.
    pub async fn materialize(&self, slots: &[ResourceSlot]) -> Result<Vec<LocalBlob>> {
        let fetches = slots.iter().enumerate().map(|(index, slot)| async move {
            match slot {
                ResourceSlot::Pending(blob) => Ok(blob.clone()),
                ResourceSlot::Existing(url) => self.refetch(index, url).await,
            }
        });
        try_join_all(fetches).await
    }

    async fn refetch(&self, index: usize, url: &RemoteUrl) -> Result<LocalBlob> {
        let fetched = self.backend.fetch_bytes(url).await.map_err(|e| {
            warn!(locator = %url, error = %e, "Re-fetch of existing image failed");
            match e {
                TourdeskError::Materialization { .. } => e,
                other => TourdeskError::materialization(url.as_str(), other),
            }
        })?;

        let extension = infer_extension(url, fetched.content_type.as_deref());
        let content_type = fetched
            .content_type
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        Ok(LocalBlob::new(
            format!("image-{index}.{extension}"),
            content_type,
            fetched.bytes,
        ))
    }
}
