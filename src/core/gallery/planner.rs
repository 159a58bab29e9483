//! Reconciliation planner.
//!
//! Maps an edited slot list onto the backend's only write primitives:
//! "append these new items" and "replace the whole set with these items",
//! plus an order-metadata update. Pure and synchronous; nothing here touches
//! the network.
//!
//! | edit                                       | plan          |
//! |--------------------------------------------|---------------|
//! | nothing changed                            | `NoOp`        |
//! | same members, different order, no new item | `ReorderOnly` |
//! | all members kept in order, new items last  | `AppendOnly`  |
//! | anything else                              | `ReplaceAll`  |

use std::collections::HashMap;

use serde::Serialize;

use super::slot::{LocalBlob, RemoteUrl, ResourceSlot};
use crate::core::error::{Result, TourdeskError};

/// Tag of an [`UploadPlan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanMode {
    NoOp,
    ReorderOnly,
    AppendOnly,
    ReplaceAll,
}

/// Minimal remote operation that makes the backend match an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadPlan {
    /// Remote state already matches.
    NoOp,
    /// Persist a new order; nothing is uploaded.
    ReorderOnly { order: Vec<RemoteUrl> },
    /// Upload only the new blobs; the backend appends them.
    AppendOnly { items: Vec<LocalBlob> },
    /// Resubmit every surviving slot, in display order, as the full set.
    ReplaceAll { items: Vec<ResourceSlot> },
}

impl UploadPlan {
    pub fn mode(&self) -> PlanMode {
        match self {
            Self::NoOp => PlanMode::NoOp,
            Self::ReorderOnly { .. } => PlanMode::ReorderOnly,
            Self::AppendOnly { .. } => PlanMode::AppendOnly,
            Self::ReplaceAll { .. } => PlanMode::ReplaceAll,
        }
    }

    /// Number of items that will be sent as upload parts.
    pub fn upload_count(&self) -> usize {
        match self {
            Self::NoOp | Self::ReorderOnly { .. } => 0,
            Self::AppendOnly { items } => items.len(),
            Self::ReplaceAll { items } => items.len(),
        }
    }
}

/// Compute the upload plan for `current` against the confirmed `original`.
///
/// Existing locators are compared as a multiset: a snapshot may hold the
/// same locator more than once, and an edit may keep every copy.
///
/// Fails with [`TourdeskError::Validation`] when the edit state cannot be
/// expressed remotely at all: an empty collection over a non-empty
/// snapshot, an existing locator the snapshot does not know, or an existing
/// locator kept more often than the snapshot holds it. An empty edit of an
/// empty snapshot is a `NoOp`.
pub fn plan(original: &[RemoteUrl], current: &[ResourceSlot]) -> Result<UploadPlan> {
    if original.is_empty() && current.is_empty() {
        return Ok(UploadPlan::NoOp);
    }
    validate(original, current)?;

    let retained: Vec<&RemoteUrl> = current.iter().filter_map(ResourceSlot::remote_url).collect();
    let has_pending = current.iter().any(ResourceSlot::is_pending);
    // Every per-locator count is bounded by the snapshot's, so equal totals
    // mean equal multisets.
    let nothing_deleted = retained.len() == original.len();
    let order_kept = is_subsequence(&retained, original);

    if !has_pending && nothing_deleted {
        if order_kept {
            return Ok(UploadPlan::NoOp);
        }
        return Ok(UploadPlan::ReorderOnly {
            order: retained.into_iter().cloned().collect(),
        });
    }

    if has_pending && nothing_deleted && order_kept && pending_is_terminal(current) {
        let items = current
            .iter()
            .filter_map(|slot| match slot {
                ResourceSlot::Pending(blob) => Some(blob.clone()),
                ResourceSlot::Existing(_) => None,
            })
            .collect();
        return Ok(UploadPlan::AppendOnly { items });
    }

    Ok(UploadPlan::ReplaceAll {
        items: current.to_vec(),
    })
}

fn validate(original: &[RemoteUrl], current: &[ResourceSlot]) -> Result<()> {
    if current.is_empty() {
        return Err(TourdeskError::Validation(
            "At least one image is required".to_string(),
        ));
    }

    let mut available = locator_counts(original);
    for url in current.iter().filter_map(ResourceSlot::remote_url) {
        match available.get_mut(url) {
            None => {
                return Err(TourdeskError::Validation(format!(
                    "Image {url} is not part of this tour"
                )));
            }
            Some(0) => {
                return Err(TourdeskError::Validation(format!(
                    "Image {url} appears more often than in the saved gallery"
                )));
            }
            Some(remaining) => *remaining -= 1,
        }
    }
    Ok(())
}

fn locator_counts(urls: &[RemoteUrl]) -> HashMap<&RemoteUrl, usize> {
    let mut counts = HashMap::new();
    for url in urls {
        *counts.entry(url).or_insert(0) += 1;
    }
    counts
}

/// True when `retained` appears in `original` in the same relative order.
fn is_subsequence(retained: &[&RemoteUrl], original: &[RemoteUrl]) -> bool {
    let mut remaining = original.iter();
    retained
        .iter()
        .all(|wanted| remaining.any(|candidate| candidate == *wanted))
}

/// True when no pending slot sits before an existing one.
fn pending_is_terminal(current: &[ResourceSlot]) -> bool {
    let first_pending = current.iter().position(ResourceSlot::is_pending);
    let last_existing = current.iter().rposition(|slot| !slot.is_pending());
    match (first_pending, last_existing) {
        (Some(pending), Some(existing)) => pending > existing,
        _ => true,
    }
}
