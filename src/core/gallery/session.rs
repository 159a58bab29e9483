//! One image-editing session for a single owner.

use tracing::{info, warn};

use super::materializer::Materializer;
use super::planner::{plan, UploadPlan};
use super::slot::{LocalBlob, OriginalSnapshot, ResourceSlot};
use crate::core::error::{Result, TourdeskError};

/// Holds the confirmed snapshot and the user's current edit.
///
/// The snapshot is only replaced after the backend confirms a commit. A
/// failed commit leaves both the snapshot and the slots exactly as they
/// were so the user can retry or amend.
#[derive(Debug, Clone)]
pub struct EditSession {
    owner_id: String,
    original: OriginalSnapshot,
    slots: Vec<ResourceSlot>,
}

impl EditSession {
    pub fn open(owner_id: impl Into<String>, original: OriginalSnapshot) -> Self {
        let slots = original.to_slots();
        Self {
            owner_id: owner_id.into(),
            original,
            slots,
        }
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn original(&self) -> &OriginalSnapshot {
        &self.original
    }

    pub fn slots(&self) -> &[ResourceSlot] {
        &self.slots
    }

    pub fn is_dirty(&self) -> bool {
        self.slots != self.original.to_slots()
    }

    /// Add a new local image at the end.
    pub fn append(&mut self, blob: LocalBlob) {
        self.slots.push(ResourceSlot::Pending(blob));
    }

    /// Add a new local image at `index`.
    pub fn insert(&mut self, index: usize, blob: LocalBlob) -> Result<()> {
        if index > self.slots.len() {
            return Err(self.out_of_range(index));
        }
        self.slots.insert(index, ResourceSlot::Pending(blob));
        Ok(())
    }

    /// Delete the slot at `index`.
    pub fn remove(&mut self, index: usize) -> Result<ResourceSlot> {
        if index >= self.slots.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.slots.remove(index))
    }

    /// Move the slot at `from` so it ends up at `to`.
    pub fn move_slot(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.slots.len();
        if from >= len {
            return Err(self.out_of_range(from));
        }
        if to >= len {
            return Err(self.out_of_range(to));
        }
        let slot = self.slots.remove(from);
        self.slots.insert(to, slot);
        Ok(())
    }

    /// Make the slot at `index` the cover image.
    pub fn promote_to_cover(&mut self, index: usize) -> Result<()> {
        self.move_slot(index, 0)
    }

    /// Discard every edit and return to the confirmed snapshot.
    pub fn cancel(&mut self) {
        self.slots = self.original.to_slots();
    }

    /// Plan the current edit without executing it.
    pub fn plan(&self) -> Result<UploadPlan> {
        plan(self.original.as_slice(), &self.slots)
    }

    /// Plan and execute the current edit.
    ///
    /// On success the snapshot is replaced wholesale by the locators the
    /// backend returned and the slots are reset to mirror it.
    pub async fn commit(&mut self, materializer: &Materializer) -> Result<UploadPlan> {
        let upload_plan = self.plan()?;
        let outcome = materializer.execute(&self.owner_id, &upload_plan).await;

        match outcome {
            Ok(Some(final_locators)) => {
                info!(
                    owner_id = %self.owner_id,
                    mode = ?upload_plan.mode(),
                    count = final_locators.len(),
                    "Image edit committed"
                );
                self.original = OriginalSnapshot::new(final_locators);
                self.slots = self.original.to_slots();
                Ok(upload_plan)
            }
            Ok(None) => Ok(upload_plan),
            Err(e) => {
                warn!(owner_id = %self.owner_id, error = %e, "Image edit commit failed");
                Err(e)
            }
        }
    }

    fn out_of_range(&self, index: usize) -> TourdeskError {
        TourdeskError::Validation(format!(
            "Image position {index} is out of range (have {})",
            self.slots.len()
        ))
    }
}
