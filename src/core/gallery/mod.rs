//! Ordered image collections: slot model, reconciliation planner,
//! materializer and edit session.
//!
//! ```text
//!  EditSession --plan()--> UploadPlan --Materializer::execute--> ResourceBackend
//!      ^                                                              |
//!      +------------- snapshot replaced from final locators ----------+
//! ```

pub mod materializer;
pub mod planner;
pub mod session;
pub mod slot;

pub use materializer::Materializer;
pub use planner::{plan, PlanMode, UploadPlan};
pub use session::EditSession;
pub use slot::{LocalBlob, OriginalSnapshot, RemoteUrl, ResourceSlot};
