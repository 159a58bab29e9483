//! User-visible notices raised by the favorites controller.

use std::sync::Mutex;

use serde::Serialize;

/// A failed favorite change that was rolled back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteNotice {
    pub tour_id: String,
    /// Value restored after the rollback.
    pub restored: bool,
    pub message: String,
}

/// Sink for notices (replaces a direct dependency on any UI toolkit).
///
/// Implementations can forward notices to a toast widget, log them, or
/// ignore them.
pub trait NoticeEmitter: Send + Sync {
    fn emit(&self, notice: FavoriteNotice);
}

/// Discards all notices (headless mode).
pub struct NoopEmitter;

impl NoticeEmitter for NoopEmitter {
    fn emit(&self, _notice: FavoriteNotice) {}
}

/// Keeps every notice in memory, newest last.
#[derive(Default)]
pub struct RecordingEmitter {
    notices: Mutex<Vec<FavoriteNotice>>,
}

impl RecordingEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<FavoriteNotice> {
        self.notices
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl NoticeEmitter for RecordingEmitter {
    fn emit(&self, notice: FavoriteNotice) {
        let mut guard = self
            .notices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.push(notice);
    }
}
