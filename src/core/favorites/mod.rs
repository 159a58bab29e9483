//! Optimistic favorites.
//!
//! Every tour id moves through `Unknown -> Known(value)`. The displayed value
//! is always the optimistic one; the backend-confirmed value only seeds it on
//! first load.
//!
//! # Toggle protocol
//!
//! 1. Drop the call if the key is pending (no queueing).
//! 2. Flip the optimistic value synchronously and mark the key pending.
//! 3. Release the pending mark after a fixed debounce window, independent
//!    of network latency.
//! 4. In the background, call add or remove according to the pre-toggle
//!    value. On failure, revert and emit a [`FavoriteNotice`], unless a
//!    later toggle of the same key has taken over the displayed value.
//!
//! The state map and the pending set are owned by [`FavoritesController`];
//! nothing else mutates them.

pub mod events;

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use futures::future::join_all;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub use events::{FavoriteNotice, NoopEmitter, NoticeEmitter, RecordingEmitter};

use crate::config::FavoritesConfig;
use crate::core::backend::FavoritesBackend;

/// Per-key favorite status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FavoriteState {
    /// Last value acknowledged by the backend.
    pub confirmed: Option<bool>,
    /// Value currently displayed.
    pub optimistic: bool,
}

#[derive(Debug, Default)]
struct Registry {
    entries: HashMap<String, FavoriteState>,
    pending: HashSet<String>,
    /// Number of accepted toggles per key.
    generations: HashMap<String, u64>,
}

/// Result of an accepted toggle.
#[derive(Debug)]
pub struct ToggleTicket {
    /// Value displayed right after the toggle.
    pub value: bool,
    confirmation: JoinHandle<bool>,
}

impl ToggleTicket {
    /// Wait for the background call. Returns `true` if the backend accepted
    /// the change, `false` if it was rolled back.
    pub async fn settled(self) -> bool {
        self.confirmation.await.unwrap_or(false)
    }
}

/// Owns favorite state for the process lifetime.
///
/// Cloning is cheap and every clone shares the same state. `toggle` spawns
/// tokio tasks and must be called from within a runtime.
#[derive(Clone)]
pub struct FavoritesController {
    backend: Arc<dyn FavoritesBackend>,
    emitter: Arc<dyn NoticeEmitter>,
    registry: Arc<Mutex<Registry>>,
    debounce: Duration,
}

impl FavoritesController {
    pub fn new(
        backend: Arc<dyn FavoritesBackend>,
        emitter: Arc<dyn NoticeEmitter>,
        debounce: Duration,
    ) -> Self {
        Self {
            backend,
            emitter,
            registry: Arc::new(Mutex::new(Registry::default())),
            debounce,
        }
    }

    pub fn from_config(
        backend: Arc<dyn FavoritesBackend>,
        emitter: Arc<dyn NoticeEmitter>,
        config: &FavoritesConfig,
    ) -> Self {
        Self::new(backend, emitter, Duration::from_millis(config.debounce_ms))
    }

    /// Displayed value for `tour_id`, without any I/O.
    pub fn peek(&self, tour_id: &str) -> Option<bool> {
        self.lock().entries.get(tour_id).map(|entry| entry.optimistic)
    }

    /// Full state for `tour_id`, if it has been seen.
    pub fn state(&self, tour_id: &str) -> Option<FavoriteState> {
        self.lock().entries.get(tour_id).copied()
    }

    pub fn is_pending(&self, tour_id: &str) -> bool {
        self.lock().pending.contains(tour_id)
    }

    /// Favorite status for display.
    ///
    /// Once the backend has confirmed a value this returns the cached
    /// optimistic value with no I/O. Otherwise it asks the backend; a
    /// failure is logged and degrades to `false`, and the next call retries.
    pub async fn check(&self, tour_id: &str) -> bool {
        {
            let registry = self.lock();
            if let Some(entry) = registry.entries.get(tour_id) {
                if entry.confirmed.is_some() {
                    return entry.optimistic;
                }
            }
        }

        let result = self.backend.check_favorite(tour_id).await;

        let mut registry = self.lock();
        let in_flight = registry.pending.contains(tour_id);
        let entry = registry.entries.entry(tour_id.to_string()).or_default();
        match result {
            Ok(value) => {
                entry.confirmed = Some(value);
                if !in_flight {
                    entry.optimistic = value;
                }
                entry.optimistic
            }
            Err(e) => {
                debug!(tour_id, error = %e, "Favorite check failed, assuming not favorited");
                entry.optimistic
            }
        }
    }

    /// Check many ids concurrently. A slow or failed check never blocks or
    /// fails the others.
    pub async fn check_many<S: AsRef<str>>(&self, tour_ids: &[S]) -> HashMap<String, bool> {
        let checks = tour_ids.iter().map(|id| async move {
            let id = id.as_ref();
            (id.to_string(), self.check(id).await)
        });
        join_all(checks).await.into_iter().collect()
    }

    /// Flip the displayed value and reconcile with the backend in the
    /// background.
    ///
    /// Returns `None` when the key is still pending from a previous toggle;
    /// that call is dropped, not queued.
    pub fn toggle(&self, tour_id: &str) -> Option<ToggleTicket> {
        let (previous, generation) = {
            let mut registry = self.lock();
            if registry.pending.contains(tour_id) {
                debug!(tour_id, "Toggle dropped, previous toggle still settling");
                return None;
            }
            let entry = registry.entries.entry(tour_id.to_string()).or_default();
            let previous = entry.optimistic;
            entry.optimistic = !previous;
            registry.pending.insert(tour_id.to_string());
            let generation = registry.generations.entry(tour_id.to_string()).or_insert(0);
            *generation += 1;
            (previous, *generation)
        };

        self.schedule_release(tour_id.to_string());
        let confirmation = self.spawn_confirmation(tour_id.to_string(), previous, generation);

        Some(ToggleTicket {
            value: !previous,
            confirmation,
        })
    }

    fn schedule_release(&self, tour_id: String) {
        let registry = Arc::clone(&self.registry);
        let debounce = self.debounce;
        tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            lock_registry(&registry).pending.remove(&tour_id);
        });
    }

    fn spawn_confirmation(&self, tour_id: String, previous: bool, generation: u64) -> JoinHandle<bool> {
        let backend = Arc::clone(&self.backend);
        let emitter = Arc::clone(&self.emitter);
        let registry = Arc::clone(&self.registry);

        tokio::spawn(async move {
            let result = if previous {
                backend.remove_favorite(&tour_id).await
            } else {
                backend.add_favorite(&tour_id).await
            };

            match result {
                Ok(()) => {
                    let mut guard = lock_registry(&registry);
                    let entry = guard.entries.entry(tour_id).or_default();
                    entry.confirmed = Some(!previous);
                    true
                }
                Err(e) => {
                    let superseded = {
                        let mut guard = lock_registry(&registry);
                        let superseded = guard.generations.get(&tour_id) != Some(&generation);
                        if !superseded {
                            guard.entries.entry(tour_id.clone()).or_default().optimistic = previous;
                        }
                        superseded
                    };
                    if superseded {
                        warn!(tour_id = %tour_id, error = %e, "Favorite change failed after a newer toggle, keeping displayed value");
                        return false;
                    }

                    warn!(tour_id = %tour_id, error = %e, "Favorite change failed, rolling back");
                    let message = if previous {
                        "Could not remove this tour from your favorites"
                    } else {
                        "Could not add this tour to your favorites"
                    };
                    emitter.emit(FavoriteNotice {
                        tour_id,
                        restored: previous,
                        message: message.to_string(),
                    });
                    false
                }
            }
        })
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        lock_registry(&self.registry)
    }
}

fn lock_registry(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
