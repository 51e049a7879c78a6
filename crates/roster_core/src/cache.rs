//! In-memory snapshot of every entity of one type.
//!
//! # Responsibility
//! - Hold the read model served by list/filter/sort/statistics operations.
//! - Replace that model wholesale after each successful write.
//!
//! # Invariants
//! - Readers always see a complete snapshot, either the one before a refresh
//!   or the one after it.
//! - A failed reload leaves the published snapshot untouched.
//! - Refreshes are serialized: a snapshot loaded earlier is never published
//!   over one loaded later.

use crate::model::Entity;
use arc_swap::ArcSwap;
use log::{debug, error};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Atomically swapped, immutable snapshot of one entity type.
pub struct CachePool<T: Entity> {
    snapshot: ArcSwap<Vec<T>>,
    refresh_lock: Mutex<()>,
}

impl<T: Entity> CachePool<T> {
    /// Creates an empty pool. Services fill it with `refresh` on construction.
    pub fn empty() -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(Vec::new()),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Returns the currently published snapshot.
    pub fn snapshot(&self) -> Arc<Vec<T>> {
        self.snapshot.load_full()
    }

    /// Number of entities in the current snapshot.
    pub fn len(&self) -> usize {
        self.snapshot.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reloads the full entity list and publishes it in one swap.
    ///
    /// Returns the loader error unchanged; the old snapshot stays published.
    pub fn refresh<E, F>(&self, loader: F) -> Result<usize, E>
    where
        F: FnOnce() -> Result<Vec<T>, E>,
        E: std::fmt::Display,
    {
        let started_at = Instant::now();
        // Poisoning only means a previous loader panicked; the guarded state is `()`.
        let _guard = self
            .refresh_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        match loader() {
            Ok(entities) => {
                let size = entities.len();
                self.snapshot.store(Arc::new(entities));
                debug!(
                    "event=cache_refresh module=cache status=ok entity={} size={} duration_ms={}",
                    T::KIND,
                    size,
                    started_at.elapsed().as_millis()
                );
                Ok(size)
            }
            Err(err) => {
                error!(
                    "event=cache_refresh module=cache status=error entity={} duration_ms={} error={}",
                    T::KIND,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}
