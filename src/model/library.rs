//! Shared catalog and track state with a fixed lock order
//!
//! The catalog mutex is always taken before the track mutex. The track mutex
//! is only reachable through [`Library::lock_all`] (or its blocking twin), which
//! acquires the catalog first, so no caller can take them the other way round.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Mutex, MutexGuard};

use super::cache::TrackCache;
use super::catalog::Catalog;

#[derive(Debug, Default)]
pub struct Library {
    loaded: AtomicBool,
    catalog: Mutex<Catalog>,
    tracks: Mutex<TrackCache>,
}

/// Both library locks, held together.
pub struct LibraryGuard<'a> {
    pub catalog: MutexGuard<'a, Catalog>,
    pub tracks: MutexGuard<'a, TrackCache>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the backend finished loading the playlist container.
    ///
    /// Lock-free, so a not-ready answer never waits on the backend.
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    pub fn set_loaded(&self, loaded: bool) {
        self.loaded.store(loaded, Ordering::Release);
    }

    pub async fn lock_catalog(&self) -> MutexGuard<'_, Catalog> {
        self.catalog.lock().await
    }

    pub async fn lock_all(&self) -> LibraryGuard<'_> {
        let catalog = self.catalog.lock().await;
        let tracks = self.tracks.lock().await;
        LibraryGuard { catalog, tracks }
    }

    /// For backend threads running outside the async runtime.
    pub fn blocking_lock_all(&self) -> LibraryGuard<'_> {
        let catalog = self.catalog.blocking_lock();
        let tracks = self.tracks.blocking_lock();
        LibraryGuard { catalog, tracks }
    }
}
