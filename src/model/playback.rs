//! Playback queue contract and the in-process queue

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::library::Library;
use super::types::{PlaylistId, QueueStatus, Track};

/// Point-in-time view of the queue, built for one status report.
#[derive(Clone, Debug, Default)]
pub struct StatusSnapshot {
    pub status: QueueStatus,
    pub current: Option<Track>,
    /// 0-based position of `current` in the queue.
    pub current_index: usize,
    pub total_tracks: usize,
}

/// Control surface of the playback queue.
///
/// After any control call returns, the next [`snapshot`](Self::snapshot)
/// reflects the new state.
pub trait PlaybackQueue: Send + Sync {
    fn snapshot(&self) -> impl Future<Output = StatusSnapshot> + Send;
    fn load_playlist(&self, playlist: PlaylistId) -> impl Future<Output = ()> + Send;
    fn load_track(&self, track: Track) -> impl Future<Output = ()> + Send;
    fn play(&self) -> impl Future<Output = ()> + Send;
    fn stop(&self) -> impl Future<Output = ()> + Send;
    fn toggle(&self) -> impl Future<Output = ()> + Send;
    fn next(&self) -> impl Future<Output = ()> + Send;
    fn prev(&self) -> impl Future<Output = ()> + Send;
    /// Jump to a 0-based queue position.
    fn seek(&self, index: usize) -> impl Future<Output = ()> + Send;
}

#[derive(Debug, Default)]
struct QueueState {
    status: QueueStatus,
    tracks: Vec<Track>,
    current: usize,
}

/// Queue kept in process memory. It records what should be playing; the
/// audio backend follows it.
#[derive(Clone)]
pub struct LocalQueue {
    library: Arc<Library>,
    state: Arc<Mutex<QueueState>>,
}

impl LocalQueue {
    pub fn new(library: Arc<Library>) -> Self {
        Self {
            library,
            state: Arc::new(Mutex::new(QueueState::default())),
        }
    }
}

impl PlaybackQueue for LocalQueue {
    async fn snapshot(&self) -> StatusSnapshot {
        let state = self.state.lock().await;
        StatusSnapshot {
            status: state.status,
            current: state.tracks.get(state.current).cloned(),
            current_index: state.current,
            total_tracks: state.tracks.len(),
        }
    }

    async fn load_playlist(&self, playlist: PlaylistId) {
        let tracks: Vec<Track> = {
            let guard = self.library.lock_all().await;
            match guard.tracks.tracks_of(playlist) {
                Some(ids) => ids
                    .iter()
                    .filter_map(|id| {
                        let track = guard.tracks.get(*id);
                        if track.is_none() {
                            tracing::warn!(%playlist, track = %id, "Track missing from cache, skipped");
                        }
                        track.cloned()
                    })
                    .collect(),
                None => {
                    tracing::warn!(%playlist, "No track list for playlist, queue emptied");
                    Vec::new()
                }
            }
        };

        let mut state = self.state.lock().await;
        tracing::debug!(%playlist, tracks = tracks.len(), "Queue loaded from playlist");
        state.tracks = tracks;
        state.current = 0;
        state.status = QueueStatus::Stopped;
    }

    async fn load_track(&self, track: Track) {
        let mut state = self.state.lock().await;
        tracing::debug!(track = %track.id, title = %track.title, "Queue loaded with single track");
        state.tracks = vec![track];
        state.current = 0;
        state.status = QueueStatus::Stopped;
    }

    async fn play(&self) {
        let mut state = self.state.lock().await;
        if state.tracks.is_empty() {
            tracing::debug!("Play requested on empty queue");
            return;
        }
        state.status = QueueStatus::Playing;
    }

    async fn stop(&self) {
        self.state.lock().await.status = QueueStatus::Stopped;
    }

    async fn toggle(&self) {
        let mut state = self.state.lock().await;
        state.status = match state.status {
            QueueStatus::Playing => QueueStatus::Paused,
            QueueStatus::Paused => QueueStatus::Playing,
            QueueStatus::Stopped if state.tracks.is_empty() => QueueStatus::Stopped,
            QueueStatus::Stopped => QueueStatus::Playing,
        };
    }

    async fn next(&self) {
        let mut state = self.state.lock().await;
        if state.tracks.is_empty() {
            return;
        }
        if state.current + 1 < state.tracks.len() {
            state.current += 1;
        } else {
            tracing::debug!("End of queue reached");
            state.current = 0;
            state.status = QueueStatus::Stopped;
        }
    }

    async fn prev(&self) {
        let mut state = self.state.lock().await;
        state.current = state.current.saturating_sub(1);
    }

    async fn seek(&self, index: usize) {
        let mut state = self.state.lock().await;
        if index >= state.tracks.len() {
            tracing::warn!(index, total = state.tracks.len(), "Seek beyond end of queue ignored");
            return;
        }
        state.current = index;
        state.status = QueueStatus::Playing;
    }
}
