//! Playlist container maintained by the backend

use super::types::{Playlist, PlaylistId};

/// Ordered collection of playlists.
///
/// The backend fills it in the background. Completion of the container is
/// tracked by [`Library`](super::Library), outside of this struct's lock.
#[derive(Debug, Default)]
pub struct Catalog {
    playlists: Vec<Playlist>,
    next_id: u64,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    /// 0-based lookup.
    pub fn get(&self, index: usize) -> Option<&Playlist> {
        self.playlists.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Playlist> {
        self.playlists.iter()
    }

    /// Append a playlist and return its handle.
    pub fn push(&mut self, name: impl Into<String>, loaded: bool) -> PlaylistId {
        let id = PlaylistId(self.next_id);
        self.next_id += 1;
        self.playlists.push(Playlist {
            id,
            name: name.into(),
            loaded,
        });
        id
    }

    pub fn clear(&mut self) {
        self.playlists.clear();
    }
}
