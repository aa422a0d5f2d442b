//! Per-playlist track sequences and track metadata

use std::collections::HashMap;

use super::types::{PlaylistId, Track, TrackId};

/// Track metadata keyed by handle, plus the ordered track list of each playlist.
///
/// A track can appear in several playlists; it is stored once.
#[derive(Debug, Default)]
pub struct TrackCache {
    tracks: HashMap<TrackId, Track>,
    playlists: HashMap<PlaylistId, Vec<TrackId>>,
    next_id: u64,
}

/// Fields of a track before it gets a handle.
#[derive(Clone, Debug, Default)]
pub struct NewTrack {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub uri: String,
    pub duration_secs: u32,
    pub loaded: bool,
    pub available: bool,
}

impl TrackCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, track: NewTrack) -> TrackId {
        let id = TrackId(self.next_id);
        self.next_id += 1;
        self.tracks.insert(
            id,
            Track {
                id,
                title: track.title,
                artist: track.artist,
                album: track.album,
                uri: track.uri,
                duration_secs: track.duration_secs,
                loaded: track.loaded,
                available: track.available,
            },
        );
        id
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(&id)
    }

    /// Ordered tracks of a playlist, `None` when the playlist is unknown to the cache.
    ///
    /// This is the only record of a playlist's length.
    pub fn tracks_of(&self, playlist: PlaylistId) -> Option<&[TrackId]> {
        self.playlists.get(&playlist).map(Vec::as_slice)
    }

    pub fn set_playlist_tracks(&mut self, playlist: PlaylistId, tracks: Vec<TrackId>) {
        self.playlists.insert(playlist, tracks);
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
        self.playlists.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_playlist_has_no_sequence() {
        let cache = TrackCache::new();
        assert!(cache.tracks_of(PlaylistId(7)).is_none());
    }

    #[test]
    fn shared_track_is_stored_once() {
        let mut cache = TrackCache::new();
        let t = cache.insert(NewTrack {
            title: "Song".to_string(),
            loaded: true,
            available: true,
            ..Default::default()
        });
        cache.set_playlist_tracks(PlaylistId(0), vec![t]);
        cache.set_playlist_tracks(PlaylistId(1), vec![t, t]);

        assert_eq!(cache.tracks_of(PlaylistId(0)), Some(&[t][..]));
        assert_eq!(cache.tracks_of(PlaylistId(1)).map(<[_]>::len), Some(2));
        assert_eq!(cache.get(t).map(|track| track.title.as_str()), Some("Song"));
    }

    #[test]
    fn replacing_a_track_list_changes_its_length() {
        let mut cache = TrackCache::new();
        let a = cache.insert(NewTrack::default());
        let b = cache.insert(NewTrack::default());
        cache.set_playlist_tracks(PlaylistId(3), vec![a]);
        cache.set_playlist_tracks(PlaylistId(3), vec![a, b]);
        assert_eq!(cache.tracks_of(PlaylistId(3)).map(<[_]>::len), Some(2));

        cache.clear();
        assert!(cache.get(a).is_none());
        assert!(cache.tracks_of(PlaylistId(3)).is_none());
    }
}
