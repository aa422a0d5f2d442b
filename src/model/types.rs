//! Core type definitions shared by the library and the playback queue

use std::fmt;

/// Stable handle of a playlist inside the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaylistId(pub u64);

/// Stable handle of a track inside the track cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(pub u64);

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "playlist#{}", self.0)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "track#{}", self.0)
    }
}

/// A playlist entry of the catalog.
///
/// Its length is the length of its track list in the
/// [`TrackCache`](super::TrackCache); the catalog does not keep a copy.
#[derive(Clone, Debug)]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    pub loaded: bool,
}

/// Metadata about a single track
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub uri: String,
    pub duration_secs: u32,
    pub loaded: bool,
    pub available: bool,
}

impl Track {
    /// `m:ss` rendering of the track length. Minutes are not capped at 59.
    pub fn duration_display(&self) -> String {
        format_duration(self.duration_secs)
    }
}

pub fn format_duration(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}

/// Playback state as reported by the queue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum QueueStatus {
    Playing,
    Paused,
    #[default]
    Stopped,
}

impl QueueStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            QueueStatus::Playing => "playing",
            QueueStatus::Paused => "paused",
            QueueStatus::Stopped => "stopped",
        }
    }
}

impl fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
