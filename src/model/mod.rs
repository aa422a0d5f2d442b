//! Model module - Shared library state and the playback queue
//!
//! This module contains the state the backend keeps current and the command
//! layer reads. It is organized into submodules by responsibility:
//!
//! - `types`: Handles, playlist/track records, queue status
//! - `catalog`: Playlist container
//! - `cache`: Track metadata and per-playlist track lists
//! - `library`: Locking wrapper enforcing the catalog → tracks order
//! - `playback`: Queue contract, status snapshot, in-process queue

mod types;
mod catalog;
mod cache;
mod library;
mod playback;

pub use types::{format_duration, Playlist, PlaylistId, QueueStatus, Track, TrackId};

pub use catalog::Catalog;

pub use cache::{NewTrack, TrackCache};

pub use library::{Library, LibraryGuard};

pub use playback::{LocalQueue, PlaybackQueue, StatusSnapshot};
