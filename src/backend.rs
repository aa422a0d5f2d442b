//! Library loader standing in for the streaming backend
//!
//! Reads a JSON description of playlists and tracks and publishes it into the
//! shared [`Library`] from its own task. The catalog is flagged loaded only
//! once every playlist and its tracks are in place.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;
use tokio::task::JoinHandle;

use crate::model::{Library, NewTrack};

#[derive(Debug, Default, Deserialize)]
pub struct LibraryFile {
    #[serde(default)]
    pub playlists: Vec<PlaylistEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistEntry {
    pub name: String,
    #[serde(default = "default_true")]
    pub loaded: bool,
    #[serde(default)]
    pub tracks: Vec<TrackEntry>,
}

#[derive(Debug, Deserialize)]
pub struct TrackEntry {
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub duration_secs: u32,
    #[serde(default = "default_true")]
    pub loaded: bool,
    #[serde(default = "default_true")]
    pub available: bool,
}

fn default_true() -> bool {
    true
}

pub async fn read_library_file(path: &Path) -> Result<LibraryFile> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading library {}", path.display()))?;
    let file = serde_json::from_str(&content)
        .with_context(|| format!("parsing library {}", path.display()))?;
    Ok(file)
}

/// Publish `file` into `library` under both locks, then mark it loaded.
pub async fn populate(library: &Library, file: LibraryFile) {
    {
        let mut guard = library.lock_all().await;
        guard.catalog.clear();
        guard.tracks.clear();

        for entry in file.playlists {
            let ids = entry
                .tracks
                .into_iter()
                .map(|track| {
                    guard.tracks.insert(NewTrack {
                        title: track.title,
                        artist: track.artist,
                        album: track.album,
                        uri: track.uri,
                        duration_secs: track.duration_secs,
                        loaded: track.loaded,
                        available: track.available,
                    })
                })
                .collect::<Vec<_>>();
            let id = guard.catalog.push(entry.name, entry.loaded);
            guard.tracks.set_playlist_tracks(id, ids);
        }

        tracing::info!(playlists = guard.catalog.len(), "Library published");
    }
    library.set_loaded(true);
}

/// Load `path` in the background. Failures are logged and leave the catalog unloaded.
pub fn spawn_loader(library: Arc<Library>, path: PathBuf) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::debug!(path = %path.display(), "Loading library");
        match read_library_file(&path).await {
            Ok(file) => populate(&library, file).await,
            Err(e) => tracing::error!(error = ?e, "Could not load library"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "playlists": [
            { "name": "Draft", "loaded": false },
            { "name": "Rock", "tracks": [
                { "title": "T", "artist": "A", "album": "B", "uri": "spotify:track:1", "duration_secs": 185 },
                { "title": "Gone", "available": false }
            ] }
        ]
    }"#;

    #[tokio::test]
    async fn populate_publishes_playlists_and_tracks() {
        let library = Library::new();
        let file: LibraryFile = serde_json::from_str(SAMPLE).unwrap();
        populate(&library, file).await;

        assert!(library.is_loaded());
        let guard = library.lock_all().await;
        assert_eq!(guard.catalog.len(), 2);
        assert!(!guard.catalog.get(0).unwrap().loaded);

        let rock = guard.catalog.get(1).unwrap();
        let ids = guard.tracks.tracks_of(rock.id).unwrap();
        assert_eq!(ids.len(), 2);
        let gone = guard.tracks.get(ids[1]).unwrap();
        assert!(gone.loaded);
        assert!(!gone.available);
    }

    #[tokio::test]
    async fn loader_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let library = Arc::new(Library::new());
        spawn_loader(library.clone(), file.path().to_path_buf())
            .await
            .unwrap();
        assert!(library.is_loaded());
        assert_eq!(library.lock_catalog().await.len(), 2);
    }

    #[tokio::test]
    async fn unreadable_file_leaves_catalog_unloaded() {
        let library = Arc::new(Library::new());
        spawn_loader(library.clone(), PathBuf::from("/nonexistent/library.json"))
            .await
            .unwrap();
        assert!(!library.is_loaded());
    }
}
