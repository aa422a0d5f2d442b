//! Playlist and track listings

use crate::model::{LibraryGuard, PlaybackQueue, Playlist, Track, TrackCache, TrackId};

use super::{offset, one_line, resolve_playlist, CommandError, CommandLayer, Reply};

impl<Q: PlaybackQueue> CommandLayer<Q> {
    /// One line per loaded playlist: `<index> <name> (<track count>)`.
    ///
    /// Unloaded playlists are skipped without renumbering the rest.
    pub async fn list_playlists(&self) -> Reply {
        if let Err(err) = self.ensure_loaded() {
            return Reply::from(Err(err));
        }

        let guard = self.library().lock_all().await;
        tracing::debug!(playlists = guard.catalog.len(), "Listing playlists");
        Reply::from(format_playlists(&guard))
    }

    /// One line per loaded track of playlist `playlist` (1-based).
    pub async fn list_tracks(&self, playlist: i64) -> Reply {
        if let Err(err) = self.ensure_loaded() {
            return Reply::from(Err(err));
        }

        let guard = self.library().lock_all().await;
        Reply::from(format_tracks(&guard, playlist))
    }
}

/// Track list of `playlist`. Its length is the playlist's length for
/// listing and selection alike.
pub(crate) fn playlist_tracks<'a>(
    tracks: &'a TrackCache,
    playlist: &Playlist,
) -> Result<&'a [TrackId], CommandError> {
    tracks.tracks_of(playlist.id).ok_or_else(|| {
        CommandError::Inconsistent(format!("no track list for {}", playlist.id))
    })
}

fn format_playlists(guard: &LibraryGuard<'_>) -> Result<String, CommandError> {
    let mut out = String::new();
    for (i, playlist) in guard.catalog.iter().enumerate() {
        if !playlist.loaded {
            continue;
        }
        let count = playlist_tracks(&guard.tracks, playlist)?.len();
        out.push_str(&format!("{} {} ({})\n", i + 1, one_line(&playlist.name), count));
    }
    Ok(out)
}

fn format_tracks(guard: &LibraryGuard<'_>, index: i64) -> Result<String, CommandError> {
    let playlist = resolve_playlist(&guard.catalog, index)?;
    let ids = playlist_tracks(&guard.tracks, playlist)?;

    let mut out = String::new();
    for (i, id) in ids.iter().enumerate() {
        let track = guard
            .tracks
            .get(*id)
            .ok_or_else(|| CommandError::Inconsistent(format!("{} missing from cache", id)))?;
        if !track.loaded {
            continue;
        }
        out.push_str(&track_line(i + 1, track));
    }
    Ok(out)
}

/// `<n>[-] <artist> -- "<album>" -- "<title>" (<m:ss>) URI:<uri>`, where `-`
/// marks a track that cannot be played.
pub(crate) fn track_line(position: usize, track: &Track) -> String {
    format!(
        "{}{} {} -- \"{}\" -- \"{}\" ({}) URI:{}\n",
        position,
        if track.available { "" } else { "-" },
        one_line(&track.artist),
        one_line(&track.album),
        one_line(&track.title),
        track.duration_display(),
        one_line(&track.uri),
    )
}

/// Track at 1-based `index` of playlist `playlist`, cloned out of the cache.
pub(crate) fn resolve_track(
    guard: &LibraryGuard<'_>,
    playlist: i64,
    index: i64,
) -> Result<Track, CommandError> {
    let playlist = resolve_playlist(&guard.catalog, playlist)?;
    let ids = playlist_tracks(&guard.tracks, playlist)?;
    let offset = offset(index, ids.len()).ok_or(CommandError::InvalidTrack)?;
    guard
        .tracks
        .get(ids[offset])
        .cloned()
        .ok_or_else(|| CommandError::Inconsistent(format!("{} missing from cache", ids[offset])))
}
