//! Status report and playback control

use crate::model::{PlaybackQueue, QueueStatus, StatusSnapshot};

use super::listing::resolve_track;
use super::{one_line, resolve_playlist, CommandError, CommandLayer, Reply};

impl<Q: PlaybackQueue> CommandLayer<Q> {
    pub async fn status(&self) -> Reply {
        let snapshot = self.queue().snapshot().await;
        Reply::from(format_status(&snapshot))
    }

    pub async fn play_playlist(&self, playlist: i64) -> Reply {
        if let Err(err) = self.ensure_loaded() {
            return Reply::from(Err(err));
        }

        // The catalog lock is released before the queue takes its own locks.
        let id = {
            let catalog = self.library().lock_catalog().await;
            match resolve_playlist(&catalog, playlist) {
                Ok(found) => found.id,
                Err(err) => return Reply::from(Err(err)),
            }
        };

        tracing::info!(playlist = %id, "Playing playlist");
        self.queue().load_playlist(id).await;
        self.queue().play().await;
        self.status().await
    }

    pub async fn play_track(&self, playlist: i64, track: i64) -> Reply {
        if let Err(err) = self.ensure_loaded() {
            return Reply::from(Err(err));
        }

        let track = {
            let guard = self.library().lock_all().await;
            match resolve_track(&guard, playlist, track) {
                Ok(found) => found,
                Err(err) => return Reply::from(Err(err)),
            }
        };

        tracing::info!(track = %track.id, title = %track.title, "Playing track");
        self.queue().load_track(track).await;
        self.queue().play().await;
        self.status().await
    }

    pub async fn play(&self) -> Reply {
        self.queue().play().await;
        self.status().await
    }

    pub async fn stop(&self) -> Reply {
        self.queue().stop().await;
        self.status().await
    }

    pub async fn toggle(&self) -> Reply {
        self.queue().toggle().await;
        self.status().await
    }

    pub async fn next(&self) -> Reply {
        self.queue().next().await;
        self.status().await
    }

    pub async fn prev(&self) -> Reply {
        self.queue().prev().await;
        self.status().await
    }

    /// Jump to the 1-based queue position `index`.
    pub async fn goto(&self, index: i64) -> Reply {
        let Some(target) = index.checked_sub(1).and_then(|i| usize::try_from(i).ok()) else {
            return Reply::Invalid(CommandError::InvalidTrack);
        };
        self.queue().seek(target).await;
        self.status().await
    }
}

pub(crate) fn format_status(snapshot: &StatusSnapshot) -> Result<String, CommandError> {
    let mut out = format!(
        "Status: {}\nTotal tracks: {}\n",
        snapshot.status, snapshot.total_tracks
    );
    if snapshot.status == QueueStatus::Stopped {
        return Ok(out);
    }

    let track = snapshot.current.as_ref().ok_or_else(|| {
        CommandError::Inconsistent(format!("queue is {} without a current track", snapshot.status))
    })?;
    out.push_str(&format!("Current track: {}\n", snapshot.current_index + 1));
    out.push_str(&format!(
        "Artist: {}\nTitle: {}\nAlbum: {}\n",
        one_line(&track.artist),
        one_line(&track.title),
        one_line(&track.album)
    ));
    out.push_str(&format!(
        "Duration: {}\nURI: {}\n",
        track.duration_display(),
        one_line(&track.uri)
    ));
    Ok(out)
}
