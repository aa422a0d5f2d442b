//! Commands module - Playback and catalog commands over shared state
//!
//! Each command takes the locks it needs (catalog before tracks), validates
//! the 1-based indices supplied by the client, and returns a [`Reply`].
//! It is organized into submodules by responsibility:
//!
//! - `listing`: Playlist and track listings
//! - `playback`: Status report and queue control
//! - `reply`: Tagged results and wire rendering

mod listing;
mod playback;
mod reply;

use std::borrow::Cow;
use std::sync::Arc;

use crate::model::{Catalog, Library, PlaybackQueue, Playlist};

pub use reply::{CommandError, Reply};

/// A parsed client request. Indices are 1-based as the client sees them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    ListPlaylists,
    ListTracks { playlist: i64 },
    Status,
    PlayPlaylist { playlist: i64 },
    PlayTrack { playlist: i64, track: i64 },
    Play,
    Stop,
    Toggle,
    Next,
    Prev,
    Goto { index: i64 },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::ListPlaylists => "ls",
            Command::ListTracks { .. } => "ls-tracks",
            Command::Status => "status",
            Command::PlayPlaylist { .. } => "play-playlist",
            Command::PlayTrack { .. } => "play-track",
            Command::Play => "play",
            Command::Stop => "stop",
            Command::Toggle => "toggle",
            Command::Next => "next",
            Command::Prev => "prev",
            Command::Goto { .. } => "goto",
        }
    }
}

#[derive(Clone)]
pub struct CommandLayer<Q> {
    library: Arc<Library>,
    queue: Q,
}

impl<Q: PlaybackQueue> CommandLayer<Q> {
    pub fn new(library: Arc<Library>, queue: Q) -> Self {
        Self { library, queue }
    }

    pub fn library(&self) -> &Arc<Library> {
        &self.library
    }

    pub fn queue(&self) -> &Q {
        &self.queue
    }

    pub async fn run(&self, command: Command) -> Reply {
        match command {
            Command::ListPlaylists => self.list_playlists().await,
            Command::ListTracks { playlist } => self.list_tracks(playlist).await,
            Command::Status => self.status().await,
            Command::PlayPlaylist { playlist } => self.play_playlist(playlist).await,
            Command::PlayTrack { playlist, track } => self.play_track(playlist, track).await,
            Command::Play => self.play().await,
            Command::Stop => self.stop().await,
            Command::Toggle => self.toggle().await,
            Command::Next => self.next().await,
            Command::Prev => self.prev().await,
            Command::Goto { index } => self.goto(index).await,
        }
    }

    /// Run `command` and append its rendered reply to `out`.
    pub async fn execute(&self, command: Command, out: &mut String) {
        tracing::debug!(command = command.name(), ?command, "Executing command");
        let reply = self.run(command).await;
        match &reply {
            Reply::Ready(_) => {}
            Reply::NotReady => tracing::debug!(command = command.name(), "Catalog not loaded yet"),
            Reply::Invalid(err @ CommandError::Inconsistent(_)) => {
                tracing::error!(command = command.name(), error = %err, "Library state inconsistent")
            }
            Reply::Invalid(err) => tracing::warn!(command = command.name(), error = %err, "Command rejected"),
        }
        reply.render(out);
    }

    pub(crate) fn ensure_loaded(&self) -> Result<(), CommandError> {
        if self.library.is_loaded() {
            Ok(())
        } else {
            Err(CommandError::NotReady)
        }
    }
}

/// Convert a client index to a 0-based offset into a collection of `len` items.
///
/// Zero, negative and past-the-end indices are rejected, never clamped.
pub(crate) fn offset(index: i64, len: usize) -> Option<usize> {
    let offset = usize::try_from(index.checked_sub(1)?).ok()?;
    (offset < len).then_some(offset)
}

/// Fold line breaks in a catalog string into spaces so one field stays on
/// one line of the reply.
pub(crate) fn one_line(text: &str) -> Cow<'_, str> {
    if text.contains(['\n', '\r']) {
        Cow::Owned(text.replace(['\n', '\r'], " "))
    } else {
        Cow::Borrowed(text)
    }
}

/// Bounds-checked playlist lookup. Must be called with the catalog lock held.
pub(crate) fn resolve_playlist(catalog: &Catalog, index: i64) -> Result<&Playlist, CommandError> {
    let offset = offset(index, catalog.len()).ok_or(CommandError::InvalidPlaylist)?;
    catalog
        .get(offset)
        .ok_or_else(|| CommandError::Inconsistent(format!("playlist {} vanished during lookup", index)))
}
