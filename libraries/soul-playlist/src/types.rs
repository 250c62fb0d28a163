//! Core types for playlist loading

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// A playable track handle produced by a resolver
///
/// Handles are cheap to clone: the loader keeps one copy in the playlist and
/// hands another to the per-track callback.
pub trait PlayableTrack: Clone + Send + 'static {
    /// Track length
    fn duration(&self) -> Duration;

    /// Overwrite the user data slot
    ///
    /// The loader resets this to `0` before a track is accepted. Playback code
    /// uses the slot for position bookkeeping.
    fn set_user_data(&mut self, data: u64);
}

/// Resolved track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Resolver-specific identifier
    pub identifier: String,

    /// Track title
    pub title: String,

    /// Uploader or artist name
    pub author: String,

    /// Playable location, if the resolver exposes one
    pub uri: Option<String>,

    /// Track duration
    pub duration: Duration,

    /// Playback bookkeeping slot
    pub user_data: u64,
}

impl Track {
    /// Create a track with no author or uri
    pub fn new(identifier: impl Into<String>, title: impl Into<String>, duration: Duration) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
            author: String::new(),
            uri: None,
            duration,
            user_data: 0,
        }
    }

    /// Set the author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Set the playable uri
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }
}

impl PlayableTrack for Track {
    fn duration(&self) -> Duration {
        self.duration
    }

    fn set_user_data(&mut self, data: u64) {
        self.user_data = data;
    }
}

/// Load lifecycle of a playlist
///
/// Moves `NotStarted -> Loading -> Done` exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadState {
    /// `load` has not been called
    NotStarted,

    /// Items submitted, waiting on resolver results
    Loading,

    /// Every item has reported an outcome
    Done,
}

/// Why a playlist item failed to contribute a track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadErrorReason {
    /// Single track longer than the configured maximum
    DurationExceeded,

    /// Resolver found nothing for the reference
    NoMatch,

    /// Resolver reported a failure; message is passed through verbatim
    ResolutionFailed(String),
}

impl fmt::Display for LoadErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadErrorReason::DurationExceeded => f.write_str("exceeds maximum duration"),
            LoadErrorReason::NoMatch => f.write_str("no matches found"),
            LoadErrorReason::ResolutionFailed(message) => f.write_str(message),
        }
    }
}

/// A playlist item that failed to load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadError {
    /// 0-based position in the playlist items
    pub index: usize,

    /// Original reference string
    pub item: String,

    /// Failure classification
    pub reason: LoadErrorReason,
}

impl LoadError {
    /// Create a load error
    pub fn new(index: usize, item: impl Into<String>, reason: LoadErrorReason) -> Self {
        Self {
            index,
            item: item.into(),
            reason,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.index + 1, self.item, self.reason)
    }
}

/// Persisted playlist document
///
/// Field names follow the on-disk JSON layout
/// (`name`, `authorId`, `guildId`, `shuffle`, `tracks`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistRecord {
    /// Playlist name
    pub name: String,

    /// Owner identity, opaque to the loader
    pub author_id: String,

    /// Group identity, opaque to the loader
    pub guild_id: String,

    /// Whether items and tracks are shuffled on load
    #[serde(default)]
    pub shuffle: bool,

    /// Raw track references
    #[serde(default)]
    pub tracks: Vec<String>,
}

impl PlaylistRecord {
    /// Create an empty, unshuffled record
    pub fn new(
        name: impl Into<String>,
        author_id: impl Into<String>,
        guild_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            author_id: author_id.into(),
            guild_id: guild_id.into(),
            shuffle: false,
            tracks: Vec::new(),
        }
    }
}

/// Snapshot of a finished load
#[derive(Debug, Clone, PartialEq)]
pub struct LoadSummary<T> {
    /// Accepted tracks in final order
    pub tracks: Vec<T>,

    /// Per-item failures in the order they were observed
    pub errors: Vec<LoadError>,
}
