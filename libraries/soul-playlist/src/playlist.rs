//! Playlist aggregate

use crate::duration::DurationLimit;
use crate::load_errors::LoadErrors;
use crate::orchestrator::{CompletionCallback, LoadSession};
use crate::resolver::Resolver;
use crate::shuffle::shuffle;
use crate::types::{LoadError, LoadState, LoadSummary, PlayableTrack, PlaylistRecord};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;
use tracing::{debug, info};

pub(crate) struct PlaylistShared<T> {
    pub(crate) name: String,
    pub(crate) items: Vec<String>,
    pub(crate) shuffle: bool,
    owner_id: String,
    group_id: String,
    progress: Mutex<LoadProgress<T>>,
}

pub(crate) struct LoadProgress<T> {
    pub(crate) state: LoadState,
    pub(crate) tracks: Vec<T>,
    pub(crate) errors: LoadErrors,
    pub(crate) processed: usize,
}

impl<T> PlaylistShared<T> {
    // Every mutation leaves the progress consistent, so a poisoned lock is still usable
    pub(crate) fn lock(&self) -> MutexGuard<'_, LoadProgress<T>> {
        self.progress.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A named playlist and the result of loading it
///
/// Cloning yields another handle to the same playlist. Resolver callbacks keep
/// the shared state alive until the load has finished.
pub struct Playlist<T> {
    shared: Arc<PlaylistShared<T>>,
}

impl<T> Clone for Playlist<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: PlayableTrack> Playlist<T> {
    /// Create a playlist from already-ordered items
    pub fn new(
        name: impl Into<String>,
        items: Vec<String>,
        shuffle: bool,
        owner_id: impl Into<String>,
        group_id: impl Into<String>,
    ) -> Self {
        Self {
            shared: Arc::new(PlaylistShared {
                name: name.into(),
                items,
                shuffle,
                owner_id: owner_id.into(),
                group_id: group_id.into(),
                progress: Mutex::new(LoadProgress {
                    state: LoadState::NotStarted,
                    tracks: Vec::new(),
                    errors: LoadErrors::new(),
                    processed: 0,
                }),
            }),
        }
    }

    /// Create a playlist from its persisted form
    ///
    /// Items are shuffled up front when the record asks for it, so error
    /// indices refer to the shuffled order.
    pub fn from_record(record: PlaylistRecord) -> Self {
        let PlaylistRecord {
            name,
            author_id,
            guild_id,
            shuffle: shuffle_requested,
            tracks: mut items,
        } = record;

        if shuffle_requested {
            shuffle(&mut items);
        }

        Self::new(name, items, shuffle_requested, author_id, guild_id)
    }

    pub fn name(&self) -> &str {
        &self.shared.name
    }

    pub fn items(&self) -> &[String] {
        &self.shared.items
    }

    pub fn owner_id(&self) -> &str {
        &self.shared.owner_id
    }

    pub fn group_id(&self) -> &str {
        &self.shared.group_id
    }

    pub fn shuffle_requested(&self) -> bool {
        self.shared.shuffle
    }

    pub fn load_state(&self) -> LoadState {
        self.shared.lock().state
    }

    /// Accepted tracks so far
    ///
    /// Only stable once the completion callback has fired.
    pub fn tracks(&self) -> Vec<T> {
        self.shared.lock().tracks.clone()
    }

    /// Failed items so far, in the order they were observed
    pub fn errors(&self) -> Vec<LoadError> {
        self.shared.lock().errors.as_slice().to_vec()
    }

    /// Tracks and errors in one consistent snapshot
    pub fn summary(&self) -> LoadSummary<T> {
        let progress = self.shared.lock();
        LoadSummary {
            tracks: progress.tracks.clone(),
            errors: progress.errors.as_slice().to_vec(),
        }
    }

    /// Re-permute the accepted tracks in place
    pub fn shuffle_tracks(&self) {
        shuffle(&mut self.shared.lock().tracks);
    }

    /// Submit every item to `resolver`
    ///
    /// Returns `false` without doing anything if this playlist has already
    /// started loading. Otherwise returns as soon as all items are submitted.
    /// `on_track` runs once per accepted track; `on_complete` runs once after
    /// every item has reported. An empty playlist completes immediately.
    ///
    /// An item the resolver never reports on leaves the playlist `Loading`
    /// forever; use a resolver with a timeout if that matters.
    pub fn load<R, F>(
        &self,
        resolver: &R,
        limit: DurationLimit,
        on_track: F,
        on_complete: Option<CompletionCallback>,
    ) -> bool
    where
        R: Resolver<T> + ?Sized,
        F: Fn(T) + Send + Sync + 'static,
    {
        {
            let mut progress = self.shared.lock();
            if progress.state != LoadState::NotStarted {
                debug!(
                    "Playlist {} already {:?}, ignoring load",
                    self.shared.name, progress.state
                );
                return false;
            }
            progress.state = LoadState::Loading;
        }

        info!(
            "Loading playlist {} ({} items, shuffle: {})",
            self.shared.name,
            self.shared.items.len(),
            self.shared.shuffle
        );

        let session = Arc::new(LoadSession::new(
            Arc::clone(&self.shared),
            limit,
            Box::new(on_track),
            on_complete,
        ));

        if self.shared.items.is_empty() {
            session.finish_empty();
            return true;
        }

        for (index, item) in self.shared.items.iter().enumerate() {
            let session = Arc::clone(&session);
            resolver.submit(
                &self.shared.name,
                item,
                Box::new(move |outcome| session.handle(index, outcome)),
            );
        }

        true
    }

    /// Load and wait for completion
    ///
    /// Returns `None` if the playlist had already started loading.
    pub async fn load_to_completion<R>(
        &self,
        resolver: &R,
        limit: DurationLimit,
    ) -> Option<LoadSummary<T>>
    where
        R: Resolver<T> + ?Sized,
    {
        let (done_tx, done_rx) = oneshot::channel();
        let started = self.load(
            resolver,
            limit,
            |_track: T| {},
            Some(Box::new(move || {
                let _ = done_tx.send(());
            })),
        );

        if !started {
            return None;
        }

        done_rx.await.ok()?;
        Some(self.summary())
    }
}

impl<T> std::fmt::Debug for Playlist<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Playlist")
            .field("name", &self.shared.name)
            .field("items", &self.shared.items.len())
            .field("shuffle", &self.shared.shuffle)
            .finish_non_exhaustive()
    }
}
