//! Resolution orchestrator
//!
//! One `LoadSession` exists per started load. Every submitted item holds a
//! reference to it and reports back through `handle`. Completion is tracked
//! with a processed-item counter, so `on_complete` fires exactly once no matter
//! which item reports last.

use crate::duration::DurationLimit;
use crate::playlist::{LoadProgress, PlaylistShared};
use crate::resolver::{ResolveOutcome, TrackCollection};
use crate::shuffle::shuffle;
use crate::types::{LoadError, LoadErrorReason, LoadState, PlayableTrack};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

/// Called once per accepted track
pub type TrackCallback<T> = Box<dyn Fn(T) + Send + Sync + 'static>;

/// Called once when every item has reported
pub type CompletionCallback = Box<dyn FnOnce() + Send + 'static>;

pub(crate) struct LoadSession<T> {
    shared: Arc<PlaylistShared<T>>,
    limit: DurationLimit,
    on_track: TrackCallback<T>,
    on_complete: Mutex<Option<CompletionCallback>>,
}

impl<T: PlayableTrack> LoadSession<T> {
    pub(crate) fn new(
        shared: Arc<PlaylistShared<T>>,
        limit: DurationLimit,
        on_track: TrackCallback<T>,
        on_complete: Option<CompletionCallback>,
    ) -> Self {
        Self {
            shared,
            limit,
            on_track,
            on_complete: Mutex::new(on_complete),
        }
    }

    /// Record the outcome for item `index`
    ///
    /// Mutations happen under the playlist lock; callbacks run after it is
    /// released so they may read the playlist. The item only counts as
    /// processed once its `on_track` calls have returned, so `on_complete`
    /// never overtakes a track callback running on another thread.
    pub(crate) fn handle(&self, index: usize, outcome: ResolveOutcome<T>) {
        let accepted = {
            let mut progress = self.shared.lock();
            self.apply(&mut progress, index, outcome)
        };

        for track in accepted {
            (self.on_track)(track);
        }

        let finished = {
            let mut progress = self.shared.lock();
            progress.processed += 1;
            let finished = progress.processed == self.shared.items.len();
            if finished {
                self.finalize(&mut progress);
            }
            finished
        };

        if finished {
            self.complete();
        }
    }

    /// Finish a load that had nothing to submit
    pub(crate) fn finish_empty(&self) {
        {
            let mut progress = self.shared.lock();
            self.finalize(&mut progress);
        }
        self.complete();
    }

    fn apply(
        &self,
        progress: &mut LoadProgress<T>,
        index: usize,
        outcome: ResolveOutcome<T>,
    ) -> Vec<T> {
        match outcome {
            ResolveOutcome::Track(track) => self.accept_single(progress, index, track),
            ResolveOutcome::Collection(collection) => {
                self.accept_collection(progress, index, collection)
            }
            ResolveOutcome::NoMatch => {
                self.record(progress, index, LoadErrorReason::NoMatch);
                Vec::new()
            }
            ResolveOutcome::Failed(message) => {
                self.record(progress, index, LoadErrorReason::ResolutionFailed(message));
                Vec::new()
            }
        }
    }

    fn accept_single(&self, progress: &mut LoadProgress<T>, index: usize, mut track: T) -> Vec<T> {
        if self.limit.exceeds(&track) {
            self.record(progress, index, LoadErrorReason::DurationExceeded);
            return Vec::new();
        }

        track.set_user_data(0);
        progress.tracks.push(track.clone());
        vec![track]
    }

    fn accept_collection(
        &self,
        progress: &mut LoadProgress<T>,
        index: usize,
        collection: TrackCollection<T>,
    ) -> Vec<T> {
        let TrackCollection {
            name,
            tracks,
            selected,
            is_search_result,
        } = collection;

        if is_search_result {
            return match tracks.into_iter().next() {
                Some(first) => self.accept_single(progress, index, first),
                // An empty hit list would otherwise never account for the item
                None => {
                    self.record(progress, index, LoadErrorReason::NoMatch);
                    Vec::new()
                }
            };
        }

        if let Some(selected) = selected {
            return self.accept_single(progress, index, selected);
        }

        let mut loaded = tracks;
        if self.shared.shuffle {
            shuffle(&mut loaded);
        }

        let expanded = loaded.len();
        loaded.retain(|track| !self.limit.exceeds(track));
        if loaded.len() < expanded {
            debug!(
                "Dropped {} over-length tracks from {:?} (item {} of playlist {})",
                expanded - loaded.len(),
                name,
                index,
                self.shared.name
            );
        }

        for track in &mut loaded {
            track.set_user_data(0);
        }
        progress.tracks.extend(loaded.iter().cloned());
        loaded
    }

    fn record(&self, progress: &mut LoadProgress<T>, index: usize, reason: LoadErrorReason) {
        let item = &self.shared.items[index];
        debug!(
            "Playlist {} item {} ({}) failed: {}",
            self.shared.name, index, item, reason
        );
        progress
            .errors
            .push(LoadError::new(index, item.clone(), reason));
    }

    fn finalize(&self, progress: &mut LoadProgress<T>) {
        if self.shared.shuffle {
            shuffle(&mut progress.tracks);
        }
        progress.state = LoadState::Done;

        info!(
            "Loaded playlist {}: {} tracks, {} errors",
            self.shared.name,
            progress.tracks.len(),
            progress.errors.len()
        );
    }

    fn complete(&self) {
        let callback = self
            .on_complete
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(callback) = callback {
            callback();
        }
    }
}
