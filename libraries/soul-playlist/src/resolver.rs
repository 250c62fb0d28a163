//! Resolver contract
//!
//! A resolver turns a raw reference (URL or search string) into tracks. Results
//! are delivered through a handler, possibly on another thread and possibly
//! long after `submit` returns.

use std::sync::Arc;

/// One resolver result
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveOutcome<T> {
    /// Reference resolved to a single track
    Track(T),

    /// Reference expanded to several tracks (playlist URL, search results)
    Collection(TrackCollection<T>),

    /// Nothing matched the reference
    NoMatch,

    /// Resolver failed; carries a human-readable message
    Failed(String),
}

/// Multi-track resolver result
#[derive(Debug, Clone, PartialEq)]
pub struct TrackCollection<T> {
    /// Collection name as reported by the source
    pub name: String,

    /// Expanded tracks in source order
    pub tracks: Vec<T>,

    /// Track the reference pointed at inside the collection, if any
    pub selected: Option<T>,

    /// Collection is a list of search hits rather than a real playlist
    pub is_search_result: bool,
}

impl<T> TrackCollection<T> {
    /// Plain expansion with no selection
    pub fn new(name: impl Into<String>, tracks: Vec<T>) -> Self {
        Self {
            name: name.into(),
            tracks,
            selected: None,
            is_search_result: false,
        }
    }

    /// Search hits; only the first one is used by the loader
    pub fn search_result(name: impl Into<String>, tracks: Vec<T>) -> Self {
        Self {
            is_search_result: true,
            ..Self::new(name, tracks)
        }
    }

    /// Mark one track as pre-selected
    pub fn with_selected(mut self, track: T) -> Self {
        self.selected = Some(track);
        self
    }
}

/// Callback receiving exactly one outcome for a submitted reference
pub type ResultHandler<T> = Box<dyn FnOnce(ResolveOutcome<T>) + Send + 'static>;

/// External track resolver
///
/// For a fixed `order_key`, handlers must be invoked in submission order.
/// Submissions under different keys may complete in any order.
pub trait Resolver<T>: Send + Sync {
    /// Queue a reference for resolution
    ///
    /// Must not block waiting for the result. The handler may run before this
    /// returns, later on this thread, or on any other thread.
    fn submit(&self, order_key: &str, reference: &str, handler: ResultHandler<T>);
}

impl<T, R: Resolver<T> + ?Sized> Resolver<T> for Arc<R> {
    fn submit(&self, order_key: &str, reference: &str, handler: ResultHandler<T>) {
        (**self).submit(order_key, reference, handler);
    }
}
