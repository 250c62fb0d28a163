//! Soul Player - Playlist Loading
//!
//! Turns a saved playlist (an ordered list of URLs or search strings) into
//! playable tracks by handing every item to an external resolver.
//!
//! This crate provides:
//! - The `Playlist` aggregate with a one-shot load guard
//! - Outcome handling for single tracks, expansions, misses and failures
//! - Maximum duration filtering
//! - Playlist shuffle (item order and final track order)
//! - `OrderedResolver`, a FIFO-per-key adapter over an async lookup backend
//! - `LoaderConfig` (file + environment)
//!
//! Per-item failures never stop a load. They are collected as `LoadError`s
//! and the completion callback fires exactly once after the last item
//! reports.
//!
//! # Example
//!
//! ```rust
//! use soul_playlist::{
//!     DurationLimit, Playlist, ResolveOutcome, Resolver, ResultHandler, Track,
//! };
//! use std::time::Duration;
//!
//! // Resolves everything immediately
//! struct Instant;
//!
//! impl Resolver<Track> for Instant {
//!     fn submit(&self, _order_key: &str, reference: &str, handler: ResultHandler<Track>) {
//!         handler(ResolveOutcome::Track(Track::new(
//!             reference,
//!             reference,
//!             Duration::from_secs(200),
//!         )));
//!     }
//! }
//!
//! let playlist: Playlist<Track> = Playlist::new(
//!     "road trip",
//!     vec!["https://example.com/a".to_string(), "some search".to_string()],
//!     false,
//!     "owner",
//!     "group",
//! );
//!
//! let started = playlist.load(
//!     &Instant,
//!     DurationLimit::from_secs(600),
//!     |track| println!("queued {}", track.title),
//!     Some(Box::new(|| println!("done"))),
//! );
//!
//! assert!(started);
//! assert_eq!(playlist.tracks().len(), 2);
//! ```

#![forbid(unsafe_code)]

mod config;
mod duration;
mod error;
mod load_errors;
mod orchestrator;
mod ordered;
mod playlist;
mod resolver;
mod shuffle;
pub mod types;

// Public exports
pub use config::{LoaderConfig, ENV_PREFIX};
pub use duration::DurationLimit;
pub use error::{PlaylistError, Result};
pub use load_errors::LoadErrors;
pub use orchestrator::{CompletionCallback, TrackCallback};
pub use ordered::{OrderedResolver, TrackSource, TIMEOUT_MESSAGE};
pub use playlist::Playlist;
pub use resolver::{ResolveOutcome, Resolver, ResultHandler, TrackCollection};
pub use shuffle::{shuffle, shuffle_with};
pub use types::{
    LoadError, LoadErrorReason, LoadState, LoadSummary, PlayableTrack, PlaylistRecord, Track,
};
