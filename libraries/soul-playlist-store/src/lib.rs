//! Soul Player - Playlist Store
//!
//! Persists playlist definitions as one JSON document per playlist:
//!
//! ```json
//! { "name": "chill", "authorId": "42", "guildId": "7", "shuffle": false, "tracks": [] }
//! ```
//!
//! The store only reads and writes documents. Turning a document into
//! tracks is done by `soul_playlist::Playlist::load`.

mod error;
mod store;

pub use error::{Result, StoreError};
pub use store::PlaylistStore;
