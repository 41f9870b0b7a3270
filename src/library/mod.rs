//! # Library Module
//!
//! Playlist housekeeping on top of a [`PlaylistService`]:
//!
//! - [`matches_playlist_name`] - which playlists the pruner touches
//! - [`plan_album_duplicates`] / [`prune_playlist`] - keep the first track of
//!   every album, remove every later one by exact position
//! - [`publish_all`] - make every playlist public
//!
//! The planning functions are pure; only `prune_playlist` and `publish_all`
//! talk to the service.

mod dedupe;
mod matcher;
mod visibility;

pub use dedupe::{
    PruneReport, REMOVAL_BATCH_SIZE, plan_album_duplicates, prune_playlist, removal_batches,
};
pub use matcher::{DEFAULT_PLAYLIST_PREFIX, matches_playlist_name};
pub use visibility::{PublishReport, publish_all};

use crate::{
    Res,
    types::{Playlist, PlaylistItem, TrackRemoval},
};

/// Playlist operations needed by the pruner and the visibility sweep.
///
/// Implemented by [`crate::spotify::SpotifyClient`].
#[allow(async_fn_in_trait)]
pub trait PlaylistService {
    /// All playlists of the current user, every page.
    async fn playlists(&mut self) -> Res<Vec<Playlist>>;

    /// All items of one playlist; the vector index is the playlist position.
    async fn playlist_items(&mut self, playlist_id: &str) -> Res<Vec<PlaylistItem>>;

    /// Removes the given placements in one request.
    async fn remove_tracks(&mut self, playlist_id: &str, removals: &[TrackRemoval]) -> Res<()>;

    async fn make_public(&mut self, playlist_id: &str) -> Res<()>;
}
