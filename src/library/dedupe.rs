use std::collections::HashSet;

use crate::{
    Res, info,
    library::PlaylistService,
    success,
    types::{Playlist, PlaylistItem, TrackRemoval},
};

/// Spotify accepts at most 100 tracks per removal request.
pub const REMOVAL_BATCH_SIZE: usize = 100;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PruneReport {
    pub scheduled: usize,
    pub removed: usize,
}

/// Schedules every track whose album already appeared earlier in `items`.
///
/// The first track of each album is kept. Every later track of that album
/// is scheduled with its exact position, so only that placement is removed
/// even if the same URI sits elsewhere in the playlist. Empty slots and
/// tracks without an album id (local files, episodes) are left alone.
pub fn plan_album_duplicates(items: &[PlaylistItem]) -> Vec<TrackRemoval> {
    let mut seen_albums: HashSet<&str> = HashSet::new();

    items
        .iter()
        .enumerate()
        .filter_map(|(position, item)| {
            let track = item.track.as_ref()?;
            let album_id = track.album_id()?;
            if seen_albums.insert(album_id) {
                return None;
            }
            Some(TrackRemoval {
                uri: track.uri.clone(),
                positions: vec![position],
            })
        })
        .collect()
}

/// Splits `removals` into request sized batches, highest position first.
///
/// Removing from the end backwards keeps the positions of every later batch
/// valid after the earlier ones have been applied.
pub fn removal_batches(removals: &[TrackRemoval]) -> Vec<Vec<TrackRemoval>> {
    let mut ordered = removals.to_vec();
    ordered.sort_by(|a, b| b.positions.cmp(&a.positions));
    ordered
        .chunks(REMOVAL_BATCH_SIZE)
        .map(<[TrackRemoval]>::to_vec)
        .collect()
}

/// Removes all album duplicates from one playlist.
///
/// With `dry_run` the duplicates are only counted and logged.
pub async fn prune_playlist<P: PlaylistService>(
    service: &mut P,
    playlist: &Playlist,
    dry_run: bool,
) -> Res<PruneReport> {
    info!("Processing playlist: {} ({})", playlist.name, playlist.id);

    let items = service.playlist_items(&playlist.id).await?;
    let removals = plan_album_duplicates(&items);
    let mut report = PruneReport {
        scheduled: removals.len(),
        removed: 0,
    };

    info!("Tracks to delete: {}", removals.len());
    if removals.is_empty() {
        success!("No duplicate album tracks to delete!");
        return Ok(report);
    }

    if dry_run {
        for removal in &removals {
            info!(
                "DRY RUN: would delete {} at position {:?}",
                removal.uri, removal.positions
            );
        }
        return Ok(report);
    }

    for batch in removal_batches(&removals) {
        service.remove_tracks(&playlist.id, &batch).await?;
        report.removed += batch.len();
        success!("Deleted {} tracks from playlist {}", batch.len(), playlist.id);
    }

    Ok(report)
}
