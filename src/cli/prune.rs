use crate::{
    cli::spotify_client,
    error, failure, info,
    library::{matches_playlist_name, prune_playlist},
    success,
};

/// Removes album duplicates from every playlist whose name matches `prefix`.
///
/// A playlist that fails is reported and skipped; the others are still
/// processed.
pub async fn prune(prefix: &str, dry_run: bool) {
    let mut client = spotify_client().await;

    let playlists = match client.get_user_playlists().await {
        Ok(playlists) => playlists,
        Err(e) => error!("Failed to fetch playlists: {}", e),
    };

    info!("All playlists found: {}", playlists.len());
    for p in &playlists {
        info!("Name: '{}' | ID: {} | Owner: {}", p.name, p.id, p.owner.id);
    }

    let matching: Vec<_> = playlists
        .iter()
        .filter(|p| matches_playlist_name(&p.name, prefix))
        .collect();
    info!("Matching playlists found: {}", matching.len());

    let mut removed = 0;
    let mut failed = 0;
    for playlist in matching {
        info!("Playlist (match): {} ({})", playlist.name, playlist.id);
        match prune_playlist(&mut client, playlist, dry_run).await {
            Ok(report) => removed += report.removed,
            Err(e) => {
                failure!("Failed to prune '{}': {}", playlist.name, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        error!("{} playlist(s) could not be pruned", failed);
    }
    success!("Removed {} duplicate album tracks.", removed);
}
