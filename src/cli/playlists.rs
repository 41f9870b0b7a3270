use tabled::Table;

use crate::{
    cli::spotify_client,
    error,
    library::matches_playlist_name,
    success,
    types::{Playlist, PlaylistTableRow},
};

/// Prints all playlists as a table, optionally only those matching `prefix`.
pub async fn list_playlists(prefix: Option<String>) {
    let mut client = spotify_client().await;

    let mut playlists: Vec<Playlist> = match client.get_user_playlists().await {
        Ok(playlists) => playlists,
        Err(e) => error!("Failed to fetch playlists: {}", e),
    };

    if let Some(prefix) = &prefix {
        playlists.retain(|p| matches_playlist_name(&p.name, prefix));
    }
    playlists.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    let rows: Vec<PlaylistTableRow> = playlists
        .iter()
        .map(|p| PlaylistTableRow {
            name: p.name.clone(),
            id: p.id.clone(),
            owner: p.owner.id.clone(),
            public: match p.public {
                Some(true) => "yes".to_string(),
                Some(false) => "no".to_string(),
                None => "-".to_string(),
            },
        })
        .collect();

    println!("{}", Table::new(rows));
    success!("{} playlists", playlists.len());
}
