use crate::{cli::spotify_client, error, library::publish_all, warning};

pub async fn publish(dry_run: bool) {
    let mut client = spotify_client().await;

    match publish_all(&mut client, dry_run).await {
        Ok(report) if report.failed > 0 => {
            warning!("{} playlist(s) could not be made public", report.failed)
        }
        Ok(_) => {}
        Err(e) => error!("Failed to fetch playlists: {}", e),
    }
}
