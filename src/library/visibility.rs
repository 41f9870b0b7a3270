use crate::{Res, failure, info, library::PlaylistService, success};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub changed: usize,
    pub unchanged: usize,
    pub failed: usize,
}

/// Makes every playlist of the current user public.
///
/// Playlists that are already public are left untouched, so a second run
/// changes nothing. A playlist that cannot be changed is logged and
/// counted; the sweep goes on with the next one. Only a failure to list
/// the playlists aborts.
pub async fn publish_all<P: PlaylistService>(service: &mut P, dry_run: bool) -> Res<PublishReport> {
    let playlists = service.playlists().await?;
    info!("Setting {} playlists to public...", playlists.len());

    let mut report = PublishReport::default();
    for playlist in &playlists {
        if playlist.public == Some(true) {
            info!("Already public: {}", playlist.name);
            report.unchanged += 1;
            continue;
        }

        if dry_run {
            info!("DRY RUN: would make public: {} ({})", playlist.name, playlist.id);
            continue;
        }

        match service.make_public(&playlist.id).await {
            Ok(()) => {
                success!("Made public: {} ({})", playlist.name, playlist.id);
                report.changed += 1;
            }
            Err(e) => {
                failure!("Error for '{}': {}", playlist.name, e);
                report.failed += 1;
            }
        }
    }

    success!("Done: {} playlists were made public.", report.changed);
    Ok(report)
}
