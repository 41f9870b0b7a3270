use std::collections::{HashMap, HashSet};

use sweepcli::Res;
use sweepcli::library::*;
use sweepcli::types::{AlbumRef, Playlist, PlaylistItem, PlaylistOwner, PlaylistTrack, TrackRemoval};

// In-memory playlist store that applies changes like the Web API would
#[derive(Default)]
struct FakeService {
    playlists: Vec<Playlist>,
    items: HashMap<String, Vec<PlaylistItem>>,
    removal_requests: Vec<(String, Vec<TrackRemoval>)>,
    publish_calls: Vec<String>,
    failing: HashSet<String>,
}

impl PlaylistService for FakeService {
    async fn playlists(&mut self) -> Res<Vec<Playlist>> {
        Ok(self.playlists.clone())
    }

    async fn playlist_items(&mut self, playlist_id: &str) -> Res<Vec<PlaylistItem>> {
        Ok(self.items.get(playlist_id).cloned().unwrap_or_default())
    }

    async fn remove_tracks(&mut self, playlist_id: &str, removals: &[TrackRemoval]) -> Res<()> {
        self.removal_requests
            .push((playlist_id.to_string(), removals.to_vec()));
        Ok(())
    }

    async fn make_public(&mut self, playlist_id: &str) -> Res<()> {
        self.publish_calls.push(playlist_id.to_string());
        if self.failing.contains(playlist_id) {
            return Err("403 Forbidden".into());
        }
        if let Some(p) = self.playlists.iter_mut().find(|p| p.id == playlist_id) {
            p.public = Some(true);
        }
        Ok(())
    }
}

fn playlist(id: &str, name: &str, public: Option<bool>) -> Playlist {
    Playlist {
        id: id.to_string(),
        name: name.to_string(),
        owner: PlaylistOwner {
            id: "owner".to_string(),
        },
        public,
        snapshot_id: None,
    }
}

fn track(uri: &str, album: Option<&str>) -> PlaylistItem {
    PlaylistItem {
        track: Some(PlaylistTrack {
            uri: uri.to_string(),
            name: None,
            album: Some(AlbumRef {
                id: album.map(str::to_string),
            }),
        }),
    }
}

fn positions(removals: &[TrackRemoval]) -> Vec<usize> {
    removals.iter().flat_map(|r| r.positions.clone()).collect()
}

#[test]
fn test_matches_playlist_name() {
    let prefix = DEFAULT_PLAYLIST_PREFIX;
    assert!(matches_playlist_name("Pitchfork Best Albums 2024-05", prefix));
    assert!(matches_playlist_name("  pitchfork best albums: 2024-05 ", prefix));
    assert!(matches_playlist_name("PITCHFORK BEST ALBUMS - 2023-12", prefix));
    assert!(matches_playlist_name("Pitchfork Best Albums – 2023-01", prefix));
    assert!(matches_playlist_name("Pitchfork Best Albums|2023-01", prefix));
}

#[test]
fn test_matches_playlist_name_rejects() {
    let prefix = DEFAULT_PLAYLIST_PREFIX;
    assert!(!matches_playlist_name("Pitchfork Best Albums", prefix));
    assert!(!matches_playlist_name("Pitchfork Best Albums 2024", prefix));
    assert!(!matches_playlist_name("Pitchfork Best Albums 2024-05-01", prefix));
    assert!(!matches_playlist_name("Pitchfork Best Tracks 2024-05", prefix));
    assert!(!matches_playlist_name("My Pitchfork Best Albums 2024-05", prefix));
    assert!(!matches_playlist_name("Pitchfork Best Albums 2024-05 (old)", prefix));
}

#[test]
fn test_matches_custom_prefix() {
    assert!(matches_playlist_name("Weekly Mix 2024-01", "weekly mix"));
    assert!(!matches_playlist_name("Weekly Mix 2024-01", DEFAULT_PLAYLIST_PREFIX));
}

#[test]
fn test_plan_album_duplicates_keeps_first_of_each_album() {
    let items = vec![
        track("spotify:track:a1", Some("A")),
        track("spotify:track:b1", Some("B")),
        track("spotify:track:a2", Some("A")),
        track("spotify:track:b2", Some("B")),
        track("spotify:track:a3", Some("A")),
    ];

    let removals = plan_album_duplicates(&items);

    assert_eq!(positions(&removals), vec![2, 3, 4]);
    let uris: Vec<&str> = removals.iter().map(|r| r.uri.as_str()).collect();
    assert_eq!(
        uris,
        vec!["spotify:track:a2", "spotify:track:b2", "spotify:track:a3"]
    );
}

#[test]
fn test_plan_album_duplicates_targets_exact_position_of_repeated_uri() {
    let items = vec![
        track("spotify:track:x", Some("A")),
        track("spotify:track:y", Some("B")),
        track("spotify:track:x", Some("A")),
    ];

    let removals = plan_album_duplicates(&items);

    assert_eq!(
        removals,
        vec![TrackRemoval {
            uri: "spotify:track:x".to_string(),
            positions: vec![2],
        }]
    );
}

#[test]
fn test_plan_album_duplicates_ignores_items_without_album() {
    let items = vec![
        PlaylistItem { track: None },
        track("spotify:local:a", None),
        track("spotify:local:b", None),
        track("spotify:track:c", Some("C")),
        PlaylistItem {
            track: Some(PlaylistTrack {
                uri: "spotify:episode:e".to_string(),
                name: None,
                album: None,
            }),
        },
    ];

    assert!(plan_album_duplicates(&items).is_empty());
}

#[test]
fn test_removal_batches_highest_position_first() {
    let removals: Vec<TrackRemoval> = (0..250)
        .map(|i| TrackRemoval {
            uri: format!("spotify:track:{}", i),
            positions: vec![i],
        })
        .collect();

    let batches = removal_batches(&removals);

    let sizes: Vec<usize> = batches.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![100, 100, 50]);
    assert_eq!(batches[0][0].positions, vec![249]);
    assert_eq!(batches[2].last().unwrap().positions, vec![0]);
    assert!(removal_batches(&[]).is_empty());
}

#[tokio::test]
async fn test_prune_playlist_removes_duplicates() {
    let target = playlist("p1", "Pitchfork Best Albums 2024-05", Some(false));
    let mut service = FakeService::default();
    service.items.insert(
        "p1".to_string(),
        vec![
            track("spotify:track:a1", Some("A")),
            track("spotify:track:a2", Some("A")),
            track("spotify:track:b1", Some("B")),
        ],
    );

    let report = prune_playlist(&mut service, &target, false).await.unwrap();

    assert_eq!(report, PruneReport { scheduled: 1, removed: 1 });
    assert_eq!(service.removal_requests.len(), 1);
    assert_eq!(service.removal_requests[0].0, "p1");
    assert_eq!(positions(&service.removal_requests[0].1), vec![1]);
}

#[tokio::test]
async fn test_prune_playlist_dry_run_removes_nothing() {
    let target = playlist("p1", "Pitchfork Best Albums 2024-05", None);
    let mut service = FakeService::default();
    service.items.insert(
        "p1".to_string(),
        vec![track("a", Some("A")), track("b", Some("A"))],
    );

    let report = prune_playlist(&mut service, &target, true).await.unwrap();

    assert_eq!(report, PruneReport { scheduled: 1, removed: 0 });
    assert!(service.removal_requests.is_empty());
}

#[tokio::test]
async fn test_prune_playlist_without_duplicates() {
    let target = playlist("p1", "Pitchfork Best Albums 2024-05", None);
    let mut service = FakeService::default();
    service.items.insert(
        "p1".to_string(),
        vec![track("a", Some("A")), track("b", Some("B"))],
    );

    let report = prune_playlist(&mut service, &target, false).await.unwrap();

    assert_eq!(report, PruneReport::default());
    assert!(service.removal_requests.is_empty());
}

#[tokio::test]
async fn test_publish_all_is_idempotent() {
    let mut service = FakeService {
        playlists: vec![
            playlist("p1", "One", Some(false)),
            playlist("p2", "Two", Some(true)),
            playlist("p3", "Three", None),
        ],
        ..Default::default()
    };

    let first = publish_all(&mut service, false).await.unwrap();
    assert_eq!(
        first,
        PublishReport {
            changed: 2,
            unchanged: 1,
            failed: 0
        }
    );
    assert_eq!(service.publish_calls, vec!["p1", "p3"]);

    let second = publish_all(&mut service, false).await.unwrap();
    assert_eq!(second.changed, 0);
    assert_eq!(second.unchanged, 3);
    assert_eq!(service.publish_calls.len(), 2);
}

#[tokio::test]
async fn test_publish_all_continues_after_failure() {
    let mut service = FakeService {
        playlists: vec![
            playlist("p1", "One", Some(false)),
            playlist("p2", "Two", Some(false)),
            playlist("p3", "Three", Some(false)),
        ],
        failing: HashSet::from(["p2".to_string()]),
        ..Default::default()
    };

    let report = publish_all(&mut service, false).await.unwrap();

    assert_eq!(report.changed, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(service.publish_calls, vec!["p1", "p2", "p3"]);
}

#[tokio::test]
async fn test_publish_all_dry_run() {
    let mut service = FakeService {
        playlists: vec![playlist("p1", "One", Some(false))],
        ..Default::default()
    };

    let report = publish_all(&mut service, true).await.unwrap();

    assert_eq!(report.changed, 0);
    assert!(service.publish_calls.is_empty());
}
