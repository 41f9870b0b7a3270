use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::utils;

/// IMAP message UID, stable within one mailbox.
pub type Uid = u32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// One mailbox as reported by a LIST response line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailboxEntry {
    /// Attributes from the parenthesised group, e.g. `\HasNoChildren`.
    pub flags: Vec<String>,
    /// Mailbox name exactly as sent by the server.
    pub name: String,
}

impl MailboxEntry {
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f.eq_ignore_ascii_case(flag))
    }

    /// Human readable name with IMAP modified UTF-7 decoded.
    ///
    /// Only for matching and logging; commands sent to the server always use
    /// [`MailboxEntry::name`].
    pub fn display_name(&self) -> String {
        utils::decode_modified_utf7(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub uid: Uid,
    pub target: String,
    pub dry_run: bool,
}

/// How a message reached its target mailbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveMethod {
    /// `UID MOVE` succeeded.
    Move,
    /// `UID COPY` + `UID STORE +FLAGS (\Deleted)` + `EXPUNGE` succeeded.
    CopyExpunge,
    /// Dry run, nothing was sent.
    Simulated,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub owner: PlaylistOwner,
    pub public: Option<bool>,
    pub snapshot_id: Option<String>,
}

/// One page of a paged Web API listing.
///
/// Spotify occasionally sends `null` in place of an item (deleted or
/// unavailable playlists), so every slot is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<Option<T>>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumRef {
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub uri: String,
    pub name: Option<String>,
    pub album: Option<AlbumRef>,
}

impl PlaylistTrack {
    pub fn album_id(&self) -> Option<&str> {
        self.album.as_ref().and_then(|a| a.id.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<PlaylistTrack>,
}

/// One placement of a track scheduled for removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRemoval {
    pub uri: String,
    pub positions: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveTracksRequest {
    pub tracks: Vec<TrackRemoval>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePlaylistDetailsRequest {
    pub public: bool,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub name: String,
    pub id: String,
    pub owner: String,
    pub public: String,
}
