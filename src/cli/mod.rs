//! # CLI Module
//!
//! User-facing commands. Each function here validates its inputs, builds the
//! client handles it needs and hands over to the `mail` or `library`
//! modules, turning their results into log lines and exit codes.
//!
//! ## Commands
//!
//! - [`trash`] - move IMAP messages by UID to the trash mailbox
//! - [`auth`] - Spotify OAuth PKCE authorization
//! - [`list_playlists`] - table of the user's playlists
//! - [`prune`] - remove album duplicates from matching playlists
//! - [`publish`] - make every playlist public
//!
//! ## Usage
//!
//! ```bash
//! sweepcli trash --uids 130,131 --dry-run
//! sweepcli auth
//! sweepcli prune --prefix "pitchfork best albums"
//! sweepcli publish
//! ```
//!
//! Fatal setup problems (invalid configuration, missing token) end the
//! process with exit code 1 through the `error!` macro.

mod auth;
mod playlists;
mod prune;
mod publish;
mod trash;

pub use auth::auth;
pub use playlists::list_playlists;
pub use prune::prune;
pub use publish::publish;
pub use trash::{TrashArgs, trash};

use crate::{
    config::SpotifyConfig, error, info, management::TokenManager, spotify::SpotifyClient,
};

/// Validates the Spotify configuration or exits.
pub(crate) fn spotify_config() -> SpotifyConfig {
    match SpotifyConfig::from_env() {
        Ok(config) => config,
        Err(e) => error!("Configuration error: {}", e),
    }
}

/// Builds an authenticated client and checks it against `GET /me`.
///
/// Exits when no token is cached or the token is rejected.
pub(crate) async fn spotify_client() -> SpotifyClient {
    let config = spotify_config();

    let tokens = match TokenManager::load(config.clone()).await {
        Ok(tokens) => tokens,
        Err(e) => error!(
            "Failed to load token. Please run sweepcli auth\n Error: {}",
            e
        ),
    };

    let mut client = SpotifyClient::new(&config, tokens);
    match client.current_user().await {
        Ok(user) => {
            info!(
                "Logged in as: {}",
                user.display_name.as_deref().unwrap_or(&user.id)
            );
            client
        }
        Err(e) => error!(
            "Spotify authentication failed. Please run sweepcli auth\n Error: {}",
            e
        ),
    }
}
