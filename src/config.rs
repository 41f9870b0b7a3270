//! Configuration management for the sweeper.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. The mail side only needs account
//! credentials; the Spotify side needs the OAuth application settings, which
//! are validated once at startup through [`SpotifyConfig::from_env`].
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. The `.env` file given with `--env-file` (default `./.env`)
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{
    env,
    net::SocketAddr,
    path::{Path, PathBuf},
    str::FromStr,
};

use thiserror::Error;

use crate::info;

pub const DEFAULT_IMAP_HOST: &str = "imap.mail.me.com";
pub const DEFAULT_IMAP_PORT: u16 = 993;

const DEFAULT_SCOPE: &str = "playlist-read-private playlist-modify-public playlist-modify-private";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("cannot read env file {path}: {reason}")]
    EnvFile { path: PathBuf, reason: String },
}

/// Returns the application directory inside the platform data directory.
///
/// - Linux: `~/.local/share/sweepcli`
/// - macOS: `~/Library/Application Support/sweepcli`
/// - Windows: `%LOCALAPPDATA%/sweepcli`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sweepcli");
    path
}

/// Loads environment variables from `.env` files.
///
/// The explicit `env_file` is loaded first and the `.env` inside the local
/// data directory second. `dotenv` never overrides a variable that is
/// already set, so the real environment wins over both files and the
/// explicit file wins over the data directory one. Files that do not exist
/// are skipped with an informational message.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or an existing
/// file cannot be parsed.
pub async fn load_env(env_file: Option<&Path>) -> Result<(), ConfigError> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| ConfigError::EnvFile {
            path: dir.clone(),
            reason: e.to_string(),
        })?;

    if let Some(path) = env_file {
        load_env_file(path)?;
    }

    let default_path = dir.join(".env");
    if default_path.is_file() {
        load_env_file(&default_path)?;
    }

    Ok(())
}

fn load_env_file(path: &Path) -> Result<(), ConfigError> {
    if !path.is_file() {
        info!("Env file {} not found; skipping", path.display());
        return Ok(());
    }

    dotenv::from_path(path).map_err(|e| ConfigError::EnvFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    info!("Loaded env file: {}", path.display());
    Ok(())
}

/// Returns the mail account user from `EMAIL_USER`, if set and not blank.
pub fn email_user() -> Option<String> {
    non_empty_var("EMAIL_USER")
}

/// Returns the mail account password from `EMAIL_PASS`, if set and not blank.
pub fn email_password() -> Option<String> {
    non_empty_var("EMAIL_PASS")
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Spotify OAuth application settings.
///
/// Built once at startup and handed to every component that talks to the
/// Spotify accounts service or the Web API.
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub redirect_uri: String,
    pub scope: String,
    pub api_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub server_addr: SocketAddr,
}

impl SpotifyConfig {
    /// Reads and validates the Spotify settings from the process environment.
    ///
    /// # Required variables
    ///
    /// - `SPOTIFY_API_AUTH_CLIENT_ID`
    /// - `SPOTIFY_API_REDIRECT_URI` (an `http://` or `https://` URL)
    ///
    /// # Optional variables
    ///
    /// - `SPOTIFY_API_AUTH_SCOPE`
    /// - `SPOTIFY_API_URL`, `SPOTIFY_API_AUTH_URL`, `SPOTIFY_API_TOKEN_URL`
    /// - `SERVER_ADDRESS` (bind address of the OAuth callback server)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(non_empty_var)
    }

    /// Same as [`SpotifyConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_id = lookup("SPOTIFY_API_AUTH_CLIENT_ID")
            .ok_or(ConfigError::Missing("SPOTIFY_API_AUTH_CLIENT_ID"))?;

        let redirect_uri = lookup("SPOTIFY_API_REDIRECT_URI")
            .ok_or(ConfigError::Missing("SPOTIFY_API_REDIRECT_URI"))?;
        if !(redirect_uri.starts_with("http://") || redirect_uri.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                name: "SPOTIFY_API_REDIRECT_URI",
                reason: format!("'{}' is not an http(s) URL", redirect_uri),
            });
        }

        let server_address =
            lookup("SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string());
        let server_addr =
            SocketAddr::from_str(&server_address).map_err(|e| ConfigError::Invalid {
                name: "SERVER_ADDRESS",
                reason: e.to_string(),
            })?;

        Ok(Self {
            client_id,
            redirect_uri,
            scope: lookup("SPOTIFY_API_AUTH_SCOPE").unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            api_url: trim_slash(lookup("SPOTIFY_API_URL"), DEFAULT_API_URL),
            auth_url: trim_slash(lookup("SPOTIFY_API_AUTH_URL"), DEFAULT_AUTH_URL),
            token_url: trim_slash(lookup("SPOTIFY_API_TOKEN_URL"), DEFAULT_TOKEN_URL),
            server_addr,
        })
    }
}

fn trim_slash(value: Option<String>, default: &str) -> String {
    value
        .unwrap_or_else(|| default.to_string())
        .trim_end_matches('/')
        .to_string()
}
