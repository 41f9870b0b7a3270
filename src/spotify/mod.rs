//! # Spotify Integration Module
//!
//! Thin client for the parts of the Spotify Web API the sweeper uses.
//!
//! ```text
//! CLI (prune, publish, playlists)
//!          ↓
//! library::PlaylistService  ◄── implemented by SpotifyClient
//!          ↓
//! SpotifyClient::send  (bearer token, 502/429 retry)
//!          ↓
//! reqwest ─► Spotify Web API
//! ```
//!
//! ## Modules
//!
//! - [`auth`] - OAuth 2.0 PKCE flow, code exchange and token refresh.
//! - `client` - [`SpotifyClient`], request sending and pagination.
//! - `playlists` - playlist endpoints and the [`PlaylistService`] impl.
//!
//! ## Endpoints
//!
//! - `GET /me`
//! - `GET /me/playlists` (50 per page, follows `next`)
//! - `GET /playlists/{id}/tracks` (100 per page, follows `next`)
//! - `DELETE /playlists/{id}/tracks` with explicit positions
//! - `PUT /playlists/{id}` with `{"public": true}`
//! - `POST /api/token` on the accounts service
//!
//! Pages are fetched one after another; nothing is prefetched.
//!
//! [`PlaylistService`]: crate::library::PlaylistService

pub mod auth;
mod client;
mod playlists;

pub use client::SpotifyClient;
