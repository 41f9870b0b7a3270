//! # API Module
//!
//! HTTP endpoints served by the short-lived local server that runs during
//! `sweepcli auth`.
//!
//! - [`callback`] - Receives the authorization code from Spotify and
//!   exchanges it, together with the PKCE verifier, for a token.
//! - [`health`] - Reports that the server is up, with the crate version.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use sweepcli::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
