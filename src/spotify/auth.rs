use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::{
    config::SpotifyConfig,
    error,
    management::TokenManager,
    server::start_api_server,
    success,
    types::{PkceToken, Token},
    utils, warning,
};

/// How long `auth` waits for the browser round trip.
const AUTH_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    scope: Option<String>,
    expires_in: Option<u64>,
}

impl TokenResponse {
    fn into_token(self, previous_refresh_token: Option<&str>) -> Token {
        Token {
            access_token: self.access_token,
            refresh_token: self
                .refresh_token
                .or_else(|| previous_refresh_token.map(str::to_string))
                .unwrap_or_default(),
            scope: self.scope.unwrap_or_default(),
            expires_in: self.expires_in.unwrap_or(3600),
            obtained_at: Utc::now().timestamp() as u64,
        }
    }
}

/// Runs the OAuth 2.0 PKCE authorization flow and stores the token.
///
/// 1. Generates the code verifier and its S256 challenge
/// 2. Starts the local callback server on `config.server_addr`
/// 3. Opens the authorization URL in the browser (or prints it)
/// 4. Waits up to 60 seconds for the callback to deliver a token
/// 5. Persists the token in the cache directory
///
/// Exits the process on timeout or when the token cannot be saved.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>, config: SpotifyConfig) {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let server_state = Arc::clone(&shared_state);
    let server_config = config.clone();
    tokio::spawn(async move {
        start_api_server(server_state, server_config).await;
    });

    let auth_url = format!(
        "{spotify_auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}",
        spotify_auth_url = config.auth_url,
        client_id = config.client_id,
        redirect_uri = config.redirect_uri,
        code_challenge = code_challenge,
        scope = config.scope.replace(' ', "%20"),
    );

    // verifier must be in place before the browser can hit the callback
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier: code_verifier.clone(),
            token: None,
        });
    }

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    match wait_for_token(shared_state).await {
        Some(t) => {
            let token_manager = TokenManager::new(t, config);
            if let Err(e) = token_manager.persist().await {
                error!("Failed to save token to cache: {}", e);
            }

            success!("Authentication successful!");
        }
        None => {
            error!("Authentication failed or timed out.");
        }
    }
}

/// Polls the shared state once per second until the callback stored a token.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < AUTH_TIMEOUT {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|pkce| pkce.token.as_ref()) {
            return Some(token.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges a refresh token for a fresh access token.
///
/// Spotify may omit the refresh token in the answer; the old one is kept in
/// that case.
pub async fn refresh_token(config: &SpotifyConfig, refresh_token: &str) -> Result<Token, String> {
    let client = Client::new();
    let res = client
        .post(&config.token_url)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", config.client_id.as_str()),
        ])
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| e.to_string())?;

    let json: TokenResponse = res.json().await.map_err(|e| e.to_string())?;
    Ok(json.into_token(Some(refresh_token)))
}

/// Exchanges the authorization code from the callback for a token.
///
/// `verifier` must be the code verifier whose challenge was sent with the
/// authorization request.
pub async fn exchange_code_pkce(
    config: &SpotifyConfig,
    code: &str,
    verifier: &str,
) -> Result<Token, reqwest::Error> {
    let client = Client::new();
    let res = client
        .post(&config.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", config.client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", config.redirect_uri.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let json: TokenResponse = res.json().await?;
    Ok(json.into_token(None))
}
