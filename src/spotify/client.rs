use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{config::SpotifyConfig, management::TokenManager, types::Page, warning};

const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(10);
const MAX_RETRY_AFTER_SECS: u64 = 120;
const MAX_ATTEMPTS: usize = 4;

/// Handle to the Spotify Web API for one logged-in user.
///
/// Owns the HTTP client and the token manager; every request goes through
/// [`SpotifyClient::send`], which attaches a fresh bearer token and deals
/// with transient 502 and 429 answers.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    tokens: TokenManager,
}

impl SpotifyClient {
    pub fn new(config: &SpotifyConfig, tokens: TokenManager) -> Self {
        Self {
            http: Client::new(),
            api_url: config.api_url.clone(),
            tokens,
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Sends the request built by `build`, retrying transient failures.
    ///
    /// - `502 Bad Gateway` is retried after 10 seconds.
    /// - `429 Too Many Requests` is retried after `Retry-After` seconds
    ///   when that is at most 120 seconds.
    ///
    /// Gives up after four attempts. Every other non-success status is
    /// returned as an error.
    pub(crate) async fn send<F>(&mut self, build: F) -> Result<Response, reqwest::Error>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let mut attempt = 1;
        loop {
            let token = self.tokens.get_valid_token().await;
            let response = build(&self.http).bearer_auth(token).send().await?;

            if attempt < MAX_ATTEMPTS {
                match response.status() {
                    StatusCode::BAD_GATEWAY => {
                        attempt += 1;
                        sleep(BAD_GATEWAY_DELAY).await;
                        continue;
                    }
                    StatusCode::TOO_MANY_REQUESTS => {
                        let retry_after = retry_after_secs(&response);
                        if retry_after <= MAX_RETRY_AFTER_SECS {
                            attempt += 1;
                            sleep(Duration::from_secs(retry_after)).await;
                            continue;
                        }
                        warning!(
                            "Retry after has reached an abnormal high of {} seconds. Try again later.",
                            retry_after
                        );
                    }
                    _ => {}
                }
            }

            return response.error_for_status();
        }
    }

    /// Follows `next` links from `first_url` until the last page.
    ///
    /// Slots the API sent as `null` come back as `None`, in place, so the
    /// index of each entry is still its position in the listing.
    pub(crate) async fn get_all_pages<T>(
        &mut self,
        first_url: String,
        progress: &ProgressBar,
        what: &str,
    ) -> Result<Vec<Option<T>>, reqwest::Error>
    where
        T: DeserializeOwned,
    {
        let mut items: Vec<Option<T>> = Vec::new();
        let mut next = Some(first_url);

        while let Some(url) = next {
            let page = self
                .send(|http| http.get(&url))
                .await?
                .json::<Page<T>>()
                .await?;

            items.extend(page.items);
            progress.set_message(format!("Fetched {} {}...", items.len(), what));
            next = page.next;
        }

        Ok(items)
    }
}

fn retry_after_secs(response: &Response) -> u64 {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(1)
}

pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
