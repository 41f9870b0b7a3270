use std::collections::HashMap;

use sweepcli::config::{ConfigError, SpotifyConfig};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| map.get(name).cloned()
}

const REQUIRED: [(&str, &str); 2] = [
    ("SPOTIFY_API_AUTH_CLIENT_ID", "client-123"),
    ("SPOTIFY_API_REDIRECT_URI", "http://127.0.0.1:8888/callback"),
];

#[test]
fn test_spotify_config_defaults() {
    let config = SpotifyConfig::from_lookup(lookup(&REQUIRED)).unwrap();

    assert_eq!(config.client_id, "client-123");
    assert_eq!(config.redirect_uri, "http://127.0.0.1:8888/callback");
    assert_eq!(config.api_url, "https://api.spotify.com/v1");
    assert_eq!(config.auth_url, "https://accounts.spotify.com/authorize");
    assert_eq!(config.token_url, "https://accounts.spotify.com/api/token");
    assert_eq!(config.server_addr.to_string(), "127.0.0.1:8888");
    assert!(config.scope.contains("playlist-modify-public"));
}

#[test]
fn test_spotify_config_overrides() {
    let mut vars = REQUIRED.to_vec();
    vars.push(("SPOTIFY_API_URL", "http://localhost:9000/v1/"));
    vars.push(("SERVER_ADDRESS", "0.0.0.0:9999"));
    vars.push(("SPOTIFY_API_AUTH_SCOPE", "playlist-read-private"));

    let config = SpotifyConfig::from_lookup(lookup(&vars)).unwrap();

    assert_eq!(config.api_url, "http://localhost:9000/v1");
    assert_eq!(config.server_addr.port(), 9999);
    assert_eq!(config.scope, "playlist-read-private");
}

#[test]
fn test_spotify_config_missing_client_id() {
    let result = SpotifyConfig::from_lookup(lookup(&REQUIRED[1..]));
    assert!(matches!(
        result,
        Err(ConfigError::Missing("SPOTIFY_API_AUTH_CLIENT_ID"))
    ));
}

#[test]
fn test_spotify_config_missing_redirect_uri() {
    let result = SpotifyConfig::from_lookup(lookup(&REQUIRED[..1]));
    assert!(matches!(
        result,
        Err(ConfigError::Missing("SPOTIFY_API_REDIRECT_URI"))
    ));
}

#[test]
fn test_spotify_config_invalid_values() {
    let result = SpotifyConfig::from_lookup(lookup(&[
        ("SPOTIFY_API_AUTH_CLIENT_ID", "client-123"),
        ("SPOTIFY_API_REDIRECT_URI", "localhost:8888/callback"),
    ]));
    assert!(matches!(
        result,
        Err(ConfigError::Invalid {
            name: "SPOTIFY_API_REDIRECT_URI",
            ..
        })
    ));

    let mut vars = REQUIRED.to_vec();
    vars.push(("SERVER_ADDRESS", "not-an-address"));
    let result = SpotifyConfig::from_lookup(lookup(&vars));
    assert!(matches!(
        result,
        Err(ConfigError::Invalid {
            name: "SERVER_ADDRESS",
            ..
        })
    ));
}
