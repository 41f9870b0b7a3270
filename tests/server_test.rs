use std::{net::TcpListener, sync::Arc, time::Duration};

use tokio::sync::Mutex;

use sweepcli::{config::SpotifyConfig, server::start_api_server, types::PkceToken};

fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

async fn spawn_server(state: Arc<Mutex<Option<PkceToken>>>) -> String {
    let port = free_port();
    let address = format!("127.0.0.1:{}", port);
    let lookup_address = address.clone();
    let config = SpotifyConfig::from_lookup(move |name: &str| match name {
        "SPOTIFY_API_AUTH_CLIENT_ID" => Some("client-123".to_string()),
        "SPOTIFY_API_REDIRECT_URI" => Some(format!("http://{}/callback", lookup_address)),
        "SERVER_ADDRESS" => Some(lookup_address.clone()),
        _ => None,
    })
    .unwrap();

    tokio::spawn(start_api_server(state, config));

    let base = format!("http://{}", address);
    for _ in 0..50 {
        if reqwest::get(format!("{}/health", base)).await.is_ok() {
            return base;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("callback server did not come up on {}", address);
}

async fn get_text(url: String) -> (u16, String) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status().as_u16();
    (status, response.text().await.unwrap())
}

#[tokio::test]
async fn test_health_reports_waiting_for_callback() {
    let base = spawn_server(Arc::new(Mutex::new(None))).await;

    let body: serde_json::Value = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "waiting-for-callback");
    assert_eq!(body["service"], "sweepcli");
}

#[tokio::test]
async fn test_callback_receives_both_extensions() {
    let base = spawn_server(Arc::new(Mutex::new(None))).await;

    let (status, body) = get_text(format!("{}/callback?code=abc", base)).await;
    assert_eq!(status, 200);
    assert!(body.contains("Missing PKCE code verifier"));

    let (status, body) = get_text(format!("{}/callback", base)).await;
    assert_eq!(status, 200);
    assert!(body.contains("Missing authorization code"));

    let (_, body) = get_text(format!("{}/callback?error=access_denied", base)).await;
    assert!(body.contains("Authorization denied"));
}
