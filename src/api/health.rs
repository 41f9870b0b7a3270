use axum::response::Json;
use serde_json::{Value, json};

/// Lets the user check that the callback server is listening before
/// finishing the authorization in the browser.
pub async fn health() -> Json<Value> {
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "status": "waiting-for-callback",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
