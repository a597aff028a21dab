use axum::response::Json;
use serde_json::{Value, json};

/// Liveness endpoint for the short-lived callback server.
///
/// Handy for checking that the `auth` command actually bound its port.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
