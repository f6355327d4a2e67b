use axum::{http::StatusCode, response::Json};
use serde_json::{json, Value};

pub async fn health_check() -> Result<Json<Value>, StatusCode> {
    Ok(Json(json!({
        "ok": true,
        "t": chrono::Utc::now().timestamp_millis(),
        "service": "fit-coach",
        "version": env!("CARGO_PKG_VERSION")
    })))
}
