use crate::domain::unique_code;
use axum::response::IntoResponse;
use axum::Json;
use chrono::SecondsFormat;

pub async fn health() -> impl IntoResponse {
    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "message": "Payment System API is running",
            "timestamp": chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
        })),
    )
}

pub async fn generate_code() -> impl IntoResponse {
    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "data": { "kode_unik": unique_code::generate() }
        })),
    )
}
