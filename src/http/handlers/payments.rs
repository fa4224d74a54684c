use crate::domain::payment::SuccessEnvelope;
use crate::http::extract::Submission;
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

pub async fn create_payment(
    State(state): State<AppState>,
    Submission(raw): Submission,
) -> impl IntoResponse {
    match state.payment_service.submit(raw).await {
        Ok(view) => (
            axum::http::StatusCode::OK,
            Json(SuccessEnvelope::with_message("Pembayaran berhasil direkam", view)),
        )
            .into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}

pub async fn get_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<String>,
) -> impl IntoResponse {
    match state.payment_service.get(&payment_id).await {
        Ok(view) => (axum::http::StatusCode::OK, Json(SuccessEnvelope::new(view))).into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}

pub async fn list_payments(State(state): State<AppState>) -> impl IntoResponse {
    let items = state.payment_service.list().await;
    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "count": items.len(),
            "data": items
        })),
    )
}

pub async fn delete_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<String>,
) -> impl IntoResponse {
    match state.payment_service.delete(&payment_id).await {
        Ok(()) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "message": "Data pembayaran berhasil dihapus"
            })),
        )
            .into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}

pub async fn clear_payments(State(state): State<AppState>) -> impl IntoResponse {
    let count = state.payment_service.clear().await;
    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "message": format!("Berhasil menghapus {count} data pembayaran")
        })),
    )
}
