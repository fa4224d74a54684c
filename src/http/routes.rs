use crate::http::handlers::{ops, payments};
use crate::http::middleware::cors::allow_any_origin;
use crate::AppState;
use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(ops::health))
        .route("/api/generate-code", get(ops::generate_code))
        .route(
            "/api/payments",
            get(payments::list_payments)
                .post(payments::create_payment)
                .delete(payments::clear_payments),
        )
        .route(
            "/api/payments/:id",
            get(payments::get_payment).delete(payments::delete_payment),
        )
        .layer(from_fn(allow_any_origin))
        .with_state(state)
}
