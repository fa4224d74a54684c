use crate::domain::payment::{ErrorEnvelope, RawSubmission};
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};

/// Payment form body, accepted as JSON or as a urlencoded form post.
pub struct Submission(pub RawSubmission);

#[axum::async_trait]
impl<S> FromRequest<S> for Submission
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
            .unwrap_or(false);

        if is_form {
            let Form(raw) = Form::<RawSubmission>::from_request(req, state)
                .await
                .map_err(|e| reject(e.body_text()))?;
            Ok(Submission(raw))
        } else {
            let Json(raw) = Json::<RawSubmission>::from_request(req, state)
                .await
                .map_err(|e| reject(e.body_text()))?;
            Ok(Submission(raw))
        }
    }
}

fn reject(detail: String) -> Response {
    tracing::debug!(%detail, "unreadable payment body");
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorEnvelope {
            success: false,
            message: "Permintaan tidak valid".to_string(),
            errors: Some(vec![detail]),
        }),
    )
        .into_response()
}
