use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

/// Every failure the translate endpoint can produce.
///
/// All variants render through the single `IntoResponse` path below, so the
/// endpoint has exactly one error shape: a JSON body `{"error": "..."}` with
/// a status code matching the failure category.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("texts must contain at least one segment")]
    EmptyTexts,

    /// The upstream model refused to generate output for policy reasons.
    #[error("blocked for {0}")]
    Blocked(String),

    /// Anything else: network failure, upstream non-2xx status, or model
    /// output that violates the declared schema.
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

impl IntoResponse for TranslateError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            TranslateError::EmptyTexts => (StatusCode::BAD_REQUEST, self.to_string()),
            TranslateError::Blocked(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            TranslateError::Upstream(source) => {
                // The cause stays server-side; the caller gets a fixed message.
                error!("Translation failed: {:#}", source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "translation failed".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
