use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::error::TranslateError;
use crate::gemini;
use crate::translation::{self, TranslatedSegment};

/// Shared per-process state: the injected configuration and one pooled
/// reqwest client. Requests are otherwise independent.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            client: reqwest::Client::new(),
        }
    }
}

/// Inbound translation request. `texts` accepts either a single string or an
/// array of strings.
#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub texts: Texts,
    pub target_language: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Texts {
    Single(String),
    Many(Vec<String>),
}

impl Texts {
    /// Flatten to the ordered segment list sent upstream.
    pub fn into_segments(self) -> Vec<String> {
        match self {
            Texts::Single(text) => vec![text],
            Texts::Many(texts) => texts,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/translate", post(translate))
        .route("/api/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Translate a batch of text segments to the requested language.
///
/// Success is a JSON array of `{index, translation}` objects in whatever
/// order the model produced; every failure renders through
/// [`TranslateError`]'s single response path.
async fn translate(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<Vec<TranslatedSegment>>, TranslateError> {
    let segments = request.texts.into_segments();
    if segments.is_empty() {
        return Err(TranslateError::EmptyTexts);
    }

    info!(
        "Translating {} segment(s) to {}",
        segments.len(),
        request.target_language
    );

    let instruction = translation::build_system_instruction(&request.target_language);
    let payload = translation::build_segment_payload(&segments);

    let raw =
        gemini::generate_content(&state.client, &state.config, &instruction, &payload).await?;
    let translations = translation::parse_translations(&raw)?;

    Ok(Json(translations))
}
