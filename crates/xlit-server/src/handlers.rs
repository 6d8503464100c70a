use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde_json::json;

use xlit_core::{TransliterateRequest, TransliterateResponse};
use xlit_engine::transliterate_text;

use crate::auth;
use crate::error::ApiError;
use crate::server::AppState;

/// `GET /` — liveness plus the configured target language.
pub async fn root(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "status": "running", "lang": state.config.lang }))
}

/// `GET /v1/health`
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "ok": true, "lang": state.config.lang }))
}

/// `POST /api/transliterate`
pub async fn transliterate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<TransliterateRequest>,
) -> Result<Json<TransliterateResponse>, ApiError> {
    auth::check_bearer(&headers, state.config.api_key.as_ref())?;

    let topk = req.topk.unwrap_or(state.config.topk_default);
    match transliterate_text(state.engine.as_ref(), &req.input, topk).await {
        Some(resp) => Ok(Json(resp)),
        None => Err(ApiError::BadRequest("input required".to_string())),
    }
}
