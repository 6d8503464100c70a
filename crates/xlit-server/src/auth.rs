use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use secrecy::{ExposeSecret, SecretString};

use crate::error::ApiError;

/// Static bearer-token guard, invoked before the handler body.
///
/// No configured key means open access. With a key configured, a missing or
/// non-Bearer `Authorization` header is 401 and a mismatched token is 403.
/// The guard has no interaction with the transliteration logic.
pub fn check_bearer(headers: &HeaderMap, key: Option<&SecretString>) -> Result<(), ApiError> {
    let Some(key) = key else {
        return Ok(());
    };

    let auth = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let Some(token) = auth.strip_prefix("Bearer ") else {
        return Err(ApiError::Unauthorized(
            "missing Authorization Bearer token".to_string(),
        ));
    };

    if token.trim() != key.expose_secret() {
        return Err(ApiError::Forbidden("invalid API key".to_string()));
    }

    Ok(())
}
