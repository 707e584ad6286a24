// middleware.rs
use std::sync::Arc;

use axum::{extract::Request, middleware::Next, response::IntoResponse, Extension};
use subtle::ConstantTimeEq;

use crate::{
    error::{ErrorMessage, HttpError},
    AppState,
};

/// Service-to-service auth: the bot transport and admin tooling present the
/// shared token on every call. Compared in constant time.
pub async fn auth(
    Extension(app_state): Extension<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let provided = req
        .headers()
        .get("x-api-token")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::TokenNotProvided.to_string()))?;

    let matches: bool = provided
        .as_bytes()
        .ct_eq(app_state.env.api_token.as_bytes())
        .into();

    if !matches {
        return Err(HttpError::unauthorized(ErrorMessage::InvalidToken.to_string()));
    }

    Ok(next.run(req).await)
}
