// handler/users.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::userdb::UserExt,
    dtos::userdtos::*,
    error::HttpError,
    AppState,
};

pub fn users_handler() -> Router {
    Router::new()
        .route("/", post(ensure_user).get(list_users))
        .route("/:telegram_id", get(get_user))
        .route("/:telegram_id/ban-status", get(ban_status))
        .route("/:telegram_id/toggle-ban", post(toggle_ban))
        .route("/:telegram_id/authorize", post(authorize_user))
}

pub async fn ensure_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<EnsureUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .db_client
        .ensure_user(body.telegram_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(user))
}

pub async fn get_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(telegram_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let user = app_state
        .db_client
        .get_user(telegram_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("User not found"))?;

    Ok(Json(user))
}

pub async fn ban_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(telegram_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let user = app_state
        .db_client
        .get_user(telegram_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("User not found"))?;

    Ok(Json(BanStatusDto {
        banned: user.is_banned,
        failure_count: user.failed_payments,
    }))
}

pub async fn toggle_ban(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(telegram_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let user = app_state
        .db_client
        .toggle_ban(telegram_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("User not found"))?;

    tracing::info!(
        "admin toggled ban for user {}: banned = {}",
        telegram_id,
        user.is_banned
    );
    Ok(Json(user))
}

pub async fn authorize_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(telegram_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let authorized = app_state
        .db_client
        .authorize_user(telegram_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if !authorized {
        return Err(HttpError::not_found("User not found"));
    }

    Ok(Json(serde_json::json!({ "authorized": true })))
}

pub async fn list_users(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let users = app_state
        .db_client
        .list_users_with_stats()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(users))
}
