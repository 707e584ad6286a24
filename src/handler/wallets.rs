// handler/wallets.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::{userdb::UserExt, walletdb::WalletPoolExt},
    dtos::walletdtos::*,
    error::HttpError,
    AppState,
};

pub fn wallets_handler() -> Router {
    Router::new()
        .route("/", post(add_wallet).get(list_wallets))
        .route("/counts", get(wallet_counts))
        .route("/assign", post(assign_wallet))
        .route("/release/:telegram_id", post(release_wallet))
        .route("/reassign/:telegram_id", post(reassign_wallet))
        .route("/:wallet_id", delete(delete_wallet))
}

pub async fn add_wallet(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<AddWalletDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|_| HttpError::bad_request("Not a valid TRC-20 address"))?;

    let wallet = app_state
        .db_client
        .add_wallet(&body.address)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                HttpError::conflict("Wallet address already exists in the pool")
            } else {
                HttpError::server_error(e.to_string())
            }
        })?;

    Ok((StatusCode::CREATED, Json(wallet)))
}

/// Sticky allocation: returns the user's existing address when one is
/// assigned. A `null` address means the pool is exhausted, which is an
/// expected state the UI turns into a "contact admin" message.
pub async fn assign_wallet(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<AssignWalletDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    app_state
        .db_client
        .ensure_user(body.telegram_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let address = app_state
        .db_client
        .assign_wallet(body.telegram_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({ "address": address })))
}

pub async fn release_wallet(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(telegram_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let released = app_state
        .db_client
        .release_wallet(telegram_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({ "released": released })))
}

pub async fn reassign_wallet(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(telegram_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let address = app_state
        .db_client
        .reassign_wallet(telegram_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({ "address": address })))
}

pub async fn delete_wallet(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(wallet_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_wallet(wallet_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if !deleted {
        return Err(HttpError::bad_request(
            "Wallet does not exist or is still assigned",
        ));
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}

pub async fn wallet_counts(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let counts = app_state
        .db_client
        .wallet_counts()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(counts))
}

pub async fn list_wallets(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let wallets = app_state
        .db_client
        .list_wallets()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(wallets))
}
