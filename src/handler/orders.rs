// handler/orders.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::orderdb::OrderExt,
    dtos::orderdtos::*,
    error::HttpError,
    AppState,
};

pub fn orders_handler() -> Router {
    Router::new()
        .route("/checkout", post(checkout))
        .route("/pending", get(pending_requests))
        .route("/purge", post(purge_closed))
        .route("/:request_id", get(get_request))
        .route("/:request_id/decision", post(decide))
        .route("/user/:telegram_id", get(user_orders))
        .route("/user/:telegram_id/active", get(user_active_request))
}

pub async fn checkout(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CheckoutDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let outcome = app_state
        .order_service
        .checkout(body.telegram_id, body.coupon_code.as_deref())
        .await?;

    Ok(Json(outcome))
}

pub async fn decide(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(request_id): Path<i64>,
    Json(body): Json<DecisionDto>,
) -> Result<impl IntoResponse, HttpError> {
    let receipt = app_state
        .order_service
        .decide(request_id, body.decision)
        .await?
        .ok_or_else(|| HttpError::conflict("Request has already been decided"))?;

    Ok(Json(receipt))
}

pub async fn get_request(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(request_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let request = app_state
        .db_client
        .get_request(request_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Purchase request not found"))?;

    let items = app_state
        .db_client
        .get_request_items(request_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(RequestDetailDto { request, items }))
}

pub async fn pending_requests(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let pending = app_state
        .db_client
        .get_pending_requests()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(pending))
}

pub async fn user_orders(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(telegram_id): Path<i64>,
    Query(query): Query<UserOrdersQuery>,
) -> Result<impl IntoResponse, HttpError> {
    if let Some(status) = query.status.as_deref() {
        if !matches!(status, "pending" | "completed" | "rejected") {
            return Err(HttpError::bad_request("Unknown status filter"));
        }
    }

    let orders = app_state
        .db_client
        .get_user_orders(telegram_id, query.status.as_deref())
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(orders))
}

pub async fn user_active_request(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(telegram_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let request = app_state
        .db_client
        .get_user_active_request(telegram_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(request))
}

pub async fn purge_closed(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<PurgeDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let (requests, items) = app_state
        .db_client
        .purge_closed_requests(body.older_than_days)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "requests_deleted": requests,
        "items_deleted": items,
    })))
}
