// handler/cart.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::{cartdb::CartExt, coupondb::CouponExt, productdb::ProductExt, userdb::UserExt},
    dtos::cartdtos::*,
    error::HttpError,
    models::couponmodels::CouponCheck,
    utils::pricing,
    AppState,
};

pub fn cart_handler() -> Router {
    Router::new()
        .route("/", post(add_to_cart))
        .route("/:telegram_id", get(get_cart).delete(clear_cart))
        .route("/:telegram_id/summary", get(cart_summary))
        .route("/:telegram_id/count", get(cart_count))
        .route("/line/:line_id", delete(remove_line))
}

pub async fn add_to_cart(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<AddToCartDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    app_state
        .db_client
        .get_product(body.product_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Product not found"))?;

    app_state
        .db_client
        .ensure_user(body.telegram_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let line = app_state
        .db_client
        .add_to_cart(body.telegram_id, body.product_id, body.quantity)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(line))
}

pub async fn get_cart(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(telegram_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let items = app_state
        .db_client
        .get_cart_items(telegram_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(items))
}

/// Priced cart view with the transient coupon overlay applied. The coupon is
/// only checked here, never consumed; an invalid code prices the cart
/// without a discount and says why.
pub async fn cart_summary(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(telegram_id): Path<i64>,
    Query(query): Query<CartSummaryQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let items = app_state
        .db_client
        .get_cart_items(telegram_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let (discount_percent, coupon_message) = match &query.coupon {
        Some(code) => {
            let check = app_state
                .db_client
                .validate_coupon(code, telegram_id)
                .await
                .map_err(|e| HttpError::server_error(e.to_string()))?;

            match check {
                CouponCheck::Valid(coupon) => (coupon.discount_percent, None),
                other => (0, Some(other.reason().to_string())),
            }
        }
        None => (0, None),
    };

    let totals = pricing::price_cart(&items, discount_percent);
    let item_count: i64 = items.iter().map(|i| i.quantity as i64).sum();

    Ok(Json(CartSummaryDto {
        item_count,
        subtotal: pricing::round2(totals.subtotal),
        discount_percent,
        discount_amount: pricing::round2(totals.discount_amount),
        total: pricing::round2(totals.total),
        within_order_bounds: pricing::within_order_bounds(
            totals.total,
            app_state.env.min_order_total,
            app_state.env.max_order_total,
        ),
        coupon_message,
        items,
    }))
}

pub async fn cart_count(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(telegram_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let count = app_state
        .db_client
        .cart_count(telegram_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({ "count": count })))
}

pub async fn remove_line(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(line_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let removed = app_state
        .db_client
        .remove_cart_item(line_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if !removed {
        return Err(HttpError::not_found("Cart line not found"));
    }

    Ok(Json(serde_json::json!({ "removed": true })))
}

pub async fn clear_cart(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(telegram_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let cleared = app_state
        .db_client
        .clear_cart(telegram_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({ "cleared": cleared })))
}
