// handler/coupons.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::coupondb::CouponExt,
    dtos::coupondtos::*,
    error::HttpError,
    models::couponmodels::CouponCheck,
    AppState,
};

pub fn coupons_handler() -> Router {
    Router::new()
        .route("/", post(create_coupon))
        .route("/validate", post(validate_coupon))
        .route("/user/:telegram_id", get(user_coupons))
}

/// Issued by the external reward subsystem or by the admin.
pub async fn create_coupon(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateCouponDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let coupon = app_state
        .db_client
        .create_coupon(body.telegram_id, body.discount_percent, &body.source)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(coupon)))
}

pub async fn validate_coupon(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<ValidateCouponDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let check = app_state
        .db_client
        .validate_coupon(&body.coupon_code, body.telegram_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let dto = match check {
        CouponCheck::Valid(coupon) => CouponCheckDto {
            valid: true,
            discount_percent: Some(coupon.discount_percent),
            message: format!("Coupon applied: {}% discount", coupon.discount_percent),
        },
        other => CouponCheckDto {
            valid: false,
            discount_percent: None,
            message: other.reason().to_string(),
        },
    };

    Ok(Json(dto))
}

pub async fn user_coupons(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(telegram_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let coupons = app_state
        .db_client
        .user_coupons(telegram_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(coupons))
}
