// dtos/coupondtos.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateCouponDto {
    #[validate(range(min = 1, message = "telegram_id must be positive"))]
    pub telegram_id: i64,

    #[validate(range(min = 1, max = 99, message = "Discount must be between 1 and 99 percent"))]
    pub discount_percent: i32,

    #[validate(length(min = 1, message = "Source is required"))]
    pub source: String,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct ValidateCouponDto {
    #[validate(range(min = 1, message = "telegram_id must be positive"))]
    pub telegram_id: i64,

    #[validate(length(min = 1, message = "Coupon code is required"))]
    pub coupon_code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CouponCheckDto {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<i32>,
    pub message: String,
}
