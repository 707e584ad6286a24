// models/couponmodels.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone, PartialEq)]
pub struct DiscountCoupon {
    pub id: i64,
    pub user_id: i64,
    pub coupon_code: String,
    pub discount_percent: i32,
    pub is_used: bool,
    pub source: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Outcome of validating a coupon code against its owner.
#[derive(Debug, Clone, PartialEq)]
pub enum CouponCheck {
    Valid(DiscountCoupon),
    AlreadyUsed,
    Expired,
    NotFound,
}

impl CouponCheck {
    pub fn reason(&self) -> &'static str {
        match self {
            CouponCheck::Valid(_) => "coupon is valid",
            CouponCheck::AlreadyUsed => "coupon has already been used",
            CouponCheck::Expired => "coupon has expired",
            CouponCheck::NotFound => "unknown coupon code",
        }
    }
}
