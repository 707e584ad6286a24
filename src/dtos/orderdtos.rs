// dtos/orderdtos.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::ordermodels::{Decision, PurchaseRequest, RequestItemDetail};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutDto {
    #[validate(range(min = 1, message = "telegram_id must be positive"))]
    pub telegram_id: i64,

    pub coupon_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionDto {
    pub decision: Decision,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestDetailDto {
    pub request: PurchaseRequest,
    pub items: Vec<RequestItemDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserOrdersQuery {
    pub status: Option<String>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct PurgeDto {
    #[validate(range(min = 1, message = "older_than_days must be at least 1"))]
    pub older_than_days: i32,
}
