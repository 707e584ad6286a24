// dtos/cartdtos.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::cartmodels::CartItem;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct AddToCartDto {
    #[validate(range(min = 1, message = "telegram_id must be positive"))]
    pub telegram_id: i64,

    #[validate(range(min = 1, message = "product_id must be positive"))]
    pub product_id: i64,

    #[validate(range(min = 1, message = "Quantity must be a positive integer"))]
    pub quantity: i32,
}

/// Optional transient discount overlay: the cart is priced with the coupon
/// without consuming it. Consumption happens at checkout only.
#[derive(Debug, Clone, Deserialize)]
pub struct CartSummaryQuery {
    pub coupon: Option<String>,
}

/// Priced cart view. Amounts are rounded here, at the presentation edge.
#[derive(Debug, Clone, Serialize)]
pub struct CartSummaryDto {
    pub items: Vec<CartItem>,
    pub item_count: i64,
    pub subtotal: f64,
    pub discount_percent: i32,
    pub discount_amount: f64,
    pub total: f64,
    pub within_order_bounds: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_message: Option<String>,
}
