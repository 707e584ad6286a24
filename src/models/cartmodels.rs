// models/cartmodels.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct CartLine {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i32,
}

/// Cart line joined with the product it points at. `price` is the product's
/// current price; it only becomes a snapshot when checkout copies it into a
/// request line item.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct CartItem {
    pub id: i64,
    pub product_id: i64,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
}
