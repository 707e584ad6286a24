// models/usermodel.rs
use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: i64,
    pub telegram_id: i64,
    pub failed_payments: i32,
    pub is_banned: bool,
    pub authorized: bool,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Admin listing row: user plus lifetime order stats.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct UserOverview {
    pub telegram_id: i64,
    pub failed_payments: i32,
    pub is_banned: bool,
    pub authorized: bool,
    pub created_at: DateTime<Utc>,
    pub total_orders: i64,
    pub completed_orders: i64,
    pub total_spent: f64,
}
