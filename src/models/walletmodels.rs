// models/walletmodels.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Wallet {
    pub id: i64,
    pub address: String,
    pub in_use: bool,
}

/// Pool health numbers read by the background monitor and the admin panel.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone, Copy)]
pub struct WalletCounts {
    pub available: i64,
    pub in_use: i64,
    pub total: i64,
}

/// Admin listing row: wallet plus its assignment and settlement history.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct WalletOverview {
    pub id: i64,
    pub address: String,
    pub in_use: bool,
    pub assigned_to: Option<i64>,
    pub completed_orders: i64,
    pub total_volume: f64,
    pub last_used: Option<DateTime<Utc>>,
}
