// models/ordermodels.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "request_status", rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Completed,
    Rejected,
}

impl RequestStatus {
    pub fn to_str(&self) -> &str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Completed => "completed",
            RequestStatus::Rejected => "rejected",
        }
    }
}

/// The two terminal outcomes an admin can pick for a pending request.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Completed,
    Rejected,
}

impl Decision {
    pub fn as_status(&self) -> RequestStatus {
        match self {
            Decision::Completed => RequestStatus::Completed,
            Decision::Rejected => RequestStatus::Rejected,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct PurchaseRequest {
    pub id: i64,
    pub user_id: i64,
    pub total_amount: f64,
    pub wallet: String,
    pub status: RequestStatus,
    pub discount_percent: i32,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Line item with the product name resolved for display. `price` is the unit
/// price captured at checkout, not the product's current price.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct RequestItemDetail {
    pub id: i64,
    pub request_id: i64,
    pub product_id: i64,
    pub name: String,
    pub quantity: i32,
    pub price: f64,
}

/// Pending-queue row for the admin decision screen.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct PendingRequestSummary {
    pub id: i64,
    pub user_id: i64,
    pub total_amount: f64,
    pub discount_percent: i32,
    pub created_at: DateTime<Utc>,
    pub item_count: i64,
}
