// models/locationmodels.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single-use delivery resource. There is no "used" flag: allocation
/// deletes the row, so every row in the table is available by construction.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Location {
    pub id: i64,
    pub product_id: i64,
    pub image_path: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
