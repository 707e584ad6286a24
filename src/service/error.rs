// service/error.rs
use thiserror::Error;

use crate::error::HttpError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("User {0} not found")]
    UserNotFound(i64),

    #[error("User {0} is banned")]
    UserBanned(i64),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("User {0} already has a pending purchase request")]
    PendingRequestExists(i64),

    #[error("Order total {total:.2} USDT is outside the allowed range [{min:.0}, {max:.0}]")]
    OrderOutOfBounds { total: f64, min: f64, max: f64 },

    #[error("Invalid coupon: {0}")]
    InvalidCoupon(String),

    #[error("Purchase request {0} not found")]
    RequestNotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::UserNotFound(_) | ServiceError::RequestNotFound(_) => {
                HttpError::not_found(error.to_string())
            }

            ServiceError::EmptyCart
            | ServiceError::OrderOutOfBounds { .. }
            | ServiceError::InvalidCoupon(_) => HttpError::bad_request(error.to_string()),

            ServiceError::UserBanned(_) | ServiceError::PendingRequestExists(_) => {
                HttpError::conflict(error.to_string())
            }

            ServiceError::Database(_) => HttpError::server_error(error.to_string()),
        }
    }
}
