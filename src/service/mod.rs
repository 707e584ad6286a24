pub mod error;
pub mod notification_service;
pub mod order_service;
pub mod pool_monitor;
