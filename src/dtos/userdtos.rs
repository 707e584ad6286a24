// dtos/userdtos.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct EnsureUserDto {
    #[validate(range(min = 1, message = "telegram_id must be positive"))]
    pub telegram_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BanStatusDto {
    pub banned: bool,
    pub failure_count: i32,
}
