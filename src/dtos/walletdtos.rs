// dtos/walletdtos.rs
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::utils::validators::is_valid_trc20_address;

fn validate_wallet_address(address: &str) -> Result<(), ValidationError> {
    if is_valid_trc20_address(address) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_trc20_address"))
    }
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct AddWalletDto {
    #[validate(custom = "validate_wallet_address")]
    pub address: String,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct AssignWalletDto {
    #[validate(range(min = 1, message = "telegram_id must be positive"))]
    pub telegram_id: i64,
}
