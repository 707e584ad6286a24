// dtos/locationdtos.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct AddLocationDto {
    #[validate(range(min = 1, message = "product_id must be positive"))]
    pub product_id: i64,

    #[validate(length(min = 1, message = "image_path is required"))]
    pub image_path: String,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct AllocateLocationDto {
    #[validate(range(min = 1, message = "product_id must be positive"))]
    pub product_id: i64,
}
