pub mod cartmodels;
pub mod couponmodels;
pub mod locationmodels;
pub mod ordermodels;
pub mod productmodel;
pub mod usermodel;
pub mod walletmodels;
