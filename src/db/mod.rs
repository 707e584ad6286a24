pub mod cartdb;
pub mod coupondb;
#[allow(clippy::module_inception)]
pub mod db;
pub mod locationdb;
pub mod orderdb;
pub mod productdb;
pub mod userdb;
pub mod walletdb;
