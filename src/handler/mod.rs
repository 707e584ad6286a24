pub mod cart;
pub mod coupons;
pub mod locations;
pub mod orders;
pub mod products;
pub mod users;
pub mod wallets;
