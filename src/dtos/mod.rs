pub mod cartdtos;
pub mod coupondtos;
pub mod locationdtos;
pub mod orderdtos;
pub mod productdtos;
pub mod userdtos;
pub mod walletdtos;
