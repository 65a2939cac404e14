pub mod catalog;
pub mod errors;
pub mod order;
pub mod page;
pub mod party;
pub mod patch;
pub mod ports;
pub mod pricing;
pub mod promo_code;
pub mod stock;
