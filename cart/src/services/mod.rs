// shopcart/src/services/mod.rs

pub mod cart_rules;
pub mod cart_service;
pub mod item_rules;
pub mod mutations;
pub mod requests;

pub use cart_service::ShoppingCartService;
pub use requests::{AddToCartRequest, CartItemUpdate, ItemWarningRequest, WarningChecks};
