// shopcart/src/models/mod.rs

//! Plain records the cart rules operate on. Storage mapping is left to the
//! collaborator implementations in `ports`.

pub mod attributes;
pub mod cart_item;
pub mod checkout;
pub mod customer;
pub mod events;
pub mod product;
pub mod selection;

pub use attributes::{
  AttributeCondition, AttributeControlType, AttributeValueType, AvailabilityRange, ProductAttribute,
  ProductAttributeCombination, ProductAttributeMapping, ProductAttributeValue,
};
pub use cart_item::{CartItem, CartType};
pub use checkout::CheckoutAttribute;
pub use customer::Customer;
pub use events::CartEvent;
pub use product::{
  BackorderMode, GiftCardType, ManageInventoryMethod, Product, ProductType, RecurringCycleInfo,
  RecurringCyclePeriod, WarehouseStock,
};
pub use selection::{AttributeSelection, GiftCardInfo, SelectedAttribute};

pub type ProductId = u32;
pub type StoreId = u32;
