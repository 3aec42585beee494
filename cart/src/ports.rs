// shopcart/src/ports.rs

//! Collaborators the cart rules depend on. Storage, catalog, customer and
//! permission concerns live behind these traits; `adapters` ships in-memory
//! implementations.

use anyhow::Result;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{
  AvailabilityRange, CartEvent, CartItem, CartType, CheckoutAttribute, Customer, Product, ProductAttribute,
  ProductAttributeCombination, ProductAttributeMapping, ProductAttributeValue, ProductId, StoreId,
};

pub trait CartItemRepository: Send + Sync {
  fn insert(&self, item: &CartItem) -> Result<()>;
  fn update(&self, item: &CartItem) -> Result<()>;
  /// Removes the item, returning it when it existed.
  fn delete(&self, item_id: Uuid) -> Result<Option<CartItem>>;
  fn get(&self, item_id: Uuid) -> Result<Option<CartItem>>;
  /// Items of a customer in insertion order, optionally narrowed to a cart type and store.
  fn list_for_customer(
    &self,
    customer_id: Uuid,
    cart_type: Option<CartType>,
    store_id: Option<StoreId>,
  ) -> Result<Vec<CartItem>>;
  /// Removes every item last updated before `cutoff` and returns how many were removed.
  fn delete_updated_before(&self, cutoff: DateTime<Utc>) -> Result<usize>;
}

pub trait Catalog: Send + Sync {
  fn product(&self, id: ProductId) -> Result<Option<Product>>;
  fn products(&self, ids: &[ProductId]) -> Result<Vec<Product>>;
  fn attribute(&self, id: u32) -> Result<Option<ProductAttribute>>;
  fn attribute_mapping(&self, id: u32) -> Result<Option<ProductAttributeMapping>>;
  fn attribute_mappings_for_product(&self, product_id: ProductId) -> Result<Vec<ProductAttributeMapping>>;
  fn attribute_value(&self, id: u32) -> Result<Option<ProductAttributeValue>>;
  fn attribute_values_for_mapping(&self, mapping_id: u32) -> Result<Vec<ProductAttributeValue>>;
  fn combinations_for_product(&self, product_id: ProductId) -> Result<Vec<ProductAttributeCombination>>;
  fn availability_range(&self, id: u32) -> Result<Option<AvailabilityRange>>;
  /// Checkout attributes offered in a store. Shippable-only attributes are
  /// left out when `exclude_shippable` is set.
  fn checkout_attributes(&self, store_id: StoreId, exclude_shippable: bool) -> Result<Vec<CheckoutAttribute>>;
  fn checkout_attribute(&self, id: u32) -> Result<Option<CheckoutAttribute>>;
}

pub trait CustomerStore: Send + Sync {
  fn customer(&self, id: Uuid) -> Result<Option<Customer>>;
  fn update(&self, customer: &Customer) -> Result<()>;
  /// Forgets shipping/payment choices made during checkout.
  fn reset_checkout_data(&self, customer_id: Uuid, store_id: StoreId) -> Result<()>;
  fn discount_coupon_codes(&self, customer_id: Uuid) -> Result<Vec<String>>;
  fn apply_discount_coupon_code(&self, customer_id: Uuid, code: &str) -> Result<()>;
  fn gift_card_coupon_codes(&self, customer_id: Uuid) -> Result<Vec<String>>;
  fn apply_gift_card_coupon_code(&self, customer_id: Uuid, code: &str) -> Result<()>;
  /// The serialized checkout attribute selection saved for a store.
  fn checkout_attributes(&self, customer_id: Uuid, store_id: StoreId) -> Result<Option<String>>;
  fn save_checkout_attributes(&self, customer_id: Uuid, store_id: StoreId, blob: Option<String>) -> Result<()>;
}

pub trait Authorization: Send + Sync {
  /// Whether the customer may use the shopping cart or the wishlist at all.
  fn can_use(&self, customer: &Customer, cart_type: CartType) -> bool;
  fn product_acl(&self, customer: &Customer, product: &Product) -> bool;
  fn store_mapping(&self, product: &Product, store_id: StoreId) -> bool;
}

pub trait EventPublisher: Send + Sync {
  fn publish(&self, event: CartEvent);
}

pub trait Localizer: Send + Sync {
  /// The text for a resource key. Unknown keys resolve to the key itself.
  fn resource(&self, key: &str) -> String;
}

pub trait Clock: Send + Sync {
  fn now_utc(&self) -> DateTime<Utc>;
}
