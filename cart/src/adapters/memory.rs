// shopcart/src/adapters/memory.rs

use std::collections::{HashMap, HashSet};

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

use crate::models::{
  AvailabilityRange, CartEvent, CartItem, CartType, CheckoutAttribute, Customer, Product, ProductAttribute,
  ProductAttributeCombination, ProductAttributeMapping, ProductAttributeValue, ProductId, StoreId,
};
use crate::ports::{Authorization, CartItemRepository, Catalog, Clock, CustomerStore, EventPublisher};

/// Cart items kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryCartItems {
  items: RwLock<Vec<CartItem>>,
}

impl InMemoryCartItems {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.items.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.read().is_empty()
  }

  pub fn all(&self) -> Vec<CartItem> {
    self.items.read().clone()
  }
}

impl CartItemRepository for InMemoryCartItems {
  fn insert(&self, item: &CartItem) -> Result<()> {
    let mut items = self.items.write();
    if items.iter().any(|i| i.id == item.id) {
      return Err(anyhow!("cart item {} already exists", item.id));
    }
    items.push(item.clone());
    Ok(())
  }

  fn update(&self, item: &CartItem) -> Result<()> {
    let mut items = self.items.write();
    let slot = items
      .iter_mut()
      .find(|i| i.id == item.id)
      .ok_or_else(|| anyhow!("cart item {} does not exist", item.id))?;
    *slot = item.clone();
    Ok(())
  }

  fn delete(&self, item_id: Uuid) -> Result<Option<CartItem>> {
    let mut items = self.items.write();
    Ok(items.iter().position(|i| i.id == item_id).map(|idx| items.remove(idx)))
  }

  fn get(&self, item_id: Uuid) -> Result<Option<CartItem>> {
    Ok(self.items.read().iter().find(|i| i.id == item_id).cloned())
  }

  fn list_for_customer(
    &self,
    customer_id: Uuid,
    cart_type: Option<CartType>,
    store_id: Option<StoreId>,
  ) -> Result<Vec<CartItem>> {
    Ok(
      self
        .items
        .read()
        .iter()
        .filter(|i| i.customer_id == customer_id)
        .filter(|i| cart_type.map_or(true, |t| i.cart_type == t))
        .filter(|i| store_id.map_or(true, |s| i.store_id == s))
        .cloned()
        .collect(),
    )
  }

  fn delete_updated_before(&self, cutoff: DateTime<Utc>) -> Result<usize> {
    let mut items = self.items.write();
    let before = items.len();
    items.retain(|i| i.updated_at >= cutoff);
    Ok(before - items.len())
  }
}

#[derive(Debug, Default)]
struct CatalogData {
  products: HashMap<ProductId, Product>,
  attributes: HashMap<u32, ProductAttribute>,
  mappings: Vec<ProductAttributeMapping>,
  values: Vec<ProductAttributeValue>,
  combinations: Vec<ProductAttributeCombination>,
  availability_ranges: HashMap<u32, AvailabilityRange>,
  checkout_attributes: Vec<CheckoutAttribute>,
}

#[derive(Debug, Default)]
pub struct InMemoryCatalog {
  data: RwLock<CatalogData>,
}

impl InMemoryCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  /// Inserts or replaces a product.
  pub fn add_product(&self, product: Product) {
    self.data.write().products.insert(product.id, product);
  }

  pub fn add_attribute(&self, attribute: ProductAttribute) {
    self.data.write().attributes.insert(attribute.id, attribute);
  }

  pub fn add_mapping(&self, mapping: ProductAttributeMapping) {
    let mut data = self.data.write();
    data.mappings.retain(|m| m.id != mapping.id);
    data.mappings.push(mapping);
  }

  pub fn add_value(&self, value: ProductAttributeValue) {
    let mut data = self.data.write();
    data.values.retain(|v| v.id != value.id);
    data.values.push(value);
  }

  pub fn add_combination(&self, combination: ProductAttributeCombination) {
    self.data.write().combinations.push(combination);
  }

  pub fn add_availability_range(&self, range: AvailabilityRange) {
    self.data.write().availability_ranges.insert(range.id, range);
  }

  pub fn add_checkout_attribute(&self, attribute: CheckoutAttribute) {
    let mut data = self.data.write();
    data.checkout_attributes.retain(|a| a.id != attribute.id);
    data.checkout_attributes.push(attribute);
  }
}

impl Catalog for InMemoryCatalog {
  fn product(&self, id: ProductId) -> Result<Option<Product>> {
    Ok(self.data.read().products.get(&id).cloned())
  }

  fn products(&self, ids: &[ProductId]) -> Result<Vec<Product>> {
    let data = self.data.read();
    Ok(ids.iter().filter_map(|id| data.products.get(id).cloned()).collect())
  }

  fn attribute(&self, id: u32) -> Result<Option<ProductAttribute>> {
    Ok(self.data.read().attributes.get(&id).cloned())
  }

  fn attribute_mapping(&self, id: u32) -> Result<Option<ProductAttributeMapping>> {
    Ok(self.data.read().mappings.iter().find(|m| m.id == id).cloned())
  }

  fn attribute_mappings_for_product(&self, product_id: ProductId) -> Result<Vec<ProductAttributeMapping>> {
    Ok(
      self
        .data
        .read()
        .mappings
        .iter()
        .filter(|m| m.product_id == product_id)
        .cloned()
        .collect(),
    )
  }

  fn attribute_value(&self, id: u32) -> Result<Option<ProductAttributeValue>> {
    Ok(self.data.read().values.iter().find(|v| v.id == id).cloned())
  }

  fn attribute_values_for_mapping(&self, mapping_id: u32) -> Result<Vec<ProductAttributeValue>> {
    Ok(
      self
        .data
        .read()
        .values
        .iter()
        .filter(|v| v.mapping_id == mapping_id)
        .cloned()
        .collect(),
    )
  }

  fn combinations_for_product(&self, product_id: ProductId) -> Result<Vec<ProductAttributeCombination>> {
    Ok(
      self
        .data
        .read()
        .combinations
        .iter()
        .filter(|c| c.product_id == product_id)
        .cloned()
        .collect(),
    )
  }

  fn availability_range(&self, id: u32) -> Result<Option<AvailabilityRange>> {
    Ok(self.data.read().availability_ranges.get(&id).cloned())
  }

  fn checkout_attributes(&self, store_id: StoreId, exclude_shippable: bool) -> Result<Vec<CheckoutAttribute>> {
    Ok(
      self
        .data
        .read()
        .checkout_attributes
        .iter()
        .filter(|a| a.available_in_store(store_id))
        .filter(|a| !(exclude_shippable && a.shippable_product_required))
        .cloned()
        .collect(),
    )
  }

  fn checkout_attribute(&self, id: u32) -> Result<Option<CheckoutAttribute>> {
    Ok(self.data.read().checkout_attributes.iter().find(|a| a.id == id).cloned())
  }
}

#[derive(Debug, Default)]
struct CustomerData {
  customers: HashMap<Uuid, Customer>,
  discount_codes: HashMap<Uuid, Vec<String>>,
  gift_card_codes: HashMap<Uuid, Vec<String>>,
  checkout_attributes: HashMap<(Uuid, StoreId), String>,
  checkout_resets: HashMap<Uuid, usize>,
}

#[derive(Debug, Default)]
pub struct InMemoryCustomers {
  data: RwLock<CustomerData>,
}

impl InMemoryCustomers {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add(&self, customer: Customer) {
    self.data.write().customers.insert(customer.id, customer);
  }

  /// How many times checkout data was reset for a customer.
  pub fn checkout_resets(&self, customer_id: Uuid) -> usize {
    self.data.read().checkout_resets.get(&customer_id).copied().unwrap_or(0)
  }
}

fn push_unique(codes: &mut Vec<String>, code: &str) {
  if !codes.iter().any(|c| c.eq_ignore_ascii_case(code)) {
    codes.push(code.to_string());
  }
}

impl CustomerStore for InMemoryCustomers {
  fn customer(&self, id: Uuid) -> Result<Option<Customer>> {
    Ok(self.data.read().customers.get(&id).cloned())
  }

  fn update(&self, customer: &Customer) -> Result<()> {
    let mut data = self.data.write();
    match data.customers.get_mut(&customer.id) {
      Some(stored) => {
        *stored = customer.clone();
        Ok(())
      }
      None => Err(anyhow!("customer {} does not exist", customer.id)),
    }
  }

  fn reset_checkout_data(&self, customer_id: Uuid, store_id: StoreId) -> Result<()> {
    debug!(%customer_id, store_id, "Checkout data reset.");
    *self.data.write().checkout_resets.entry(customer_id).or_default() += 1;
    Ok(())
  }

  fn discount_coupon_codes(&self, customer_id: Uuid) -> Result<Vec<String>> {
    Ok(self.data.read().discount_codes.get(&customer_id).cloned().unwrap_or_default())
  }

  fn apply_discount_coupon_code(&self, customer_id: Uuid, code: &str) -> Result<()> {
    push_unique(self.data.write().discount_codes.entry(customer_id).or_default(), code);
    Ok(())
  }

  fn gift_card_coupon_codes(&self, customer_id: Uuid) -> Result<Vec<String>> {
    Ok(self.data.read().gift_card_codes.get(&customer_id).cloned().unwrap_or_default())
  }

  fn apply_gift_card_coupon_code(&self, customer_id: Uuid, code: &str) -> Result<()> {
    push_unique(self.data.write().gift_card_codes.entry(customer_id).or_default(), code);
    Ok(())
  }

  fn checkout_attributes(&self, customer_id: Uuid, store_id: StoreId) -> Result<Option<String>> {
    Ok(self.data.read().checkout_attributes.get(&(customer_id, store_id)).cloned())
  }

  fn save_checkout_attributes(&self, customer_id: Uuid, store_id: StoreId, blob: Option<String>) -> Result<()> {
    let mut data = self.data.write();
    match blob.filter(|b| !b.trim().is_empty()) {
      Some(blob) => data.checkout_attributes.insert((customer_id, store_id), blob),
      None => data.checkout_attributes.remove(&(customer_id, store_id)),
    };
    Ok(())
  }
}

/// Allows everything except what was explicitly denied.
#[derive(Debug, Default)]
pub struct StaticAuthorization {
  denied_cart_types: RwLock<HashSet<CartType>>,
  denied_products: RwLock<HashSet<ProductId>>,
  unmapped_products: RwLock<HashSet<(ProductId, StoreId)>>,
}

impl StaticAuthorization {
  pub fn allow_all() -> Self {
    Self::default()
  }

  pub fn deny_cart_type(&self, cart_type: CartType) {
    self.denied_cart_types.write().insert(cart_type);
  }

  pub fn deny_product(&self, product_id: ProductId) {
    self.denied_products.write().insert(product_id);
  }

  pub fn unmap_product_from_store(&self, product_id: ProductId, store_id: StoreId) {
    self.unmapped_products.write().insert((product_id, store_id));
  }
}

impl Authorization for StaticAuthorization {
  fn can_use(&self, _customer: &Customer, cart_type: CartType) -> bool {
    !self.denied_cart_types.read().contains(&cart_type)
  }

  fn product_acl(&self, _customer: &Customer, product: &Product) -> bool {
    !self.denied_products.read().contains(&product.id)
  }

  fn store_mapping(&self, product: &Product, store_id: StoreId) -> bool {
    !self.unmapped_products.read().contains(&(product.id, store_id))
  }
}

/// Keeps every published event for inspection.
#[derive(Debug, Default)]
pub struct RecordingEventBus {
  events: Mutex<Vec<CartEvent>>,
}

impl RecordingEventBus {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn events(&self) -> Vec<CartEvent> {
    self.events.lock().clone()
  }

  pub fn clear(&self) {
    self.events.lock().clear();
  }
}

impl EventPublisher for RecordingEventBus {
  fn publish(&self, event: CartEvent) {
    self.events.lock().push(event);
  }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now_utc(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
  now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
  pub fn new(now: DateTime<Utc>) -> Self {
    Self { now: RwLock::new(now) }
  }

  pub fn set(&self, now: DateTime<Utc>) {
    *self.now.write() = now;
  }

  pub fn advance(&self, by: chrono::Duration) {
    let mut now = self.now.write();
    *now += by;
  }
}

impl Clock for FixedClock {
  fn now_utc(&self) -> DateTime<Utc> {
    *self.now.read()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::AttributeSelection;
  use rust_decimal::Decimal;

  fn item(customer_id: Uuid, cart_type: CartType, updated_at: DateTime<Utc>) -> CartItem {
    CartItem {
      id: Uuid::new_v4(),
      customer_id,
      store_id: 1,
      cart_type,
      product_id: 1,
      attributes: AttributeSelection::default(),
      customer_entered_price: Decimal::ZERO,
      quantity: 1,
      rental_start: None,
      rental_end: None,
      created_at: updated_at,
      updated_at,
    }
  }

  #[test]
  fn list_filters_by_type_and_keeps_order() {
    let repo = InMemoryCartItems::new();
    let customer = Uuid::new_v4();
    let now = Utc::now();
    let a = item(customer, CartType::ShoppingCart, now);
    let b = item(customer, CartType::Wishlist, now);
    let c = item(customer, CartType::ShoppingCart, now);
    for i in [&a, &b, &c] {
      repo.insert(i).unwrap();
    }
    repo.insert(&item(Uuid::new_v4(), CartType::ShoppingCart, now)).unwrap();

    let cart = repo.list_for_customer(customer, Some(CartType::ShoppingCart), None).unwrap();
    assert_eq!(cart.iter().map(|i| i.id).collect::<Vec<_>>(), vec![a.id, c.id]);
    assert_eq!(repo.list_for_customer(customer, None, None).unwrap().len(), 3);
    assert!(repo.insert(&a).is_err());
  }

  #[test]
  fn delete_updated_before_counts_removed() {
    let repo = InMemoryCartItems::new();
    let customer = Uuid::new_v4();
    let now = Utc::now();
    repo.insert(&item(customer, CartType::ShoppingCart, now - chrono::Duration::days(10))).unwrap();
    repo.insert(&item(customer, CartType::ShoppingCart, now)).unwrap();
    assert_eq!(repo.delete_updated_before(now - chrono::Duration::days(1)).unwrap(), 1);
    assert_eq!(repo.len(), 1);
  }

  #[test]
  fn blank_checkout_blob_clears_entry() {
    let store = InMemoryCustomers::new();
    let id = Uuid::new_v4();
    store.save_checkout_attributes(id, 1, Some("{\"attributes\":[]}".into())).unwrap();
    assert!(store.checkout_attributes(id, 1).unwrap().is_some());
    store.save_checkout_attributes(id, 1, Some(" ".into())).unwrap();
    assert!(store.checkout_attributes(id, 1).unwrap().is_none());
  }
}
