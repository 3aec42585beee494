// tests/common/mod.rs
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use shopcart::adapters::{
  FixedClock, InMemoryCartItems, InMemoryCatalog, InMemoryCustomers, RecordingEventBus, StaticAuthorization,
};
use shopcart::models::{CartItem, CartType, Customer, Product};
use shopcart::{AddToCartRequest, CartDeps, CartSettings, DefaultLocalizer, ShoppingCartService};
use std::sync::Arc;
use tracing::Level;

pub const STORE: u32 = 1;

pub fn test_now() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

/// A service wired to in-memory collaborators the test can inspect.
pub struct Harness {
  pub service: ShoppingCartService,
  pub cart_items: Arc<InMemoryCartItems>,
  pub catalog: Arc<InMemoryCatalog>,
  pub customers: Arc<InMemoryCustomers>,
  pub authorization: Arc<StaticAuthorization>,
  pub events: Arc<RecordingEventBus>,
  pub clock: Arc<FixedClock>,
}

impl Harness {
  pub fn new() -> Self {
    Self::with_settings(CartSettings::default())
  }

  pub fn with_settings(settings: CartSettings) -> Self {
    setup_tracing();
    let cart_items = Arc::new(InMemoryCartItems::new());
    let catalog = Arc::new(InMemoryCatalog::new());
    let customers = Arc::new(InMemoryCustomers::new());
    let authorization = Arc::new(StaticAuthorization::allow_all());
    let events = Arc::new(RecordingEventBus::new());
    let clock = Arc::new(FixedClock::new(test_now()));

    let deps = CartDeps {
      cart_items: cart_items.clone(),
      catalog: catalog.clone(),
      customers: customers.clone(),
      authorization: authorization.clone(),
      events: events.clone(),
      localizer: Arc::new(DefaultLocalizer::new()),
      clock: clock.clone(),
      settings: Arc::new(settings),
    };

    Self {
      service: ShoppingCartService::new(deps),
      cart_items,
      catalog,
      customers,
      authorization,
      events,
      clock,
    }
  }

  pub fn customer(&self) -> Customer {
    let customer = Customer::new();
    self.customers.add(customer.clone());
    customer
  }

  pub fn product(&self, product: Product) -> Product {
    self.catalog.add_product(product.clone());
    product
  }

  pub fn simple_product(&self, id: u32, name: &str) -> Product {
    self.product(Product::new(id, name))
  }

  pub fn cart(&self, customer: &Customer) -> Vec<CartItem> {
    self.service.cart(customer.id, CartType::ShoppingCart, Some(STORE)).unwrap()
  }

  pub fn wishlist(&self, customer: &Customer) -> Vec<CartItem> {
    self.service.cart(customer.id, CartType::Wishlist, Some(STORE)).unwrap()
  }

  /// Adds to the shopping cart and asserts the add was accepted.
  pub fn add_ok(&self, customer: &Customer, product: &Product, quantity: i32) {
    let warnings = self
      .service
      .add_to_cart(AddToCartRequest::new(customer, product, CartType::ShoppingCart, STORE).quantity(quantity))
      .unwrap();
    assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
  }

  pub fn stored_customer(&self, customer: &Customer) -> Customer {
    use shopcart::ports::CustomerStore;
    self.customers.customer(customer.id).unwrap().unwrap()
  }
}

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
