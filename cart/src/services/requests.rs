// shopcart/src/services/requests.rs

//! Inputs of the cart operations that take more than a handful of arguments.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{AttributeSelection, CartItem, CartType, Customer, Product, StoreId};

/// Which validators `item_warnings` runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarningChecks {
  pub standard: bool,
  pub attributes: bool,
  pub gift_card: bool,
  pub required_products: bool,
  pub rental: bool,
}

impl WarningChecks {
  pub fn all() -> Self {
    Self {
      standard: true,
      attributes: true,
      gift_card: true,
      required_products: true,
      rental: true,
    }
  }

  pub fn none() -> Self {
    Self {
      standard: false,
      attributes: false,
      gift_card: false,
      required_products: false,
      rental: false,
    }
  }
}

impl Default for WarningChecks {
  fn default() -> Self {
    Self::all()
  }
}

/// A prospective cart line to validate.
#[derive(Debug, Clone)]
pub struct ItemWarningRequest {
  pub customer: Customer,
  pub cart_type: CartType,
  pub product: Product,
  pub store_id: StoreId,
  pub attributes: AttributeSelection,
  pub customer_entered_price: Decimal,
  pub rental_start: Option<NaiveDate>,
  pub rental_end: Option<NaiveDate>,
  pub quantity: i32,
  pub add_required_products: bool,
  /// The line being edited, if any. Its own quantity is not counted twice.
  pub cart_item_id: Option<Uuid>,
  pub checks: WarningChecks,
}

impl ItemWarningRequest {
  pub fn new(customer: &Customer, cart_type: CartType, product: &Product, store_id: StoreId) -> Self {
    Self {
      customer: customer.clone(),
      cart_type,
      product: product.clone(),
      store_id,
      attributes: AttributeSelection::default(),
      customer_entered_price: Decimal::ZERO,
      rental_start: None,
      rental_end: None,
      quantity: 1,
      add_required_products: true,
      cart_item_id: None,
      checks: WarningChecks::all(),
    }
  }

  pub fn quantity(mut self, quantity: i32) -> Self {
    self.quantity = quantity;
    self
  }

  pub fn attributes(mut self, attributes: AttributeSelection) -> Self {
    self.attributes = attributes;
    self
  }

  pub fn customer_entered_price(mut self, price: Decimal) -> Self {
    self.customer_entered_price = price;
    self
  }

  pub fn rental(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
    self.rental_start = start;
    self.rental_end = end;
    self
  }

  pub fn add_required_products(mut self, add: bool) -> Self {
    self.add_required_products = add;
    self
  }

  pub fn cart_item_id(mut self, id: Uuid) -> Self {
    self.cart_item_id = Some(id);
    self
  }

  pub fn checks(mut self, checks: WarningChecks) -> Self {
    self.checks = checks;
    self
  }
}

#[derive(Debug, Clone)]
pub struct AddToCartRequest {
  pub customer: Customer,
  pub product: Product,
  pub cart_type: CartType,
  pub store_id: StoreId,
  pub attributes: AttributeSelection,
  pub customer_entered_price: Decimal,
  pub rental_start: Option<NaiveDate>,
  pub rental_end: Option<NaiveDate>,
  pub quantity: i32,
  /// Whether missing required products may be added automatically.
  pub add_required_products: bool,
}

impl AddToCartRequest {
  pub fn new(customer: &Customer, product: &Product, cart_type: CartType, store_id: StoreId) -> Self {
    Self {
      customer: customer.clone(),
      product: product.clone(),
      cart_type,
      store_id,
      attributes: AttributeSelection::default(),
      customer_entered_price: Decimal::ZERO,
      rental_start: None,
      rental_end: None,
      quantity: 1,
      add_required_products: true,
    }
  }

  pub fn quantity(mut self, quantity: i32) -> Self {
    self.quantity = quantity;
    self
  }

  pub fn attributes(mut self, attributes: AttributeSelection) -> Self {
    self.attributes = attributes;
    self
  }

  pub fn customer_entered_price(mut self, price: Decimal) -> Self {
    self.customer_entered_price = price;
    self
  }

  pub fn rental(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
    self.rental_start = start;
    self.rental_end = end;
    self
  }

  pub fn without_required_products(mut self) -> Self {
    self.add_required_products = false;
    self
  }

  /// The validation request for this line at `quantity`.
  pub(crate) fn item_warning_request(&self, quantity: i32, cart_item_id: Option<Uuid>) -> ItemWarningRequest {
    let mut request = ItemWarningRequest::new(&self.customer, self.cart_type, &self.product, self.store_id)
      .attributes(self.attributes.clone())
      .customer_entered_price(self.customer_entered_price)
      .rental(self.rental_start, self.rental_end)
      .quantity(quantity)
      .add_required_products(self.add_required_products);
    request.cart_item_id = cart_item_id;
    request
  }
}

/// New state for an existing cart line. A quantity of zero or less removes the line.
#[derive(Debug, Clone)]
pub struct CartItemUpdate {
  pub attributes: AttributeSelection,
  pub customer_entered_price: Decimal,
  pub rental_start: Option<NaiveDate>,
  pub rental_end: Option<NaiveDate>,
  pub quantity: i32,
  pub reset_checkout_data: bool,
}

impl CartItemUpdate {
  pub fn new(quantity: i32) -> Self {
    Self {
      attributes: AttributeSelection::default(),
      customer_entered_price: Decimal::ZERO,
      rental_start: None,
      rental_end: None,
      quantity,
      reset_checkout_data: true,
    }
  }

  /// Keeps everything of `item` except the quantity.
  pub fn from_item(item: &CartItem, quantity: i32) -> Self {
    Self {
      attributes: item.attributes.clone(),
      customer_entered_price: item.customer_entered_price,
      rental_start: item.rental_start,
      rental_end: item.rental_end,
      quantity,
      reset_checkout_data: true,
    }
  }

  pub fn attributes(mut self, attributes: AttributeSelection) -> Self {
    self.attributes = attributes;
    self
  }

  pub fn customer_entered_price(mut self, price: Decimal) -> Self {
    self.customer_entered_price = price;
    self
  }

  pub fn rental(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
    self.rental_start = start;
    self.rental_end = end;
    self
  }

  pub fn keep_checkout_data(mut self) -> Self {
    self.reset_checkout_data = false;
    self
  }
}
