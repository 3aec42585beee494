// shopcart/src/models/product.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProductType {
  #[default]
  Simple,
  Grouped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ManageInventoryMethod {
  #[default]
  DontManageStock,
  ManageStock,
  ManageStockByAttributes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BackorderMode {
  #[default]
  NoBackorders,
  AllowQtyBelowZero,
  AllowQtyBelowZeroAndNotifyCustomer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GiftCardType {
  #[default]
  Virtual,
  Physical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RecurringCyclePeriod {
  #[default]
  Days,
  Weeks,
  Months,
  Years,
}

/// Stock held for a product in one warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseStock {
  pub warehouse_id: u32,
  pub stock_quantity: i32,
  pub reserved_quantity: i32,
}

/// The shipment schedule shared by every recurring item of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringCycleInfo {
  pub cycle_length: i32,
  pub cycle_period: RecurringCyclePeriod,
  pub total_cycles: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: ProductId,
  pub name: String,
  /// URL slug of the product page, used when warnings link to a product.
  pub se_name: String,
  pub product_type: ProductType,
  pub deleted: bool,
  pub published: bool,

  pub disable_buy_button: bool,
  pub disable_wishlist_button: bool,
  pub call_for_price: bool,

  pub customer_enters_price: bool,
  pub minimum_customer_entered_price: Decimal,
  pub maximum_customer_entered_price: Decimal,

  pub order_minimum_quantity: i32,
  pub order_maximum_quantity: i32,
  /// Comma separated list, e.g. "1, 5, 10". Empty means any quantity.
  pub allowed_quantities: String,

  pub manage_inventory_method: ManageInventoryMethod,
  pub backorder_mode: BackorderMode,
  pub stock_quantity: i32,
  pub use_multiple_warehouses: bool,
  pub warehouse_inventory: Vec<WarehouseStock>,
  pub availability_range_id: Option<u32>,
  pub allow_adding_only_existing_attribute_combinations: bool,

  pub available_start_utc: Option<DateTime<Utc>>,
  pub available_end_utc: Option<DateTime<Utc>>,

  pub is_gift_card: bool,
  pub gift_card_type: GiftCardType,

  pub require_other_products: bool,
  /// Comma separated product identifiers.
  pub required_product_ids: String,
  pub automatically_add_required_products: bool,

  pub is_rental: bool,

  pub is_recurring: bool,
  pub recurring_cycle_length: i32,
  pub recurring_cycle_period: RecurringCyclePeriod,
  pub recurring_total_cycles: i32,

  pub is_ship_enabled: bool,
}

impl Product {
  pub fn new(id: ProductId, name: impl Into<String>) -> Self {
    let name = name.into();
    Self {
      id,
      se_name: name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-"),
      name,
      product_type: ProductType::Simple,
      deleted: false,
      published: true,
      disable_buy_button: false,
      disable_wishlist_button: false,
      call_for_price: false,
      customer_enters_price: false,
      minimum_customer_entered_price: Decimal::ZERO,
      maximum_customer_entered_price: Decimal::from(1000),
      order_minimum_quantity: 1,
      order_maximum_quantity: 10000,
      allowed_quantities: String::new(),
      manage_inventory_method: ManageInventoryMethod::DontManageStock,
      backorder_mode: BackorderMode::NoBackorders,
      stock_quantity: 0,
      use_multiple_warehouses: false,
      warehouse_inventory: Vec::new(),
      availability_range_id: None,
      allow_adding_only_existing_attribute_combinations: false,
      available_start_utc: None,
      available_end_utc: None,
      is_gift_card: false,
      gift_card_type: GiftCardType::Virtual,
      require_other_products: false,
      required_product_ids: String::new(),
      automatically_add_required_products: false,
      is_rental: false,
      is_recurring: false,
      recurring_cycle_length: 100,
      recurring_cycle_period: RecurringCyclePeriod::Days,
      recurring_total_cycles: 10,
      is_ship_enabled: true,
    }
  }

  /// Quantities a customer may order, in the order they were configured.
  /// Entries that are not integers are ignored.
  pub fn parse_allowed_quantities(&self) -> Vec<i32> {
    self
      .allowed_quantities
      .split(',')
      .filter_map(|part| part.trim().parse::<i32>().ok())
      .collect()
  }

  /// Identifiers of the products that must accompany this one in the cart.
  pub fn parse_required_product_ids(&self) -> Vec<ProductId> {
    let mut ids: Vec<ProductId> = Vec::new();
    for id in self
      .required_product_ids
      .split(',')
      .filter_map(|part| part.trim().parse::<ProductId>().ok())
    {
      if !ids.contains(&id) {
        ids.push(id);
      }
    }
    ids
  }

  pub fn requires(&self, product_id: ProductId) -> bool {
    self.require_other_products && self.parse_required_product_ids().contains(&product_id)
  }

  /// Stock that can still be sold. Only meaningful for `ManageStock` products;
  /// multi-warehouse products subtract reserved quantities.
  pub fn total_stock_quantity(&self) -> i32 {
    if self.manage_inventory_method != ManageInventoryMethod::ManageStock {
      return 0;
    }
    if !self.use_multiple_warehouses {
      return self.stock_quantity;
    }
    self
      .warehouse_inventory
      .iter()
      .map(|w| w.stock_quantity.saturating_sub(w.reserved_quantity))
      .fold(0i32, i32::saturating_add)
  }

  pub fn recurring_cycle(&self) -> RecurringCycleInfo {
    RecurringCycleInfo {
      cycle_length: self.recurring_cycle_length,
      cycle_period: self.recurring_cycle_period,
      total_cycles: self.recurring_total_cycles,
    }
  }
}
