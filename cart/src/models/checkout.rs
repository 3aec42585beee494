// shopcart/src/models/checkout.rs

use serde::{Deserialize, Serialize};

use super::attributes::{AttributeCondition, AttributeControlType};
use super::StoreId;

/// An attribute asked for once per checkout (gift wrapping, delivery notes...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutAttribute {
  pub id: u32,
  pub name: String,
  pub text_prompt: Option<String>,
  pub is_required: bool,
  pub control_type: AttributeControlType,
  pub validation_min_length: Option<usize>,
  pub validation_max_length: Option<usize>,
  /// Only offered when the cart contains something to ship.
  pub shippable_product_required: bool,
  pub condition: Option<AttributeCondition>,
  /// Empty means every store.
  pub store_ids: Vec<StoreId>,
}

impl CheckoutAttribute {
  pub fn new(id: u32, name: impl Into<String>, control_type: AttributeControlType) -> Self {
    Self {
      id,
      name: name.into(),
      text_prompt: None,
      is_required: false,
      control_type,
      validation_min_length: None,
      validation_max_length: None,
      shippable_product_required: false,
      condition: None,
      store_ids: Vec::new(),
    }
  }

  pub fn available_in_store(&self, store_id: StoreId) -> bool {
    self.store_ids.is_empty() || self.store_ids.contains(&store_id)
  }

  pub fn prompt(&self) -> &str {
    match self.text_prompt.as_deref() {
      Some(prompt) if !prompt.trim().is_empty() => prompt,
      _ => &self.name,
    }
  }
}
