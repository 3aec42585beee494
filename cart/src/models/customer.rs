// shopcart/src/models/customer.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
  pub id: Uuid,
  pub email: Option<String>,
  pub is_search_engine_account: bool,
  /// An administrator is acting on behalf of this customer.
  pub is_impersonated: bool,
  pub has_cart_items: bool,
}

impl Customer {
  pub fn new() -> Self {
    Self {
      id: Uuid::new_v4(),
      email: None,
      is_search_engine_account: false,
      is_impersonated: false,
      has_cart_items: false,
    }
  }
}

impl Default for Customer {
  fn default() -> Self {
    Self::new()
  }
}
