// shopcart/src/models/cart_item.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::selection::AttributeSelection;
use super::{ProductId, StoreId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CartType {
  ShoppingCart,
  Wishlist,
}

/// A line of a customer's shopping cart or wishlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
  pub id: Uuid,
  pub customer_id: Uuid,
  pub store_id: StoreId,
  pub cart_type: CartType,
  pub product_id: ProductId,
  pub attributes: AttributeSelection,
  pub customer_entered_price: Decimal,
  /// Always positive once persisted.
  pub quantity: i32,
  pub rental_start: Option<NaiveDate>,
  pub rental_end: Option<NaiveDate>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}
