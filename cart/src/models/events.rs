// shopcart/src/models/events.rs

use super::cart_item::CartItem;

/// Notifications published after a cart item is persisted or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
  Inserted(CartItem),
  Updated(CartItem),
  Deleted(CartItem),
}

impl CartEvent {
  pub fn item(&self) -> &CartItem {
    match self {
      CartEvent::Inserted(item) | CartEvent::Updated(item) | CartEvent::Deleted(item) => item,
    }
  }
}
