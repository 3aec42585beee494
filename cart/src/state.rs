// shopcart/src/state.rs
use crate::config::CartSettings;
use crate::ports::{Authorization, CartItemRepository, Catalog, Clock, CustomerStore, EventPublisher, Localizer};
use std::sync::Arc;

/// Collaborators and settings shared by every cart operation.
#[derive(Clone)]
pub struct CartDeps {
  pub cart_items: Arc<dyn CartItemRepository>,
  pub catalog: Arc<dyn Catalog>,
  pub customers: Arc<dyn CustomerStore>,
  pub authorization: Arc<dyn Authorization>,
  pub events: Arc<dyn EventPublisher>,
  pub localizer: Arc<dyn Localizer>,
  pub clock: Arc<dyn Clock>,
  pub settings: Arc<CartSettings>,
}
