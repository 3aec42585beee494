// shopcart/src/services/cart_service.rs

use std::fmt::Display;
use std::sync::Arc;

use cartflow::Registry;
use tracing::{debug, error};
use uuid::Uuid;

use crate::attribute_parser::AttributeParser;
use crate::config::CartSettings;
use crate::errors::{CartError, Result};
use crate::localization::format_template;
use crate::models::{CartItem, CartType, Customer, Product, ProductId, StoreId};
use crate::pipelines::register_all_pipelines;
use crate::state::CartDeps;

/// Shopping cart and wishlist rules.
///
/// Validation operations return human readable warnings; an empty list means
/// the operation is allowed (or, for mutations, was applied). Errors are
/// reserved for misuse and collaborator failures.
#[derive(Clone)]
pub struct ShoppingCartService {
  pub(crate) deps: CartDeps,
  pub(crate) workflows: Arc<Registry<CartError>>,
}

impl ShoppingCartService {
  pub fn new(deps: CartDeps) -> Self {
    let workflows = Arc::new(Registry::new());
    register_all_pipelines(&workflows);
    Self { deps, workflows }
  }

  pub fn deps(&self) -> &CartDeps {
    &self.deps
  }

  pub fn settings(&self) -> &CartSettings {
    &self.deps.settings
  }

  /// The items of a customer's cart of the given type, optionally limited to one store.
  pub fn cart(&self, customer_id: Uuid, cart_type: CartType, store_id: Option<StoreId>) -> Result<Vec<CartItem>> {
    Ok(self.deps.cart_items.list_for_customer(customer_id, Some(cart_type), store_id)?)
  }

  pub(crate) fn parser(&self) -> AttributeParser<'_> {
    AttributeParser::new(self.deps.catalog.as_ref())
  }

  pub(crate) fn text(&self, key: &str) -> String {
    self.deps.localizer.resource(key)
  }

  pub(crate) fn text_with(&self, key: &str, args: &[&dyn Display]) -> String {
    format_template(&self.deps.localizer.resource(key), args)
  }

  pub(crate) fn load_customer(&self, customer_id: Uuid) -> Result<Customer> {
    self.deps.customers.customer(customer_id)?.ok_or_else(|| {
      error!(%customer_id, "Customer cannot be loaded.");
      CartError::CustomerNotFound(customer_id)
    })
  }

  pub(crate) fn load_product(&self, product_id: ProductId) -> Result<Product> {
    self.deps.catalog.product(product_id)?.ok_or_else(|| {
      error!(product_id, "Product cannot be loaded.");
      CartError::ProductNotFound(product_id)
    })
  }

  /// Keeps the customer's `has_cart_items` flag in line with the stored items.
  pub(crate) fn sync_has_cart_items(&self, customer_id: Uuid) -> Result<()> {
    let mut customer = self.load_customer(customer_id)?;
    let has_items = !self.deps.cart_items.list_for_customer(customer_id, None, None)?.is_empty();
    if customer.has_cart_items != has_items {
      debug!(%customer_id, has_items, "Updating has_cart_items flag.");
      customer.has_cart_items = has_items;
      self.deps.customers.update(&customer)?;
    }
    Ok(())
  }
}
