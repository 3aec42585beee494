// shopcart/src/services/mutations.rs

//! Operations that change stored cart items.

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::cart_service::ShoppingCartService;
use super::requests::{AddToCartRequest, CartItemUpdate, ItemWarningRequest};
use crate::errors::Result;
use crate::models::{AttributeSelection, CartEvent, CartItem, CartType, Customer, StoreId};
use crate::pipelines::contexts::AddToCartCtx;

impl ShoppingCartService {
  /// Adds a product to the shopping cart or wishlist, merging into an equal
  /// line when there is one. Nothing is stored when warnings are returned.
  #[instrument(
    skip_all,
    fields(
      customer_id = %request.customer.id,
      product_id = request.product.id,
      cart_type = ?request.cart_type,
      quantity = request.quantity,
    )
  )]
  pub fn add_to_cart(&self, request: AddToCartRequest) -> Result<Vec<String>> {
    let mut ctx = AddToCartCtx::new(self.clone(), request);
    self.workflows.run(&mut ctx)?;
    if !ctx.warnings.is_empty() {
      debug!(warnings = ?ctx.warnings, "Add to cart rejected.");
    }
    Ok(ctx.warnings)
  }

  /// Applies new values to one of the customer's lines. A quantity of zero or
  /// less removes the line unless other lines still require its product.
  /// Unknown lines are ignored.
  #[instrument(skip_all, fields(customer_id = %customer.id, %item_id, quantity = update.quantity))]
  pub fn update_cart_item(&self, customer: &Customer, item_id: Uuid, update: CartItemUpdate) -> Result<Vec<String>> {
    let Some(mut item) = self
      .deps
      .cart_items
      .get(item_id)?
      .filter(|i| i.customer_id == customer.id)
    else {
      debug!("Cart item not found for customer, nothing to update.");
      return Ok(Vec::new());
    };

    if update.reset_checkout_data {
      self.deps.customers.reset_checkout_data(customer.id, item.store_id)?;
    }

    let product = self.load_product(item.product_id)?;

    if update.quantity > 0 {
      let request = ItemWarningRequest::new(customer, item.cart_type, &product, item.store_id)
        .attributes(update.attributes.clone())
        .customer_entered_price(update.customer_entered_price)
        .rental(update.rental_start, update.rental_end)
        .quantity(update.quantity)
        .add_required_products(false)
        .cart_item_id(item.id);
      let warnings = self.item_warnings(request)?;
      if !warnings.is_empty() {
        return Ok(warnings);
      }

      item.quantity = update.quantity;
      item.attributes = update.attributes;
      item.customer_entered_price = update.customer_entered_price;
      item.rental_start = update.rental_start;
      item.rental_end = update.rental_end;
      item.updated_at = self.deps.clock.now_utc();
      self.deps.cart_items.update(&item)?;
      info!(quantity = item.quantity, "Cart item updated.");
      self.deps.events.publish(CartEvent::Updated(item));
      return Ok(Vec::new());
    }

    let warnings = self.required_product_warnings(
      customer,
      item.cart_type,
      &product,
      item.store_id,
      update.quantity,
      false,
      Some(item.id),
    )?;
    if !warnings.is_empty() {
      return Ok(warnings);
    }

    self.delete_cart_item(&item, update.reset_checkout_data, true)?;
    Ok(Vec::new())
  }

  /// Removes a line. With `ensure_only_active_checkout_attributes` the saved
  /// checkout attributes are pruned to what the remaining shopping cart allows.
  #[instrument(skip_all, fields(item_id = %item.id, customer_id = %item.customer_id))]
  pub fn delete_cart_item(
    &self,
    item: &CartItem,
    reset_checkout_data: bool,
    ensure_only_active_checkout_attributes: bool,
  ) -> Result<()> {
    let customer_id = item.customer_id;
    let store_id = item.store_id;

    if reset_checkout_data {
      self.deps.customers.reset_checkout_data(customer_id, store_id)?;
    }

    if self.deps.cart_items.delete(item.id)?.is_none() {
      debug!("Cart item was already gone.");
    }
    info!(product_id = item.product_id, "Cart item deleted.");

    self.sync_has_cart_items(customer_id)?;

    if ensure_only_active_checkout_attributes && item.cart_type == CartType::ShoppingCart {
      self.prune_checkout_attributes(customer_id, store_id)?;
    }

    self.deps.events.publish(CartEvent::Deleted(item.clone()));

    if self.settings().remove_required_products {
      self.release_required_products(item)?;
    }
    Ok(())
  }

  fn prune_checkout_attributes(&self, customer_id: Uuid, store_id: StoreId) -> Result<()> {
    let Some(blob) = self.deps.customers.checkout_attributes(customer_id, store_id)? else {
      return Ok(());
    };
    let cart = self.cart(customer_id, CartType::ShoppingCart, Some(store_id))?;
    let selection = AttributeSelection::from_json(&blob)?;
    let pruned = self.ensure_only_active_checkout_attributes(selection, &cart)?;
    self
      .deps
      .customers
      .save_checkout_attributes(customer_id, store_id, Some(pruned.to_json()?))?;
    Ok(())
  }

  /// Lowers the quantity of the products the deleted line required, one unit
  /// per unit of the deleted line.
  fn release_required_products(&self, deleted: &CartItem) -> Result<()> {
    let Some(product) = self.deps.catalog.product(deleted.product_id)? else {
      return Ok(());
    };
    if !product.require_other_products {
      return Ok(());
    }

    let required_ids = product.parse_required_product_ids();
    let customer = self.load_customer(deleted.customer_id)?;
    let required_items: Vec<CartItem> = self
      .deps
      .cart_items
      .list_for_customer(deleted.customer_id, Some(deleted.cart_type), None)?
      .into_iter()
      .filter(|i| required_ids.contains(&i.product_id))
      .collect();

    for required in required_items {
      let remaining = required.quantity.saturating_sub(deleted.quantity);
      let update = CartItemUpdate::from_item(&required, remaining).keep_checkout_data();
      let warnings = self.update_cart_item(&customer, required.id, update)?;
      if !warnings.is_empty() {
        debug!(item_id = %required.id, ?warnings, "Required product quantity left unchanged.");
      }
    }
    Ok(())
  }

  /// Deletes by id; unknown ids are ignored.
  pub fn delete_cart_item_by_id(
    &self,
    item_id: Uuid,
    reset_checkout_data: bool,
    ensure_only_active_checkout_attributes: bool,
  ) -> Result<()> {
    match self.deps.cart_items.get(item_id)? {
      Some(item) => self.delete_cart_item(&item, reset_checkout_data, ensure_only_active_checkout_attributes),
      None => Ok(()),
    }
  }

  /// Removes every line last updated before `older_than` and returns how many were removed.
  #[instrument(skip(self))]
  pub fn delete_expired_cart_items(&self, older_than: DateTime<Utc>) -> Result<usize> {
    let removed = self.deps.cart_items.delete_updated_before(older_than)?;
    info!(removed, "Expired cart items deleted.");
    Ok(removed)
  }

  /// Moves every line of `from` into `to` (typically an anonymous visitor who
  /// just signed in), optionally with applied coupon codes, and carries over
  /// the checkout attributes saved for `store_id`.
  #[instrument(skip_all, fields(from = %from.id, to = %to.id, store_id = store_id))]
  pub fn migrate_cart(&self, from: &Customer, to: &Customer, store_id: StoreId, include_coupon_codes: bool) -> Result<()> {
    if from.id == to.id {
      return Ok(());
    }

    let from_cart = self.deps.cart_items.list_for_customer(from.id, None, None)?;
    for item in &from_cart {
      let product = self.load_product(item.product_id)?;
      let request = AddToCartRequest::new(to, &product, item.cart_type, item.store_id)
        .attributes(item.attributes.clone())
        .customer_entered_price(item.customer_entered_price)
        .rental(item.rental_start, item.rental_end)
        .quantity(item.quantity)
        .without_required_products();
      let warnings = self.add_to_cart(request)?;
      if !warnings.is_empty() {
        debug!(item_id = %item.id, ?warnings, "Item not accepted by the target cart.");
      }
    }
    for item in &from_cart {
      self.delete_cart_item(item, true, false)?;
    }

    if include_coupon_codes {
      for code in self.deps.customers.discount_coupon_codes(from.id)? {
        self.deps.customers.apply_discount_coupon_code(to.id, &code)?;
      }
      for code in self.deps.customers.gift_card_coupon_codes(from.id)? {
        self.deps.customers.apply_gift_card_coupon_code(to.id, &code)?;
      }
    }

    let checkout_attributes = self.deps.customers.checkout_attributes(from.id, store_id)?;
    self
      .deps
      .customers
      .save_checkout_attributes(to.id, store_id, checkout_attributes)?;

    info!(items = from_cart.len(), "Cart migrated.");
    Ok(())
  }
}
