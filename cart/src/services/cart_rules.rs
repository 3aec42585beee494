// shopcart/src/services/cart_rules.rs

//! Whole-cart checks and lookups.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use super::cart_service::ShoppingCartService;
use crate::attribute_parser::{gift_card_info, is_condition_met};
use crate::errors::Result;
use crate::helpers::round_price;
use crate::localization::keys;
use crate::models::{
  AttributeControlType, AttributeSelection, CartItem, CartType, Product, RecurringCycleInfo, StoreId,
};
use crate::pipelines::contexts::CartValidationCtx;

/// Recurring items of one cart disagree on their shipment schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CycleConflict;

/// The schedule shared by the recurring products, `None` when there are none.
pub(crate) fn shared_recurring_cycle<'p>(
  products: impl IntoIterator<Item = &'p Product>,
) -> std::result::Result<Option<RecurringCycleInfo>, CycleConflict> {
  let mut shared: Option<RecurringCycleInfo> = None;
  for product in products.into_iter().filter(|p| p.is_recurring) {
    let cycle = product.recurring_cycle();
    match shared {
      Some(existing) if existing != cycle => return Err(CycleConflict),
      _ => shared = Some(cycle),
    }
  }
  Ok(shared)
}

impl ShoppingCartService {
  /// Validates the cart as a whole: products must load, standard and recurring
  /// products must not be mixed, recurring schedules must agree, and when asked
  /// the checkout attributes must be complete.
  #[instrument(skip_all, fields(items = cart.len(), validate = validate_checkout_attributes, store_id = store_id))]
  pub fn cart_warnings(
    &self,
    cart: &[CartItem],
    checkout_attributes: &AttributeSelection,
    validate_checkout_attributes: bool,
    store_id: StoreId,
  ) -> Result<Vec<String>> {
    let mut ctx = CartValidationCtx::new(
      self.clone(),
      cart.to_vec(),
      checkout_attributes.clone(),
      validate_checkout_attributes,
      store_id,
    );
    self.workflows.run(&mut ctx)?;
    if !ctx.warnings.is_empty() {
      debug!(warnings = ?ctx.warnings, "Cart has warnings.");
    }
    Ok(ctx.warnings)
  }

  /// Required checkout attributes and text length rules. Conditional attributes
  /// only count when their condition holds; shippable-only attributes are
  /// ignored for carts that ship nothing.
  pub fn checkout_attribute_warnings(
    &self,
    cart: &[CartItem],
    selection: &AttributeSelection,
    store_id: StoreId,
  ) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    let exclude_shippable = !self.cart_requires_shipping(cart)?;
    let mut attributes = self.deps.catalog.checkout_attributes(store_id, exclude_shippable)?;
    attributes.retain(|a| is_condition_met(a.condition.as_ref(), selection).unwrap_or(true));

    for attribute in attributes.iter().filter(|a| a.is_required) {
      let entered = selection.values(attribute.id).iter().any(|v| !v.trim().is_empty());
      if entered {
        continue;
      }
      match attribute.text_prompt.as_deref() {
        Some(prompt) if !prompt.is_empty() => warnings.push(prompt.to_string()),
        _ => warnings.push(self.text_with(keys::SELECT_ATTRIBUTE, &[&attribute.name])),
      }
    }

    for attribute in &attributes {
      if !matches!(
        attribute.control_type,
        AttributeControlType::TextBox | AttributeControlType::MultilineTextbox
      ) {
        continue;
      }
      let entered_len = selection
        .values(attribute.id)
        .first()
        .map_or(0, |text| text.chars().count());
      if let Some(min) = attribute.validation_min_length {
        if min > entered_len {
          warnings.push(self.text_with(keys::TEXTBOX_MINIMUM_LENGTH, &[&attribute.name, &min]));
        }
      }
      if let Some(max) = attribute.validation_max_length {
        if max < entered_len {
          warnings.push(self.text_with(keys::TEXTBOX_MAXIMUM_LENGTH, &[&attribute.name, &max]));
        }
      }
    }

    Ok(warnings)
  }

  /// Drops selected checkout attributes that no longer apply to the cart:
  /// shippable-only attributes when nothing ships, and unknown attributes.
  pub fn ensure_only_active_checkout_attributes(
    &self,
    mut selection: AttributeSelection,
    cart: &[CartItem],
  ) -> Result<AttributeSelection> {
    let requires_shipping = self.cart_requires_shipping(cart)?;
    for attribute_id in selection.mapping_ids() {
      let keep = match self.deps.catalog.checkout_attribute(attribute_id)? {
        Some(attribute) => requires_shipping || !attribute.shippable_product_required,
        None => false,
      };
      if !keep {
        debug!(attribute_id, "Removing inactive checkout attribute.");
        selection.remove_mapping(attribute_id);
      }
    }
    Ok(selection)
  }

  /// The line of `cart` that a new line with these details would merge into.
  #[allow(clippy::too_many_arguments)]
  pub fn find_item_in_cart(
    &self,
    cart: &[CartItem],
    cart_type: CartType,
    product: &Product,
    selection: &AttributeSelection,
    customer_entered_price: Decimal,
    rental_start: Option<NaiveDate>,
    rental_end: Option<NaiveDate>,
  ) -> Result<Option<CartItem>> {
    let parser = self.parser();
    for item in cart
      .iter()
      .filter(|i| i.cart_type == cart_type && i.product_id == product.id)
    {
      if !parser.attributes_equal(&item.attributes, selection, false)? {
        continue;
      }

      if product.is_gift_card {
        let wanted = gift_card_info(selection);
        let existing = gift_card_info(&item.attributes);
        if wanted.recipient_name.to_lowercase() != existing.recipient_name.to_lowercase()
          || wanted.sender_name.to_lowercase() != existing.sender_name.to_lowercase()
        {
          continue;
        }
      }

      if product.customer_enters_price
        && round_price(item.customer_entered_price) != round_price(customer_entered_price)
      {
        continue;
      }

      if product.is_rental && (item.rental_start != rental_start || item.rental_end != rental_end) {
        continue;
      }

      return Ok(Some(item.clone()));
    }
    Ok(None)
  }

  /// True when at least one line's product ships.
  pub fn cart_requires_shipping(&self, cart: &[CartItem]) -> Result<bool> {
    for item in cart {
      if let Some(product) = self.deps.catalog.product(item.product_id)? {
        if product.is_ship_enabled {
          return Ok(true);
        }
      }
    }
    Ok(false)
  }

  pub fn cart_is_recurring(&self, cart: &[CartItem]) -> Result<bool> {
    for item in cart {
      if let Some(product) = self.deps.catalog.product(item.product_id)? {
        if product.is_recurring {
          return Ok(true);
        }
      }
    }
    Ok(false)
  }

  /// The shipment schedule of the cart's recurring items.
  ///
  /// The inner `Err` carries the conflicting-schedules warning. A product that
  /// cannot be loaded is an error.
  pub fn recurring_cycle_info(
    &self,
    cart: &[CartItem],
  ) -> Result<std::result::Result<Option<RecurringCycleInfo>, String>> {
    let mut products = Vec::with_capacity(cart.len());
    for item in cart {
      products.push(self.load_product(item.product_id)?);
    }
    Ok(
      shared_recurring_cycle(&products)
        .map_err(|CycleConflict| self.text(keys::CONFLICTING_SHIPMENT_SCHEDULES)),
    )
  }
}
