// shopcart/src/services/item_rules.rs

//! Validators for a single prospective cart line.

use std::collections::HashMap;

use chrono::{FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::cart_service::ShoppingCartService;
use super::requests::{AddToCartRequest, ItemWarningRequest};
use crate::attribute_parser::{gift_card_info, is_condition_met};
use crate::errors::Result;
use crate::helpers::{format_price, html_encode, is_valid_email};
use crate::localization::{fixed, format_template, keys};
use crate::models::{
  AttributeControlType, AttributeSelection, AttributeValueType, BackorderMode, CartItem, CartType, Customer, GiftCardType,
  ManageInventoryMethod, Product, ProductAttributeMapping, ProductId, ProductType, StoreId,
};
use crate::pipelines::contexts::ItemValidationCtx;

impl ShoppingCartService {
  /// Product level checks: publication, permissions, price, quantity, stock and availability dates.
  #[allow(clippy::too_many_arguments)]
  pub fn standard_warnings(
    &self,
    customer: &Customer,
    cart_type: CartType,
    product: &Product,
    selection: &AttributeSelection,
    customer_entered_price: Decimal,
    quantity: i32,
    store_id: StoreId,
  ) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    if product.deleted {
      warnings.push(self.text(keys::PRODUCT_DELETED));
      return Ok(warnings);
    }

    if !product.published {
      warnings.push(self.text(keys::PRODUCT_UNPUBLISHED));
    }

    if product.product_type != ProductType::Simple {
      warnings.push(fixed::NOT_SIMPLE_PRODUCT.to_string());
    }

    if !self.deps.authorization.product_acl(customer, product) {
      warnings.push(self.text(keys::PRODUCT_UNPUBLISHED));
    }

    if !self.deps.authorization.store_mapping(product, store_id) {
      warnings.push(self.text(keys::PRODUCT_UNPUBLISHED));
    }

    if cart_type == CartType::ShoppingCart && product.disable_buy_button {
      warnings.push(self.text(keys::BUYING_DISABLED));
    }

    if cart_type == CartType::Wishlist && product.disable_wishlist_button {
      warnings.push(self.text(keys::WISHLIST_DISABLED));
    }

    let settings = self.settings();
    if cart_type == CartType::ShoppingCart
      && product.call_for_price
      && (!settings.allow_admins_to_buy_call_for_price_products || !customer.is_impersonated)
    {
      warnings.push(self.text(keys::CALL_FOR_PRICE));
    }

    if product.customer_enters_price
      && (customer_entered_price < product.minimum_customer_entered_price
        || customer_entered_price > product.maximum_customer_entered_price)
    {
      let currency = settings.primary_currency_code.as_str();
      warnings.push(self.text_with(
        keys::CUSTOMER_ENTERED_PRICE_RANGE,
        &[
          &format_price(product.minimum_customer_entered_price, currency),
          &format_price(product.maximum_customer_entered_price, currency),
        ],
      ));
    }

    let mut has_quantity_warnings = false;
    if quantity < product.order_minimum_quantity {
      warnings.push(self.text_with(keys::MINIMUM_QUANTITY, &[&product.order_minimum_quantity]));
      has_quantity_warnings = true;
    }
    if quantity > product.order_maximum_quantity {
      warnings.push(self.text_with(keys::MAXIMUM_QUANTITY, &[&product.order_maximum_quantity]));
      has_quantity_warnings = true;
    }
    let allowed_quantities = product.parse_allowed_quantities();
    if !allowed_quantities.is_empty() && !allowed_quantities.contains(&quantity) {
      let allowed = allowed_quantities
        .iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(", ");
      warnings.push(self.text_with(keys::ALLOWED_QUANTITIES, &[&allowed]));
    }

    let validate_stock =
      cart_type == CartType::ShoppingCart || !settings.allow_out_of_stock_items_to_be_added_to_wishlist;
    if validate_stock && !has_quantity_warnings {
      if let Some(warning) = self.stock_warning(product, selection, quantity)? {
        warnings.push(warning);
      }
    }

    let now = self.deps.clock.now_utc();
    let mut starts_later = false;
    if let Some(start) = product.available_start_utc {
      if start > now {
        warnings.push(self.text(keys::NOT_AVAILABLE));
        starts_later = true;
      }
    }
    if let Some(end) = product.available_end_utc {
      if !starts_later && end < now {
        warnings.push(self.text(keys::NOT_AVAILABLE));
      }
    }

    Ok(warnings)
  }

  fn stock_warning(&self, product: &Product, selection: &AttributeSelection, quantity: i32) -> Result<Option<String>> {
    match product.manage_inventory_method {
      ManageInventoryMethod::DontManageStock => Ok(None),
      ManageInventoryMethod::ManageStock => {
        if product.backorder_mode != BackorderMode::NoBackorders {
          return Ok(None);
        }
        let available = product.total_stock_quantity();
        self.short_stock_warning(product, available, quantity)
      }
      ManageInventoryMethod::ManageStockByAttributes => match self.parser().find_combination(product, selection)? {
        Some(combination) => {
          if combination.allow_out_of_stock_orders {
            return Ok(None);
          }
          self.short_stock_warning(product, combination.stock_quantity, quantity)
        }
        None if product.allow_adding_only_existing_attribute_combinations => {
          self.out_of_stock_warning(product).map(Some)
        }
        None => Ok(None),
      },
    }
  }

  fn short_stock_warning(&self, product: &Product, available: i32, quantity: i32) -> Result<Option<String>> {
    if available >= quantity {
      return Ok(None);
    }
    if available <= 0 {
      return self.out_of_stock_warning(product).map(Some);
    }
    Ok(Some(self.text_with(keys::QUANTITY_EXCEEDS_STOCK, &[&available])))
  }

  /// "Out of stock", or the restock estimate when the product has an availability range.
  fn out_of_stock_warning(&self, product: &Product) -> Result<String> {
    let range = match product.availability_range_id {
      Some(id) => self.deps.catalog.availability_range(id)?,
      None => None,
    };
    Ok(match range {
      Some(range) => self.text_with(keys::AVAILABILITY_RANGE, &[&range.name]),
      None => self.text(keys::OUT_OF_STOCK),
    })
  }

  /// Checks the selected attributes against the product's attribute mappings,
  /// then validates bundled products as lines of their own.
  #[allow(clippy::too_many_arguments)]
  pub fn attribute_warnings(
    &self,
    customer: &Customer,
    cart_type: CartType,
    product: &Product,
    quantity: i32,
    selection: &AttributeSelection,
    ignore_non_combinable: bool,
    ignore_condition_met: bool,
    store_id: StoreId,
  ) -> Result<Vec<String>> {
    let parser = self.parser();
    let mut warnings = Vec::new();

    let mut selected = Vec::new();
    for (mapping_id, mapping) in parser.selected_mappings(selection)? {
      let Some(mapping) = mapping else {
        debug!(mapping_id, "Selection refers to an unknown attribute mapping.");
        warnings.push(fixed::ATTRIBUTE_ERROR.to_string());
        return Ok(warnings);
      };
      if ignore_non_combinable && mapping.control_type.is_non_combinable() {
        continue;
      }
      if mapping.product_id != product.id {
        warnings.push(fixed::ATTRIBUTE_ERROR.to_string());
      }
      selected.push(mapping);
    }

    let mut mappings = self.deps.catalog.attribute_mappings_for_product(product.id)?;
    if ignore_non_combinable {
      mappings.retain(|m| !m.control_type.is_non_combinable());
    }
    if !ignore_condition_met {
      mappings.retain(|m| is_condition_met(m.condition.as_ref(), selection).unwrap_or(true));
    }

    for mapping in &mappings {
      if mapping.is_required {
        let entered = selected.iter().any(|s| s.id == mapping.id)
          && selection.values(mapping.id).iter().any(|v| !v.trim().is_empty());
        if !entered {
          warnings.push(self.missing_attribute_warning(mapping)?);
        }
      }

      if mapping.control_type == AttributeControlType::ReadonlyCheckboxes {
        let mut allowed: Vec<u32> = self
          .deps
          .catalog
          .attribute_values_for_mapping(mapping.id)?
          .into_iter()
          .filter(|v| v.is_pre_selected)
          .map(|v| v.id)
          .collect();
        let mut chosen: Vec<u32> = parser
          .selected_values(selection)?
          .into_iter()
          .filter(|v| v.mapping_id == mapping.id)
          .map(|v| v.id)
          .collect();
        allowed.sort_unstable();
        chosen.sort_unstable();
        if allowed != chosen {
          warnings.push(fixed::READ_ONLY_VALUES_CHANGED.to_string());
        }
      }
    }

    for mapping in mappings.iter().filter(|m| m.control_type.validation_rules_allowed()) {
      if !matches!(
        mapping.control_type,
        AttributeControlType::TextBox | AttributeControlType::MultilineTextbox
      ) {
        continue;
      }
      let entered_len = selection
        .values(mapping.id)
        .first()
        .map_or(0, |text| text.chars().count());
      if let Some(min) = mapping.validation_min_length {
        if min > entered_len {
          let name = self.attribute_name(mapping)?;
          warnings.push(self.text_with(keys::TEXTBOX_MINIMUM_LENGTH, &[&name, &min]));
        }
      }
      if let Some(max) = mapping.validation_max_length {
        if max < entered_len {
          let name = self.attribute_name(mapping)?;
          warnings.push(self.text_with(keys::TEXTBOX_MAXIMUM_LENGTH, &[&name, &max]));
        }
      }
    }

    if !warnings.is_empty() {
      return Ok(warnings);
    }

    // bundled products
    let mapping_by_id: HashMap<u32, &ProductAttributeMapping> = selected.iter().map(|m| (m.id, m)).collect();
    for value in parser.selected_values(selection)? {
      if value.value_type != AttributeValueType::AssociatedToProduct {
        continue;
      }
      let Some(mapping) = mapping_by_id.get(&value.mapping_id) else {
        continue;
      };
      let associated = match value.associated_product_id {
        Some(id) => self.deps.catalog.product(id)?,
        None => None,
      };
      let Some(associated) = associated else {
        let id = value.associated_product_id.unwrap_or_default();
        warnings.push(format_template(fixed::ASSOCIATED_PRODUCT_MISSING, &[&id]));
        continue;
      };

      let request = ItemWarningRequest::new(customer, cart_type, &associated, store_id)
        .quantity(quantity.saturating_mul(value.quantity))
        .add_required_products(false);
      let attribute_name = self.attribute_name(mapping)?;
      for warning in self.item_warnings(request)? {
        warnings.push(self.text_with(
          keys::ASSOCIATED_ATTRIBUTE_WARNING,
          &[&attribute_name, &value.name, &warning],
        ));
      }
    }

    Ok(warnings)
  }

  fn attribute_name(&self, mapping: &ProductAttributeMapping) -> Result<String> {
    Ok(
      self
        .deps
        .catalog
        .attribute(mapping.attribute_id)?
        .map(|a| a.name)
        .unwrap_or_default(),
    )
  }

  fn missing_attribute_warning(&self, mapping: &ProductAttributeMapping) -> Result<String> {
    match mapping.text_prompt.as_deref() {
      Some(prompt) if !prompt.is_empty() => Ok(prompt.to_string()),
      _ => {
        let name = self.attribute_name(mapping)?;
        Ok(self.text_with(keys::SELECT_ATTRIBUTE, &[&name]))
      }
    }
  }

  /// Recipient and sender details of gift cards. Virtual cards also need valid emails.
  pub fn gift_card_warnings(
    &self,
    _cart_type: CartType,
    product: &Product,
    selection: &AttributeSelection,
  ) -> Result<Vec<String>> {
    let mut warnings = Vec::new();
    if !product.is_gift_card {
      return Ok(warnings);
    }

    let info = gift_card_info(selection);
    let is_virtual = product.gift_card_type == GiftCardType::Virtual;

    if info.recipient_name.is_empty() {
      warnings.push(self.text(keys::RECIPIENT_NAME_ERROR));
    }
    if is_virtual && !is_valid_email(&info.recipient_email) {
      warnings.push(self.text(keys::RECIPIENT_EMAIL_ERROR));
    }
    if info.sender_name.is_empty() {
      warnings.push(self.text(keys::SENDER_NAME_ERROR));
    }
    if is_virtual && !is_valid_email(&info.sender_email) {
      warnings.push(self.text(keys::SENDER_EMAIL_ERROR));
    }
    Ok(warnings)
  }

  /// Rental period checks. Dates are calendar days in the store time zone.
  pub fn rental_warnings(
    &self,
    product: &Product,
    rental_start: Option<NaiveDate>,
    rental_end: Option<NaiveDate>,
  ) -> Result<Vec<String>> {
    if !product.is_rental {
      return Ok(Vec::new());
    }
    let Some(start) = rental_start else {
      return Ok(vec![self.text(keys::RENTAL_ENTER_START_DATE)]);
    };
    let Some(end) = rental_end else {
      return Ok(vec![self.text(keys::RENTAL_ENTER_END_DATE)]);
    };
    if start > end {
      return Ok(vec![self.text(keys::RENTAL_START_DATE_LESS_END_DATE)]);
    }
    if start < self.store_today() {
      return Ok(vec![self.text(keys::RENTAL_START_DATE_SHOULD_BE_FUTURE)]);
    }
    Ok(Vec::new())
  }

  fn store_today(&self) -> NaiveDate {
    let now = self.deps.clock.now_utc();
    let offset = self
      .settings()
      .store_utc_offset_minutes
      .checked_mul(60)
      .and_then(FixedOffset::east_opt);
    match offset {
      Some(offset) => now.with_timezone(&offset).date_naive(),
      None => now.date_naive(),
    }
  }

  /// Required product dependencies in both directions: products in the cart
  /// that require this one, and products this one requires. Missing required
  /// products are added automatically when the product asks for it.
  #[allow(clippy::too_many_arguments)]
  #[instrument(skip_all, fields(product_id = product.id, quantity = quantity))]
  pub fn required_product_warnings(
    &self,
    customer: &Customer,
    cart_type: CartType,
    product: &Product,
    store_id: StoreId,
    quantity: i32,
    add_required_products: bool,
    cart_item_id: Option<Uuid>,
  ) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    let cart = self
      .deps
      .cart_items
      .list_for_customer(customer.id, Some(cart_type), Some(store_id))?;
    let cart_product_ids: Vec<ProductId> = cart.iter().map(|i| i.product_id).collect();
    let cart_products: HashMap<ProductId, Product> = self
      .deps
      .catalog
      .products(&cart_product_ids)?
      .into_iter()
      .map(|p| (p.id, p))
      .collect();
    let item_requires = |item: &CartItem, product_id: ProductId| {
      cart_products
        .get(&item.product_id)
        .is_some_and(|p| p.requires(product_id))
    };

    let required_by_cart = cart
      .iter()
      .filter(|i| item_requires(i, product.id))
      .fold(0i32, |total, i| total.saturating_add(i.quantity));
    if required_by_cart > quantity {
      warnings.push(self.text_with(keys::REQUIRED_PRODUCT_UPDATE_WARNING, &[&required_by_cart]));
    }

    if !product.require_other_products {
      return Ok(warnings);
    }

    let required_products = self.deps.catalog.products(&product.parse_required_product_ids())?;
    if required_products.is_empty() {
      return Ok(warnings);
    }

    let template = self.text(keys::REQUIRED_PRODUCT_WARNING);
    for required in required_products {
      let required_quantity = cart
        .iter()
        .filter(|i| item_requires(i, required.id) && Some(i.id) != cart_item_id)
        .fold(quantity, |total, i| total.saturating_add(i.quantity));
      let in_cart = cart
        .iter()
        .find(|i| i.product_id == required.id)
        .map_or(0, |i| i.quantity);
      let to_add = required_quantity.saturating_sub(in_cart);
      if to_add <= 0 {
        continue;
      }

      let name = html_encode(&required.name);
      let display_name = if self.settings().use_links_in_required_product_warnings {
        format!("<a href=\"/{}\">{}</a>", required.se_name, name)
      } else {
        name
      };
      let warning = format_template(&template, &[&display_name, &required_quantity]);

      if add_required_products && product.automatically_add_required_products {
        debug!(required_product_id = required.id, to_add, "Adding required product.");
        let request = AddToCartRequest::new(customer, &required, cart_type, store_id)
          .quantity(to_add)
          .without_required_products();
        if !self.add_to_cart(request)?.is_empty() {
          warnings.push(warning);
        }
      } else {
        warnings.push(warning);
      }
    }

    Ok(warnings)
  }

  /// Runs the validators enabled in `request.checks`, in order: standard,
  /// attributes, gift card, required products, rental.
  #[instrument(skip_all, fields(product_id = request.product.id, quantity = request.quantity))]
  pub fn item_warnings(&self, request: ItemWarningRequest) -> Result<Vec<String>> {
    let mut ctx = ItemValidationCtx::new(self.clone(), request);
    self.workflows.run(&mut ctx)?;
    if !ctx.warnings.is_empty() {
      debug!(warnings = ?ctx.warnings, "Cart item has warnings.");
    }
    Ok(ctx.warnings)
  }
}
