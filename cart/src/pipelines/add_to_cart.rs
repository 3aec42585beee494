// shopcart/src/pipelines/add_to_cart.rs
use crate::errors::CartError;
use crate::localization::{fixed, keys};
use crate::models::{CartEvent, CartItem, CartType};
use crate::pipelines::contexts::AddToCartCtx;
use cartflow::{Pipeline, PipelineControl, Registry, SkipCondition};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

pub const CHECK_PERMISSIONS: &str = "check_permissions";
pub const RESET_CHECKOUT_DATA: &str = "reset_checkout_data";
pub const FIND_EXISTING_ITEM: &str = "find_existing_item";
pub const MERGE_INTO_EXISTING: &str = "merge_into_existing";
pub const INSERT_NEW_ITEM: &str = "insert_new_item";

pub fn register_add_to_cart_pipeline(registry: &Arc<Registry<CartError>>) {
  registry.register_pipeline(add_to_cart_pipeline());
}

pub fn add_to_cart_pipeline() -> Pipeline<AddToCartCtx, CartError> {
  let skip_merge: SkipCondition<AddToCartCtx> = Arc::new(|ctx: &AddToCartCtx| ctx.existing.is_none());
  let skip_insert: SkipCondition<AddToCartCtx> = Arc::new(|ctx: &AddToCartCtx| ctx.existing.is_some());

  let mut p = Pipeline::<AddToCartCtx, CartError>::new(&[
    (CHECK_PERMISSIONS, false, None),
    (RESET_CHECKOUT_DATA, false, None),
    (FIND_EXISTING_ITEM, false, None),
    (MERGE_INTO_EXISTING, false, Some(skip_merge)),
    (INSERT_NEW_ITEM, false, Some(skip_insert)),
  ]);

  p.on_root(CHECK_PERMISSIONS, check_permissions);
  p.on_root(RESET_CHECKOUT_DATA, reset_checkout_data);
  p.on_root(FIND_EXISTING_ITEM, find_existing_item);
  p.on_root(MERGE_INTO_EXISTING, merge_into_existing);
  p.on_root(INSERT_NEW_ITEM, insert_new_item);
  p
}

fn reject(ctx: &mut AddToCartCtx, warning: String) -> Result<PipelineControl, CartError> {
  debug!(%warning, "Add to cart refused.");
  ctx.warnings.push(warning);
  Ok(PipelineControl::Stop)
}

fn check_permissions(ctx: &mut AddToCartCtx) -> Result<PipelineControl, CartError> {
  let r = &ctx.request;
  let authorization = &ctx.service.deps.authorization;

  if r.cart_type == CartType::ShoppingCart && !authorization.can_use(&r.customer, CartType::ShoppingCart) {
    return reject(ctx, fixed::SHOPPING_CART_DISABLED.to_string());
  }
  if r.cart_type == CartType::Wishlist && !authorization.can_use(&r.customer, CartType::Wishlist) {
    return reject(ctx, fixed::WISHLIST_DISABLED.to_string());
  }
  if r.customer.is_search_engine_account {
    return reject(ctx, fixed::SEARCH_ENGINE.to_string());
  }
  if r.quantity <= 0 {
    let warning = ctx.service.text(keys::QUANTITY_SHOULD_BE_POSITIVE);
    return reject(ctx, warning);
  }
  // nothing may be written for a customer the store does not know
  ctx.service.load_customer(ctx.request.customer.id)?;
  Ok(PipelineControl::Continue)
}

fn reset_checkout_data(ctx: &mut AddToCartCtx) -> Result<PipelineControl, CartError> {
  ctx
    .service
    .deps
    .customers
    .reset_checkout_data(ctx.request.customer.id, ctx.request.store_id)?;
  Ok(PipelineControl::Continue)
}

fn find_existing_item(ctx: &mut AddToCartCtx) -> Result<PipelineControl, CartError> {
  let r = &ctx.request;
  let cart = ctx.service.cart(r.customer.id, r.cart_type, Some(r.store_id))?;
  let existing = ctx.service.find_item_in_cart(
    &cart,
    r.cart_type,
    &r.product,
    &r.attributes,
    r.customer_entered_price,
    r.rental_start,
    r.rental_end,
  )?;
  ctx.cart = cart;
  ctx.existing = existing;
  Ok(PipelineControl::Continue)
}

#[instrument(skip_all, fields(item_id = ?ctx.existing.as_ref().map(|i| i.id)))]
fn merge_into_existing(ctx: &mut AddToCartCtx) -> Result<PipelineControl, CartError> {
  let Some(mut item) = ctx.existing.clone() else {
    return Ok(PipelineControl::Continue);
  };
  let Some(new_quantity) = item.quantity.checked_add(ctx.request.quantity) else {
    let max = ctx.request.product.order_maximum_quantity;
    let warning = ctx.service.text_with(keys::MAXIMUM_QUANTITY, &[&max]);
    return reject(ctx, warning);
  };
  let request = ctx.request.item_warning_request(new_quantity, Some(item.id));
  let warnings = ctx.service.item_warnings(request)?;
  if !warnings.is_empty() {
    ctx.warnings.extend(warnings);
    return Ok(PipelineControl::Stop);
  }

  item.attributes = ctx.request.attributes.clone();
  item.quantity = new_quantity;
  item.updated_at = ctx.service.deps.clock.now_utc();
  ctx.service.deps.cart_items.update(&item)?;
  info!(quantity = new_quantity, "Cart item quantity increased.");

  ctx.service.deps.events.publish(CartEvent::Updated(item));
  Ok(PipelineControl::Continue)
}

#[instrument(skip_all, fields(product_id = ctx.request.product.id))]
fn insert_new_item(ctx: &mut AddToCartCtx) -> Result<PipelineControl, CartError> {
  let request = ctx.request.item_warning_request(ctx.request.quantity, None);
  let warnings = ctx.service.item_warnings(request)?;
  if !warnings.is_empty() {
    ctx.warnings.extend(warnings);
    return Ok(PipelineControl::Stop);
  }

  let settings = ctx.service.settings();
  let (limit, key) = match ctx.request.cart_type {
    CartType::ShoppingCart => (settings.maximum_shopping_cart_items, keys::MAXIMUM_SHOPPING_CART_ITEMS),
    CartType::Wishlist => (settings.maximum_wishlist_items, keys::MAXIMUM_WISHLIST_ITEMS),
  };
  if ctx.cart.len() >= limit {
    let warning = ctx.service.text_with(key, &[&limit]);
    return reject(ctx, warning);
  }

  let r = &ctx.request;
  let now = ctx.service.deps.clock.now_utc();
  let item = CartItem {
    id: Uuid::new_v4(),
    customer_id: r.customer.id,
    store_id: r.store_id,
    cart_type: r.cart_type,
    product_id: r.product.id,
    attributes: r.attributes.clone(),
    customer_entered_price: r.customer_entered_price,
    quantity: r.quantity,
    rental_start: r.rental_start,
    rental_end: r.rental_end,
    created_at: now,
    updated_at: now,
  };
  ctx.service.deps.cart_items.insert(&item)?;
  info!(item_id = %item.id, quantity = item.quantity, "Cart item inserted.");

  ctx.service.sync_has_cart_items(item.customer_id)?;
  ctx.service.deps.events.publish(CartEvent::Inserted(item));
  Ok(PipelineControl::Continue)
}
