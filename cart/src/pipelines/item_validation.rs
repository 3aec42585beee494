// shopcart/src/pipelines/item_validation.rs
use crate::errors::CartError;
use crate::pipelines::contexts::ItemValidationCtx;
use cartflow::{Pipeline, PipelineControl, Registry, SkipCondition};
use std::sync::Arc;

pub const STANDARD: &str = "standard_warnings";
pub const ATTRIBUTES: &str = "attribute_warnings";
pub const GIFT_CARD: &str = "gift_card_warnings";
pub const REQUIRED_PRODUCTS: &str = "required_product_warnings";
pub const RENTAL: &str = "rental_warnings";

pub fn register_item_validation_pipeline(registry: &Arc<Registry<CartError>>) {
  registry.register_pipeline(item_validation_pipeline());
}

/// One step per validator; a validator switched off in the request's checks is skipped.
pub fn item_validation_pipeline() -> Pipeline<ItemValidationCtx, CartError> {
  let skip_standard: SkipCondition<ItemValidationCtx> = Arc::new(|ctx: &ItemValidationCtx| !ctx.request.checks.standard);
  let skip_attributes: SkipCondition<ItemValidationCtx> =
    Arc::new(|ctx: &ItemValidationCtx| !ctx.request.checks.attributes);
  let skip_gift_card: SkipCondition<ItemValidationCtx> =
    Arc::new(|ctx: &ItemValidationCtx| !ctx.request.checks.gift_card);
  let skip_required: SkipCondition<ItemValidationCtx> =
    Arc::new(|ctx: &ItemValidationCtx| !ctx.request.checks.required_products);
  let skip_rental: SkipCondition<ItemValidationCtx> = Arc::new(|ctx: &ItemValidationCtx| !ctx.request.checks.rental);

  let mut p = Pipeline::<ItemValidationCtx, CartError>::new(&[
    (STANDARD, false, Some(skip_standard)),
    (ATTRIBUTES, false, Some(skip_attributes)),
    (GIFT_CARD, false, Some(skip_gift_card)),
    (REQUIRED_PRODUCTS, false, Some(skip_required)),
    (RENTAL, false, Some(skip_rental)),
  ]);

  p.on_root(STANDARD, standard_step);
  p.on_root(ATTRIBUTES, attributes_step);
  p.on_root(GIFT_CARD, gift_card_step);
  p.on_root(REQUIRED_PRODUCTS, required_products_step);
  p.on_root(RENTAL, rental_step);
  p
}

fn standard_step(ctx: &mut ItemValidationCtx) -> Result<PipelineControl, CartError> {
  let r = &ctx.request;
  let warnings = ctx.service.standard_warnings(
    &r.customer,
    r.cart_type,
    &r.product,
    &r.attributes,
    r.customer_entered_price,
    r.quantity,
    r.store_id,
  )?;
  ctx.warnings.extend(warnings);
  Ok(PipelineControl::Continue)
}

fn attributes_step(ctx: &mut ItemValidationCtx) -> Result<PipelineControl, CartError> {
  let r = &ctx.request;
  let warnings = ctx.service.attribute_warnings(
    &r.customer,
    r.cart_type,
    &r.product,
    r.quantity,
    &r.attributes,
    false,
    false,
    r.store_id,
  )?;
  ctx.warnings.extend(warnings);
  Ok(PipelineControl::Continue)
}

fn gift_card_step(ctx: &mut ItemValidationCtx) -> Result<PipelineControl, CartError> {
  let r = &ctx.request;
  let warnings = ctx.service.gift_card_warnings(r.cart_type, &r.product, &r.attributes)?;
  ctx.warnings.extend(warnings);
  Ok(PipelineControl::Continue)
}

fn required_products_step(ctx: &mut ItemValidationCtx) -> Result<PipelineControl, CartError> {
  let r = &ctx.request;
  let warnings = ctx.service.required_product_warnings(
    &r.customer,
    r.cart_type,
    &r.product,
    r.store_id,
    r.quantity,
    r.add_required_products,
    r.cart_item_id,
  )?;
  ctx.warnings.extend(warnings);
  Ok(PipelineControl::Continue)
}

fn rental_step(ctx: &mut ItemValidationCtx) -> Result<PipelineControl, CartError> {
  let r = &ctx.request;
  let warnings = ctx.service.rental_warnings(&r.product, r.rental_start, r.rental_end)?;
  ctx.warnings.extend(warnings);
  Ok(PipelineControl::Continue)
}
