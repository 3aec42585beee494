// shopcart/src/pipelines/cart_validation.rs
use crate::errors::CartError;
use crate::localization::keys;
use crate::pipelines::contexts::CartValidationCtx;
use crate::services::cart_rules::shared_recurring_cycle;
use cartflow::{Pipeline, PipelineControl, Registry, SkipCondition};
use std::sync::Arc;
use tracing::{debug, warn};

pub const LOAD_PRODUCTS: &str = "load_products";
pub const PRODUCT_MIX: &str = "standard_recurring_mix";
pub const RECURRING_SCHEDULE: &str = "recurring_schedule";
pub const CHECKOUT_ATTRIBUTES: &str = "checkout_attributes";

pub fn register_cart_validation_pipeline(registry: &Arc<Registry<CartError>>) {
  registry.register_pipeline(cart_validation_pipeline());
}

pub fn cart_validation_pipeline() -> Pipeline<CartValidationCtx, CartError> {
  let skip_schedule: SkipCondition<CartValidationCtx> =
    Arc::new(|ctx: &CartValidationCtx| !ctx.has_recurring_products);
  let skip_checkout: SkipCondition<CartValidationCtx> =
    Arc::new(|ctx: &CartValidationCtx| !ctx.validate_checkout_attributes);

  let mut p = Pipeline::<CartValidationCtx, CartError>::new(&[
    (LOAD_PRODUCTS, false, None),
    (PRODUCT_MIX, false, None),
    (RECURRING_SCHEDULE, false, Some(skip_schedule)),
    (CHECKOUT_ATTRIBUTES, false, Some(skip_checkout)),
  ]);

  // A line whose product is gone makes the rest of the checks meaningless.
  p.on_root(LOAD_PRODUCTS, |ctx: &mut CartValidationCtx| -> Result<PipelineControl, CartError> {
    for item in &ctx.cart {
      let Some(product) = ctx.service.deps.catalog.product(item.product_id)? else {
        warn!(product_id = item.product_id, "Cart refers to a product that cannot be loaded.");
        let warning = ctx
          .service
          .text_with(keys::CANNOT_LOAD_PRODUCT, &[&item.product_id]);
        ctx.warnings.push(warning);
        return Ok(PipelineControl::Stop);
      };
      if product.is_recurring {
        ctx.has_recurring_products = true;
      } else {
        ctx.has_standard_products = true;
      }
      ctx.products.insert(product.id, product);
    }
    Ok(PipelineControl::Continue)
  });

  p.on_root(PRODUCT_MIX, |ctx: &mut CartValidationCtx| -> Result<PipelineControl, CartError> {
    if ctx.has_standard_products && ctx.has_recurring_products {
      let warning = ctx.service.text(keys::CANNOT_MIX_STANDARD_AND_AUTOSHIP);
      ctx.warnings.push(warning);
    }
    Ok(PipelineControl::Continue)
  });

  p.on_root(RECURRING_SCHEDULE, |ctx: &mut CartValidationCtx| -> Result<PipelineControl, CartError> {
    if shared_recurring_cycle(ctx.products.values()).is_err() {
      debug!("Recurring items have conflicting schedules.");
      let warning = ctx.service.text(keys::CONFLICTING_SHIPMENT_SCHEDULES);
      ctx.warnings.push(warning);
      return Ok(PipelineControl::Stop);
    }
    Ok(PipelineControl::Continue)
  });

  p.on_root(CHECKOUT_ATTRIBUTES, |ctx: &mut CartValidationCtx| -> Result<PipelineControl, CartError> {
    let warnings = ctx
      .service
      .checkout_attribute_warnings(&ctx.cart, &ctx.checkout_attributes, ctx.store_id)?;
    ctx.warnings.extend(warnings);
    Ok(PipelineControl::Continue)
  });

  p
}
