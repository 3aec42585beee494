// shopcart/src/pipelines/mod.rs

//! Cart rules expressed as cartflow pipelines, and their registration.

use std::sync::Arc;

use cartflow::Registry;

use crate::errors::CartError;

pub mod add_to_cart;
pub mod cart_validation;
pub mod contexts;
pub mod item_validation;

/// Registers every cart pipeline with the registry. Called once per service.
pub fn register_all_pipelines(registry: &Arc<Registry<CartError>>) {
  tracing::debug!("Registering cart pipelines...");

  item_validation::register_item_validation_pipeline(registry);
  cart_validation::register_cart_validation_pipeline(registry);
  add_to_cart::register_add_to_cart_pipeline(registry);

  tracing::debug!("All cart pipelines registered.");
}
