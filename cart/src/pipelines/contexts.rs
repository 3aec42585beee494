// shopcart/src/pipelines/contexts.rs

//! Data the cart pipelines operate on. Each context carries the service that
//! runs it, its inputs, intermediate lookups and the warnings produced.

use std::collections::HashMap;

use crate::models::{AttributeSelection, CartItem, Product, ProductId, StoreId};
use crate::services::requests::{AddToCartRequest, ItemWarningRequest};
use crate::services::ShoppingCartService;

pub struct ItemValidationCtx {
  pub service: ShoppingCartService,
  pub request: ItemWarningRequest,
  pub warnings: Vec<String>,
}

impl ItemValidationCtx {
  pub fn new(service: ShoppingCartService, request: ItemWarningRequest) -> Self {
    Self {
      service,
      request,
      warnings: Vec::new(),
    }
  }
}

pub struct CartValidationCtx {
  pub service: ShoppingCartService,
  pub cart: Vec<CartItem>,
  pub checkout_attributes: AttributeSelection,
  pub validate_checkout_attributes: bool,
  pub store_id: StoreId,
  pub products: HashMap<ProductId, Product>,
  pub has_standard_products: bool,
  pub has_recurring_products: bool,
  pub warnings: Vec<String>,
}

impl CartValidationCtx {
  pub fn new(
    service: ShoppingCartService,
    cart: Vec<CartItem>,
    checkout_attributes: AttributeSelection,
    validate_checkout_attributes: bool,
    store_id: StoreId,
  ) -> Self {
    Self {
      service,
      cart,
      checkout_attributes,
      validate_checkout_attributes,
      store_id,
      products: HashMap::new(),
      has_standard_products: false,
      has_recurring_products: false,
      warnings: Vec::new(),
    }
  }
}

pub struct AddToCartCtx {
  pub service: ShoppingCartService,
  pub request: AddToCartRequest,
  /// Lines of the same type and store before the add.
  pub cart: Vec<CartItem>,
  /// The equal line the request merges into.
  pub existing: Option<CartItem>,
  pub warnings: Vec<String>,
}

impl AddToCartCtx {
  pub fn new(service: ShoppingCartService, request: AddToCartRequest) -> Self {
    Self {
      service,
      request,
      cart: Vec::new(),
      existing: None,
      warnings: Vec::new(),
    }
  }
}
