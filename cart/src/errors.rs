// shopcart/src/errors.rs

use cartflow::CartflowError;
use thiserror::Error;
use uuid::Uuid;

use crate::models::ProductId;

/// Failures of the cart service itself.
///
/// Business-rule violations are never errors: they are returned to the caller
/// as warning strings. Errors are reserved for misuse and integrity problems.
#[derive(Debug, Error)]
pub enum CartError {
  #[error("Product (Id={0}) cannot be loaded")]
  ProductNotFound(ProductId),

  #[error("Customer {0} not found")]
  CustomerNotFound(Uuid),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Attribute blob is not valid JSON: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Storage Error: {0}")]
  Storage(anyhow::Error),

  #[error("Cart workflow error: {source}")]
  Workflow {
    #[from]
    source: CartflowError,
  },
}

// Collaborator traits report failures through anyhow; keep a typed CartError
// when one was boxed on the way.
impl From<anyhow::Error> for CartError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<CartError>() {
      Ok(cart_err) => cart_err,
      Err(other) => CartError::Storage(other),
    }
  }
}

pub type Result<T, E = CartError> = std::result::Result<T, E>;
