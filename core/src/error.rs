// cartflow/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartflowError {
  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("Type mismatch during context downcast (expected {expected_type}, step: '{step_name}')")]
  TypeMismatch {
    step_name: String,
    expected_type: String,
  },

  #[error("Error in user-provided handler or external operation. Source: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },

  #[error("Configuration error for step '{step_name}': {message}")]
  ConfigurationError { step_name: String, message: String },

  #[error("Internal cartflow error: {0}")]
  Internal(String),
}

// External failures surfaced from handlers always land in `HandlerError`,
// even when the anyhow chain already wraps a `CartflowError`.
impl From<AnyhowError> for CartflowError {
  fn from(err: AnyhowError) -> Self {
    CartflowError::HandlerError { source: err }
  }
}

pub type CartflowResult<T, E = CartflowError> = std::result::Result<T, E>;
