// cartflow/src/core/pipeline_trait.rs

//! Defines the `AnyPipeline<E>` trait for type-erased pipeline execution by the registry.

use crate::core::control::PipelineResult;
use crate::error::CartflowError;
use std::any::Any;

/// A type-erased trait that lets the `Registry` run pipelines without knowing
/// their context type `T` at the registry level.
///
/// `E` is the error type the application wants `Registry::run` to return.
pub trait AnyPipeline<E>: Send + Sync
where
  E: std::error::Error + From<CartflowError> + Send + Sync + 'static,
{
  /// Executes the pipeline with a type-erased context.
  /// Implementations downcast `ctx` to their concrete context type.
  fn run_any_erased(&self, ctx: &mut dyn Any) -> Result<PipelineResult, E>;
}
