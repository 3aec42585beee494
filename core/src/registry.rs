// cartflow/src/registry.rs

//! Defines `Registry<E>`, a type-keyed registry for managing and executing pipelines.
//! Each context type maps to at most one pipeline; registering again replaces it.

use crate::core::control::PipelineResult;
use crate::core::pipeline_trait::AnyPipeline;
use crate::error::CartflowError;
use crate::pipeline::definition::Pipeline;

use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{event, Level};

/// Adapts `Pipeline<T, HandlerErr>` to the erased runner used by `Registry<AppErr>`.
struct PipelineWrapper<T, HandlerErr, AppErr>
where
  T: 'static,
  HandlerErr: std::error::Error + From<CartflowError> + Send + Sync + 'static,
{
  pipeline: Pipeline<T, HandlerErr>,
  _phantom_app_err: PhantomData<fn() -> AppErr>,
}

impl<T, HandlerErr, AppErr> AnyPipeline<AppErr> for PipelineWrapper<T, HandlerErr, AppErr>
where
  T: 'static,
  HandlerErr: std::error::Error + From<CartflowError> + Send + Sync + 'static,
  AppErr: std::error::Error + From<HandlerErr> + From<CartflowError> + Send + Sync + 'static,
{
  fn run_any_erased(&self, ctx: &mut dyn Any) -> Result<PipelineResult, AppErr> {
    let Some(typed_ctx) = ctx.downcast_mut::<T>() else {
      let expected_type = std::any::type_name::<T>();
      event!(Level::ERROR, "Context object type mismatch. Expected {}.", expected_type);
      return Err(AppErr::from(CartflowError::TypeMismatch {
        step_name: "registry_dispatch".to_string(),
        expected_type: expected_type.to_string(),
      }));
    };
    self.pipeline.run(typed_ctx).map_err(AppErr::from)
  }
}

/// The pipeline registry.
/// `AppErr` is the error type that `Registry::run` returns.
pub struct Registry<AppErr = CartflowError>
where
  AppErr: std::error::Error + From<CartflowError> + Send + Sync + 'static,
{
  pipelines: RwLock<HashMap<TypeId, Arc<dyn AnyPipeline<AppErr>>>>,
}

impl<AppErr> Default for Registry<AppErr>
where
  AppErr: std::error::Error + From<CartflowError> + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<AppErr> Registry<AppErr>
where
  AppErr: std::error::Error + From<CartflowError> + Send + Sync + 'static,
{
  pub fn new() -> Self {
    Self {
      pipelines: RwLock::new(HashMap::new()),
    }
  }

  /// Registers the pipeline for context type `T`, replacing any previous one.
  pub fn register_pipeline<T, HandlerErr>(&self, pipeline: Pipeline<T, HandlerErr>)
  where
    T: 'static,
    HandlerErr: std::error::Error + From<CartflowError> + Send + Sync + 'static,
    AppErr: From<HandlerErr>,
    Pipeline<T, HandlerErr>: Send + Sync,
  {
    event!(Level::DEBUG, context_type = %std::any::type_name::<T>(), "Registering pipeline.");
    let wrapper = PipelineWrapper::<T, HandlerErr, AppErr> {
      pipeline,
      _phantom_app_err: PhantomData,
    };
    self.pipelines.write().insert(TypeId::of::<T>(), Arc::new(wrapper));
  }

  pub fn is_registered<T: 'static>(&self) -> bool {
    self.pipelines.read().contains_key(&TypeId::of::<T>())
  }

  /// Runs the pipeline registered for the context type `T`.
  ///
  /// The registry lock is released before the pipeline runs, so handlers may
  /// re-enter the registry (for example to validate a dependent item).
  pub fn run<T: 'static>(&self, ctx: &mut T) -> Result<PipelineResult, AppErr> {
    let runner = self.pipelines.read().get(&TypeId::of::<T>()).cloned();
    let Some(runner) = runner else {
      let type_name = std::any::type_name::<T>();
      event!(Level::ERROR, "No pipeline registered for context type {}.", type_name);
      return Err(AppErr::from(CartflowError::ConfigurationError {
        step_name: "Registry::run".to_string(),
        message: format!("No pipeline registered for context type {}", type_name),
      }));
    };
    runner.run_any_erased(ctx)
  }
}
