// cartflow/src/pipeline/hooks.rs

//! Methods for registering `before`, `on`, and `after` handlers for pipeline steps.

use tracing::{event, Level};

use crate::core::context::Handler;
use crate::core::control::PipelineControl;
use crate::error::CartflowError;
use crate::pipeline::definition::Pipeline;

impl<T, Err> Pipeline<T, Err>
where
  T: 'static,
  Err: std::error::Error + From<CartflowError> + Send + Sync + 'static,
{
  fn wrap<UserErr>(
    handler_fn: impl Fn(&mut T) -> Result<PipelineControl, UserErr> + Send + Sync + 'static,
  ) -> Handler<T, Err>
  where
    UserErr: Into<Err> + 'static,
  {
    Box::new(move |ctx: &mut T| handler_fn(ctx).map_err(Into::into))
  }

  /// Registers a `before` hook for a given step.
  ///
  /// The handler may return any error type convertible into the pipeline's `Err`.
  pub fn before_root<UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(&mut T) -> Result<PipelineControl, UserErr> + Send + Sync + 'static,
  ) where
    UserErr: Into<Err> + 'static,
  {
    self.ensure_step_exists(step_name);
    self
      .before
      .entry(step_name.to_string())
      .or_default()
      .push(Self::wrap(handler_fn));
  }

  /// Registers an `on` hook for a given step.
  pub fn on_root<UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(&mut T) -> Result<PipelineControl, UserErr> + Send + Sync + 'static,
  ) where
    UserErr: Into<Err> + 'static,
  {
    self.ensure_step_exists(step_name);
    self.on.entry(step_name.to_string()).or_default().push(Self::wrap(handler_fn));
    event!(Level::TRACE, %step_name, "'on' handler registered.");
  }

  /// Registers an `after` hook for a given step.
  pub fn after_root<UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(&mut T) -> Result<PipelineControl, UserErr> + Send + Sync + 'static,
  ) where
    UserErr: Into<Err> + 'static,
  {
    self.ensure_step_exists(step_name);
    self
      .after
      .entry(step_name.to_string())
      .or_default()
      .push(Self::wrap(handler_fn));
  }

  /// Registers an already boxed handler under the `on` phase.
  pub fn on_boxed(&mut self, step_name: &str, handler: Handler<T, Err>) {
    self.ensure_step_exists(step_name);
    self.on.entry(step_name.to_string()).or_default().push(handler);
  }
}
