// cartflow/src/pipeline/execution.rs

//! Contains the `Pipeline::run()` method, responsible for executing the
//! pipeline's steps and handlers against a context.

use crate::core::context::Handler;
use crate::core::control::{PipelineControl, PipelineResult};
use crate::error::CartflowError;
use crate::pipeline::definition::Pipeline;
use std::collections::HashMap;
use tracing::{event, instrument, span, Level};

#[derive(Clone, Copy, Debug)]
enum Phase {
  Before,
  On,
  After,
}

impl Phase {
  fn label(self) -> &'static str {
    match self {
      Phase::Before => "before",
      Phase::On => "on",
      Phase::After => "after",
    }
  }
}

impl<T, Err> Pipeline<T, Err>
where
  T: 'static,
  Err: std::error::Error + From<CartflowError> + Send + Sync + 'static,
{
  /// Executes the pipeline against `ctx`.
  ///
  /// Steps run in definition order. A step is skipped when its `skip_if`
  /// condition holds, or when it is optional and has no handlers. A
  /// non-optional step without any handler fails with
  /// `CartflowError::HandlerMissing`, converted into `Err`.
  #[instrument(
    name = "Pipeline::run",
    skip_all,
    fields(
      context_type = %std::any::type_name::<T>(),
      num_steps = self.steps.len(),
    ),
    err(Display)
  )]
  pub fn run(&self, ctx: &mut T) -> Result<PipelineResult, Err> {
    event!(Level::DEBUG, "Pipeline execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name = step_def.name.as_str();

      let step_span = span!(
        Level::DEBUG,
        "pipeline_step",
        step_name = step_name,
        step_index = step_idx,
        optional = step_def.optional
      );
      let _step_span_guard = step_span.enter();

      if let Some(skip_cond_fn) = &step_def.skip_if {
        if skip_cond_fn(&*ctx) {
          event!(Level::DEBUG, "Step skipped due to 'skip_if' condition.");
          continue;
        }
      }

      let has_handlers = [&self.before, &self.on, &self.after]
        .iter()
        .any(|phase| phase.get(step_name).is_some_and(|v| !v.is_empty()));

      if !has_handlers {
        if step_def.optional {
          event!(Level::TRACE, "Optional step has no handlers, skipping.");
          continue;
        }
        event!(Level::ERROR, "Non-optional step has no handlers.");
        return Err(Err::from(CartflowError::HandlerMissing {
          step_name: step_def.name.clone(),
        }));
      }

      for (phase, handlers) in [
        (Phase::Before, &self.before),
        (Phase::On, &self.on),
        (Phase::After, &self.after),
      ] {
        if let PipelineControl::Stop = Self::run_phase(phase, handlers, step_name, ctx)? {
          event!(Level::DEBUG, phase = phase.label(), "Pipeline stopped by a handler.");
          return Ok(PipelineResult::Stopped);
        }
      }
    }

    event!(Level::DEBUG, "Pipeline execution completed.");
    Ok(PipelineResult::Completed)
  }

  fn run_phase(
    phase: Phase,
    handlers: &HashMap<String, Vec<Handler<T, Err>>>,
    step_name: &str,
    ctx: &mut T,
  ) -> Result<PipelineControl, Err> {
    let Some(handlers) = handlers.get(step_name) else {
      return Ok(PipelineControl::Continue);
    };
    for (handler_idx, handler_fn) in handlers.iter().enumerate() {
      match handler_fn(ctx) {
        Ok(PipelineControl::Continue) => {}
        Ok(PipelineControl::Stop) => return Ok(PipelineControl::Stop),
        Err(e) => {
          event!(Level::ERROR, phase = phase.label(), handler_index = handler_idx, error = %e, "Handler failed.");
          return Err(e);
        }
      }
    }
    Ok(PipelineControl::Continue)
  }
}
