// cartflow/src/core/context.rs

//! Defines the `Handler<T, Err>` type for pipeline step handlers.

use crate::core::control::PipelineControl;

/// Type alias for a pipeline step handler.
///
/// A handler borrows the pipeline context mutably for the duration of the call,
/// performs its rule or side effect, and returns whether the pipeline should go on.
///
/// Handlers are run strictly in registration order within a phase, and phases
/// run `before` -> `on` -> `after` for each step.
pub type Handler<T, Err> = Box<dyn Fn(&mut T) -> Result<PipelineControl, Err> + Send + Sync>;
