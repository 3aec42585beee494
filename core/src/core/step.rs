// cartflow/src/core/step.rs

//! Defines the structure for a single step within a pipeline.

use std::sync::Arc;

/// Predicate evaluated against the context before a step runs.
/// When it returns `true` the step is skipped.
pub type SkipCondition<T> = Arc<dyn Fn(&T) -> bool + Send + Sync + 'static>;

/// Definition of a pipeline step: its name, optionality and skip condition.
#[derive(Clone)]
pub struct StepDef<T: 'static> {
  pub name: String,
  pub optional: bool,
  pub skip_if: Option<SkipCondition<T>>,
}

impl<T: 'static> std::fmt::Debug for StepDef<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StepDef")
      .field("name", &self.name)
      .field("optional", &self.optional)
      .field("skip_if_present", &self.skip_if.is_some())
      .finish()
  }
}
