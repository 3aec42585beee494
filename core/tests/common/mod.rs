// tests/common/mod.rs
#![allow(dead_code)]

use cartflow::{CartflowError, PipelineControl};
use tracing::Level;

#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub message: String,
  pub steps_executed: Vec<String>,
  pub should_stop_at: Option<String>,
  pub skip_audit: bool,
}

#[derive(Clone, Debug, Default)]
pub struct OtherContext {
  pub touched: bool,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("cartflow framework error: {0}")]
  Engine(String), // Debug-formatted CartflowError, kept as text for Eq.

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<CartflowError> for TestError {
  fn from(err: CartflowError) -> Self {
    TestError::Engine(format!("{:?}", err))
  }
}

pub fn create_simple_handler(
  step_name: &'static str,
  message_to_append: &'static str,
) -> cartflow::Handler<TestContext, TestError> {
  Box::new(move |ctx: &mut TestContext| {
    ctx.counter += 1;
    ctx.message.push_str(message_to_append);
    ctx.steps_executed.push(step_name.to_string());
    tracing::debug!(target: "test_handlers", step = %step_name, "executed, counter: {}", ctx.counter);
    if ctx.should_stop_at.as_deref() == Some(step_name) {
      return Ok(PipelineControl::Stop);
    }
    Ok(PipelineControl::Continue)
  })
}

pub fn create_failing_handler(
  step_name: &'static str,
  error_message: &'static str,
) -> cartflow::Handler<TestContext, TestError> {
  Box::new(move |ctx: &mut TestContext| {
    ctx.steps_executed.push(step_name.to_string());
    Err(TestError::Handler(error_message.to_string()))
  })
}

use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
