// tests/error_handling_tests.rs
mod common;
use cartflow::{CartflowError, Pipeline, PipelineControl};
use common::*;

// A pipeline whose error type IS CartflowError.
#[test]
fn test_pipeline_with_cartflow_error_type() {
  setup_tracing();
  let mut pipeline = Pipeline::<TestContext, CartflowError>::new(&[("task", false, None)]);
  pipeline.on_root("task", |ctx: &mut TestContext| {
    ctx.counter = 1;
    Ok::<PipelineControl, CartflowError>(PipelineControl::Continue)
  });

  let mut ctx = TestContext::default();
  assert!(pipeline.run(&mut ctx).is_ok());
  assert_eq!(ctx.counter, 1);

  let mut failing = Pipeline::<TestContext, CartflowError>::new(&[("fail_task", false, None)]);
  failing.on_root("fail_task", |_ctx: &mut TestContext| {
    Err::<PipelineControl, _>(CartflowError::Internal("Intentional".to_string()))
  });
  match failing.run(&mut TestContext::default()) {
    Err(CartflowError::Internal(s)) => assert_eq!(s, "Intentional"),
    other => panic!("Expected CartflowError::Internal, got {:?}", other),
  }
}

#[test]
fn test_anyhow_errors_become_handler_errors() {
  setup_tracing();
  let mut pipeline = Pipeline::<TestContext, CartflowError>::new(&[("io", false, None)]);
  pipeline.on_root("io", |_ctx: &mut TestContext| {
    Err::<PipelineControl, _>(anyhow::anyhow!("disk on fire"))
  });

  match pipeline.run(&mut TestContext::default()) {
    Err(CartflowError::HandlerError { source }) => assert_eq!(source.to_string(), "disk on fire"),
    other => panic!("Expected HandlerError, got {:?}", other),
  }
}
