// cartflow/src/lib.rs

//! Cartflow: a synchronous, type-safe rule pipeline engine.
//!
//! Cartflow lets you describe a business validation or workflow as an ordered
//! list of named steps, each with:
//!  - `before` / `on` / `after` handlers operating on a mutable context.
//!  - An optional `skip_if` predicate evaluated against the context.
//!  - Optionality: optional steps without handlers are silently skipped.
//!
//! Handlers may stop the pipeline early (`PipelineControl::Stop`) or fail with
//! the pipeline's error type. Pipelines can be restructured after creation
//! (insert, remove, toggle steps) and registered in a type-keyed `Registry`
//! that dispatches a context to the pipeline built for its type.

pub mod core;
pub mod error;
pub mod pipeline;
pub mod registry;

pub use crate::core::context::Handler;
pub use crate::core::control::{PipelineControl, PipelineResult};
pub use crate::core::step::{SkipCondition, StepDef};

pub use crate::pipeline::definition::Pipeline;

pub use crate::error::{CartflowError, CartflowResult};

pub use crate::registry::Registry;

/*
    Typical use:
    1. Define a context struct `MyCtx` carrying inputs, collaborators and outputs.
    2. Build a `Pipeline<MyCtx, MyError>` with its steps, attach handlers with
       `.on_root()` / `.before_root()` / `.after_root()`.
    3. Register it: `registry.register_pipeline(pipeline)`.
    4. Run: `registry.run(&mut my_ctx)?` and read results back from `my_ctx`.
*/
