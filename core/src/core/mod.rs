pub mod context;
pub mod control;
pub mod pipeline_trait;
pub mod step;

pub use context::Handler;
pub use control::{PipelineControl, PipelineResult};
pub use pipeline_trait::AnyPipeline;
pub use step::StepDef;
