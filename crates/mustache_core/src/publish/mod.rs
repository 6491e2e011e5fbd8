//! Capture-to-publish pipeline.
//!
//! A finished recording is published by running a fixed sequence of async
//! steps. Each step validates its inputs, executes, and validates its
//! outputs; the first failure ends the attempt.
//!
//! # Architecture
//!
//! ```text
//! PublishPipeline
//!     ├── Step: Permission     (media library access)
//!     ├── Step: ResolveAsset   (newest video)
//!     ├── Step: Metadata       (title/tag from the style selected now)
//!     ├── Step: Fetch          (chunked read into one buffer)
//!     ├── Step: Cover          (preview on white, JPEG)
//!     └── Step: Upload         (multipart POST, single attempt)
//! ```

mod cover;
mod errors;
mod pipeline;
mod runner;
mod step;
pub mod steps;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use cover::{render_cover, CoverError, CoverOptions};
pub use errors::{PipelineError, PipelineResult, StepError, StepResult};
pub use pipeline::{Pipeline, PipelineRunResult};
pub use runner::PublishPipeline;
pub use step::PublishStep;
pub use steps::{
    CoverStep, FetchStep, MetadataStep, PermissionStep, ResolveAssetStep, UploadStep,
};
pub use types::{
    PublishContext, PublishMetadata, PublishReceipt, PublishServices, PublishState, StepOutcome,
};

/// Create the standard pipeline with all steps in order.
pub fn create_standard_pipeline() -> Pipeline {
    Pipeline::new()
        .with_step(PermissionStep::new())
        .with_step(ResolveAssetStep::new())
        .with_step(MetadataStep::new())
        .with_step(FetchStep::new())
        .with_step(CoverStep::new())
        .with_step(UploadStep::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_pipeline_order() {
        assert_eq!(
            create_standard_pipeline().step_names(),
            vec!["Permission", "ResolveAsset", "Metadata", "Fetch", "Cover", "Upload"]
        );
    }
}
