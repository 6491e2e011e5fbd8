//! Upload step - sends the recording and cover to the catalog.

use async_trait::async_trait;
use chrono::Local;

use crate::models::PublishJob;
use crate::publish::errors::{StepError, StepResult};
use crate::publish::step::PublishStep;
use crate::publish::types::{PublishContext, PublishState, StepOutcome};

/// Builds the [`PublishJob`] and submits it once.
pub struct UploadStep;

impl UploadStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UploadStep {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PublishStep for UploadStep {
    fn name(&self) -> &str {
        "Upload"
    }

    fn description(&self) -> &str {
        "Upload video and cover"
    }

    fn validate_input(&self, _ctx: &PublishContext, state: &PublishState) -> StepResult<()> {
        if state.video.is_none() {
            return Err(StepError::invalid_input("No video data"));
        }
        if state.cover.is_none() {
            return Err(StepError::invalid_input("No cover image"));
        }
        if state.metadata.is_none() {
            return Err(StepError::invalid_input("No title or tag"));
        }
        Ok(())
    }

    async fn execute(
        &self,
        ctx: &PublishContext,
        state: &mut PublishState,
    ) -> StepResult<StepOutcome> {
        let (Some(video), Some(cover), Some(meta)) = (&state.video, &state.cover, &state.metadata)
        else {
            return Err(StepError::invalid_input("Upload inputs missing"));
        };

        let job = PublishJob {
            video: video.clone(),
            cover: cover.clone(),
            title: meta.title.clone(),
            tag: meta.tag.clone(),
            created_at: Local::now(),
        };

        ctx.logger.request(&format!(
            "POST upload title='{}' createdAt='{}' video={}B cover={}B",
            job.title,
            job.created_at_field(),
            job.video.len(),
            job.cover.len()
        ));

        let body = ctx
            .services
            .uploader
            .upload(&job)
            .await
            .map_err(StepError::Upload)?;

        ctx.logger.info(&format!("Server response: {}", body));
        state.response = Some(body);
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &PublishContext, state: &PublishState) -> StepResult<()> {
        if !state.is_uploaded() {
            return Err(StepError::invalid_output("No upload response recorded"));
        }
        Ok(())
    }
}
