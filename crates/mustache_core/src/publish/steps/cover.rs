//! Cover step - renders the upload cover from the style preview.

use async_trait::async_trait;
use bytes::Bytes;

use crate::publish::cover::render_cover;
use crate::publish::errors::{StepError, StepResult};
use crate::publish::step::PublishStep;
use crate::publish::types::{PublishContext, PublishState, StepOutcome};

/// Draws the selected style's preview on white and encodes it as JPEG.
///
/// Encoding runs on the blocking pool.
pub struct CoverStep;

impl CoverStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CoverStep {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PublishStep for CoverStep {
    fn name(&self) -> &str {
        "Cover"
    }

    fn description(&self) -> &str {
        "Render cover image"
    }

    fn validate_input(&self, _ctx: &PublishContext, state: &PublishState) -> StepResult<()> {
        if state.metadata.is_none() {
            return Err(StepError::invalid_input("No style resolved for the cover"));
        }
        Ok(())
    }

    async fn execute(
        &self,
        ctx: &PublishContext,
        state: &mut PublishState,
    ) -> StepResult<StepOutcome> {
        let meta = state
            .metadata
            .as_ref()
            .ok_or_else(|| StepError::invalid_input("No style resolved for the cover"))?;
        let style = meta.title.clone();

        let preview = ctx
            .services
            .assets
            .load_preview(&meta.preview_ref)
            .map_err(|e| StepError::cover_render(&style, e.to_string()))?;

        let options = ctx.services.cover;
        let jpeg = tokio::task::spawn_blocking(move || render_cover(&preview, options))
            .await
            .map_err(|e| StepError::cover_render(&style, format!("render task failed: {e}")))?
            .map_err(|e| StepError::cover_render(&style, e.to_string()))?;

        ctx.logger.info(&format!(
            "Cover rendered: {} bytes (quality {})",
            jpeg.len(),
            options.jpeg_quality
        ));
        state.cover = Some(Bytes::from(jpeg));
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &PublishContext, state: &PublishState) -> StepResult<()> {
        match &state.cover {
            Some(cover) if !cover.is_empty() => Ok(()),
            _ => Err(StepError::invalid_output("No cover rendered")),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::logging::PublishLogger;
    use crate::media::PermissionStatus;
    use crate::publish::test_support::{services, FakeMedia, FakePreviews, FakeUploader};
    use crate::publish::types::PublishMetadata;

    fn context(previews: FakePreviews) -> PublishContext {
        PublishContext::new(
            "job",
            services(
                Arc::new(FakeMedia::empty(PermissionStatus::Authorized)),
                Arc::new(previews),
                Arc::new(FakeUploader::default()),
            ),
            Arc::new(PublishLogger::detached("job")),
        )
    }

    fn state_for(style: &str) -> PublishState {
        let mut state = PublishState::new("job");
        state.metadata = Some(PublishMetadata {
            style_index: 0,
            title: style.into(),
            tag: style.into(),
            preview_ref: format!("{style}.png"),
        });
        state
    }

    #[tokio::test]
    async fn renders_jpeg_cover() {
        let ctx = context(FakePreviews::default());
        let mut state = state_for("Mustache_1");

        CoverStep::new().execute(&ctx, &mut state).await.unwrap();

        let cover = state.cover.unwrap();
        assert_eq!(&cover[..2], &[0xFF, 0xD8]);
    }

    #[tokio::test]
    async fn missing_preview_is_cover_render_error() {
        let mut previews = FakePreviews::default();
        previews.missing.insert("Mustache_5.png".into());
        let ctx = context(previews);
        let mut state = state_for("Mustache_5");

        let err = CoverStep::new()
            .execute(&ctx, &mut state)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            StepError::CoverRender { ref style, .. } if style == "Mustache_5"
        ));
        assert!(state.cover.is_none());
    }
}
