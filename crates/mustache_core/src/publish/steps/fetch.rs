//! Fetch step - reads the recording's bytes from the media library.

use async_trait::async_trait;
use bytes::BytesMut;
use futures_util::StreamExt;

use crate::publish::errors::{StepError, StepResult};
use crate::publish::step::PublishStep;
use crate::publish::types::{PublishContext, PublishState, StepOutcome};

/// Collects the asset's chunks into one buffer.
///
/// A failed transfer drops everything received so far.
pub struct FetchStep;

impl FetchStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FetchStep {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PublishStep for FetchStep {
    fn name(&self) -> &str {
        "Fetch"
    }

    fn description(&self) -> &str {
        "Read video data"
    }

    fn validate_input(&self, _ctx: &PublishContext, state: &PublishState) -> StepResult<()> {
        if state.asset.is_none() {
            return Err(StepError::invalid_input("No asset to fetch"));
        }
        Ok(())
    }

    async fn execute(
        &self,
        ctx: &PublishContext,
        state: &mut PublishState,
    ) -> StepResult<StepOutcome> {
        let asset = state
            .asset
            .as_ref()
            .ok_or_else(|| StepError::invalid_input("No asset to fetch"))?;

        let capacity = asset.byte_size.unwrap_or(0) as usize;
        let mut buffer = BytesMut::with_capacity(capacity);
        let mut chunks = 0usize;
        let mut stream = ctx.services.media.fetch(asset);

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(StepError::Fetch)?;
            chunks += 1;
            buffer.extend_from_slice(&chunk);
        }

        ctx.logger.info(&format!(
            "Fetched {} bytes in {} chunks",
            buffer.len(),
            chunks
        ));
        state.video = Some(buffer.freeze());
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &PublishContext, state: &PublishState) -> StepResult<()> {
        match &state.video {
            Some(video) if !video.is_empty() => Ok(()),
            Some(_) => Err(StepError::invalid_output("Fetched video is empty")),
            None => Err(StepError::invalid_output("No video data recorded")),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Local;

    use super::*;
    use crate::logging::PublishLogger;
    use crate::media::{PermissionStatus, VideoAsset};
    use crate::publish::test_support::{services, FakeMedia, FakePreviews, FakeUploader};

    fn context(media: FakeMedia) -> PublishContext {
        PublishContext::new(
            "job",
            services(
                Arc::new(media),
                Arc::new(FakePreviews::default()),
                Arc::new(FakeUploader::default()),
            ),
            Arc::new(PublishLogger::detached("job")),
        )
    }

    fn state_with_asset() -> PublishState {
        let mut state = PublishState::new("job");
        state.asset = Some(VideoAsset {
            id: "clip.mp4".into(),
            created_at: Local::now(),
            byte_size: None,
        });
        state
    }

    #[tokio::test]
    async fn concatenates_chunks() {
        let ctx = context(FakeMedia::with_video(
            PermissionStatus::Authorized,
            b"0123456789",
        ));
        let mut state = state_with_asset();

        FetchStep::new().execute(&ctx, &mut state).await.unwrap();

        assert_eq!(&state.video.unwrap()[..], b"0123456789");
    }

    #[tokio::test]
    async fn failed_transfer_discards_partial_data() {
        let mut media = FakeMedia::with_video(PermissionStatus::Authorized, b"0123456789");
        media.fail_after_chunks = Some(2);
        let ctx = context(media);
        let mut state = state_with_asset();

        let err = FetchStep::new()
            .execute(&ctx, &mut state)
            .await
            .unwrap_err();

        assert!(matches!(err, StepError::Fetch(_)));
        assert!(state.video.is_none());
    }

    #[test]
    fn empty_video_fails_output_validation() {
        let ctx = context(FakeMedia::empty(PermissionStatus::Authorized));
        let mut state = state_with_asset();
        state.video = Some(bytes::Bytes::new());

        assert!(FetchStep::new().validate_output(&ctx, &state).is_err());
    }
}
