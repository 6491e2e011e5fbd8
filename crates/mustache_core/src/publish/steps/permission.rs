//! Permission step - gates the pipeline on media library access.

use async_trait::async_trait;

use crate::media::PermissionStatus;
use crate::publish::errors::{StepError, StepResult};
use crate::publish::step::PublishStep;
use crate::publish::types::{PublishContext, PublishState, StepOutcome};

/// Checks (and if undecided, requests) media library access.
///
/// `Authorized` and `Limited` proceed. `NotDetermined` asks once and
/// proceeds only if the answer is `Authorized`; a `Limited` answer to the
/// request is treated as a refusal. `Denied` and `Restricted` fail with
/// `PermissionDenied`.
pub struct PermissionStep;

impl PermissionStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PermissionStep {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PublishStep for PermissionStep {
    fn name(&self) -> &str {
        "Permission"
    }

    fn description(&self) -> &str {
        "Check media library access"
    }

    fn validate_input(&self, _ctx: &PublishContext, _state: &PublishState) -> StepResult<()> {
        Ok(())
    }

    async fn execute(
        &self,
        ctx: &PublishContext,
        state: &mut PublishState,
    ) -> StepResult<StepOutcome> {
        let media = &ctx.services.media;
        let current = media.authorization_status().await;
        ctx.logger.info(&format!("Library access: {:?}", current));

        let (status, granted) = match current {
            PermissionStatus::NotDetermined => {
                ctx.logger.info("Requesting library access");
                let answer = media.request_authorization().await;
                ctx.logger.info(&format!("Access request answered: {:?}", answer));
                (answer, answer == PermissionStatus::Authorized)
            }
            other => (other, other.allows_read()),
        };

        state.permission = Some(status);
        if !granted {
            return Err(StepError::PermissionDenied(status));
        }
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &PublishContext, state: &PublishState) -> StepResult<()> {
        match state.permission {
            Some(status) if status.allows_read() => Ok(()),
            _ => Err(StepError::invalid_output("Library access not granted")),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use super::*;
    use crate::logging::PublishLogger;
    use crate::publish::test_support::{services, FakeMedia, FakePreviews, FakeUploader};

    async fn run(media: FakeMedia) -> (StepResult<StepOutcome>, PublishState, Arc<FakeMedia>) {
        let media = Arc::new(media);
        let ctx = PublishContext::new(
            "job",
            services(
                media.clone(),
                Arc::new(FakePreviews::default()),
                Arc::new(FakeUploader::default()),
            ),
            Arc::new(PublishLogger::detached("job")),
        );
        let mut state = PublishState::new("job");
        let result = PermissionStep::new().execute(&ctx, &mut state).await;
        (result, state, media)
    }

    #[tokio::test]
    async fn authorized_and_limited_proceed_without_asking() {
        for status in [PermissionStatus::Authorized, PermissionStatus::Limited] {
            let (result, state, media) = run(FakeMedia::empty(status)).await;
            assert_eq!(result.unwrap(), StepOutcome::Success);
            assert_eq!(state.permission, Some(status));
            assert_eq!(media.permission_requests.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn denied_and_restricted_fail() {
        for status in [PermissionStatus::Denied, PermissionStatus::Restricted] {
            let (result, _, media) = run(FakeMedia::empty(status)).await;
            assert!(matches!(
                result,
                Err(StepError::PermissionDenied(s)) if s == status
            ));
            assert_eq!(media.permission_requests.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn not_determined_asks_and_follows_answer() {
        let mut media = FakeMedia::empty(PermissionStatus::NotDetermined);
        media.answer = PermissionStatus::Authorized;
        let (result, state, media) = run(media).await;

        assert!(result.is_ok());
        assert_eq!(state.permission, Some(PermissionStatus::Authorized));
        assert_eq!(media.permission_requests.load(Ordering::SeqCst), 1);

        let mut refused = FakeMedia::empty(PermissionStatus::NotDetermined);
        refused.answer = PermissionStatus::Denied;
        let (result, _, _) = run(refused).await;
        assert!(matches!(
            result,
            Err(StepError::PermissionDenied(PermissionStatus::Denied))
        ));

        let mut partial = FakeMedia::empty(PermissionStatus::NotDetermined);
        partial.answer = PermissionStatus::Limited;
        let (result, state, media) = run(partial).await;
        assert!(matches!(
            result,
            Err(StepError::PermissionDenied(PermissionStatus::Limited))
        ));
        assert_eq!(state.permission, Some(PermissionStatus::Limited));
        assert_eq!(media.permission_requests.load(Ordering::SeqCst), 1);
    }
}
