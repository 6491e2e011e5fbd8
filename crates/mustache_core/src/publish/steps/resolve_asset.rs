//! Resolve step - finds the recording to publish.

use async_trait::async_trait;

use crate::publish::errors::{StepError, StepResult};
use crate::publish::step::PublishStep;
use crate::publish::types::{PublishContext, PublishState, StepOutcome};

/// Picks the most recently created video in the media library.
///
/// One query, no polling: if the recording has not landed yet the run
/// fails with `NoAssetFound`.
pub struct ResolveAssetStep;

impl ResolveAssetStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ResolveAssetStep {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PublishStep for ResolveAssetStep {
    fn name(&self) -> &str {
        "ResolveAsset"
    }

    fn description(&self) -> &str {
        "Find the newest video asset"
    }

    fn validate_input(&self, _ctx: &PublishContext, state: &PublishState) -> StepResult<()> {
        if state.permission.is_none() {
            return Err(StepError::invalid_input("Library access was not checked"));
        }
        Ok(())
    }

    async fn execute(
        &self,
        ctx: &PublishContext,
        state: &mut PublishState,
    ) -> StepResult<StepOutcome> {
        let asset = ctx
            .services
            .media
            .latest_video()
            .await
            .map_err(|e| StepError::no_asset_found(format!("library query failed: {e}")))?
            .ok_or_else(|| StepError::no_asset_found("library has no videos"))?;

        ctx.logger.info(&format!(
            "Using asset '{}' created {}",
            asset.id,
            asset.created_at.format("%Y-%m-%d %H:%M:%S")
        ));
        state.asset = Some(asset);
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &PublishContext, state: &PublishState) -> StepResult<()> {
        if state.asset.is_none() {
            return Err(StepError::invalid_output("No asset recorded"));
        }
        Ok(())
    }
}
