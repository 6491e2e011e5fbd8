//! Publish step trait definition.

use async_trait::async_trait;

use super::errors::StepResult;
use super::types::{PublishContext, PublishState, StepOutcome};

/// Trait for publish steps.
///
/// The pipeline runner calls these methods in order:
///
/// 1. `validate_input` - check that earlier steps produced what this one needs
/// 2. `execute` - perform the step's work (may suspend)
/// 3. `validate_output` - verify the step recorded its result
///
/// # Example
///
/// ```ignore
/// struct ResolveAssetStep;
///
/// #[async_trait]
/// impl PublishStep for ResolveAssetStep {
///     fn name(&self) -> &str { "ResolveAsset" }
///
///     fn validate_input(&self, _ctx: &PublishContext, _state: &PublishState) -> StepResult<()> {
///         Ok(())
///     }
///
///     async fn execute(&self, ctx: &PublishContext, state: &mut PublishState) -> StepResult<StepOutcome> {
///         state.asset = ctx.services.media.latest_video().await?;
///         Ok(StepOutcome::Success)
///     }
///
///     fn validate_output(&self, _ctx: &PublishContext, state: &PublishState) -> StepResult<()> {
///         state.asset.as_ref().map(|_| ()).ok_or_else(|| StepError::invalid_output("no asset"))
///     }
/// }
/// ```
#[async_trait]
pub trait PublishStep: Send + Sync {
    /// Step name (for logging and error context).
    fn name(&self) -> &str;

    fn validate_input(&self, ctx: &PublishContext, state: &PublishState) -> StepResult<()>;

    /// Perform the step and record results in `state`.
    async fn execute(
        &self,
        ctx: &PublishContext,
        state: &mut PublishState,
    ) -> StepResult<StepOutcome>;

    /// Called only after `execute` returns `Success`.
    fn validate_output(&self, ctx: &PublishContext, state: &PublishState) -> StepResult<()>;

    /// Human-readable description of what this step does.
    fn description(&self) -> &str {
        self.name()
    }
}
