//! Metadata step - derives title and tag from the selected style.

use async_trait::async_trait;

use crate::publish::errors::{StepError, StepResult};
use crate::publish::step::PublishStep;
use crate::publish::types::{PublishContext, PublishMetadata, PublishState, StepOutcome};

/// Reads the style selected *now*, when this step runs.
///
/// A style changed between stopping the recording and this step is the one
/// that gets published.
pub struct MetadataStep;

impl MetadataStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MetadataStep {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PublishStep for MetadataStep {
    fn name(&self) -> &str {
        "Metadata"
    }

    fn description(&self) -> &str {
        "Resolve title and tag from the selected style"
    }

    fn validate_input(&self, _ctx: &PublishContext, state: &PublishState) -> StepResult<()> {
        if state.asset.is_none() {
            return Err(StepError::invalid_input("No asset resolved"));
        }
        Ok(())
    }

    async fn execute(
        &self,
        ctx: &PublishContext,
        state: &mut PublishState,
    ) -> StepResult<StepOutcome> {
        let index = ctx.services.selection.get();
        let style = ctx.services.styles.get(index).ok_or_else(|| {
            StepError::invalid_input(format!(
                "Selected style {} is outside the catalog ({} styles)",
                index,
                ctx.services.styles.len()
            ))
        })?;

        ctx.logger.info(&format!(
            "Style {} selected, publishing as '{}'",
            index, style.display_name
        ));
        state.metadata = Some(PublishMetadata {
            style_index: index,
            title: style.display_name.clone(),
            tag: style.display_name.clone(),
            preview_ref: style.preview_ref(),
        });
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &PublishContext, state: &PublishState) -> StepResult<()> {
        match &state.metadata {
            Some(meta) if !meta.title.is_empty() => Ok(()),
            _ => Err(StepError::invalid_output("No title resolved")),
        }
    }
}
