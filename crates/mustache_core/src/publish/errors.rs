//! Error types for the publish pipeline.
//!
//! Errors carry context that chains through layers:
//! Job → Step → Operation → Detail

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::media::{MediaError, PermissionStatus};

/// Top-level pipeline error with job context.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Publish '{job_name}' failed at step '{step_name}': {source}")]
    StepFailed {
        job_name: String,
        step_name: String,
        #[source]
        source: StepError,
    },

    /// Per-publish setup failed (e.g. the log file could not be created).
    #[error("Publish '{job_name}' setup failed: {message}")]
    SetupFailed { job_name: String, message: String },
}

impl PipelineError {
    pub fn step_failed(
        job_name: impl Into<String>,
        step_name: impl Into<String>,
        source: StepError,
    ) -> Self {
        Self::StepFailed {
            job_name: job_name.into(),
            step_name: step_name.into(),
            source,
        }
    }

    pub fn setup_failed(job_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SetupFailed {
            job_name: job_name.into(),
            message: message.into(),
        }
    }

    /// The failing step's error, if a step failed.
    pub fn step_error(&self) -> Option<&StepError> {
        match self {
            Self::StepFailed { source, .. } => Some(source),
            Self::SetupFailed { .. } => None,
        }
    }

    /// Whether the user should be offered to fix library access.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self.step_error(), Some(StepError::PermissionDenied(_)))
    }
}

/// Error from a publish step.
#[derive(Error, Debug)]
pub enum StepError {
    #[error("Media library access denied ({0:?})")]
    PermissionDenied(PermissionStatus),

    #[error("No video asset found: {0}")]
    NoAssetFound(String),

    #[error("Failed to fetch video data: {0}")]
    Fetch(#[source] MediaError),

    #[error("Failed to render cover for '{style}': {message}")]
    CoverRender { style: String, message: String },

    #[error("Upload failed: {0}")]
    Upload(#[source] CatalogError),

    #[error("Input validation failed: {0}")]
    InvalidInput(String),

    #[error("Output validation failed: {0}")]
    InvalidOutput(String),
}

impl StepError {
    pub fn no_asset_found(reason: impl Into<String>) -> Self {
        Self::NoAssetFound(reason.into())
    }

    pub fn cover_render(style: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CoverRender {
            style: style.into(),
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_output(message: impl Into<String>) -> Self {
        Self::InvalidOutput(message.into())
    }
}

pub type StepResult<T> = Result<T, StepError>;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_error_chains_context() {
        let err = PipelineError::step_failed(
            "publish_20241114_100000",
            "Cover",
            StepError::cover_render("Mustache_2", "preview missing"),
        );

        let msg = err.to_string();
        assert!(msg.contains("publish_20241114_100000"));
        assert!(msg.contains("Cover"));
        assert!(msg.contains("Mustache_2"));
        assert!(!err.is_permission_denied());
    }

    #[test]
    fn permission_denied_is_detected() {
        let err = PipelineError::step_failed(
            "job",
            "Permission",
            StepError::PermissionDenied(PermissionStatus::Restricted),
        );
        assert!(err.is_permission_denied());
        assert!(err.to_string().contains("Restricted"));
    }
}
