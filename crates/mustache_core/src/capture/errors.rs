//! Capture error types.

use thiserror::Error;

/// Failure reported by the platform screen recorder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct RecorderError(pub String);

impl RecorderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors surfaced by the capture state machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("Screen recorder unavailable: {0}")]
    RecorderUnavailable(#[source] RecorderError),

    #[error("Failed to stop recording: {0}")]
    StopFailed(#[source] RecorderError),
}
