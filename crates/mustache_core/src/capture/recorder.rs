//! Screen recorder boundary.

use async_trait::async_trait;
use chrono::{DateTime, Local};

use super::errors::RecorderError;

/// A finished recording that was kept (saved to the media library).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingArtifact {
    pub finished_at: DateTime<Local>,
}

impl RecordingArtifact {
    pub fn now() -> Self {
        Self {
            finished_at: Local::now(),
        }
    }
}

/// The OS screen recorder.
///
/// Completions may resolve on any thread; callers must not touch main-context
/// state from inside these futures.
#[async_trait]
pub trait ScreenRecorder: Send + Sync {
    /// Whether the recorder can currently be used.
    fn is_available(&self) -> bool {
        true
    }

    /// Start capturing the screen, optionally with the microphone.
    async fn start_recording(&self, microphone_enabled: bool) -> Result<(), RecorderError>;

    /// Stop capturing.
    ///
    /// Returns `None` when no artifact was kept (e.g. the user discarded the
    /// preview).
    async fn stop_recording(&self) -> Result<Option<RecordingArtifact>, RecorderError>;
}
