//! Capture state machine.

use std::sync::Arc;

use super::errors::{CaptureError, RecorderError};
use super::recorder::{RecordingArtifact, ScreenRecorder};

/// Recording lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    /// Not recording; `toggle` starts a recording.
    #[default]
    Idle,
    /// Recording requested or running; `toggle` stops it.
    Recording,
    /// Stop requested, waiting for the recorder.
    Stopping,
}

/// Recorder operation chosen by `toggle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOp {
    Start { microphone_enabled: bool },
    Stop,
}

/// Result of a recorder operation, to be applied on the main context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureCompletion {
    Started(Result<(), RecorderError>),
    Stopped(Result<Option<RecordingArtifact>, RecorderError>),
}

/// Signal that a recording finished and was kept; triggers a publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingFinished {
    pub artifact: RecordingArtifact,
}

/// A recorder call that has been decided but not yet run.
pub struct PendingCapture {
    op: CaptureOp,
    recorder: Arc<dyn ScreenRecorder>,
}

impl PendingCapture {
    pub fn op(&self) -> CaptureOp {
        self.op
    }

    /// Run the recorder call. Safe to drive from any task.
    pub async fn run(self) -> CaptureCompletion {
        match self.op {
            CaptureOp::Start { microphone_enabled } => {
                CaptureCompletion::Started(self.recorder.start_recording(microphone_enabled).await)
            }
            CaptureOp::Stop => CaptureCompletion::Stopped(self.recorder.stop_recording().await),
        }
    }
}

/// Owns the recording state machine.
///
/// Transitions: `Idle → Recording` on toggle, `Recording → Stopping` on
/// toggle, `Stopping → Idle` when the stop completes. A failed start returns
/// `Recording` to `Idle`.
pub struct CaptureController {
    recorder: Arc<dyn ScreenRecorder>,
    microphone_enabled: bool,
    state: CaptureState,
}

impl CaptureController {
    pub fn new(recorder: Arc<dyn ScreenRecorder>) -> Self {
        Self {
            recorder,
            microphone_enabled: true,
            state: CaptureState::Idle,
        }
    }

    /// Set whether recordings request microphone capture (default: true).
    pub fn with_microphone(mut self, enabled: bool) -> Self {
        self.microphone_enabled = enabled;
        self
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == CaptureState::Idle
    }

    /// The single entry point: start when idle, stop otherwise.
    ///
    /// Returns the recorder call to run, or `None` when a stop is already in
    /// flight.
    pub fn toggle(&mut self) -> Option<PendingCapture> {
        let op = match self.state {
            CaptureState::Idle => {
                if !self.recorder.is_available() {
                    tracing::warn!("Screen recorder reports unavailable, trying anyway");
                }
                self.state = CaptureState::Recording;
                tracing::info!(microphone = self.microphone_enabled, "Starting recording");
                CaptureOp::Start {
                    microphone_enabled: self.microphone_enabled,
                }
            }
            CaptureState::Recording => {
                self.state = CaptureState::Stopping;
                tracing::info!("Stopping recording");
                CaptureOp::Stop
            }
            CaptureState::Stopping => {
                tracing::debug!("Toggle ignored, stop already in progress");
                return None;
            }
        };

        Some(PendingCapture {
            op,
            recorder: Arc::clone(&self.recorder),
        })
    }

    /// Apply a recorder completion.
    ///
    /// Returns `RecordingFinished` when a stop produced a kept artifact.
    pub fn complete(
        &mut self,
        completion: CaptureCompletion,
    ) -> Result<Option<RecordingFinished>, CaptureError> {
        match completion {
            CaptureCompletion::Started(Ok(())) => {
                tracing::info!(state = ?self.state, "Recording started");
                Ok(None)
            }
            CaptureCompletion::Started(Err(e)) => {
                tracing::error!(error = %e, "Start recording failed");
                if self.state == CaptureState::Recording {
                    self.state = CaptureState::Idle;
                }
                Err(CaptureError::RecorderUnavailable(e))
            }
            CaptureCompletion::Stopped(result) => {
                if self.state != CaptureState::Stopping {
                    tracing::warn!(state = ?self.state, "Unexpected stop completion ignored");
                    return Ok(None);
                }
                self.state = CaptureState::Idle;

                match result {
                    Ok(Some(artifact)) => {
                        tracing::info!(finished_at = %artifact.finished_at, "Recording finished");
                        Ok(Some(RecordingFinished { artifact }))
                    }
                    Ok(None) => {
                        tracing::info!("Recording stopped without a kept artifact, discarding");
                        Ok(None)
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Stop recording failed");
                        Err(CaptureError::StopFailed(e))
                    }
                }
            }
        }
    }

    /// Toggle and wait for the recorder in place.
    ///
    /// Convenience for hosts without a separate main context.
    pub async fn toggle_and_wait(&mut self) -> Result<Option<RecordingFinished>, CaptureError> {
        match self.toggle() {
            Some(pending) => {
                let completion = pending.run().await;
                self.complete(completion)
            }
            None => Ok(None),
        }
    }
}
