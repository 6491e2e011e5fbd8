//! Recording lifecycle.
//!
//! [`CaptureController`] owns the `Idle → Recording → Stopping → Idle` state
//! machine. Recorder calls are handed out as [`PendingCapture`] values so the
//! owner can run them off the main context and feed the resulting
//! [`CaptureCompletion`] back through [`CaptureController::complete`].
//!
//! ```text
//!   toggle() ──► PendingCapture ──run()──► CaptureCompletion ──complete()──►
//!                                   (any thread)                (main context)
//! ```

mod controller;
mod errors;
mod recorder;

pub use controller::{
    CaptureCompletion, CaptureController, CaptureOp, CaptureState, PendingCapture,
    RecordingFinished,
};
pub use errors::{CaptureError, RecorderError};
pub use recorder::{RecordingArtifact, ScreenRecorder};
