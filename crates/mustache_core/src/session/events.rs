//! Session messages and the sender handed to platform callbacks.

use tokio::sync::mpsc;

use crate::capture::CaptureCompletion;
use crate::overlay::AnchorId;
use crate::publish::{PipelineResult, PublishReceipt};

/// Everything the session reacts to.
#[derive(Debug)]
pub enum SessionEvent {
    AnchorAdded(AnchorId),
    AnchorRemoved(AnchorId),
    StyleSelected(usize),
    ToggleCapture,
    CaptureCompleted(CaptureCompletion),
    PublishCompleted(PipelineResult<PublishReceipt>),
    Shutdown,
}

/// Cloneable sender for posting events back onto the session.
///
/// Sends never block, so this is safe to call from synchronous callbacks on
/// any thread.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl SessionHandle {
    pub(crate) fn new(tx: mpsc::UnboundedSender<SessionEvent>) -> Self {
        Self { tx }
    }

    pub fn send(&self, event: SessionEvent) {
        if let Err(e) = self.tx.send(event) {
            tracing::debug!(event = ?e.0, "Session closed, event dropped");
        }
    }

    pub fn anchor_added(&self, anchor: AnchorId) {
        self.send(SessionEvent::AnchorAdded(anchor));
    }

    pub fn anchor_removed(&self, anchor: AnchorId) {
        self.send(SessionEvent::AnchorRemoved(anchor));
    }

    pub fn select_style(&self, index: usize) {
        self.send(SessionEvent::StyleSelected(index));
    }

    /// The record button.
    pub fn toggle_capture(&self) {
        self.send(SessionEvent::ToggleCapture);
    }

    pub fn shutdown(&self) {
        self.send(SessionEvent::Shutdown);
    }
}
