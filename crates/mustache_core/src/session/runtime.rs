//! The session event loop.

use std::ops::ControlFlow;
use std::sync::Arc;

use tokio::sync::mpsc;

use super::events::{SessionEvent, SessionHandle};
use super::prompt::{Prompter, RemediationPrompt};
use crate::capture::{CaptureController, CaptureState, RecordingFinished};
use crate::overlay::{OverlayAttachmentManager, SceneGraph};
use crate::publish::{PipelineResult, PublishPipeline, PublishReceipt};
use crate::selection::SelectionBus;

/// Owns the scene, the overlay manager and the capture controller, and
/// applies [`SessionEvent`]s to them in arrival order.
pub struct Session<S: SceneGraph> {
    scene: S,
    overlay: OverlayAttachmentManager,
    capture: CaptureController,
    publisher: Arc<PublishPipeline>,
    prompter: Arc<dyn Prompter>,
    tx: mpsc::UnboundedSender<SessionEvent>,
    rx: mpsc::UnboundedReceiver<SessionEvent>,
    publish_in_flight: bool,
    last_receipt: Option<PublishReceipt>,
}

impl<S: SceneGraph> Session<S> {
    pub fn new(
        scene: S,
        overlay: OverlayAttachmentManager,
        capture: CaptureController,
        publisher: PublishPipeline,
        prompter: Arc<dyn Prompter>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            scene,
            overlay,
            capture,
            publisher: Arc::new(publisher),
            prompter,
            tx,
            rx,
            publish_in_flight: false,
            last_receipt: None,
        }
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle::new(self.tx.clone())
    }

    /// Forward style selections from `bus` into this session.
    pub fn connect_selection(&self, bus: &SelectionBus) {
        let handle = self.handle();
        bus.subscribe(move |index| handle.select_style(index));
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn overlay(&self) -> &OverlayAttachmentManager {
        &self.overlay
    }

    pub fn capture_state(&self) -> CaptureState {
        self.capture.state()
    }

    pub fn is_publishing(&self) -> bool {
        self.publish_in_flight
    }

    pub fn last_receipt(&self) -> Option<&PublishReceipt> {
        self.last_receipt.as_ref()
    }

    /// Process events until `Shutdown`.
    pub async fn run(&mut self) {
        tracing::info!("Session started");
        while self.next().await {}
        tracing::info!("Session stopped");
    }

    /// Wait for and handle a single event. Returns false on shutdown.
    pub async fn next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(event) => self.handle_event(event).is_continue(),
            None => false,
        }
    }

    fn handle_event(&mut self, event: SessionEvent) -> ControlFlow<()> {
        match event {
            SessionEvent::AnchorAdded(anchor) => {
                if let Err(e) = self.overlay.on_anchor_added(&mut self.scene, anchor) {
                    tracing::warn!(anchor = %anchor, error = %e, "Overlay attach failed");
                }
            }
            SessionEvent::AnchorRemoved(anchor) => self.overlay.on_anchor_removed(anchor),
            SessionEvent::StyleSelected(index) => {
                if let Err(e) = self.overlay.on_style_selected(&mut self.scene, index) {
                    tracing::warn!(style = index, error = %e, "Style switch failed");
                }
            }
            SessionEvent::ToggleCapture => self.toggle_capture(),
            SessionEvent::CaptureCompleted(completion) => match self.capture.complete(completion) {
                Ok(Some(finished)) => self.start_publish(finished),
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, "Capture failed"),
            },
            SessionEvent::PublishCompleted(result) => self.finish_publish(result),
            SessionEvent::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    fn toggle_capture(&mut self) {
        let Some(pending) = self.capture.toggle() else {
            return;
        };
        let handle = self.handle();
        tokio::spawn(async move {
            let completion = pending.run().await;
            handle.send(SessionEvent::CaptureCompleted(completion));
        });
    }

    fn start_publish(&mut self, finished: RecordingFinished) {
        if self.publish_in_flight {
            tracing::warn!(
                finished_at = %finished.artifact.finished_at,
                "Publish already running, recording not published"
            );
            return;
        }

        self.publish_in_flight = true;
        let publisher = Arc::clone(&self.publisher);
        let handle = self.handle();
        tokio::spawn(async move {
            let result = publisher.publish(&finished).await;
            handle.send(SessionEvent::PublishCompleted(result));
        });
    }

    fn finish_publish(&mut self, result: PipelineResult<PublishReceipt>) {
        self.publish_in_flight = false;
        match result {
            Ok(receipt) => {
                tracing::info!(
                    job = %receipt.job_name,
                    title = %receipt.title,
                    bytes = receipt.video_bytes,
                    "Publish complete"
                );
                self.last_receipt = Some(receipt);
            }
            Err(e) => {
                tracing::error!(error = %e, "Publish failed");
                if e.is_permission_denied() {
                    self.prompter.present(&RemediationPrompt::permission_denied());
                }
            }
        }
    }
}
