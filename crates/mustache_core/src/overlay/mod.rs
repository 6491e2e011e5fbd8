//! Overlay attachment onto the tracked face anchor.
//!
//! This module provides:
//! - A scene-graph seam ([`SceneGraph`]) plus an in-memory [`Scene`]
//! - The [`OverlayAttachmentManager`] state machine that keeps at most one
//!   managed overlay under the face anchor
//!
//! The face anchor node is owned by the tracking session. The manager only
//! holds an [`AnchorId`] handle and attaches/detaches children through the
//! scene graph, always detach-then-attach.

mod errors;
mod manager;
mod scene;

pub use errors::{OverlayError, SceneError};
pub use manager::{OverlayAttachment, OverlayAttachmentManager, OVERLAY_NODE_NAME};
pub use scene::{AnchorId, NodeId, OverlayNode, Scene, SceneGraph};
