//! Overlay attachment state machine.

use std::sync::Arc;

use crate::assets::AssetStore;
use crate::models::StyleCatalog;

use super::errors::OverlayError;
use super::scene::{AnchorId, NodeId, OverlayNode, SceneGraph};

/// Name tag carried by the managed overlay node.
pub const OVERLAY_NODE_NAME: &str = "Mustache";

/// The overlay currently attached under the face anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayAttachment {
    pub style_index: usize,
    pub node: NodeId,
}

/// Keeps at most one managed overlay attached to the tracked face anchor.
///
/// Driven by two event sources, both re-marshaled onto the main context by
/// the session loop before reaching this type:
/// - anchor lifecycle (`on_anchor_added` / `on_anchor_removed`)
/// - style selection (`on_style_selected`)
pub struct OverlayAttachmentManager {
    catalog: Arc<StyleCatalog>,
    assets: Arc<dyn AssetStore>,
    anchor: Option<AnchorId>,
    current: Option<OverlayAttachment>,
    /// Last accepted selection; the style used when an anchor appears.
    selected: usize,
}

impl OverlayAttachmentManager {
    pub fn new(catalog: Arc<StyleCatalog>, assets: Arc<dyn AssetStore>) -> Self {
        Self {
            catalog,
            assets,
            anchor: None,
            current: None,
            selected: 0,
        }
    }

    pub fn anchor(&self) -> Option<AnchorId> {
        self.anchor
    }

    pub fn current(&self) -> Option<OverlayAttachment> {
        self.current
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Record the tracked face anchor and attach the selected style to it.
    ///
    /// Only the first anchor is honoured; later ones are ignored.
    pub fn on_anchor_added<S>(
        &mut self,
        scene: &mut S,
        anchor: AnchorId,
    ) -> Result<(), OverlayError>
    where
        S: SceneGraph + ?Sized,
    {
        if let Some(existing) = self.anchor {
            tracing::warn!(
                existing = %existing,
                ignored = %anchor,
                "Additional face anchor ignored"
            );
            return Ok(());
        }

        tracing::info!(anchor = %anchor, style = self.selected, "Face anchor added");
        self.anchor = Some(anchor);
        self.reattach(scene, anchor, self.selected)
    }

    /// Forget the anchor once the tracking session has destroyed it.
    pub fn on_anchor_removed(&mut self, anchor: AnchorId) {
        if self.anchor != Some(anchor) {
            return;
        }
        tracing::info!(anchor = %anchor, "Face anchor removed");
        self.anchor = None;
        self.current = None;
    }

    /// Switch the overlay to style `index`.
    ///
    /// Out-of-range indices fail with `InvalidStyleIndex` and change nothing.
    /// Without an anchor the selection is only remembered for the next
    /// anchor. With an anchor, the current overlay is removed first; if the
    /// new asset then fails to load, the face is left without an overlay.
    pub fn on_style_selected<S>(
        &mut self,
        scene: &mut S,
        index: usize,
    ) -> Result<(), OverlayError>
    where
        S: SceneGraph + ?Sized,
    {
        if !self.catalog.contains(index) {
            return Err(OverlayError::invalid_style_index(index, self.catalog.len()));
        }

        self.selected = index;

        match self.anchor {
            Some(anchor) => self.reattach(scene, anchor, index),
            None => {
                tracing::debug!(style = index, "No face anchor yet, selection deferred");
                Ok(())
            }
        }
    }

    fn reattach<S>(
        &mut self,
        scene: &mut S,
        anchor: AnchorId,
        index: usize,
    ) -> Result<(), OverlayError>
    where
        S: SceneGraph + ?Sized,
    {
        if let Some(old) = self.current.take() {
            if scene.remove_child(anchor, old.node).is_none() {
                tracing::warn!(
                    style = old.style_index,
                    "Managed overlay was already detached"
                );
            }
        }

        let descriptor = self
            .catalog
            .get(index)
            .ok_or_else(|| OverlayError::invalid_style_index(index, self.catalog.len()))?;

        let model = self
            .assets
            .load_model(&descriptor.asset_ref)
            .map_err(|e| OverlayError::asset_load(&descriptor.asset_ref, e))?;

        let mut node = OverlayNode::from_model(model);
        node.position = descriptor.position_offset;
        node.scale = descriptor.scale;
        node.name = OVERLAY_NODE_NAME.to_string();

        let node_id = scene.add_child(anchor, node)?;
        self.current = Some(OverlayAttachment {
            style_index: index,
            node: node_id,
        });

        tracing::info!(
            anchor = %anchor,
            style = index,
            asset = %descriptor.asset_ref,
            scale = %descriptor.scale,
            "Overlay attached"
        );
        Ok(())
    }
}
