//! Scene-graph seam and an in-memory implementation.

use std::collections::HashMap;

use crate::assets::ModelAsset;
use crate::models::Vec3;

use super::errors::SceneError;

/// Non-owning handle to a face anchor node created by the tracking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorId(pub u64);

impl std::fmt::Display for AnchorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "anchor#{}", self.0)
    }
}

/// Handle to a child node attached under an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

/// A 3D node ready to be attached as a child of an anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayNode {
    /// Tag used to recognise managed nodes.
    pub name: String,
    pub position: Vec3,
    pub scale: Vec3,
    pub model: ModelAsset,
}

impl OverlayNode {
    /// Wrap a loaded model with an identity transform.
    pub fn from_model(model: ModelAsset) -> Self {
        Self {
            name: String::new(),
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            model,
        }
    }
}

/// Mutation interface of the renderer's scene graph.
///
/// Only the main context calls these.
pub trait SceneGraph {
    /// Attach `node` as a child of `anchor`.
    fn add_child(&mut self, anchor: AnchorId, node: OverlayNode) -> Result<NodeId, SceneError>;

    /// Detach a child from `anchor`, returning it if it was attached.
    fn remove_child(&mut self, anchor: AnchorId, node: NodeId) -> Option<OverlayNode>;

    /// Children currently attached under `anchor`.
    fn children(&self, anchor: AnchorId) -> Vec<&OverlayNode>;
}

/// In-memory scene graph: anchors with ordered children.
#[derive(Debug, Default)]
pub struct Scene {
    anchors: HashMap<AnchorId, Vec<(NodeId, OverlayNode)>>,
    next_node_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an anchor created by the tracking session.
    pub fn insert_anchor(&mut self, anchor: AnchorId) {
        self.anchors.entry(anchor).or_default();
    }

    /// Drop an anchor and everything attached to it.
    pub fn remove_anchor(&mut self, anchor: AnchorId) -> bool {
        self.anchors.remove(&anchor).is_some()
    }

    pub fn has_anchor(&self, anchor: AnchorId) -> bool {
        self.anchors.contains_key(&anchor)
    }

    /// Children of `anchor` whose name matches `name`.
    pub fn children_named(&self, anchor: AnchorId, name: &str) -> Vec<&OverlayNode> {
        self.children(anchor)
            .into_iter()
            .filter(|node| node.name == name)
            .collect()
    }
}

impl SceneGraph for Scene {
    fn add_child(&mut self, anchor: AnchorId, node: OverlayNode) -> Result<NodeId, SceneError> {
        let children = self
            .anchors
            .get_mut(&anchor)
            .ok_or(SceneError::UnknownAnchor(anchor))?;

        self.next_node_id += 1;
        let id = NodeId(self.next_node_id);
        children.push((id, node));
        Ok(id)
    }

    fn remove_child(&mut self, anchor: AnchorId, node: NodeId) -> Option<OverlayNode> {
        let children = self.anchors.get_mut(&anchor)?;
        let pos = children.iter().position(|(id, _)| *id == node)?;
        Some(children.remove(pos).1)
    }

    fn children(&self, anchor: AnchorId) -> Vec<&OverlayNode> {
        self.anchors
            .get(&anchor)
            .map(|children| children.iter().map(|(_, node)| node).collect())
            .unwrap_or_default()
    }
}
