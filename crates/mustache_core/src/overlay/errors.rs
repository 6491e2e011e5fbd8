//! Error types for overlay attachment.

use thiserror::Error;

use super::scene::AnchorId;
use crate::assets::AssetError;

/// Errors from the scene graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("Anchor {0} is not part of the scene")]
    UnknownAnchor(AnchorId),
}

/// Errors from selection and attachment.
///
/// These never cross into the tracking callback: the session loop logs them
/// and the scene is simply left without the requested overlay.
#[derive(Error, Debug)]
pub enum OverlayError {
    #[error("Style index {index} is out of range (0..{count})")]
    InvalidStyleIndex { index: usize, count: usize },

    #[error("Failed to load overlay asset '{asset_ref}': {source}")]
    AssetLoad {
        asset_ref: String,
        #[source]
        source: AssetError,
    },

    #[error("Scene rejected overlay: {0}")]
    Scene(#[from] SceneError),
}

impl OverlayError {
    pub fn invalid_style_index(index: usize, count: usize) -> Self {
        Self::InvalidStyleIndex { index, count }
    }

    pub fn asset_load(asset_ref: impl Into<String>, source: AssetError) -> Self {
        Self::AssetLoad {
            asset_ref: asset_ref.into(),
            source,
        }
    }
}
