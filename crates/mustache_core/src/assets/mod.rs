//! Bundled style assets: 3D overlay models and static preview images.
//!
//! The overlay manager loads models through [`AssetStore::load_model`]; the
//! publish pipeline renders covers from [`AssetStore::load_preview`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use thiserror::Error;

/// Errors loading a bundled asset.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Asset '{0}' contains no nodes")]
    Empty(String),

    #[error("I/O error reading asset '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

/// A loaded 3D model, kept as opaque scene data.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAsset {
    /// The reference the model was loaded from.
    pub asset_ref: String,
    /// Raw scene data handed to the renderer.
    pub data: Bytes,
}

/// Source of bundled assets.
pub trait AssetStore: Send + Sync {
    /// Load the 3D model for a style (e.g. `Mustache_1.scn`).
    fn load_model(&self, asset_ref: &str) -> Result<ModelAsset, AssetError>;

    /// Load the encoded preview image for a style (e.g. `Mustache_1.png`).
    fn load_preview(&self, preview_ref: &str) -> Result<Bytes, AssetError>;
}

/// Asset store backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryAssetStore {
    root: PathBuf,
}

impl DirectoryAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read(&self, name: &str) -> Result<Bytes, AssetError> {
        // Asset refs are bare file names; anything path-like is treated as missing.
        if name.contains(['/', '\\']) || name == ".." {
            return Err(AssetError::NotFound(name.to_string()));
        }
        let path = self.root.join(name);
        match fs::read(&path) {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(AssetError::NotFound(name.to_string()))
            }
            Err(e) => Err(AssetError::Io {
                name: name.to_string(),
                source: e,
            }),
        }
    }
}

impl AssetStore for DirectoryAssetStore {
    fn load_model(&self, asset_ref: &str) -> Result<ModelAsset, AssetError> {
        let data = self.read(asset_ref)?;
        if data.is_empty() {
            return Err(AssetError::Empty(asset_ref.to_string()));
        }
        tracing::debug!(
            asset = asset_ref,
            bytes = data.len(),
            "Loaded overlay model"
        );
        Ok(ModelAsset {
            asset_ref: asset_ref.to_string(),
            data,
        })
    }

    fn load_preview(&self, preview_ref: &str) -> Result<Bytes, AssetError> {
        self.read(preview_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn loads_model_from_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Mustache_1.scn"), b"scene").unwrap();

        let store = DirectoryAssetStore::new(dir.path());
        let model = store.load_model("Mustache_1.scn").unwrap();

        assert_eq!(model.asset_ref, "Mustache_1.scn");
        assert_eq!(&model.data[..], b"scene");
    }

    #[test]
    fn missing_model_is_not_found() {
        let dir = tempdir().unwrap();
        let store = DirectoryAssetStore::new(dir.path());

        assert!(matches!(
            store.load_model("Mustache_9.scn"),
            Err(AssetError::NotFound(_))
        ));
    }

    #[test]
    fn empty_model_is_rejected() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Mustache_1.scn"), b"").unwrap();

        let store = DirectoryAssetStore::new(dir.path());
        assert!(matches!(
            store.load_model("Mustache_1.scn"),
            Err(AssetError::Empty(_))
        ));
    }

    #[test]
    fn path_like_refs_are_rejected() {
        let dir = tempdir().unwrap();
        let store = DirectoryAssetStore::new(dir.path());
        assert!(matches!(
            store.load_preview("../secret.png"),
            Err(AssetError::NotFound(_))
        ));
    }
}
