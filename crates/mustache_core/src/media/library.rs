//! Media library trait and shared types.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Local};
use futures_util::stream::BoxStream;
use thiserror::Error;

/// Library access permission, mirroring the platform photo library states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Authorized,
    /// Access to a user-chosen subset; enough to read our own recordings.
    Limited,
    NotDetermined,
    Denied,
    Restricted,
}

impl PermissionStatus {
    /// Whether assets may be read under this status.
    pub fn allows_read(&self) -> bool {
        matches!(
            self,
            PermissionStatus::Authorized | PermissionStatus::Limited
        )
    }
}

/// A video in the library. `id` is opaque to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoAsset {
    pub id: String,
    pub created_at: DateTime<Local>,
    pub byte_size: Option<u64>,
}

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Asset '{0}' is not available")]
    Unavailable(String),
}

impl MediaError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Asset bytes, delivered in chunks. A stream that yields an error is
/// abandoned by the consumer.
pub type ChunkStream = BoxStream<'static, Result<Bytes, MediaError>>;

#[async_trait]
pub trait MediaLibrary: Send + Sync {
    async fn authorization_status(&self) -> PermissionStatus;

    /// Ask for access; resolves with the user's answer.
    async fn request_authorization(&self) -> PermissionStatus;

    /// The most recently created video, if any.
    async fn latest_video(&self) -> Result<Option<VideoAsset>, MediaError>;

    /// Stream the asset's bytes.
    fn fetch(&self, asset: &VideoAsset) -> ChunkStream;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_authorized_and_limited_allow_reads() {
        assert!(PermissionStatus::Authorized.allows_read());
        assert!(PermissionStatus::Limited.allows_read());
        assert!(!PermissionStatus::NotDetermined.allows_read());
        assert!(!PermissionStatus::Denied.allows_read());
        assert!(!PermissionStatus::Restricted.allows_read());
    }
}
