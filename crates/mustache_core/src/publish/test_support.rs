//! Test doubles for the publish collaborators.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Local;
use futures_util::stream::{self, StreamExt};
use parking_lot::Mutex;

use super::cover::{png_fixture, CoverOptions};
use super::types::PublishServices;
use crate::assets::{AssetError, AssetStore, ModelAsset};
use crate::catalog::{CatalogError, CatalogResult, VideoUploader};
use crate::media::{ChunkStream, MediaError, MediaLibrary, PermissionStatus, VideoAsset};
use crate::models::{PublishJob, StyleCatalog};
use crate::selection::CurrentSelection;

pub(crate) type Hook = Box<dyn Fn() + Send + Sync>;

/// In-memory media library.
pub(crate) struct FakeMedia {
    pub status: Mutex<PermissionStatus>,
    /// Answer given to `request_authorization`.
    pub answer: PermissionStatus,
    pub video: Option<Vec<u8>>,
    pub chunk_size: usize,
    /// Fail the fetch after this many chunks.
    pub fail_after_chunks: Option<usize>,
    pub permission_requests: AtomicUsize,
    pub asset_queries: AtomicUsize,
    pub fetches: AtomicUsize,
    /// Runs inside `latest_video`, between permission and metadata.
    pub on_latest_video: Option<Hook>,
}

impl FakeMedia {
    pub fn with_video(status: PermissionStatus, video: &[u8]) -> Self {
        Self {
            status: Mutex::new(status),
            answer: PermissionStatus::Denied,
            video: Some(video.to_vec()),
            chunk_size: 4,
            fail_after_chunks: None,
            permission_requests: AtomicUsize::new(0),
            asset_queries: AtomicUsize::new(0),
            fetches: AtomicUsize::new(0),
            on_latest_video: None,
        }
    }

    pub fn empty(status: PermissionStatus) -> Self {
        Self {
            video: None,
            ..Self::with_video(status, b"")
        }
    }
}

#[async_trait]
impl MediaLibrary for FakeMedia {
    async fn authorization_status(&self) -> PermissionStatus {
        *self.status.lock()
    }

    async fn request_authorization(&self) -> PermissionStatus {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);
        *self.status.lock() = self.answer;
        self.answer
    }

    async fn latest_video(&self) -> Result<Option<VideoAsset>, MediaError> {
        self.asset_queries.fetch_add(1, Ordering::SeqCst);
        if let Some(hook) = &self.on_latest_video {
            hook();
        }
        Ok(self.video.as_ref().map(|data| VideoAsset {
            id: "clip.mp4".to_string(),
            created_at: Local::now(),
            byte_size: Some(data.len() as u64),
        }))
    }

    fn fetch(&self, asset: &VideoAsset) -> ChunkStream {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let data = self.video.clone().unwrap_or_default();
        let mut chunks: Vec<Result<Bytes, MediaError>> = data
            .chunks(self.chunk_size)
            .map(|c| Ok(Bytes::copy_from_slice(c)))
            .collect();
        if let Some(limit) = self.fail_after_chunks {
            chunks.truncate(limit);
            chunks.push(Err(MediaError::Unavailable(asset.id.clone())));
        }
        stream::iter(chunks).boxed()
    }
}

/// Serves a PNG preview for every `*.png` except those marked missing.
#[derive(Default)]
pub(crate) struct FakePreviews {
    pub missing: HashSet<String>,
    pub loads: Mutex<Vec<String>>,
}

impl AssetStore for FakePreviews {
    fn load_model(&self, asset_ref: &str) -> Result<ModelAsset, AssetError> {
        Ok(ModelAsset {
            asset_ref: asset_ref.to_string(),
            data: Bytes::from_static(b"scene"),
        })
    }

    fn load_preview(&self, preview_ref: &str) -> Result<Bytes, AssetError> {
        self.loads.lock().push(preview_ref.to_string());
        if self.missing.contains(preview_ref) {
            return Err(AssetError::NotFound(preview_ref.to_string()));
        }
        Ok(Bytes::from(png_fixture(6, 4, [120, 60, 20, 255])))
    }
}

/// Records uploads; optionally rejects them.
#[derive(Default)]
pub(crate) struct FakeUploader {
    pub jobs: Mutex<Vec<PublishJob>>,
    pub reject: bool,
}

impl FakeUploader {
    pub fn count(&self) -> usize {
        self.jobs.lock().len()
    }
}

#[async_trait]
impl VideoUploader for FakeUploader {
    async fn upload(&self, job: &PublishJob) -> CatalogResult<String> {
        self.jobs.lock().push(job.clone());
        if self.reject {
            return Err(CatalogError::Status {
                status: 500,
                url: "http://catalog.test/upload".to_string(),
                body: "rejected".to_string(),
            });
        }
        Ok(format!(r#"{{"code":0,"msg":"{}"}}"#, job.title))
    }
}

pub(crate) fn services(
    media: Arc<FakeMedia>,
    previews: Arc<FakePreviews>,
    uploader: Arc<FakeUploader>,
) -> PublishServices {
    let styles = Arc::new(StyleCatalog::builtin());
    PublishServices {
        media,
        assets: previews,
        uploader,
        selection: CurrentSelection::new(styles.len()),
        styles,
        cover: CoverOptions::default(),
    }
}
