//! Core types for the publish pipeline.

use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Local};

use super::cover::CoverOptions;
use crate::assets::AssetStore;
use crate::catalog::VideoUploader;
use crate::logging::PublishLogger;
use crate::media::{MediaLibrary, PermissionStatus, VideoAsset};
use crate::models::StyleCatalog;
use crate::selection::CurrentSelection;

/// Collaborators shared by every publish run.
#[derive(Clone)]
pub struct PublishServices {
    pub media: Arc<dyn MediaLibrary>,
    pub assets: Arc<dyn AssetStore>,
    pub uploader: Arc<dyn VideoUploader>,
    pub styles: Arc<StyleCatalog>,
    /// Read when the metadata step runs, not when recording started.
    pub selection: CurrentSelection,
    pub cover: CoverOptions,
}

/// Read-only context passed to publish steps.
pub struct PublishContext {
    pub job_name: String,
    pub services: PublishServices,
    pub logger: Arc<PublishLogger>,
}

impl PublishContext {
    pub fn new(
        job_name: impl Into<String>,
        services: PublishServices,
        logger: Arc<PublishLogger>,
    ) -> Self {
        Self {
            job_name: job_name.into(),
            services,
            logger,
        }
    }
}

/// Title and tag resolved from the selected style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishMetadata {
    pub style_index: usize,
    pub title: String,
    pub tag: String,
    /// Preview image the cover is rendered from.
    pub preview_ref: String,
}

/// State accumulated by the steps of one publish run.
///
/// Each step fills in its own field; later steps read earlier ones.
#[derive(Debug, Clone)]
pub struct PublishState {
    pub job_id: String,
    pub started_at: DateTime<Local>,
    pub permission: Option<PermissionStatus>,
    pub asset: Option<VideoAsset>,
    pub metadata: Option<PublishMetadata>,
    pub video: Option<Bytes>,
    /// JPEG-encoded cover.
    pub cover: Option<Bytes>,
    /// Raw body returned by the catalog on upload.
    pub response: Option<String>,
}

impl PublishState {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            started_at: Local::now(),
            permission: None,
            asset: None,
            metadata: None,
            video: None,
            cover: None,
            response: None,
        }
    }

    pub fn is_uploaded(&self) -> bool {
        self.response.is_some()
    }
}

/// Result of executing a publish step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Success,
    /// Not an error; the run continues with the next step.
    Skipped(String),
}

/// Summary of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    pub job_name: String,
    pub style_index: usize,
    pub title: String,
    pub video_bytes: usize,
    pub response_body: String,
}
