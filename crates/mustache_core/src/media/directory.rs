//! Recordings folder as a media library.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Local};
use futures_util::stream::{self, StreamExt};
use tokio::fs::{self, File};
use tokio::io::AsyncReadExt;

use super::library::{ChunkStream, MediaError, MediaLibrary, PermissionStatus, VideoAsset};

const VIDEO_EXTENSIONS: [&str; 3] = ["mp4", "mov", "m4v"];
const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Treats a folder of recordings as the media library.
///
/// Permission follows folder accessibility: a missing folder is
/// `NotDetermined` (requesting access creates it), an unreadable one is
/// `Denied`.
#[derive(Debug, Clone)]
pub struct DirectoryMediaLibrary {
    root: PathBuf,
    chunk_size: usize,
}

impl DirectoryMediaLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn asset_path(&self, id: &str) -> Option<PathBuf> {
        let name = Path::new(id).file_name()?;
        (name == id).then(|| self.root.join(name))
    }
}

fn is_video(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            VIDEO_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

fn status_for(kind: ErrorKind) -> PermissionStatus {
    match kind {
        ErrorKind::NotFound => PermissionStatus::NotDetermined,
        ErrorKind::PermissionDenied => PermissionStatus::Denied,
        _ => PermissionStatus::Restricted,
    }
}

#[async_trait]
impl MediaLibrary for DirectoryMediaLibrary {
    async fn authorization_status(&self) -> PermissionStatus {
        match fs::read_dir(&self.root).await {
            Ok(_) => PermissionStatus::Authorized,
            Err(e) => status_for(e.kind()),
        }
    }

    async fn request_authorization(&self) -> PermissionStatus {
        match fs::create_dir_all(&self.root).await {
            Ok(()) => {
                tracing::info!(root = %self.root.display(), "Recordings folder ready");
                self.authorization_status().await
            }
            Err(e) => {
                tracing::warn!(
                    root = %self.root.display(),
                    error = %e,
                    "Cannot create recordings folder"
                );
                match e.kind() {
                    ErrorKind::PermissionDenied => PermissionStatus::Denied,
                    _ => PermissionStatus::Restricted,
                }
            }
        }
    }

    async fn latest_video(&self) -> Result<Option<VideoAsset>, MediaError> {
        let mut entries = fs::read_dir(&self.root)
            .await
            .map_err(|e| MediaError::io(&self.root, e))?;

        let mut newest: Option<VideoAsset> = None;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| MediaError::io(&self.root, e))?
        {
            let path = entry.path();
            if !is_video(&path) {
                continue;
            }
            let metadata = match entry.metadata().await {
                Ok(m) if m.is_file() => m,
                Ok(_) => continue,
                Err(e) => {
                    tracing::debug!(
                        path = %path.display(),
                        error = %e,
                        "Skipping unreadable entry"
                    );
                    continue;
                }
            };
            let created_at: DateTime<Local> = match metadata.modified() {
                Ok(time) => time.into(),
                Err(_) => continue,
            };

            let is_newer = newest
                .as_ref()
                .map_or(true, |current| created_at > current.created_at);
            if is_newer {
                newest = Some(VideoAsset {
                    id: entry.file_name().to_string_lossy().into_owned(),
                    created_at,
                    byte_size: Some(metadata.len()),
                });
            }
        }

        Ok(newest)
    }

    fn fetch(&self, asset: &VideoAsset) -> ChunkStream {
        let Some(path) = self.asset_path(&asset.id) else {
            let id = asset.id.clone();
            return stream::once(async move { Err(MediaError::Unavailable(id)) }).boxed();
        };
        let chunk_size = self.chunk_size;

        stream::try_unfold((None::<File>, path), move |(file, path)| async move {
            let mut file = match file {
                Some(file) => file,
                None => File::open(&path)
                    .await
                    .map_err(|e| MediaError::io(&path, e))?,
            };

            let mut buf = vec![0u8; chunk_size];
            let read = file
                .read(&mut buf)
                .await
                .map_err(|e| MediaError::io(&path, e))?;
            if read == 0 {
                return Ok::<_, MediaError>(None);
            }
            buf.truncate(read);
            Ok(Some((Bytes::from(buf), (Some(file), path))))
        })
        .boxed()
    }
}
