//! HTTP client for the video catalog.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Response;

use super::errors::{CatalogError, CatalogResult};
use super::wire::decode_video_list;
use crate::models::{CatalogEntry, PublishJob};

/// Accepts finished publish jobs. Implemented by [`CatalogClient`]; the
/// publish pipeline depends only on this.
#[async_trait]
pub trait VideoUploader: Send + Sync {
    /// One upload attempt. Returns the raw response body on success.
    async fn upload(&self, job: &PublishJob) -> CatalogResult<String>;
}

/// Client for the catalog server.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    /// Use a preconfigured `reqwest::Client` (proxies, TLS roots, ...).
    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch all published videos, in server order.
    pub async fn list(&self) -> CatalogResult<Vec<CatalogEntry>> {
        let url = self.url("/video/videos");
        tracing::debug!(url = %url, "Listing catalog");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::transport(&url, e))?;
        let body = success_body(response, &url).await?;

        let entries = decode_video_list(&body).inspect_err(|e| {
            tracing::error!(url = %url, error = %e, "Catalog list decode failed");
        })?;
        tracing::info!(count = entries.len(), "Catalog loaded");
        Ok(entries)
    }

    /// Delete a published video.
    pub async fn delete(&self, id: i64) -> CatalogResult<()> {
        let url = self.url(&format!("/video/{id}"));
        tracing::info!(id, "Deleting catalog entry");

        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| CatalogError::transport(&url, e))?;
        success_body(response, &url).await?;
        Ok(())
    }

    /// Upload a recording and its cover as one multipart request.
    ///
    /// Single attempt; no retry.
    pub async fn upload(&self, job: &PublishJob) -> CatalogResult<String> {
        let url = self.url("/upload");
        let form = upload_form(job)?;

        tracing::info!(
            url = %url,
            title = %job.title,
            video_bytes = job.video.len(),
            cover_bytes = job.cover.len(),
            "Uploading recording"
        );

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| CatalogError::transport(&url, e))?;
        let body = success_body(response, &url).await?;

        tracing::info!(response = %body, "Upload accepted");
        Ok(body)
    }

    /// Streaming URL for a published video.
    pub fn play_url(&self, id: i64) -> String {
        self.url(&format!("/video/play/{id}"))
    }

    /// Download the cover image of a published video.
    pub async fn fetch_cover(&self, id: i64) -> CatalogResult<Bytes> {
        let url = self.url(&format!("/video/image/{id}"));

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::transport(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::status(status, &url, &body));
        }

        response
            .bytes()
            .await
            .map_err(|e| CatalogError::transport(&url, e))
    }
}

#[async_trait]
impl VideoUploader for CatalogClient {
    async fn upload(&self, job: &PublishJob) -> CatalogResult<String> {
        CatalogClient::upload(self, job).await
    }
}

fn upload_form(job: &PublishJob) -> CatalogResult<Form> {
    let file = Part::bytes(job.video.to_vec())
        .file_name("video.mp4")
        .mime_str("video/mp4")
        .map_err(CatalogError::Multipart)?;
    let cover = Part::bytes(job.cover.to_vec())
        .file_name("cover.jpg")
        .mime_str("image/jpeg")
        .map_err(CatalogError::Multipart)?;

    Ok(Form::new()
        .part("file", file)
        .part("cover", cover)
        .text("title", job.title.clone())
        .text("tag", job.tag.clone())
        .text("createdAt", job.created_at_field()))
}

/// Read the body of a 2xx response, or turn anything else into `Status`.
async fn success_body(response: Response, url: &str) -> CatalogResult<String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| CatalogError::transport(url, e))?;

    if !status.is_success() {
        tracing::warn!(url, status = status.as_u16(), "Catalog request rejected");
        return Err(CatalogError::status(status, url, &body));
    }
    Ok(body)
}
