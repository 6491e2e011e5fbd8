//! Catalog list state for a browsing screen.

use std::sync::Arc;

use super::client::CatalogClient;
use super::errors::CatalogResult;
use crate::models::CatalogEntry;

/// Holds the last successfully loaded catalog listing.
pub struct CatalogView {
    client: Arc<CatalogClient>,
    entries: Vec<CatalogEntry>,
}

impl CatalogView {
    pub fn new(client: Arc<CatalogClient>) -> Self {
        Self {
            client,
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn play_url(&self, entry: &CatalogEntry) -> String {
        self.client.play_url(entry.id)
    }

    /// Replace the listing with a fresh copy from the server.
    ///
    /// On failure the previous listing is kept.
    pub async fn reload(&mut self) -> CatalogResult<&[CatalogEntry]> {
        self.entries = self.client.list().await?;
        Ok(&self.entries)
    }

    /// Delete an entry, then reload the full listing whatever the outcome.
    ///
    /// Returns the delete result; a failed reload is only logged.
    pub async fn delete(&mut self, id: i64) -> CatalogResult<()> {
        let deleted = self.client.delete(id).await;
        if let Err(e) = &deleted {
            tracing::warn!(id, error = %e, "Delete failed, reloading anyway");
        }

        if let Err(e) = self.reload().await {
            tracing::error!(error = %e, "Reload after delete failed");
        }
        deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn list_body(ids: &[i64]) -> String {
        let items: Vec<String> = ids
            .iter()
            .map(|id| {
                format!(
                    r#"{{"id":{id},"createdAt":"2024-11-14 10:00:00","updatedAt":"2024-11-14T10:00:00.000Z","title":"t","coverPath":"","videoPath":"","tag":"t","videoDuration":1,"videoSize":1}}"#
                )
            })
            .collect();
        format!(r#"{{"code":0,"msg":"ok","data":[{}]}}"#, items.join(","))
    }

    #[tokio::test]
    async fn reload_replaces_entries() {
        let server = MockServer::start().await;
        let body = list_body(&[1, 2]);
        Mock::given(method("GET"))
            .and(path("/video/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let mut view = CatalogView::new(Arc::new(CatalogClient::new(server.uri())));
        view.reload().await.unwrap();

        assert_eq!(view.entries().len(), 2);
        assert_eq!(
            view.play_url(&view.entries()[0]),
            format!("{}/video/play/1", server.uri())
        );
    }

    #[tokio::test]
    async fn failed_delete_still_reloads() {
        let body = list_body(&[1, 2, 3]);
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/video/2"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/video/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;

        let mut view = CatalogView::new(Arc::new(CatalogClient::new(server.uri())));
        let result = view.delete(2).await;

        assert!(result.is_err());
        assert_eq!(view.entries().len(), 3);
    }

    #[tokio::test]
    async fn failed_reload_keeps_previous_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/video/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_string(list_body(&[1])))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        let mut view = CatalogView::new(Arc::new(CatalogClient::new(server.uri())));
        view.reload().await.unwrap();

        // Second list hits no mock and gets wiremock's default 404.
        assert!(view.reload().await.is_err());
        assert_eq!(view.entries().len(), 1);
    }
}
