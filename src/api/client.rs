//! HTTP implementation of [`StorageApi`].

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use serde_json::json;
use tracing::debug;

use super::envelope::{decode_ack, decode_listing, decode_search, decode_space};
use super::storage::StorageApi;
use crate::config::DriveConfig;
use crate::error::{DriveError, Result};
use crate::fs::{FileEntry, SpaceInfo};
use crate::http::HttpClient;

/// Storage service client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url`
    /// (e.g. `http://127.0.0.1:8080/api`).
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_http(base_url, HttpClient::new())
    }

    /// Create a client from configuration (timeout, proxy).
    pub fn from_config(config: &DriveConfig) -> Result<Self> {
        let http = match config.proxy.as_deref() {
            #[cfg(not(target_arch = "wasm32"))]
            Some(proxy) => HttpClient::with_proxy(proxy, config.request_timeout())?,
            _ => HttpClient::with_timeout(config.request_timeout())?,
        };
        Self::with_http(&config.base_url, http)
    }

    fn with_http(base_url: &str, http: HttpClient) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| DriveError::Custom(format!("Invalid base URL {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(DriveError::Custom(format!(
                "Invalid base URL: {}",
                base_url
            )));
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL from path segments; each segment is
    /// percent-encoded on its own, so ids may contain '/'.
    fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.to_string()
    }
}

#[async_trait]
impl StorageApi for ApiClient {
    async fn list(&self, path: &str) -> Result<Vec<FileEntry>> {
        debug!(path, "list request");
        let body = self
            .http
            .get(&self.endpoint(&["files"]), &[("path", path)])
            .await?;
        decode_listing(&body)
    }

    async fn upload(&self, path: &str, name: &str, data: Vec<u8>) -> Result<()> {
        debug!(path, name, bytes = data.len(), "upload request");
        let form = Form::new()
            .part("file", Part::bytes(data).file_name(name.to_string()))
            .text("path", path.to_string());
        let body = self
            .http
            .post_multipart(&self.endpoint(&["files", "upload"]), form)
            .await?;
        decode_ack(&body)
    }

    async fn mkdir(&self, path: &str, name: &str) -> Result<()> {
        debug!(path, name, "mkdir request");
        let body = self
            .http
            .post_json(
                &self.endpoint(&["files", "mkdir"]),
                &json!({ "path": path, "name": name }),
            )
            .await?;
        decode_ack(&body)
    }

    async fn rename(&self, id: &str, new_name: &str) -> Result<()> {
        debug!(id, new_name, "rename request");
        let body = self
            .http
            .put_json(
                &self.endpoint(&["files", id, "rename"]),
                &json!({ "newName": new_name }),
            )
            .await?;
        decode_ack(&body)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        debug!(id, "delete request");
        let body = self.http.delete(&self.endpoint(&["files", id])).await?;
        decode_ack(&body)
    }

    async fn move_entry(&self, source_path: &str, target_path: &str) -> Result<()> {
        debug!(source_path, target_path, "move request");
        let body = self
            .http
            .post_json(
                &self.endpoint(&["files", "move"]),
                &json!({ "sourcePath": source_path, "targetPath": target_path }),
            )
            .await?;
        decode_ack(&body)
    }

    async fn search(&self, keyword: &str, path: &str) -> Result<Vec<FileEntry>> {
        debug!(keyword, path, "search request");
        let body = self
            .http
            .get(
                &self.endpoint(&["search"]),
                &[("keyword", keyword), ("path", path)],
            )
            .await?;
        decode_search(&body)
    }

    async fn space(&self) -> Result<SpaceInfo> {
        debug!("space request");
        let body = self.http.get(&self.endpoint(&["space"]), &[]).await?;
        decode_space(&body)
    }

    fn download_url(&self, id: &str) -> String {
        self.endpoint(&["files", id, "download"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new("http://127.0.0.1:8080/api").unwrap();
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:8080/api");
        assert!(ApiClient::new("not a url").is_err());
        assert!(ApiClient::new("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_endpoints() {
        let client = ApiClient::new("http://127.0.0.1:8080/api/").unwrap();
        assert_eq!(
            client.endpoint(&["files", "upload"]),
            "http://127.0.0.1:8080/api/files/upload"
        );
        assert_eq!(
            client.download_url("abc"),
            "http://127.0.0.1:8080/api/files/abc/download"
        );
    }

    #[test]
    fn test_ids_are_percent_encoded() {
        let client = ApiClient::new("http://localhost/api").unwrap();
        assert_eq!(
            client.download_url("a b/c"),
            "http://localhost/api/files/a%20b%2Fc/download"
        );
    }

    #[test]
    fn test_from_config() {
        let config = DriveConfig {
            base_url: "http://drive.local/api".to_string(),
            proxy: Some("http://127.0.0.1:3128".to_string()),
            ..DriveConfig::default()
        };
        let client = ApiClient::from_config(&config).unwrap();
        assert_eq!(client.base_url().host_str(), Some("drive.local"));
    }
}
