//! HTTP client wrapper for storage service requests.

use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use crate::error::{DriveError, Result};

/// HTTP client for making requests to the storage service.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a new HTTP client with a per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DriveError::Custom(format!("Failed to build client: {}", e)))?;

        Ok(Self { client })
    }

    /// Create a new HTTP client with a proxy.
    ///
    /// This method is only available on native targets (not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_proxy(proxy: &str, timeout: Duration) -> Result<Self> {
        let proxy = reqwest::Proxy::all(proxy)
            .map_err(|e| DriveError::Custom(format!("Invalid proxy: {}", e)))?;

        let client = Client::builder()
            .proxy(proxy)
            .timeout(timeout)
            .build()
            .map_err(|e| DriveError::Custom(format!("Failed to build client: {}", e)))?;

        Ok(Self { client })
    }

    /// Make a GET request with query parameters.
    pub async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String> {
        self.send(self.client.get(url).query(query)).await
    }

    /// Make a POST request with a JSON body.
    pub async fn post_json(&self, url: &str, body: &Value) -> Result<String> {
        self.send(self.client.post(url).json(body)).await
    }

    /// Make a PUT request with a JSON body.
    pub async fn put_json(&self, url: &str, body: &Value) -> Result<String> {
        self.send(self.client.put(url).json(body)).await
    }

    /// Make a DELETE request.
    pub async fn delete(&self, url: &str) -> Result<String> {
        self.send(self.client.delete(url)).await
    }

    /// Make a POST request with a multipart form body.
    pub async fn post_multipart(&self, url: &str, form: Form) -> Result<String> {
        self.send(self.client.post(url).multipart(form)).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<String> {
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(DriveError::HttpError(response.status().as_u16()));
        }

        Ok(response.text().await?)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}
