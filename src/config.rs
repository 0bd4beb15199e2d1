//! Client configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! base_url = "http://127.0.0.1:8080/api"
//! request_timeout_secs = 20
//! notification_ttl_ms = 3000
//! default_sort = "modTime"
//! default_view = "grid"
//! ```

#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::Result;
use crate::fs::{SortKey, ViewMode};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// Root of the storage API
    pub base_url: String,
    pub request_timeout_secs: u64,
    /// Lifetime of a notification
    pub notification_ttl_ms: u64,
    /// Buffer size of the event broadcast channel
    pub event_capacity: usize,
    /// HTTP(S) proxy URL. Ignored on WASM.
    pub proxy: Option<String>,
    pub default_sort: SortKey,
    pub default_view: ViewMode,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080/api".to_string(),
            request_timeout_secs: 20,
            notification_ttl_ms: 3000,
            event_capacity: 256,
            proxy: None,
            default_sort: SortKey::Name,
            default_view: ViewMode::List,
        }
    }
}

impl DriveConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read a TOML config file.
    ///
    /// This method is only available on native targets (not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = DriveConfig::from_toml_str("").unwrap();
        assert_eq!(config, DriveConfig::default());
        assert_eq!(config.notification_ttl(), Duration::from_millis(3000));
        assert_eq!(config.request_timeout(), Duration::from_secs(20));
    }

    #[test]
    fn test_partial_document() {
        let config = DriveConfig::from_toml_str(
            r#"
            base_url = "https://files.example.com/api"
            default_sort = "modTime"
            default_view = "grid"
            proxy = "http://proxy.local:3128"
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url, "https://files.example.com/api");
        assert_eq!(config.default_sort, SortKey::ModTime);
        assert_eq!(config.default_view, ViewMode::Grid);
        assert_eq!(config.proxy.as_deref(), Some("http://proxy.local:3128"));
        assert_eq!(config.notification_ttl_ms, 3000);
    }

    #[test]
    fn test_invalid_document() {
        assert!(DriveConfig::from_toml_str("default_sort = \"colour\"").is_err());
        assert!(DriveConfig::from_toml_str("base_url = [").is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(DriveConfig::load("/definitely/not/here.toml").is_err());
    }
}
