//! Storage service seam.

use async_trait::async_trait;

use crate::error::Result;
use crate::fs::{FileEntry, SpaceInfo};

/// Operations the client core needs from the remote storage service.
///
/// [`ApiClient`](super::ApiClient) implements this over HTTP. The drive only
/// talks to the service through this trait.
#[async_trait]
pub trait StorageApi: Send + Sync + 'static {
    /// List the direct children of `path`.
    async fn list(&self, path: &str) -> Result<Vec<FileEntry>>;

    /// Upload one file into the directory `path`.
    async fn upload(&self, path: &str, name: &str, data: Vec<u8>) -> Result<()>;

    /// Create folder `name` inside `path`.
    async fn mkdir(&self, path: &str, name: &str) -> Result<()>;

    async fn rename(&self, id: &str, new_name: &str) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<()>;

    /// Move the entry at `source_path` into the directory `target_path`.
    async fn move_entry(&self, source_path: &str, target_path: &str) -> Result<()>;

    /// Keyword search below `path`.
    async fn search(&self, keyword: &str, path: &str) -> Result<Vec<FileEntry>>;

    async fn space(&self) -> Result<SpaceInfo>;

    /// URL that streams the content of entry `id`.
    fn download_url(&self, id: &str) -> String;
}
