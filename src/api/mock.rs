//! In-memory storage service for tests.
//!
//! Keeps a directory tree keyed by path, records every call in order and can
//! be told to fail or stall specific operations.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::storage::StorageApi;
use crate::error::{DriveError, Result};
use crate::fs::{join_path, normalize_path, FileEntry, SpaceInfo};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    List(String),
    Upload { path: String, name: String },
    Mkdir { path: String, name: String },
    Rename { id: String, new_name: String },
    Delete(String),
    Move { source: String, target: String },
    Search { keyword: String, path: String },
    Space,
}

#[derive(Default)]
struct MockState {
    dirs: HashMap<String, Vec<FileEntry>>,
    failures: HashMap<String, String>,
    transport_failures: HashSet<String>,
    delays: HashMap<String, Duration>,
    search_results: Vec<FileEntry>,
    space: SpaceInfo,
    calls: Vec<Call>,
    next_id: u64,
}

#[derive(Default)]
pub(crate) struct MockStorage {
    state: Mutex<MockState>,
}

impl MockStorage {
    pub(crate) fn new() -> Self {
        let mock = Self::default();
        mock.state().dirs.insert("/".to_string(), Vec::new());
        mock
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    /// Register a directory with its entries.
    pub(crate) fn with_dir(self, path: &str, entries: Vec<FileEntry>) -> Self {
        self.state().dirs.insert(normalize_path(path), entries);
        self
    }

    /// Make operation `key` answer with a non-zero code and `message`.
    ///
    /// Keys: `list:<path>`, `upload:<name>`, `mkdir`, `rename`, `delete`,
    /// `move`, `search`, `space`.
    pub(crate) fn fail(self, key: &str, message: &str) -> Self {
        self.state()
            .failures
            .insert(key.to_string(), message.to_string());
        self
    }

    /// Make operation `key` fail as if the connection dropped.
    pub(crate) fn fail_transport(self, key: &str) -> Self {
        self.state().transport_failures.insert(key.to_string());
        self
    }

    /// Stall operation `key` before it answers.
    pub(crate) fn delay(self, key: &str, delay: Duration) -> Self {
        self.state().delays.insert(key.to_string(), delay);
        self
    }

    pub(crate) fn with_search_results(self, results: Vec<FileEntry>) -> Self {
        self.state().search_results = results;
        self
    }

    pub(crate) fn with_space(self, space: SpaceInfo) -> Self {
        self.state().space = space;
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub(crate) fn upload_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Upload { name, .. } => Some(name),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn list_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::List(path) => Some(path),
                _ => None,
            })
            .collect()
    }

    /// Record the call, wait out any configured delay, then report a
    /// configured failure.
    async fn enter(&self, call: Call, key: &str) -> Result<()> {
        let delay = {
            let mut state = self.state();
            state.calls.push(call);
            state.delays.get(key).copied()
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let state = self.state();
        if state.transport_failures.contains(key) {
            return Err(DriveError::HttpError(502));
        }
        if let Some(message) = state.failures.get(key) {
            return Err(DriveError::ApiError {
                code: 1,
                message: message.clone(),
            });
        }
        Ok(())
    }

    fn find_mut<'a>(state: &'a mut MockState, id: &str) -> Option<&'a mut FileEntry> {
        state
            .dirs
            .values_mut()
            .flat_map(|entries| entries.iter_mut())
            .find(|e| e.id == id)
    }

    fn add_entry(&self, path: &str, name: &str, is_dir: bool, size: u64) {
        let mut state = self.state();
        state.next_id += 1;
        let entry = FileEntry {
            id: format!("new-{}", state.next_id),
            name: name.to_string(),
            is_dir,
            size,
            mod_time: "2024-06-01 12:00:00".to_string(),
            path: join_path(path, name),
        };
        if is_dir {
            state.dirs.entry(entry.path.clone()).or_default();
        }
        state.dirs.entry(normalize_path(path)).or_default().push(entry);
    }
}

#[async_trait]
impl StorageApi for MockStorage {
    async fn list(&self, path: &str) -> Result<Vec<FileEntry>> {
        let key = format!("list:{}", path);
        self.enter(Call::List(path.to_string()), &key).await?;
        self.state()
            .dirs
            .get(&normalize_path(path))
            .cloned()
            .ok_or_else(|| DriveError::ApiError {
                code: 1,
                message: format!("directory not found: {}", path),
            })
    }

    async fn upload(&self, path: &str, name: &str, data: Vec<u8>) -> Result<()> {
        let key = format!("upload:{}", name);
        let call = Call::Upload {
            path: path.to_string(),
            name: name.to_string(),
        };
        self.enter(call, &key).await?;
        self.add_entry(path, name, false, data.len() as u64);
        Ok(())
    }

    async fn mkdir(&self, path: &str, name: &str) -> Result<()> {
        let call = Call::Mkdir {
            path: path.to_string(),
            name: name.to_string(),
        };
        self.enter(call, "mkdir").await?;
        self.add_entry(path, name, true, 0);
        Ok(())
    }

    async fn rename(&self, id: &str, new_name: &str) -> Result<()> {
        let call = Call::Rename {
            id: id.to_string(),
            new_name: new_name.to_string(),
        };
        self.enter(call, "rename").await?;
        let mut state = self.state();
        if let Some(entry) = Self::find_mut(&mut state, id) {
            entry.name = new_name.to_string();
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.enter(Call::Delete(id.to_string()), "delete").await?;
        for entries in self.state().dirs.values_mut() {
            entries.retain(|e| e.id != id);
        }
        Ok(())
    }

    async fn move_entry(&self, source_path: &str, target_path: &str) -> Result<()> {
        let call = Call::Move {
            source: source_path.to_string(),
            target: target_path.to_string(),
        };
        self.enter(call, "move").await
    }

    async fn search(&self, keyword: &str, path: &str) -> Result<Vec<FileEntry>> {
        let call = Call::Search {
            keyword: keyword.to_string(),
            path: path.to_string(),
        };
        self.enter(call, "search").await?;
        Ok(self.state().search_results.clone())
    }

    async fn space(&self) -> Result<SpaceInfo> {
        self.enter(Call::Space, "space").await?;
        Ok(self.state().space)
    }

    fn download_url(&self, id: &str) -> String {
        format!("http://mock/files/{}/download", id)
    }
}
