//! Keyword search.

use std::sync::Arc;

use tracing::debug;

use super::utils::join_path;
use crate::api::StorageApi;
use crate::drive::core::Completion;
use crate::drive::{Drive, DriveEvent};
use crate::error::Result;
use crate::fs::FileEntry;

impl<S: StorageApi> Drive<S> {
    /// Search below the current directory.
    ///
    /// A blank keyword does nothing. Results go to the search surface only;
    /// the file list is left alone.
    pub fn search(&mut self, keyword: &str) {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return;
        }

        self.search_generation += 1;
        self.search_scope = self.store.path().to_string();
        let generation = self.search_generation;
        let scope = self.search_scope.clone();
        let keyword = keyword.to_string();
        let api = Arc::clone(&self.api);
        self.spawn_task(async move {
            let result = api.search(&keyword, &scope).await;
            Completion::Searched { generation, result }
        });
    }

    pub(crate) fn settle_search(&mut self, generation: u64, result: Result<Vec<FileEntry>>) {
        if generation != self.search_generation {
            debug!(generation, "discarding stale search results");
            return;
        }
        match result {
            Ok(mut results) => {
                for entry in &mut results {
                    if entry.path.is_empty() {
                        entry.path = join_path(&self.search_scope, &entry.name);
                    }
                }
                self.search_results = Some(results.clone());
                self.emit(DriveEvent::SearchResults(Some(results)));
            }
            Err(err) => self.notify_failure("Search failed", &err),
        }
    }

    /// Activate a search hit: folders are entered (closing the search),
    /// files are downloaded like in the main list.
    pub fn open_search_result(&mut self, id: &str) {
        let Some(entry) = self
            .search_results
            .as_ref()
            .and_then(|results| results.iter().find(|e| e.id == id))
            .cloned()
        else {
            return;
        };

        if entry.is_dir {
            self.close_search();
            self.go_to(&entry.path);
        } else {
            let url = self.api.download_url(&entry.id);
            self.emit(DriveEvent::OpenUrl(url));
        }
    }

    /// Close the search surface. Results still in flight are dropped.
    pub fn close_search(&mut self) {
        self.search_generation += 1;
        if self.search_results.take().is_some() {
            self.emit(DriveEvent::SearchResults(None));
        }
    }
}
