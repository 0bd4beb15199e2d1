//! Current directory listing and its presentation state.
//!
//! [`FileListStore`] is the only owner of the [`DirectoryView`]. Loads are
//! split into a `begin_load` / `settle_load` pair so the request itself can run
//! anywhere (inline or as an in-flight future in the drive actor); every load
//! carries a generation number and responses from superseded loads are
//! dropped.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::entry::FileEntry;
use super::operations::utils::{join_path, normalize_path};
use crate::error::{DriveError, Result};

/// Sort order for the file list. Folders always come first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Case-insensitive name order
    #[default]
    Name,
    /// Largest first
    Size,
    /// Most recent first
    ModTime,
}

/// Layout of the file list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    #[default]
    List,
    Grid,
}

/// Snapshot of one server directory as the user currently sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryView {
    pub path: String,
    pub entries: Vec<FileEntry>,
    pub sort_key: SortKey,
    pub view_mode: ViewMode,
}

/// Handle for one in-flight directory load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    path: String,
}

impl LoadTicket {
    /// Path being loaded.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Generation number of this load.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Result of settling a load against the store.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Entries replaced the current view.
    Applied,
    /// The request failed; the previous view is untouched.
    Failed(DriveError),
    /// A newer load was issued meanwhile; the response was discarded.
    Stale,
}

/// Owner of the current [`DirectoryView`].
#[derive(Debug)]
pub struct FileListStore {
    view: DirectoryView,
    loading: bool,
    generation: u64,
}

impl FileListStore {
    /// Create an empty store rooted at `/`.
    pub fn new(sort_key: SortKey, view_mode: ViewMode) -> Self {
        Self {
            view: DirectoryView {
                path: "/".to_string(),
                entries: Vec::new(),
                sort_key,
                view_mode,
            },
            loading: false,
            generation: 0,
        }
    }

    pub fn view(&self) -> &DirectoryView {
        &self.view
    }

    pub fn path(&self) -> &str {
        &self.view.path
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.view.entries
    }

    /// Whether the loading placeholder should be shown.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Resolve an entry id against the current view.
    pub fn entry(&self, id: &str) -> Option<&FileEntry> {
        self.view.entries.iter().find(|e| e.id == id)
    }

    /// Start a load for `path` and raise the loading flag.
    pub fn begin_load(&mut self, path: &str) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        LoadTicket {
            generation: self.generation,
            path: normalize_path(path),
        }
    }

    /// Apply the response of a load started with [`begin_load`](Self::begin_load).
    ///
    /// The loading flag is cleared whenever the newest load settles, whether it
    /// succeeded or not.
    pub fn settle_load(
        &mut self,
        ticket: &LoadTicket,
        result: Result<Vec<FileEntry>>,
    ) -> LoadOutcome {
        if ticket.generation != self.generation {
            return LoadOutcome::Stale;
        }
        self.loading = false;

        match result {
            Ok(mut entries) => {
                for entry in &mut entries {
                    if entry.path.is_empty() {
                        entry.path = join_path(&ticket.path, &entry.name);
                    }
                }
                sort_entries(&mut entries, self.view.sort_key);
                self.view.path = ticket.path.clone();
                self.view.entries = entries;
                LoadOutcome::Applied
            }
            Err(err) => LoadOutcome::Failed(err),
        }
    }

    /// Re-order the current entries without a network call.
    pub fn sort(&mut self, key: SortKey) {
        self.view.sort_key = key;
        sort_entries(&mut self.view.entries, key);
    }

    pub fn apply_view_mode(&mut self, mode: ViewMode) {
        self.view.view_mode = mode;
    }
}

/// Sort entries in place: folders first, then by `key`. Stable for ties.
pub fn sort_entries(entries: &mut [FileEntry], key: SortKey) {
    entries.sort_by(|a, b| compare_entries(a, b, key));
}

fn compare_entries(a: &FileEntry, b: &FileEntry, key: SortKey) -> Ordering {
    b.is_dir.cmp(&a.is_dir).then_with(|| match key {
        SortKey::Name => compare_names(&a.name, &b.name),
        SortKey::Size => b.size.cmp(&a.size),
        SortKey::ModTime => compare_mod_times(&a.mod_time, &b.mod_time),
    })
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

// Newest first; values that don't parse go last.
fn compare_mod_times(a: &str, b: &str) -> Ordering {
    match (parse_mod_time(a), parse_mod_time(b)) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn parse_mod_time(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.naive_utc())
        })
}
