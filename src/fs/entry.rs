//! Directory entry and storage space types.

use serde::{Deserialize, Serialize};

/// One file or folder record as reported by the storage service.
///
/// Entries are snapshots: the client never edits them, it only replaces the
/// whole listing on reload. Identity is [`FileEntry::id`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// Opaque identifier used by rename/delete/download endpoints
    pub id: String,
    /// Display name
    pub name: String,
    /// Folder flag
    pub is_dir: bool,
    /// File size in bytes (meaningless for folders)
    #[serde(default)]
    pub size: u64,
    /// Server-formatted modification time
    #[serde(default)]
    pub mod_time: String,
    /// Absolute, '/'-rooted path. Filled in by the client when the server
    /// leaves it out.
    #[serde(default)]
    pub path: String,
}

impl FileEntry {
    /// Check if this entry is a file.
    pub fn is_file(&self) -> bool {
        !self.is_dir
    }

    /// Extension of the entry name, lowercased. Folders have none.
    pub fn extension(&self) -> Option<String> {
        if self.is_dir {
            return None;
        }
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    /// Human readable size label, as shown in the file list.
    pub fn size_label(&self) -> String {
        if self.is_dir {
            "Folder".to_string()
        } else {
            format_size(self.size)
        }
    }
}

/// User storage space as reported by `/space`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpaceInfo {
    /// Total storage in bytes
    pub total: u64,
    /// Used storage in bytes
    pub used: u64,
    /// Free storage in bytes
    #[serde(default)]
    pub free: u64,
}

impl SpaceInfo {
    /// Get usage percentage.
    pub fn usage_percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.used as f64 / self.total as f64) * 100.0
        }
    }

    /// "used / total" label for the quota bar.
    pub fn label(&self) -> String {
        format!("{} / {}", format_size(self.used), format_size(self.total))
    }
}

/// Format a byte count with binary units, two decimals at most.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}

#[cfg(test)]
pub(crate) fn dir(id: &str, name: &str, parent: &str) -> FileEntry {
    FileEntry {
        id: id.to_string(),
        name: name.to_string(),
        is_dir: true,
        size: 0,
        mod_time: "2024-01-01 00:00:00".to_string(),
        path: crate::fs::join_path(parent, name),
    }
}

#[cfg(test)]
pub(crate) fn file(id: &str, name: &str, size: u64, mod_time: &str, parent: &str) -> FileEntry {
    FileEntry {
        id: id.to_string(),
        name: name.to_string(),
        is_dir: false,
        size,
        mod_time: mod_time.to_string(),
        path: crate::fs::join_path(parent, name),
    }
}
