//! # webdrive
//!
//! Rust client core for a web file manager backed by a JSON storage service.
//!
//! ## Features
//!
//! - **Browsing**: Directory listings with folder-first sorting (name, size,
//!   modification time), list/grid view modes and a breadcrumb trail.
//!   - Responses from superseded loads are discarded, so the view always
//!     shows the last directory the user asked for.
//! - **Uploads**: Sequential upload batches with progress events, per-file
//!   failure reporting and a reload of the target directory when done.
//! - **File management**: Create folders, rename, delete and move entries
//!   through modal dialog state machines.
//! - **Search**: Keyword search scoped to the current directory.
//! - **Notifications**: Transient success/error messages that expire on
//!   their own.
//!
//! All state lives in a [`Drive`] owned by a background task; a [`DriveHandle`]
//! sends it commands and [`DriveEvent`]s report every change.
//!
//! ## Example
//!
//! ```no_run
//! use webdrive::{DriveConfig, DriveEvent, DriveHandle, LocalFile};
//!
//! # async fn example() -> webdrive::Result<()> {
//! let config = DriveConfig::from_toml_str(r#"base_url = "http://127.0.0.1:8080/api""#)?;
//! let drive = DriveHandle::connect(&config)?;
//! let mut events = drive.subscribe();
//!
//! drive.go_to("/docs").await?;
//! drive.upload(vec![LocalFile::from_path("report.pdf")]).await?;
//!
//! while let Ok(event) = events.recv().await {
//!     if let DriveEvent::UploadFinished { succeeded, failed } = event {
//!         println!("{succeeded} uploaded, {failed} failed");
//!         break;
//!     }
//! }
//!
//! for entry in drive.snapshot().await?.view.entries {
//!     println!("{} ({})", entry.name, entry.size_label());
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod dialog;
pub mod drive;
pub mod error;
pub mod fs;
pub mod http;
pub mod notify;
pub mod progress;
pub mod selection;

// Re-export commonly used types
pub use api::{ApiClient, StorageApi};
pub use config::DriveConfig;
pub use dialog::{DialogKind, DialogState};
pub use drive::{Drive, DriveEvent, DriveHandle, DriveSnapshot};
pub use error::{DriveError, Result};
pub use fs::{DirectoryView, FileEntry, LocalFile, SortKey, SpaceInfo, ViewMode};
pub use notify::{Notification, NotificationKind};
pub use progress::UploadProgress;
pub use selection::ContextMenu;
