//! Directory listings, navigation and upload bookkeeping.

pub mod breadcrumb;
pub mod entry;
pub mod listing;
mod operations;
pub mod upload_state;

pub use breadcrumb::{build_breadcrumb, Crumb, ROOT_LABEL};
pub use entry::{format_size, FileEntry, SpaceInfo};
pub use listing::{
    sort_entries, DirectoryView, FileListStore, LoadOutcome, LoadTicket, SortKey, ViewMode,
};
pub use operations::utils::{join_path, normalize_path, parent_path};
pub use upload_state::{JobStatus, LocalFile, PendingJob, UploadBatch, UploadJob, UploadState};
