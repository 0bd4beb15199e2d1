//! Render surface of the drive.

use crate::dialog::DialogState;
use crate::fs::{Crumb, DirectoryView, FileEntry, SpaceInfo};
use crate::notify::{Notification, NotificationId};
use crate::progress::UploadProgress;
use crate::selection::ContextMenu;

/// State change published to every subscriber.
///
/// A view renders from these events alone; each one carries the full new
/// value of the part of the state it names.
#[derive(Debug, Clone)]
pub enum DriveEvent {
    /// Loading placeholder shown or hidden
    Loading(bool),
    /// A directory listing was applied or re-sorted
    ViewChanged(DirectoryView),
    Breadcrumb(Vec<Crumb>),
    SelectionChanged(Option<String>),
    ContextMenu(ContextMenu),
    /// Upload surface opened for a batch of `total` files
    UploadStarted { total: usize },
    UploadProgress(UploadProgress),
    /// Upload surface closed
    UploadFinished { succeeded: usize, failed: usize },
    /// `None` closes the search surface
    SearchResults(Option<Vec<FileEntry>>),
    SpaceChanged(SpaceInfo),
    Notification(Notification),
    NotificationExpired(NotificationId),
    DialogChanged(DialogState),
    /// Navigate the browser to a URL (downloads)
    OpenUrl(String),
}
