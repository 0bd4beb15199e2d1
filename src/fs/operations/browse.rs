//! Directory loading and navigation.

use std::sync::Arc;

use tracing::debug;

use super::utils::normalize_path;
use crate::api::StorageApi;
use crate::drive::core::Completion;
use crate::drive::{Drive, DriveEvent};
use crate::error::Result;
use crate::fs::{build_breadcrumb, FileEntry, LoadOutcome, LoadTicket};

impl<S: StorageApi> Drive<S> {
    /// Request the listing of `path`.
    ///
    /// Raises the loading flag immediately; the view is replaced once the
    /// response arrives, unless a newer load was requested meanwhile.
    pub fn load(&mut self, path: &str) -> LoadTicket {
        let ticket = self.store.begin_load(path);
        debug!(
            path = ticket.path(),
            generation = ticket.generation(),
            "loading directory"
        );
        self.emit(DriveEvent::Loading(true));

        let api = Arc::clone(&self.api);
        let request = ticket.clone();
        self.spawn_task(async move {
            let result = api.list(request.path()).await;
            Completion::Listed {
                ticket: request,
                result,
            }
        });
        ticket
    }

    /// Navigate to `path`.
    ///
    /// The selection belongs to the directory it was made in and is dropped
    /// when the target differs.
    pub fn go_to(&mut self, path: &str) -> LoadTicket {
        self.dismiss_menu();
        if normalize_path(path) != self.store.path() && self.selection.clear() {
            self.emit(DriveEvent::SelectionChanged(None));
        }
        self.load(path)
    }

    /// Reload the current directory.
    pub fn refresh(&mut self) -> LoadTicket {
        let path = self.store.path().to_string();
        self.load(&path)
    }

    pub(crate) fn settle_load(&mut self, ticket: LoadTicket, result: Result<Vec<FileEntry>>) {
        match self.store.settle_load(&ticket, result) {
            LoadOutcome::Applied => {
                self.breadcrumb = build_breadcrumb(self.store.path());
                self.emit(DriveEvent::Loading(false));
                self.emit(DriveEvent::ViewChanged(self.store.view().clone()));
                self.emit(DriveEvent::Breadcrumb(self.breadcrumb.clone()));
            }
            LoadOutcome::Failed(err) => {
                self.emit(DriveEvent::Loading(false));
                self.notify_failure("Failed to load files", &err);
            }
            LoadOutcome::Stale => {
                debug!(
                    path = ticket.path(),
                    generation = ticket.generation(),
                    "discarding stale listing"
                );
            }
        }
    }

    /// Activate an entry: folders are entered, files are downloaded.
    ///
    /// Ids that are not part of the current listing are ignored.
    pub fn open(&mut self, id: &str) {
        let Some(entry) = self.store.entry(id) else {
            return;
        };
        if entry.is_dir {
            let path = entry.path.clone();
            self.go_to(&path);
        } else {
            self.download(Some(id));
        }
    }

    /// Download an entry (or the selection when `id` is `None`).
    ///
    /// Returns the URL handed to the view, or `None` for folders and unknown
    /// ids.
    pub fn download(&mut self, id: Option<&str>) -> Option<String> {
        let entry = self.selection.resolve_target(&self.store, id)?;
        if entry.is_dir {
            return None;
        }
        let url = self.api.download_url(&entry.id);
        self.emit(DriveEvent::OpenUrl(url.clone()));
        Some(url)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::api::mock::MockStorage;
    use crate::drive::core::testing::{drain, drive_with};
    use crate::drive::DriveEvent;
    use crate::fs::entry::{dir, file};
    use crate::notify::NotificationKind;

    fn docs() -> MockStorage {
        MockStorage::new()
            .with_dir(
                "/docs",
                vec![
                    file("a", "a.txt", 2048, "2024-01-02 00:00:00", "/docs"),
                    dir("r", "reports", "/docs"),
                ],
            )
            .with_dir("/docs/reports", vec![])
    }

    #[tokio::test]
    async fn test_go_to_lists_folders_first() {
        let (mut drive, mock) = drive_with(docs());
        let mut rx = drive.subscribe();

        drive.go_to("/docs/");
        assert!(drive.is_loading());
        drive.run_until_idle().await;

        assert!(!drive.is_loading());
        assert_eq!(drive.path(), "/docs");
        let names: Vec<_> = drive.view().entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["reports", "a.txt"]);
        assert_eq!(mock.list_calls(), vec!["/docs"]);

        let crumbs: Vec<_> = drive.breadcrumb().iter().map(|c| c.path.as_str()).collect();
        assert_eq!(crumbs, vec!["/", "/docs"]);

        let events = drain(&mut rx);
        assert!(matches!(events.first(), Some(DriveEvent::Loading(true))));
        assert!(events.iter().any(|e| matches!(e, DriveEvent::ViewChanged(v) if v.path == "/docs")));
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_view() {
        let (mut drive, _) = drive_with(docs().fail("list:/gone", "directory not found"));
        drive.go_to("/docs");
        drive.run_until_idle().await;

        drive.go_to("/gone");
        drive.run_until_idle().await;

        assert!(!drive.is_loading());
        assert_eq!(drive.path(), "/docs");
        assert_eq!(drive.view().entries.len(), 2);
        let note = &drive.notifications()[0];
        assert_eq!(note.kind, NotificationKind::Error);
        assert_eq!(note.message, "directory not found");
    }

    #[tokio::test]
    async fn test_transport_failure_is_prefixed() {
        let (mut drive, _) = drive_with(MockStorage::new().fail_transport("list:/"));
        drive.refresh();
        drive.run_until_idle().await;

        assert_eq!(
            drive.notifications()[0].message,
            "Failed to load files: HTTP error: 502"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_listing_is_discarded() {
        let (mut drive, mock) =
            drive_with(docs().delay("list:/docs/reports", Duration::from_millis(200)));

        drive.go_to("/docs/reports");
        drive.go_to("/docs");
        drive.run_until_idle().await;

        assert_eq!(drive.path(), "/docs");
        assert!(!drive.is_loading());
        assert!(drive.notifications().is_empty());
        assert_eq!(mock.list_calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_flag_waits_for_newest_load() {
        let (mut drive, _) = drive_with(docs().delay("list:/docs", Duration::from_millis(200)));

        drive.go_to("/");
        drive.go_to("/docs");
        assert!(drive.settle_next().await);
        // "/" answered first but is stale
        assert!(drive.is_loading());
        assert_eq!(drive.path(), "/");

        drive.run_until_idle().await;
        assert!(!drive.is_loading());
        assert_eq!(drive.path(), "/docs");
    }

    #[tokio::test]
    async fn test_open_folder_and_file() {
        let (mut drive, mock) = drive_with(docs());
        drive.go_to("/docs");
        drive.run_until_idle().await;
        let mut rx = drive.subscribe();

        drive.open("a");
        let events = drain(&mut rx);
        assert!(matches!(
            events.as_slice(),
            [DriveEvent::OpenUrl(url)] if url == "http://mock/files/a/download"
        ));

        drive.open("nope");
        assert!(drain(&mut rx).is_empty());

        drive.open("r");
        drive.run_until_idle().await;
        assert_eq!(drive.path(), "/docs/reports");
        assert_eq!(mock.list_calls(), vec!["/docs", "/docs/reports"]);
    }

    #[tokio::test]
    async fn test_download_uses_selection_and_skips_folders() {
        let (mut drive, _) = drive_with(docs());
        drive.go_to("/docs");
        drive.run_until_idle().await;

        assert_eq!(drive.download(None), None);
        drive.select("r");
        assert_eq!(drive.download(None), None);
        drive.select("a");
        assert_eq!(
            drive.download(None).as_deref(),
            Some("http://mock/files/a/download")
        );
    }

    #[tokio::test]
    async fn test_navigation_drops_selection() {
        let (mut drive, _) = drive_with(docs());
        drive.go_to("/docs");
        drive.run_until_idle().await;
        assert!(drive.select("a"));

        drive.go_to("/docs/");
        drive.run_until_idle().await;
        assert_eq!(drive.selected_entry().map(|e| e.id.as_str()), Some("a"));

        let mut rx = drive.subscribe();
        drive.go_to("/docs/reports");
        drive.go_to("/docs");
        drive.run_until_idle().await;
        assert!(drive.selected_entry().is_none());
        assert!(drain(&mut rx)
            .iter()
            .any(|e| matches!(e, DriveEvent::SelectionChanged(None))));
    }
}
