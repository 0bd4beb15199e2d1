//! Application state of the drive client.

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use tokio::sync::broadcast;
use tokio::time::Instant;
use tracing::warn;

use super::events::DriveEvent;
use crate::api::StorageApi;
use crate::config::DriveConfig;
use crate::dialog::{DialogKind, DialogState};
use crate::error::{DriveError, Result};
use crate::fs::{
    build_breadcrumb, Crumb, DirectoryView, FileEntry, FileListStore, LoadTicket, SortKey,
    SpaceInfo, UploadState, ViewMode,
};
use crate::notify::{Notification, NotificationId, NotificationKind, NotificationQueue};
use crate::selection::{ContextMenu, SelectionModel};

/// Outcome of a background request, applied back onto the drive.
pub(crate) enum Completion {
    Listed {
        ticket: LoadTicket,
        result: Result<Vec<FileEntry>>,
    },
    Uploaded {
        index: usize,
        result: Result<()>,
    },
    Searched {
        generation: u64,
        result: Result<Vec<FileEntry>>,
    },
    Space(Result<SpaceInfo>),
    Dialog {
        generation: u64,
        kind: DialogKind,
        result: Result<()>,
    },
}

pub(crate) type PendingTask = BoxFuture<'static, Completion>;

/// Point-in-time copy of everything a view renders.
#[derive(Debug, Clone)]
pub struct DriveSnapshot {
    pub view: DirectoryView,
    pub loading: bool,
    pub breadcrumb: Vec<Crumb>,
    pub selected_id: Option<String>,
    pub menu: ContextMenu,
    pub upload: UploadState,
    pub search_results: Option<Vec<FileEntry>>,
    pub space: Option<SpaceInfo>,
    pub notifications: Vec<Notification>,
    pub dialog: DialogState,
}

/// The drive client state.
///
/// Operations never block on the network: they record their intent, start a
/// request in the background and return. Responses are applied one at a time
/// through [`settle_next`](Self::settle_next), which the actor drives from its
/// event loop. Every change is published as a [`DriveEvent`].
pub struct Drive<S: StorageApi> {
    pub(crate) api: Arc<S>,
    pub(crate) store: FileListStore,
    pub(crate) selection: SelectionModel,
    pub(crate) notifications: NotificationQueue,
    pub(crate) uploads: UploadState,
    pub(crate) search_results: Option<Vec<FileEntry>>,
    pub(crate) search_scope: String,
    pub(crate) search_generation: u64,
    pub(crate) space: Option<SpaceInfo>,
    pub(crate) dialog: DialogState,
    pub(crate) dialog_generation: u64,
    pub(crate) breadcrumb: Vec<Crumb>,
    pub(crate) tasks: FuturesUnordered<PendingTask>,
    events: broadcast::Sender<DriveEvent>,
}

impl<S: StorageApi> Drive<S> {
    pub fn new(api: Arc<S>, config: &DriveConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            api,
            store: FileListStore::new(config.default_sort, config.default_view),
            selection: SelectionModel::new(),
            notifications: NotificationQueue::new(config.notification_ttl()),
            uploads: UploadState::Idle,
            search_results: None,
            search_scope: "/".to_string(),
            search_generation: 0,
            space: None,
            dialog: DialogState::Closed,
            dialog_generation: 0,
            breadcrumb: build_breadcrumb("/"),
            tasks: FuturesUnordered::new(),
            events,
        }
    }

    /// Load the root directory and the storage space.
    pub fn start(&mut self) {
        self.go_to("/");
        self.load_space();
    }

    pub fn api(&self) -> &S {
        &self.api
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DriveEvent> {
        self.events.subscribe()
    }

    pub(crate) fn event_sender(&self) -> broadcast::Sender<DriveEvent> {
        self.events.clone()
    }

    pub(crate) fn emit(&self, event: DriveEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    pub(crate) fn spawn_task<F>(&mut self, task: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        self.tasks.push(task.boxed());
    }

    /// Whether any request is still in flight.
    pub fn has_pending_work(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Wait for the next in-flight request and apply its response.
    ///
    /// Returns `false` when nothing was in flight.
    pub async fn settle_next(&mut self) -> bool {
        match self.tasks.next().await {
            Some(completion) => {
                self.apply(completion);
                true
            }
            None => false,
        }
    }

    /// Apply responses until no request is in flight, including requests
    /// started while applying (upload queue, reload after a batch).
    pub async fn run_until_idle(&mut self) {
        while self.settle_next().await {}
    }

    pub(crate) fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Listed { ticket, result } => self.settle_load(ticket, result),
            Completion::Uploaded { index, result } => self.settle_upload(index, result),
            Completion::Searched { generation, result } => self.settle_search(generation, result),
            Completion::Space(result) => self.settle_space(result),
            Completion::Dialog {
                generation,
                kind,
                result,
            } => self.settle_dialog(generation, kind, result),
        }
    }

    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) -> NotificationId {
        let notification = self.notifications.push(kind, message);
        let id = notification.id;
        self.emit(DriveEvent::Notification(notification));
        id
    }

    /// Push an error notification for a failed request.
    pub(crate) fn notify_failure(&mut self, prefix: &str, err: &DriveError) {
        warn!("{}: {}", prefix, err);
        self.notify(NotificationKind::Error, describe_failure(prefix, err));
    }

    /// Drop notifications whose lifetime has passed.
    pub fn expire_notifications(&mut self, now: Instant) {
        for expired in self.notifications.expire(now) {
            self.emit(DriveEvent::NotificationExpired(expired.id));
        }
    }

    pub fn next_notification_deadline(&self) -> Option<Instant> {
        self.notifications.next_deadline()
    }

    pub fn notifications(&self) -> &[Notification] {
        self.notifications.items()
    }

    pub fn view(&self) -> &DirectoryView {
        self.store.view()
    }

    pub fn path(&self) -> &str {
        self.store.path()
    }

    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    pub fn breadcrumb(&self) -> &[Crumb] {
        &self.breadcrumb
    }

    pub fn upload_state(&self) -> &UploadState {
        &self.uploads
    }

    /// The upload trigger is enabled only while no batch is active.
    pub fn can_upload(&self) -> bool {
        self.uploads.is_idle()
    }

    pub fn search_results(&self) -> Option<&[FileEntry]> {
        self.search_results.as_deref()
    }

    pub fn space(&self) -> Option<SpaceInfo> {
        self.space
    }

    pub fn dialog(&self) -> &DialogState {
        &self.dialog
    }

    pub(crate) fn set_dialog(&mut self, state: DialogState) {
        self.dialog = state;
        self.emit(DriveEvent::DialogChanged(self.dialog.clone()));
    }

    pub fn menu(&self) -> &ContextMenu {
        self.selection.menu()
    }

    /// Select an entry of the current listing. Unknown ids are ignored.
    pub fn select(&mut self, id: &str) -> bool {
        let changed = self.selection.select(&self.store, id);
        if changed {
            self.emit(DriveEvent::SelectionChanged(Some(id.to_string())));
        }
        changed
    }

    /// The selected entry, if it is still part of the current listing.
    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.selection.selected_entry(&self.store)
    }

    pub fn open_context_menu(&mut self, id: &str, x: f64, y: f64) -> bool {
        if !self.selection.open_context_menu(&self.store, id, x, y) {
            return false;
        }
        self.emit(DriveEvent::SelectionChanged(Some(id.to_string())));
        self.emit(DriveEvent::ContextMenu(self.selection.menu().clone()));
        true
    }

    /// Any click outside the context menu closes it.
    pub fn document_click(&mut self) {
        self.dismiss_menu();
    }

    /// Close every overlay: context menu, dialog and search results.
    pub fn escape(&mut self) {
        self.dismiss_menu();
        if self.dialog.is_open() {
            self.set_dialog(DialogState::Closed);
        }
        self.close_search();
    }

    pub(crate) fn dismiss_menu(&mut self) {
        if self.selection.dismiss_menu() {
            self.emit(DriveEvent::ContextMenu(ContextMenu::Hidden));
        }
    }

    pub fn sort(&mut self, key: SortKey) {
        self.store.sort(key);
        self.emit(DriveEvent::ViewChanged(self.store.view().clone()));
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.store.apply_view_mode(mode);
        self.emit(DriveEvent::ViewChanged(self.store.view().clone()));
    }

    pub fn snapshot(&self) -> DriveSnapshot {
        DriveSnapshot {
            view: self.store.view().clone(),
            loading: self.store.is_loading(),
            breadcrumb: self.breadcrumb.clone(),
            selected_id: self.selection.selected_id().map(str::to_string),
            menu: self.selection.menu().clone(),
            upload: self.uploads.clone(),
            search_results: self.search_results.clone(),
            space: self.space,
            notifications: self.notifications.items().to_vec(),
            dialog: self.dialog.clone(),
        }
    }
}

/// Text shown for a failed request: the server's own message for
/// application errors, `"<prefix>: <error>"` for everything else.
pub fn describe_failure(prefix: &str, err: &DriveError) -> String {
    match err {
        DriveError::ApiError { message, .. } => message.clone(),
        other => format!("{}: {}", prefix, other),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use tokio::sync::broadcast;

    use super::Drive;
    use crate::api::mock::MockStorage;
    use crate::config::DriveConfig;
    use crate::drive::DriveEvent;

    pub(crate) fn drive_with(mock: MockStorage) -> (Drive<MockStorage>, Arc<MockStorage>) {
        let mock = Arc::new(mock);
        let drive = Drive::new(Arc::clone(&mock), &DriveConfig::default());
        (drive, mock)
    }

    pub(crate) fn drain(rx: &mut broadcast::Receiver<DriveEvent>) -> Vec<DriveEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }
}
