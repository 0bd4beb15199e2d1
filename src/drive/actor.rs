//! Actor-based runtime for the drive.
//!
//! [`DriveHandle`] is a cheap, cloneable front for a [`Drive`] owned by a
//! single background task. The task applies commands in order and, between
//! commands, settles background requests and expires notifications, so the
//! view stays responsive while an upload batch drains.

use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::{sleep_until, Instant};
use tracing::debug;

use super::core::{Drive, DriveSnapshot};
use super::events::DriveEvent;
use crate::api::{ApiClient, StorageApi};
use crate::config::DriveConfig;
use crate::dialog::DialogKind;
use crate::error::{DriveError, Result};
use crate::fs::{LocalFile, SortKey, ViewMode};

#[derive(Clone)]
pub struct DriveHandle {
    tx: mpsc::Sender<DriveCommand>,
    events: broadcast::Sender<DriveEvent>,
}

enum DriveCommand {
    GoTo {
        path: String,
    },
    Refresh,
    Open {
        id: String,
    },
    Download {
        id: Option<String>,
        reply: oneshot::Sender<Result<Option<String>>>,
    },
    Select {
        id: String,
    },
    ContextMenu {
        id: String,
        x: f64,
        y: f64,
    },
    DocumentClick,
    Escape,
    Sort {
        key: SortKey,
    },
    ViewMode {
        mode: ViewMode,
    },
    Upload {
        files: Vec<LocalFile>,
        reply: oneshot::Sender<Result<()>>,
    },
    Search {
        keyword: String,
    },
    OpenSearchResult {
        id: String,
    },
    CloseSearch,
    OpenDialog {
        kind: DialogKind,
        target_id: Option<String>,
        reply: oneshot::Sender<Result<bool>>,
    },
    SubmitDialog {
        input: String,
    },
    CancelDialog,
    LoadSpace,
    Snapshot {
        reply: oneshot::Sender<Result<DriveSnapshot>>,
    },
    WhenIdle {
        reply: oneshot::Sender<()>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

struct DriveActor<S: StorageApi> {
    drive: Drive<S>,
    rx: mpsc::Receiver<DriveCommand>,
    idle_waiters: Vec<oneshot::Sender<()>>,
}

impl DriveHandle {
    /// Connect to the storage service described by `config` and load the
    /// root directory.
    pub fn connect(config: &DriveConfig) -> Result<Self> {
        let api = ApiClient::from_config(config)?;
        Ok(Self::start(Arc::new(api), config))
    }

    /// Run a drive over any storage backend and load the root directory.
    pub fn start<S: StorageApi>(api: Arc<S>, config: &DriveConfig) -> Self {
        let mut drive = Drive::new(api, config);
        drive.start();
        DriveActor::spawn(drive)
    }

    /// Receive every state change from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<DriveEvent> {
        self.events.subscribe()
    }

    async fn send(&self, cmd: DriveCommand) -> Result<()> {
        self.tx.send(cmd).await.map_err(|_| DriveError::ActorStopped)
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R>>) -> DriveCommand,
    ) -> Result<R> {
        let (tx, rx) = oneshot::channel();
        self.send(build(tx)).await?;
        rx.await.map_err(|_| DriveError::ActorStopped)?
    }

    pub async fn go_to(&self, path: &str) -> Result<()> {
        self.send(DriveCommand::GoTo {
            path: path.to_string(),
        })
        .await
    }

    pub async fn refresh(&self) -> Result<()> {
        self.send(DriveCommand::Refresh).await
    }

    pub async fn open(&self, id: &str) -> Result<()> {
        self.send(DriveCommand::Open { id: id.to_string() }).await
    }

    /// Download URL of an entry (or of the selection), `None` for folders.
    pub async fn download(&self, id: Option<&str>) -> Result<Option<String>> {
        self.request(|reply| DriveCommand::Download {
            id: id.map(str::to_string),
            reply,
        })
        .await
    }

    pub async fn select(&self, id: &str) -> Result<()> {
        self.send(DriveCommand::Select { id: id.to_string() }).await
    }

    pub async fn open_context_menu(&self, id: &str, x: f64, y: f64) -> Result<()> {
        self.send(DriveCommand::ContextMenu {
            id: id.to_string(),
            x,
            y,
        })
        .await
    }

    pub async fn document_click(&self) -> Result<()> {
        self.send(DriveCommand::DocumentClick).await
    }

    pub async fn escape(&self) -> Result<()> {
        self.send(DriveCommand::Escape).await
    }

    pub async fn sort(&self, key: SortKey) -> Result<()> {
        self.send(DriveCommand::Sort { key }).await
    }

    pub async fn set_view_mode(&self, mode: ViewMode) -> Result<()> {
        self.send(DriveCommand::ViewMode { mode }).await
    }

    /// Start an upload batch into the current directory.
    ///
    /// Returns once the batch is queued, not when it completes. Fails with
    /// [`DriveError::UploadInProgress`] while another batch is running.
    pub async fn upload(&self, files: Vec<LocalFile>) -> Result<()> {
        self.request(|reply| DriveCommand::Upload { files, reply })
            .await
    }

    pub async fn search(&self, keyword: &str) -> Result<()> {
        self.send(DriveCommand::Search {
            keyword: keyword.to_string(),
        })
        .await
    }

    pub async fn open_search_result(&self, id: &str) -> Result<()> {
        self.send(DriveCommand::OpenSearchResult { id: id.to_string() })
            .await
    }

    pub async fn close_search(&self) -> Result<()> {
        self.send(DriveCommand::CloseSearch).await
    }

    /// Open a dialog; returns whether its target resolved.
    pub async fn open_dialog(&self, kind: DialogKind, target_id: Option<&str>) -> Result<bool> {
        self.request(|reply| DriveCommand::OpenDialog {
            kind,
            target_id: target_id.map(str::to_string),
            reply,
        })
        .await
    }

    pub async fn submit_dialog(&self, input: &str) -> Result<()> {
        self.send(DriveCommand::SubmitDialog {
            input: input.to_string(),
        })
        .await
    }

    pub async fn cancel_dialog(&self) -> Result<()> {
        self.send(DriveCommand::CancelDialog).await
    }

    pub async fn load_space(&self) -> Result<()> {
        self.send(DriveCommand::LoadSpace).await
    }

    pub async fn snapshot(&self) -> Result<DriveSnapshot> {
        self.request(|reply| DriveCommand::Snapshot { reply }).await
    }

    /// Wait until no request is in flight and no upload batch is active.
    pub async fn when_idle(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.send(DriveCommand::WhenIdle { reply: tx }).await?;
        rx.await.map_err(|_| DriveError::ActorStopped)
    }

    pub async fn shutdown(&self) {
        let (tx, rx) = oneshot::channel();
        let _ = self.tx.send(DriveCommand::Shutdown { reply: tx }).await;
        let _ = rx.await;
    }
}

impl<S: StorageApi> DriveActor<S> {
    fn spawn(drive: Drive<S>) -> DriveHandle {
        let (tx, rx) = mpsc::channel(64);
        let events = drive.event_sender();
        let actor = DriveActor {
            drive,
            rx,
            idle_waiters: Vec::new(),
        };
        tokio::spawn(actor.run());
        DriveHandle { tx, events }
    }

    fn is_idle(&self) -> bool {
        !self.drive.has_pending_work() && self.drive.can_upload()
    }

    fn resolve_idle_waiters(&mut self) {
        if !self.idle_waiters.is_empty() && self.is_idle() {
            for waiter in self.idle_waiters.drain(..) {
                let _ = waiter.send(());
            }
        }
    }

    async fn run(mut self) {
        loop {
            self.resolve_idle_waiters();
            let deadline = self.drive.next_notification_deadline();

            tokio::select! {
                cmd = self.rx.recv() => {
                    let Some(cmd) = cmd else { break; };
                    if self.handle_command(cmd) {
                        break;
                    }
                }
                Some(completion) = self.drive.tasks.next(), if !self.drive.tasks.is_empty() => {
                    self.drive.apply(completion);
                }
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.drive.expire_notifications(Instant::now());
                }
            }
        }
        debug!("drive actor stopped");
    }

    fn handle_command(&mut self, cmd: DriveCommand) -> bool {
        match cmd {
            DriveCommand::GoTo { path } => {
                self.drive.go_to(&path);
            }
            DriveCommand::Refresh => {
                self.drive.refresh();
            }
            DriveCommand::Open { id } => self.drive.open(&id),
            DriveCommand::Download { id, reply } => {
                let res = Ok(self.drive.download(id.as_deref()));
                let _ = reply.send(res);
            }
            DriveCommand::Select { id } => {
                self.drive.select(&id);
            }
            DriveCommand::ContextMenu { id, x, y } => {
                self.drive.open_context_menu(&id, x, y);
            }
            DriveCommand::DocumentClick => self.drive.document_click(),
            DriveCommand::Escape => self.drive.escape(),
            DriveCommand::Sort { key } => self.drive.sort(key),
            DriveCommand::ViewMode { mode } => self.drive.set_view_mode(mode),
            DriveCommand::Upload { files, reply } => {
                let res = self.drive.upload(files);
                let _ = reply.send(res);
            }
            DriveCommand::Search { keyword } => self.drive.search(&keyword),
            DriveCommand::OpenSearchResult { id } => self.drive.open_search_result(&id),
            DriveCommand::CloseSearch => self.drive.close_search(),
            DriveCommand::OpenDialog {
                kind,
                target_id,
                reply,
            } => {
                let res = Ok(self.drive.open_dialog(kind, target_id.as_deref()));
                let _ = reply.send(res);
            }
            DriveCommand::SubmitDialog { input } => self.drive.submit_dialog(&input),
            DriveCommand::CancelDialog => self.drive.cancel_dialog(),
            DriveCommand::LoadSpace => self.drive.load_space(),
            DriveCommand::Snapshot { reply } => {
                let _ = reply.send(Ok(self.drive.snapshot()));
            }
            DriveCommand::WhenIdle { reply } => self.idle_waiters.push(reply),
            DriveCommand::Shutdown { reply } => {
                let _ = reply.send(());
                return true;
            }
        }
        false
    }
}
