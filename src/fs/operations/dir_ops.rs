//! Folder creation, rename, delete and move, driven by the modal dialog.

use std::sync::Arc;

use tracing::{debug, info};

use super::utils::normalize_path;
use crate::api::StorageApi;
use crate::dialog::{DialogKind, DialogState};
use crate::drive::core::{describe_failure, Completion};
use crate::drive::Drive;
use crate::error::Result;
use crate::notify::NotificationKind;

impl<S: StorageApi> Drive<S> {
    /// Open a dialog of `kind`.
    ///
    /// Rename, delete and move act on `target_id`, falling back to the
    /// selection; when neither resolves the dialog stays closed. Returns
    /// whether a dialog was opened.
    pub fn open_dialog(&mut self, kind: DialogKind, target_id: Option<&str>) -> bool {
        let (target_id, initial) = match kind {
            DialogKind::Mkdir => (None, String::new()),
            DialogKind::Rename | DialogKind::Delete | DialogKind::Move => {
                let Some(entry) = self.selection.resolve_target(&self.store, target_id) else {
                    return false;
                };
                let initial = match kind {
                    DialogKind::Rename => entry.name.clone(),
                    DialogKind::Move => self.store.path().to_string(),
                    _ => String::new(),
                };
                (Some(entry.id.clone()), initial)
            }
        };
        self.dismiss_menu();
        self.set_dialog(DialogState::AwaitingInput {
            kind,
            target_id,
            initial,
        });
        true
    }

    pub fn open_mkdir_dialog(&mut self) -> bool {
        self.open_dialog(DialogKind::Mkdir, None)
    }

    pub fn open_rename_dialog(&mut self, id: Option<&str>) -> bool {
        self.open_dialog(DialogKind::Rename, id)
    }

    pub fn open_delete_dialog(&mut self, id: Option<&str>) -> bool {
        self.open_dialog(DialogKind::Delete, id)
    }

    pub fn open_move_dialog(&mut self, id: Option<&str>) -> bool {
        self.open_dialog(DialogKind::Move, id)
    }

    /// Submit the open dialog with the user's `input`.
    ///
    /// Blank input (and an unchanged name for rename) closes the dialog
    /// without a request. Delete ignores `input`.
    pub fn submit_dialog(&mut self, input: &str) {
        if !self.dialog.accepts_input() {
            return;
        }
        let Some(kind) = self.dialog.kind() else {
            return;
        };
        let target_id = self.dialog.target_id().map(str::to_string);
        let input = input.trim().to_string();
        let api = Arc::clone(&self.api);
        let generation = self.dialog_generation + 1;

        match kind {
            DialogKind::Mkdir => {
                if input.is_empty() {
                    return self.set_dialog(DialogState::Closed);
                }
                let path = self.store.path().to_string();
                self.spawn_task(async move {
                    let result = api.mkdir(&path, &input).await;
                    Completion::Dialog {
                        generation,
                        kind,
                        result,
                    }
                });
            }
            DialogKind::Rename => {
                let Some(entry) = target_id.as_deref().and_then(|id| self.store.entry(id)) else {
                    return self.set_dialog(DialogState::Closed);
                };
                if input.is_empty() || input == entry.name {
                    return self.set_dialog(DialogState::Closed);
                }
                let id = entry.id.clone();
                self.spawn_task(async move {
                    let result = api.rename(&id, &input).await;
                    Completion::Dialog {
                        generation,
                        kind,
                        result,
                    }
                });
            }
            DialogKind::Delete => {
                let Some(entry) = target_id.as_deref().and_then(|id| self.store.entry(id)) else {
                    return self.set_dialog(DialogState::Closed);
                };
                let id = entry.id.clone();
                self.spawn_task(async move {
                    let result = api.delete(&id).await;
                    Completion::Dialog {
                        generation,
                        kind,
                        result,
                    }
                });
            }
            DialogKind::Move => {
                let Some(entry) = target_id.as_deref().and_then(|id| self.store.entry(id)) else {
                    return self.set_dialog(DialogState::Closed);
                };
                if input.is_empty() {
                    return self.set_dialog(DialogState::Closed);
                }
                let source = entry.path.clone();
                let target = normalize_path(&input);
                self.spawn_task(async move {
                    let result = api.move_entry(&source, &target).await;
                    Completion::Dialog {
                        generation,
                        kind,
                        result,
                    }
                });
            }
        }

        self.dialog_generation = generation;
        self.set_dialog(DialogState::Submitting { kind, target_id });
    }

    /// Close the dialog, whatever its state.
    pub fn cancel_dialog(&mut self) {
        if self.dialog.is_open() {
            self.set_dialog(DialogState::Closed);
        }
    }

    /// Apply the response of a dialog request. Only the newest submission
    /// may change the dialog; older ones still notify and reload.
    pub(crate) fn settle_dialog(&mut self, generation: u64, kind: DialogKind, result: Result<()>) {
        let submitting = generation == self.dialog_generation
            && matches!(&self.dialog, DialogState::Submitting { .. });
        if !submitting {
            debug!(?kind, generation, "dialog request settled after its dialog closed");
        }

        match result {
            Ok(()) => {
                info!(?kind, "dialog action succeeded");
                if submitting {
                    self.set_dialog(DialogState::Closed);
                }
                self.notify(NotificationKind::Success, kind.success_message());
                self.refresh();
                if kind == DialogKind::Delete {
                    self.load_space();
                }
            }
            Err(err) => {
                let message = describe_failure(kind.failure_prefix(), &err);
                if submitting {
                    let target_id = self.dialog.target_id().map(str::to_string);
                    self.set_dialog(DialogState::Error {
                        kind,
                        target_id,
                        message,
                    });
                }
                self.notify_failure(kind.failure_prefix(), &err);
            }
        }
    }
}
