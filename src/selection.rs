//! Selection and context-menu overlay on top of the file list.
//!
//! The selection is only an id. It is resolved against the current listing on
//! every use, so an entry that disappeared in a reload simply stops resolving.

use serde::Serialize;

use crate::fs::{FileEntry, FileListStore};

/// Placement of the entry context menu.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ContextMenu {
    #[default]
    Hidden,
    Open { x: f64, y: f64, target_id: String },
}

impl ContextMenu {
    pub fn is_open(&self) -> bool {
        matches!(self, ContextMenu::Open { .. })
    }
}

#[derive(Debug, Default)]
pub struct SelectionModel {
    selected_id: Option<String>,
    menu: ContextMenu,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn menu(&self) -> &ContextMenu {
        &self.menu
    }

    /// Select `id` if it exists in the current listing.
    pub fn select(&mut self, store: &FileListStore, id: &str) -> bool {
        if store.entry(id).is_none() {
            return false;
        }
        self.selected_id = Some(id.to_string());
        true
    }

    /// Drop the selection. Returns whether something was selected.
    pub fn clear(&mut self) -> bool {
        self.selected_id.take().is_some()
    }

    /// The selected entry, looked up again in the current listing.
    pub fn selected_entry<'a>(&self, store: &'a FileListStore) -> Option<&'a FileEntry> {
        store.entry(self.selected_id.as_deref()?)
    }

    /// Entry an action applies to: the explicit id, else the selection.
    pub fn resolve_target<'a>(
        &self,
        store: &'a FileListStore,
        id: Option<&str>,
    ) -> Option<&'a FileEntry> {
        match id {
            Some(id) => store.entry(id),
            None => self.selected_entry(store),
        }
    }

    /// Right-click on an entry: select it, then open the menu at the pointer.
    pub fn open_context_menu(&mut self, store: &FileListStore, id: &str, x: f64, y: f64) -> bool {
        if !self.select(store, id) {
            return false;
        }
        self.menu = ContextMenu::Open {
            x,
            y,
            target_id: id.to_string(),
        };
        true
    }

    /// Close the menu. Returns whether it was open.
    pub fn dismiss_menu(&mut self) -> bool {
        let was_open = self.menu.is_open();
        self.menu = ContextMenu::Hidden;
        was_open
    }
}
