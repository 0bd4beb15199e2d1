//! Request/response dialogs for mkdir, rename, delete and move.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DialogKind {
    Mkdir,
    Rename,
    Delete,
    Move,
}

impl DialogKind {
    /// Message shown when the action succeeds.
    pub fn success_message(&self) -> &'static str {
        match self {
            DialogKind::Mkdir => "Folder created",
            DialogKind::Rename => "Renamed",
            DialogKind::Delete => "Deleted",
            DialogKind::Move => "Moved",
        }
    }

    /// Prefix of the message shown when the action fails.
    pub fn failure_prefix(&self) -> &'static str {
        match self {
            DialogKind::Mkdir => "Failed to create folder",
            DialogKind::Rename => "Failed to rename",
            DialogKind::Delete => "Failed to delete",
            DialogKind::Move => "Failed to move",
        }
    }
}

/// State of the single modal dialog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum DialogState {
    #[default]
    Closed,
    AwaitingInput {
        kind: DialogKind,
        target_id: Option<String>,
        initial: String,
    },
    Submitting {
        kind: DialogKind,
        target_id: Option<String>,
    },
    Error {
        kind: DialogKind,
        target_id: Option<String>,
        message: String,
    },
}

impl DialogState {
    pub fn is_open(&self) -> bool {
        !matches!(self, DialogState::Closed)
    }

    pub fn kind(&self) -> Option<DialogKind> {
        match self {
            DialogState::Closed => None,
            DialogState::AwaitingInput { kind, .. }
            | DialogState::Submitting { kind, .. }
            | DialogState::Error { kind, .. } => Some(*kind),
        }
    }

    pub fn target_id(&self) -> Option<&str> {
        match self {
            DialogState::Closed => None,
            DialogState::AwaitingInput { target_id, .. }
            | DialogState::Submitting { target_id, .. }
            | DialogState::Error { target_id, .. } => target_id.as_deref(),
        }
    }

    /// Whether the dialog accepts a submission: waiting for input, or showing
    /// an error the user may retry from.
    pub fn accepts_input(&self) -> bool {
        matches!(
            self,
            DialogState::AwaitingInput { .. } | DialogState::Error { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let closed = DialogState::Closed;
        assert!(!closed.is_open());
        assert!(closed.kind().is_none());
        assert!(!closed.accepts_input());

        let rename = DialogState::AwaitingInput {
            kind: DialogKind::Rename,
            target_id: Some("7".into()),
            initial: "a.txt".into(),
        };
        assert!(rename.is_open());
        assert_eq!(rename.kind(), Some(DialogKind::Rename));
        assert_eq!(rename.target_id(), Some("7"));
        assert!(rename.accepts_input());

        let submitting = DialogState::Submitting {
            kind: DialogKind::Delete,
            target_id: Some("7".into()),
        };
        assert!(!submitting.accepts_input());
    }
}
