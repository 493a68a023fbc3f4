use crate::domain::position::{Position, Range};
use url::Url;

/// A single text replacement within one document.
#[derive(Clone, Debug, PartialEq)]
pub struct TextEdit {
    pub range: Range,
    pub new_text: String,
}

/// All edits targeting one document.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentEdits {
    pub uri: Url,
    pub edits: Vec<TextEdit>,
}

/// The structured edit set returned by the rename-at-position capability.
///
/// This is the precisely typed boundary shape: a host adapter validates the
/// provider's raw response into this structure before it enters the engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkspaceEdit {
    pub document_changes: Vec<DocumentEdits>,
}

impl WorkspaceEdit {
    pub fn is_empty(&self) -> bool {
        self.document_changes.iter().all(|d| d.edits.is_empty())
    }
}

/// One pending rename: the original-coordinate anchor handed to the external
/// rename capability, and the replacement name captured from the user's edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenameTarget {
    pub anchor_position: Position,
    pub new_name: String,
}
