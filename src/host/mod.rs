//! Host editor collaborator interface.
//!
//! The engine never talks to an editor directly; it consumes these
//! primitives. Any host offering text retrieval, position mapping, range
//! decoration, and change notification can satisfy them.

pub mod memory;

use url::Url;

use crate::domain::{Position, Range, WorkspaceEdit};
use crate::error::RenameResult;

pub use memory::MemoryHost;

/// Action a host must bind to the status indicator's click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusAction {
    /// Deliver a cancel to the session controller
    CancelSession,
}

/// Everything the engine needs from the surrounding editor.
///
/// Methods take `&self`; hosts are expected to manage their own interior
/// mutability, and events are delivered to the engine one at a time.
pub trait EditorHost: Send + Sync + 'static {
    /// Identity of the currently focused document, if any.
    fn focused_document(&self) -> Option<Url>;

    /// Active cursor positions in the given document, in document order.
    fn cursor_positions(&self, uri: &Url) -> Vec<Position>;

    /// Current full text of a document.
    fn document_text(&self, uri: &Url) -> RenameResult<String>;

    /// Replace the whole content of a document in one edit.
    fn replace_document(&self, uri: &Url, new_text: &str) -> RenameResult<()>;

    /// Invoke the external rename-at-position capability.
    fn rename_at(
        &self,
        uri: &Url,
        position: Position,
        new_name: &str,
    ) -> RenameResult<WorkspaceEdit>;

    /// Apply a structured edit set, all-or-nothing.
    fn apply_workspace_edit(&self, edit: &WorkspaceEdit) -> RenameResult<()>;

    /// Trigger the editor's ordinary single-cursor rename action.
    fn trigger_single_rename(&self) -> RenameResult<()>;

    /// Read the clipboard, used only to seed the one-shot flow.
    fn read_clipboard(&self) -> String;

    /// Show a modal text prompt. `validate` returns an inline error message
    /// for input that must not be accepted; the host keeps the prompt open
    /// until the input validates or the user dismisses it (None).
    fn prompt_input(
        &self,
        prompt: &str,
        initial: &str,
        validate: &dyn Fn(&str) -> Option<String>,
    ) -> Option<String>;

    /// Show the persistent status indicator. Clicking the indicator must
    /// perform `action`; the indicator is the cancel affordance while a
    /// session is open, not just a label.
    fn show_status(&self, text: &str, action: StatusAction);

    /// Clear the status indicator.
    fn clear_status(&self);

    /// Replace the highlight decoration over the given ranges.
    fn set_highlight(&self, uri: &Url, ranges: &[Range]);

    /// Remove the highlight decoration.
    fn clear_highlight(&self, uri: &Url);
}
