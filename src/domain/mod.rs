pub mod position;
pub mod workspace_edit;

pub use position::{Position, Range};
pub use workspace_edit::{DocumentEdits, RenameTarget, TextEdit, WorkspaceEdit};
