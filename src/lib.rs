//! Multi-cursor rename engine.
//!
//! Lets a user with several cursors type replacement names directly in
//! place, infers which spans were inserted by diffing the document against a
//! snapshot taken at session start, and on submit reverts the document and
//! replays each edit as a proper rename-symbol operation through the host's
//! language service.

pub mod config;
pub mod domain;
pub mod error;
pub mod host;
pub mod session;
pub mod text;

pub use config::Settings;
pub use domain::{DocumentEdits, Position, Range, RenameTarget, TextEdit, WorkspaceEdit};
pub use error::{RenameError, RenameResult};
pub use host::{EditorHost, MemoryHost, StatusAction};
pub use session::{InsertedSpan, RenameApplier, RenameSession, SessionController, SessionState};
pub use text::{EditOp, PositionMapper, diff};
