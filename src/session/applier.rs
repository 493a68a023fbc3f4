//! Sequential execution of rename targets through the host capability.

use url::Url;

use crate::domain::RenameTarget;
use crate::error::{RenameError, RenameResult};
use crate::host::EditorHost;

/// Runs a batch of renames against the external rename-at-position
/// capability, one at a time.
///
/// Each returned edit set is applied before the next target is invoked, so
/// later anchors stay valid: a rename rewrites matching identifier
/// occurrences elsewhere, never the anchor point itself. Concurrent
/// invocation would race edits on coordinate validity.
pub struct RenameApplier<'a, H: EditorHost> {
    host: &'a H,
}

impl<'a, H: EditorHost> RenameApplier<'a, H> {
    pub fn new(host: &'a H) -> Self {
        Self { host }
    }

    /// Apply all targets in order. Returns the number applied.
    ///
    /// On a provider failure the remaining targets are aborted and already
    /// applied renames stay in place; the error reports which target failed
    /// and how many landed before it.
    pub fn apply(&self, uri: &Url, targets: &[RenameTarget]) -> RenameResult<usize> {
        for (index, target) in targets.iter().enumerate() {
            let edit = self
                .host
                .rename_at(uri, target.anchor_position, &target.new_name)
                .map_err(|err| RenameError::RenameFailed {
                    target_index: index,
                    applied: index,
                    reason: err.to_string(),
                })?;

            self.host
                .apply_workspace_edit(&edit)
                .map_err(|err| RenameError::RenameFailed {
                    target_index: index,
                    applied: index,
                    reason: err.to_string(),
                })?;

            log::debug!(
                target: "multi_rename::applier",
                "applied rename {}/{} at {}:{} -> {}",
                index + 1,
                targets.len(),
                target.anchor_position.line,
                target.anchor_position.character,
                target.new_name
            );
        }
        Ok(targets.len())
    }
}
