//! Attribution of diff operations to inserted spans.
//!
//! Walks the word-granular edit ops in order and reduces them to the set of
//! inserted spans: where replacement text now sits in the live document, what
//! it says, and which original snapshot location it belongs to.

use crate::domain::{Position, Range};
use crate::error::{RenameError, RenameResult};
use crate::text::{EditOp, PositionMapper};

/// A contiguous run of inserted text attributed to one original location.
///
/// The span set is recomputed wholesale from (snapshot, current text) on
/// every document change; no span identity survives a recomputation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InsertedSpan {
    /// Where the inserted text sits in the current document, byte offsets
    pub start_offset: usize,
    pub end_offset: usize,
    /// Same range in current-document position coordinates, for highlighting
    pub range: Range,
    /// Final content of the span
    pub new_text: String,
    /// Byte offset in the snapshot where the change region begins
    pub anchor_offset: usize,
    /// Same anchor in snapshot position coordinates; this is what the
    /// rename capability is invoked with after the submit-time revert
    pub anchor_position: Position,
}

/// Reduce an ordered edit-op sequence to inserted spans.
///
/// Maintains two running byte offsets: into the current document (advanced
/// by Unchanged and Inserted text, never Deleted, which no longer exists
/// there) and into the snapshot (advanced by Unchanged and Deleted).
/// Maximal runs of non-Unchanged ops form one change block; every block
/// containing inserted text yields one span. Inserted text within a block is
/// contiguous in the current document because deleted text occupies no
/// current-document space, so a delete+insert pair (the diff shape of typing
/// over an identifier) collapses into a single span anchored at the start of
/// the replaced word.
///
/// Post-condition: both running offsets must land exactly on their text
/// lengths. A mismatch means the ops and the document disagree about
/// content; that recomputation is fatally desynchronized and reported as
/// [`RenameError::InternalConsistency`].
pub fn attribute(
    ops: &[EditOp],
    current_text: &str,
    snapshot: &str,
) -> RenameResult<Vec<InsertedSpan>> {
    let current_mapper = PositionMapper::new(current_text);
    let snapshot_mapper = PositionMapper::new(snapshot);

    let mut spans = Vec::new();
    let mut current_offset = 0usize;
    let mut snapshot_offset = 0usize;
    // Open change block: (anchor offset in snapshot, span start in current
    // text, inserted text so far)
    let mut block: Option<(usize, usize, String)> = None;

    let mut flush =
        |block: &mut Option<(usize, usize, String)>, end: usize| -> RenameResult<()> {
            if let Some((anchor_offset, start_offset, new_text)) = block.take() {
                if new_text.is_empty() {
                    // Pure deletion: nothing to rename here.
                    return Ok(());
                }
                let range = current_mapper
                    .byte_range_to_range(start_offset, end)
                    .ok_or_else(|| {
                        RenameError::internal_consistency(format!(
                            "inserted span {start_offset}..{end} exceeds document bounds"
                        ))
                    })?;
                let anchor_position =
                    snapshot_mapper.byte_to_position(anchor_offset).ok_or_else(|| {
                        RenameError::internal_consistency(format!(
                            "anchor offset {anchor_offset} exceeds snapshot bounds"
                        ))
                    })?;
                spans.push(InsertedSpan {
                    start_offset,
                    end_offset: end,
                    range,
                    new_text,
                    anchor_offset,
                    anchor_position,
                });
            }
            Ok(())
        };

    for op in ops {
        match op {
            EditOp::Unchanged(text) => {
                flush(&mut block, current_offset)?;
                current_offset += text.len();
                snapshot_offset += text.len();
            }
            EditOp::Inserted(text) => {
                let (_, _, pending) =
                    block.get_or_insert((snapshot_offset, current_offset, String::new()));
                pending.push_str(text);
                current_offset += text.len();
            }
            EditOp::Deleted(text) => {
                block.get_or_insert((snapshot_offset, current_offset, String::new()));
                snapshot_offset += text.len();
            }
        }
    }
    flush(&mut block, current_offset)?;

    if current_offset != current_text.len() {
        return Err(RenameError::internal_consistency(format!(
            "attributed length {current_offset} does not match document length {}",
            current_text.len()
        )));
    }
    if snapshot_offset != snapshot.len() {
        return Err(RenameError::internal_consistency(format!(
            "consumed snapshot length {snapshot_offset} does not match snapshot length {}",
            snapshot.len()
        )));
    }

    Ok(spans)
}
