//! In-memory editor host.
//!
//! A complete [`EditorHost`] over a DashMap document store, with a naive
//! whole-word rename provider and scriptable prompt, clipboard, and failure
//! behavior. This is the fixture the integration tests drive; it is also a
//! reasonable starting point for embedding experiments.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use dashmap::DashMap;
use url::Url;

use crate::domain::{DocumentEdits, Position, Range, TextEdit, WorkspaceEdit};
use crate::error::{RenameError, RenameResult};
use crate::host::{EditorHost, StatusAction};
use crate::text::PositionMapper;

/// One recorded invocation of the rename capability.
#[derive(Clone, Debug)]
pub struct RenameCall {
    pub uri: Url,
    pub position: Position,
    pub new_name: String,
    /// Document text at the moment of the call, for asserting that the
    /// submit-time revert happened first.
    pub document_text: String,
}

/// Scripted reply for the next prompt.
#[derive(Clone, Debug, Default)]
enum PromptScript {
    /// Accept whatever the prompt was seeded with
    #[default]
    AcceptInitial,
    Reply(String),
    Dismiss,
}

#[derive(Default)]
struct HostState {
    focused: Option<Url>,
    cursors: Vec<Position>,
    clipboard: String,
    prompt_script: PromptScript,
    last_prompt: Option<String>,
    last_validation_message: Option<String>,
    status: Option<(String, StatusAction)>,
    highlights: HashMap<Url, Vec<Range>>,
    failing_calls: Vec<usize>,
    rename_calls: Vec<RenameCall>,
    single_rename_count: usize,
}

#[derive(Default)]
pub struct MemoryHost {
    documents: DashMap<Url, String>,
    state: Mutex<HostState>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert_document(&self, uri: Url, text: impl Into<String>) {
        self.documents.insert(uri, text.into());
    }

    pub fn focus(&self, uri: Option<Url>) {
        self.state().focused = uri;
    }

    pub fn set_cursors(&self, cursors: Vec<Position>) {
        self.state().cursors = cursors;
    }

    pub fn set_clipboard(&self, text: impl Into<String>) {
        self.state().clipboard = text.into();
    }

    /// Script the reply for the next prompt.
    pub fn script_prompt_reply(&self, reply: impl Into<String>) {
        self.state().prompt_script = PromptScript::Reply(reply.into());
    }

    /// Script dismissal of the next prompt.
    pub fn script_prompt_dismissal(&self) {
        self.state().prompt_script = PromptScript::Dismiss;
    }

    /// Make the nth rename call (0-based) fail.
    pub fn fail_rename_call(&self, index: usize) {
        self.state().failing_calls.push(index);
    }

    pub fn rename_calls(&self) -> Vec<RenameCall> {
        self.state().rename_calls.clone()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.state().last_prompt.clone()
    }

    pub fn last_validation_message(&self) -> Option<String> {
        self.state().last_validation_message.clone()
    }

    pub fn status_text(&self) -> Option<String> {
        self.state().status.as_ref().map(|(text, _)| text.clone())
    }

    pub fn status_action(&self) -> Option<StatusAction> {
        self.state().status.as_ref().map(|(_, action)| *action)
    }

    pub fn highlight_ranges(&self, uri: &Url) -> Option<Vec<Range>> {
        self.state().highlights.get(uri).cloned()
    }

    pub fn single_rename_count(&self) -> usize {
        self.state().single_rename_count
    }
}

impl EditorHost for MemoryHost {
    fn focused_document(&self) -> Option<Url> {
        self.state().focused.clone()
    }

    fn cursor_positions(&self, _uri: &Url) -> Vec<Position> {
        self.state().cursors.clone()
    }

    fn document_text(&self, uri: &Url) -> RenameResult<String> {
        self.documents
            .get(uri)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| RenameError::document_unavailable(uri.as_str()))
    }

    fn replace_document(&self, uri: &Url, new_text: &str) -> RenameResult<()> {
        if !self.documents.contains_key(uri) {
            return Err(RenameError::document_unavailable(uri.as_str()));
        }
        self.documents.insert(uri.clone(), new_text.to_string());
        Ok(())
    }

    fn rename_at(
        &self,
        uri: &Url,
        position: Position,
        new_name: &str,
    ) -> RenameResult<WorkspaceEdit> {
        let text = self.document_text(uri)?;
        let failing = {
            let mut state = self.state();
            let call_index = state.rename_calls.len();
            state.rename_calls.push(RenameCall {
                uri: uri.clone(),
                position,
                new_name: new_name.to_string(),
                document_text: text.clone(),
            });
            state.failing_calls.contains(&call_index)
        };
        if failing {
            return Err(RenameError::host("rename provider refused the request"));
        }

        let mapper = PositionMapper::new(&text);
        let offset = mapper
            .position_to_byte(position)
            .ok_or_else(|| RenameError::host(format!("position {position:?} out of bounds")))?;
        let (start, end) = word_bounds_at(&text, offset)
            .ok_or_else(|| RenameError::host("no symbol at position"))?;
        let word = &text[start..end];

        let mut edits = Vec::new();
        for (occ_start, occ_end) in whole_word_occurrences(&text, word) {
            let range = mapper
                .byte_range_to_range(occ_start, occ_end)
                .ok_or_else(|| RenameError::host("occurrence out of bounds"))?;
            edits.push(TextEdit {
                range,
                new_text: new_name.to_string(),
            });
        }
        Ok(WorkspaceEdit {
            document_changes: vec![DocumentEdits {
                uri: uri.clone(),
                edits,
            }],
        })
    }

    fn apply_workspace_edit(&self, edit: &WorkspaceEdit) -> RenameResult<()> {
        for doc_edits in &edit.document_changes {
            let mut text = self.document_text(&doc_edits.uri)?;

            let mut byte_edits = Vec::new();
            {
                let mapper = PositionMapper::new(&text);
                for text_edit in &doc_edits.edits {
                    let start = mapper
                        .position_to_byte(text_edit.range.start)
                        .ok_or_else(|| RenameError::host("edit start out of bounds"))?;
                    let end = mapper
                        .position_to_byte(text_edit.range.end)
                        .ok_or_else(|| RenameError::host("edit end out of bounds"))?;
                    if start > end {
                        return Err(RenameError::host("inverted edit range"));
                    }
                    byte_edits.push((start, end, text_edit.new_text.clone()));
                }
            }

            // Apply back-to-front so earlier offsets stay valid; reject
            // overlapping edits before touching the text (all-or-nothing).
            byte_edits.sort_by(|a, b| b.0.cmp(&a.0));
            for pair in byte_edits.windows(2) {
                if pair[1].1 > pair[0].0 {
                    return Err(RenameError::host("overlapping edits in one edit set"));
                }
            }
            for (start, end, new_text) in byte_edits {
                text.replace_range(start..end, &new_text);
            }
            self.documents.insert(doc_edits.uri.clone(), text);
        }
        Ok(())
    }

    fn trigger_single_rename(&self) -> RenameResult<()> {
        self.state().single_rename_count += 1;
        Ok(())
    }

    fn read_clipboard(&self) -> String {
        self.state().clipboard.clone()
    }

    fn prompt_input(
        &self,
        prompt: &str,
        initial: &str,
        validate: &dyn Fn(&str) -> Option<String>,
    ) -> Option<String> {
        let script = {
            let mut state = self.state();
            state.last_prompt = Some(prompt.to_string());
            std::mem::take(&mut state.prompt_script)
        };
        let reply = match script {
            PromptScript::AcceptInitial => initial.to_string(),
            PromptScript::Reply(reply) => reply,
            PromptScript::Dismiss => return None,
        };
        if let Some(message) = validate(&reply) {
            // A real prompt would stay open; the scripted one records the
            // inline message and reports dismissal.
            self.state().last_validation_message = Some(message);
            return None;
        }
        Some(reply)
    }

    fn show_status(&self, text: &str, action: StatusAction) {
        self.state().status = Some((text.to_string(), action));
    }

    fn clear_status(&self) {
        self.state().status = None;
    }

    fn set_highlight(&self, uri: &Url, ranges: &[Range]) {
        self.state().highlights.insert(uri.clone(), ranges.to_vec());
    }

    fn clear_highlight(&self, uri: &Url) {
        self.state().highlights.remove(uri);
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Identifier boundaries around a byte offset. A position at the end of a
/// word still resolves to that word, matching editor rename semantics.
fn word_bounds_at(text: &str, offset: usize) -> Option<(usize, usize)> {
    let offset = offset.min(text.len());
    let at = text[offset..].chars().next();
    let before = text[..offset].chars().next_back();

    let anchor = if at.is_some_and(is_ident_char) {
        offset
    } else if before.is_some_and(is_ident_char) {
        offset - before.map(char::len_utf8).unwrap_or(0)
    } else {
        return None;
    };

    let mut start = anchor;
    for (i, c) in text[..anchor].char_indices().rev() {
        if !is_ident_char(c) {
            break;
        }
        start = i;
    }
    let mut end = anchor;
    for (i, c) in text[anchor..].char_indices() {
        if !is_ident_char(c) {
            break;
        }
        end = anchor + i + c.len_utf8();
    }
    Some((start, end))
}

/// Byte ranges of every whole-word occurrence of `word`.
fn whole_word_occurrences(text: &str, word: &str) -> Vec<(usize, usize)> {
    text.match_indices(word)
        .filter(|(start, matched)| {
            let prev_ok = !text[..*start].chars().next_back().is_some_and(is_ident_char);
            let next_ok = !text[start + matched.len()..]
                .chars()
                .next()
                .is_some_and(is_ident_char);
            prev_ok && next_ok
        })
        .map(|(start, matched)| (start, start + matched.len()))
        .collect()
}
