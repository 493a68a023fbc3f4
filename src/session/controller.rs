//! Top-level entry point binding the user-invocable actions.

use std::sync::Arc;

use url::Url;

use crate::config::Settings;
use crate::domain::RenameTarget;
use crate::error::{RenameError, RenameResult};
use crate::host::EditorHost;
use crate::session::applier::RenameApplier;
use crate::session::session::RenameSession;

/// Owns at most one active [`RenameSession`] and dispatches the
/// start-or-submit and cancel actions onto it.
///
/// All methods run synchronously in response to host notifications, which
/// arrive one at a time; a submit therefore runs to completion before any
/// queued cancel is observed.
pub struct SessionController<H: EditorHost> {
    host: Arc<H>,
    settings: Settings,
    session: Option<RenameSession<H>>,
}

impl<H: EditorHost> SessionController<H> {
    pub fn new(host: Arc<H>) -> Self {
        Self::with_settings(host, Settings::default())
    }

    pub fn with_settings(host: Arc<H>, settings: Settings) -> Self {
        Self {
            host,
            settings,
            session: None,
        }
    }

    /// Explicit query for "is a rename in progress", for other UI elements
    /// to consult instead of ambient global state.
    pub fn is_session_active(&self) -> bool {
        self.session.is_some()
    }

    /// Start-or-submit.
    ///
    /// With no active session: requires a focused document with at least two
    /// cursors, otherwise delegates to the host's single-cursor rename
    /// action (the feature has nothing to add for one cursor). With an
    /// active session: submits it.
    pub fn invoke(&mut self) -> RenameResult<()> {
        if self.session.is_some() {
            return self.submit();
        }

        let Some((uri, cursors)) = self.multi_cursor_context() else {
            return self.fallback_single_rename();
        };

        log::debug!(
            target: "multi_rename::controller",
            "starting session for {} with {} cursors",
            uri,
            cursors.len()
        );
        let session = RenameSession::start(
            Arc::clone(&self.host),
            uri,
            &self.settings.status_text,
        )?;
        self.session = Some(session);
        Ok(())
    }

    /// Abort the active session, if any. Never mutates the document.
    pub fn cancel(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.cancel();
        }
    }

    /// Document-change notification from the host.
    ///
    /// Recomputes the span set when the change targets the tracked
    /// document. A desynchronized recomputation aborts the session instead
    /// of propagating a crash into the host.
    pub fn handle_document_change(&mut self, uri: &Url) {
        let Some(session) = &mut self.session else {
            return;
        };
        if session.uri() != uri {
            return;
        }
        if let Err(err) = session.refresh() {
            log::warn!(
                target: "multi_rename::controller",
                "tracking desynchronized, session aborted: {err}"
            );
            self.cancel();
        }
    }

    /// Focus-change notification from the host.
    ///
    /// Tracking is scoped to one document view; moving focus elsewhere
    /// cancels the session.
    pub fn handle_focus_change(&mut self, focused: Option<&Url>) {
        if let Some(session) = &self.session
            && focused != Some(session.uri())
        {
            log::debug!(
                target: "multi_rename::controller",
                "focus left {}, cancelling session",
                session.uri()
            );
            self.cancel();
        }
    }

    fn submit(&mut self) -> RenameResult<()> {
        // The slot empties before the renames run; the session (and its
        // teardown guards) is dropped on every path out of here.
        let Some(mut session) = self.session.take() else {
            return Ok(());
        };
        match session.submit() {
            Ok(applied) => {
                log::debug!(
                    target: "multi_rename::controller",
                    "session submitted, {applied} rename(s) applied"
                );
                Ok(())
            }
            Err(err @ RenameError::InternalConsistency { .. }) => {
                log::warn!(
                    target: "multi_rename::controller",
                    "tracking desynchronized, session aborted: {err}"
                );
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// One-shot rename without live tracking: names are seeded from the
    /// clipboard and confirmed through a validated prompt, then applied at
    /// the current cursor positions.
    pub fn invoke_one_shot(&mut self) -> RenameResult<()> {
        let Some((uri, cursors)) = self.multi_cursor_context() else {
            return self.fallback_single_rename();
        };

        let clipboard = self.host.read_clipboard();
        let seeds: Vec<String> = clipboard
            .split('\n')
            .map(|name| name.trim().to_string())
            .take(cursors.len())
            .collect();

        let separator = self.settings.one_shot_separator.clone();
        let expected = cursors.len();
        let validate = move |input: &str| -> Option<String> {
            let found = input.split(separator.as_str()).count();
            (found != expected).then(|| {
                format!("Please specify exactly {expected} new names. Found {found}.")
            })
        };

        let initial = seeds.join(&self.settings.one_shot_separator);
        let prompt = if self.settings.one_shot_separator == "," {
            "Enter the new names, separated by comma.".to_string()
        } else {
            format!(
                "Enter the new names, separated by \"{}\".",
                self.settings.one_shot_separator
            )
        };
        let Some(reply) = self.host.prompt_input(&prompt, &initial, &validate) else {
            // Prompt dismissed; nothing to do.
            return Ok(());
        };

        let names: Vec<&str> = reply.split(self.settings.one_shot_separator.as_str()).collect();
        if names.len() != cursors.len() {
            // The host should have held the prompt open on invalid input;
            // refuse to proceed if it did not.
            return Err(RenameError::validation(format!(
                "Please specify exactly {} new names. Found {}.",
                cursors.len(),
                names.len()
            )));
        }

        let targets: Vec<RenameTarget> = cursors
            .iter()
            .zip(names)
            .map(|(position, name)| RenameTarget {
                anchor_position: *position,
                new_name: name.trim().to_string(),
            })
            .collect();

        RenameApplier::new(self.host.as_ref()).apply(&uri, &targets)?;
        Ok(())
    }

    /// Focused document plus its cursors, when there are enough of them to
    /// engage multi-rename.
    fn multi_cursor_context(&self) -> Option<(Url, Vec<crate::domain::Position>)> {
        let uri = self.host.focused_document()?;
        let cursors = self.host.cursor_positions(&uri);
        (cursors.len() >= 2).then_some((uri, cursors))
    }

    fn fallback_single_rename(&self) -> RenameResult<()> {
        if !self.settings.single_cursor_fallback {
            return Ok(());
        }
        log::debug!(
            target: "multi_rename::controller",
            "fewer than two cursors, delegating to single rename"
        );
        self.host.trigger_single_rename()
    }
}
