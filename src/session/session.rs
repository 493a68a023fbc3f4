//! One in-progress multi-rename tracking lifecycle.

use std::sync::Arc;

use url::Url;

use crate::domain::{Range, RenameTarget};
use crate::error::RenameResult;
use crate::host::{EditorHost, StatusAction};
use crate::session::applier::RenameApplier;
use crate::session::attribute::{InsertedSpan, attribute};
use crate::text::diff;

/// Release handle for a resource acquired from the host.
///
/// Runs its release action exactly once, either explicitly or on drop, so
/// teardown happens on every exit path including errors.
pub struct Teardown(Option<Box<dyn FnOnce() + Send>>);

impl Teardown {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self(Some(Box::new(release)))
    }

    pub fn release(mut self) {
        if let Some(release) = self.0.take() {
            release();
        }
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        if let Some(release) = self.0.take() {
            release();
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Submitted,
    Cancelled,
}

/// State machine for one open multi-rename session.
///
/// Owns the immutable snapshot taken at start and the current inserted-span
/// set, recomputed wholesale from (snapshot, live text) on every document
/// change. Terminal transitions are [`submit`](Self::submit) and
/// [`cancel`](Self::cancel); both release the acquired UI resources in
/// reverse acquisition order, as does drop.
pub struct RenameSession<H: EditorHost> {
    host: Arc<H>,
    uri: Url,
    snapshot: String,
    spans: Vec<InsertedSpan>,
    state: SessionState,
    guards: Vec<Teardown>,
}

impl<H: EditorHost> RenameSession<H> {
    /// Capture a snapshot of `uri` and begin tracking it.
    pub fn start(host: Arc<H>, uri: Url, status_text: &str) -> RenameResult<Self> {
        let snapshot = host.document_text(&uri)?;

        let mut guards = Vec::new();
        // The indicator doubles as the cancel affordance while tracking.
        host.show_status(status_text, StatusAction::CancelSession);
        {
            let host = Arc::clone(&host);
            guards.push(Teardown::new(move || host.clear_status()));
        }
        {
            let host = Arc::clone(&host);
            let uri = uri.clone();
            guards.push(Teardown::new(move || host.clear_highlight(&uri)));
        }

        log::debug!(
            target: "multi_rename::session",
            "session started for {} ({} bytes)",
            uri,
            snapshot.len()
        );

        Ok(Self {
            host,
            uri,
            snapshot,
            spans: Vec::new(),
            state: SessionState::Active,
            guards,
        })
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn spans(&self) -> &[InsertedSpan] {
        &self.spans
    }

    /// Recompute the inserted-span set against the live text and refresh the
    /// highlight decoration over the new ranges.
    ///
    /// An [`InternalConsistency`](crate::error::RenameError::InternalConsistency)
    /// result means tracking has
    /// desynchronized; the caller must abort the session.
    pub fn refresh(&mut self) -> RenameResult<()> {
        let current = self.host.document_text(&self.uri)?;
        let ops = diff(&self.snapshot, &current);
        self.spans = attribute(&ops, &current, &self.snapshot)?;

        let ranges: Vec<Range> = self.spans.iter().map(|span| span.range).collect();
        self.host.set_highlight(&self.uri, &ranges);
        log::debug!(
            target: "multi_rename::session",
            "recomputed {} span(s) for {}",
            self.spans.len(),
            self.uri
        );
        Ok(())
    }

    /// Freeze the span set, revert the live document to the snapshot, then
    /// run one rename per span against the original text.
    ///
    /// The revert is applied before any rename is invoked: targets are
    /// expressed in snapshot coordinates, and lingering live edits would
    /// invalidate them. Returns the number of renames applied.
    pub fn submit(&mut self) -> RenameResult<usize> {
        debug_assert_eq!(self.state, SessionState::Active);
        self.refresh()?;

        let targets: Vec<RenameTarget> = self
            .spans
            .iter()
            .map(|span| RenameTarget {
                anchor_position: span.anchor_position,
                new_name: span.new_text.clone(),
            })
            .collect();

        // Undo the user's in-place typing; the document returns to its
        // pre-session state before the structured renames run.
        self.host.replace_document(&self.uri, &self.snapshot)?;
        log::debug!(
            target: "multi_rename::session",
            "reverted {} to snapshot, applying {} rename(s)",
            self.uri,
            targets.len()
        );

        let applied = RenameApplier::new(self.host.as_ref()).apply(&self.uri, &targets)?;

        self.state = SessionState::Submitted;
        self.release_guards();
        Ok(applied)
    }

    /// Stop tracking without touching the document.
    ///
    /// The user's in-place edits stay in the buffer; cancel only stops
    /// treating them as pending renames. This asymmetry with submit, which
    /// does revert, is deliberate.
    pub fn cancel(&mut self) {
        if self.state == SessionState::Active {
            self.state = SessionState::Cancelled;
        }
        log::debug!(target: "multi_rename::session", "session cancelled for {}", self.uri);
        self.release_guards();
    }

    fn release_guards(&mut self) {
        // Reverse acquisition order.
        while let Some(guard) = self.guards.pop() {
            guard.release();
        }
    }
}

impl<H: EditorHost> Drop for RenameSession<H> {
    fn drop(&mut self) {
        self.release_guards();
    }
}
