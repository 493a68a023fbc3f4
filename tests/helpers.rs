//! Shared fixtures for the integration tests.

use std::sync::Arc;

use multi_rename::{EditorHost, MemoryHost, Position, SessionController};
use url::Url;

pub fn doc_uri(name: &str) -> Url {
    Url::parse(&format!("file:///project/{name}")).unwrap()
}

/// A focused document with the given text and cursors, plus a controller
/// bound to the host.
pub fn setup(
    text: &str,
    cursors: Vec<Position>,
) -> (Arc<MemoryHost>, SessionController<MemoryHost>, Url) {
    let host = Arc::new(MemoryHost::new());
    let uri = doc_uri("main.rs");
    host.insert_document(uri.clone(), text);
    host.focus(Some(uri.clone()));
    host.set_cursors(cursors);
    let controller = SessionController::new(Arc::clone(&host));
    (host, controller, uri)
}

/// Simulate the user editing the live document: replace its text and
/// deliver the change notification.
pub fn edit_document(
    host: &MemoryHost,
    controller: &mut SessionController<MemoryHost>,
    uri: &Url,
    new_text: &str,
) {
    host.replace_document(uri, new_text).unwrap();
    controller.handle_document_change(uri);
}
