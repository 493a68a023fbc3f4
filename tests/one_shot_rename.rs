//! The clipboard-seeded one-shot flow, which skips live tracking.

mod helpers;

use std::sync::Arc;

use helpers::setup;
use multi_rename::{EditorHost, MemoryHost, Position, SessionController, Settings};

#[test]
fn clipboard_seeds_the_prompt_and_names_apply_in_cursor_order() {
    let (host, mut controller, uri) = setup(
        "first second\nfirst second",
        vec![Position::new(0, 0), Position::new(0, 6)],
    );
    host.set_clipboard("newA\nnewB\nextra line ignored");

    // Prompt accepts its seeded initial value: "newA,newB".
    controller.invoke_one_shot().unwrap();

    let calls = host.rename_calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].new_name, "newA");
    assert_eq!(calls[1].new_name, "newB");
    assert_eq!(
        host.document_text(&uri).unwrap(),
        "newA newB\nnewA newB"
    );
}

#[test]
fn scripted_reply_overrides_the_seed() {
    let (host, mut controller, uri) = setup(
        "aa bb",
        vec![Position::new(0, 0), Position::new(0, 3)],
    );
    host.set_clipboard("seedA\nseedB");
    host.script_prompt_reply("xx,yy");

    controller.invoke_one_shot().unwrap();

    assert_eq!(host.document_text(&uri).unwrap(), "xx yy");
}

#[test]
fn replies_are_trimmed_per_name() {
    let (host, mut controller, uri) = setup(
        "aa bb",
        vec![Position::new(0, 0), Position::new(0, 3)],
    );
    host.script_prompt_reply(" xx , yy ");

    controller.invoke_one_shot().unwrap();

    assert_eq!(host.document_text(&uri).unwrap(), "xx yy");
}

#[test]
fn name_count_mismatch_is_rejected_inline() {
    let (host, mut controller, uri) = setup(
        "aa bb",
        vec![Position::new(0, 0), Position::new(0, 3)],
    );
    host.script_prompt_reply("onlyone");

    controller.invoke_one_shot().unwrap();

    assert_eq!(
        host.last_validation_message().as_deref(),
        Some("Please specify exactly 2 new names. Found 1.")
    );
    assert!(host.rename_calls().is_empty());
    assert_eq!(host.document_text(&uri).unwrap(), "aa bb");
}

#[test]
fn dismissed_prompt_applies_nothing() {
    let (host, mut controller, uri) = setup(
        "aa bb",
        vec![Position::new(0, 0), Position::new(0, 3)],
    );
    host.script_prompt_dismissal();

    controller.invoke_one_shot().unwrap();

    assert!(host.rename_calls().is_empty());
    assert_eq!(host.document_text(&uri).unwrap(), "aa bb");
}

#[test]
fn single_cursor_falls_back_to_plain_rename() {
    let (host, mut controller, _uri) = setup("aa bb", vec![Position::new(0, 0)]);

    controller.invoke_one_shot().unwrap();

    assert_eq!(host.single_rename_count(), 1);
    assert!(host.rename_calls().is_empty());
}

#[test]
fn custom_separator_is_honored() {
    let host = Arc::new(MemoryHost::new());
    let uri = helpers::doc_uri("lib.rs");
    host.insert_document(uri.clone(), "aa bb");
    host.focus(Some(uri.clone()));
    host.set_cursors(vec![Position::new(0, 0), Position::new(0, 3)]);
    host.script_prompt_reply("xx;yy");

    let settings = Settings {
        one_shot_separator: ";".to_string(),
        ..Settings::default()
    };
    let mut controller = SessionController::with_settings(Arc::clone(&host), settings);

    controller.invoke_one_shot().unwrap();

    assert_eq!(host.document_text(&uri).unwrap(), "xx yy");
    // The prompt names the separator it expects.
    assert_eq!(
        host.last_prompt().as_deref(),
        Some("Enter the new names, separated by \";\".")
    );
}

#[test]
fn default_prompt_asks_for_comma_separated_names() {
    let (host, mut controller, _uri) = setup(
        "aa bb",
        vec![Position::new(0, 0), Position::new(0, 3)],
    );
    host.set_clipboard("x\ny");

    controller.invoke_one_shot().unwrap();

    assert_eq!(
        host.last_prompt().as_deref(),
        Some("Enter the new names, separated by comma.")
    );
}

#[test]
fn one_shot_does_not_open_a_session() {
    let (host, mut controller, _uri) = setup(
        "aa bb",
        vec![Position::new(0, 0), Position::new(0, 3)],
    );
    host.set_clipboard("x\ny");

    controller.invoke_one_shot().unwrap();

    assert!(!controller.is_session_active());
    assert!(host.status_text().is_none());
}
