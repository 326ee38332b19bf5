#![cfg(feature = "html")]

use std::cell::RefCell;
use std::rc::Rc;

use richtext::{
    ClipboardPayload, EditorOptions, PasteOutcome, RichTextEditor, ToolbarAction, TransferKind,
};
use richtext_core::{BlockType, MarkType};

type Changes = Rc<RefCell<Vec<String>>>;

fn session(html: &str) -> (RichTextEditor<'static>, Changes) {
    let changes: Changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    let editor = RichTextEditor::new(html, move |html: &str| {
        sink.borrow_mut().push(html.to_string())
    });
    (editor, changes)
}

/// Prompt answering from a script and recording the questions asked
fn scripted(
    answers: Vec<Option<&'static str>>,
    asked: Rc<RefCell<Vec<String>>>,
) -> impl FnMut(&str) -> Option<String> {
    let mut answers = answers.into_iter();
    move |message: &str| {
        asked.borrow_mut().push(message.to_string());
        answers.next().flatten().map(str::to_string)
    }
}

#[test]
fn test_link_on_collapsed_selection() {
    let (editor, changes) = session("<p>see </p>");
    let asked = Rc::new(RefCell::new(Vec::new()));
    let mut editor = editor.with_prompt(scripted(
        vec![Some("http://e.co"), Some("e")],
        Rc::clone(&asked),
    ));

    editor.select(4..4).unwrap();
    editor.click(ToolbarAction::Link);

    assert_eq!(
        asked.borrow().as_slice(),
        ["Enter the URL of the link:", "Enter the text for the link:"]
    );
    assert_eq!(
        changes.borrow().as_slice(),
        [r#"<p>see <a href="http://e.co">e</a></p>"#]
    );
    assert_eq!(editor.editor().selection().focus, 5);
}

#[test]
fn test_link_on_expanded_selection() {
    let (editor, changes) = session("<p>hello world</p>");
    let asked = Rc::new(RefCell::new(Vec::new()));
    let mut editor = editor.with_prompt(scripted(vec![Some("/w")], Rc::clone(&asked)));

    editor.select(6..11).unwrap();
    editor.click(ToolbarAction::Link);

    assert_eq!(asked.borrow().len(), 1);
    assert_eq!(
        changes.borrow().as_slice(),
        [r#"<p>hello <a href="/w">world</a></p>"#]
    );
    assert!(editor.toolbar().is_active(ToolbarAction::Link));
}

#[test]
fn test_cancelled_url_prompt_changes_nothing() {
    let (editor, changes) = session("<p>text</p>");
    let asked = Rc::new(RefCell::new(Vec::new()));
    let mut editor = editor.with_prompt(scripted(vec![None], Rc::clone(&asked)));

    editor.click(ToolbarAction::Link);

    assert_eq!(asked.borrow().len(), 1);
    assert!(changes.borrow().is_empty());
    assert_eq!(editor.html(), "<p>text</p>");
}

#[test]
fn test_cancelled_text_prompt_changes_nothing() {
    let (editor, changes) = session("<p>text</p>");
    let asked = Rc::new(RefCell::new(Vec::new()));
    let mut editor = editor.with_prompt(scripted(vec![Some("/x"), None], Rc::clone(&asked)));

    editor.click(ToolbarAction::Link);

    assert_eq!(asked.borrow().len(), 2);
    assert!(changes.borrow().is_empty());
}

#[test]
fn test_bulleted_list_becomes_numbered() {
    let (mut editor, changes) = session("<ul><li>a</li><li>b</li></ul>");
    editor.select(0..3).unwrap();
    editor.click(ToolbarAction::Block(BlockType::NumberedList));

    assert_eq!(
        changes.borrow().as_slice(),
        ["<ol><li>a</li><li>b</li></ol>"]
    );
    let toolbar = editor.toolbar();
    assert!(toolbar.is_active(ToolbarAction::Block(BlockType::NumberedList)));
    assert!(!toolbar.is_active(ToolbarAction::Block(BlockType::BulletedList)));
}

#[test]
fn test_list_button_inside_outer_list_lifts_items_out() {
    let (mut editor, _) = session("<ul><li>x</li><ol><li>a</li><li>b</li></ol></ul>");
    editor.select(2..5).unwrap();
    editor.click(ToolbarAction::Block(BlockType::BulletedList));

    assert_eq!(editor.html(), "<ul><li>x</li></ul><p>a</p><p>b</p>");
}

#[test]
fn test_same_list_button_removes_list() {
    let (mut editor, changes) = session("<ol><li>a</li><li>b</li></ol>");
    editor.select(0..3).unwrap();
    editor.click(ToolbarAction::Block(BlockType::NumberedList));

    assert_eq!(changes.borrow().as_slice(), ["<p>a</p><p>b</p>"]);
}

#[test]
fn test_paragraphs_become_list() {
    let (mut editor, _) = session("<p>a</p><p>b</p>");
    editor.select(0..3).unwrap();
    editor.click(ToolbarAction::Block(BlockType::BulletedList));

    assert_eq!(editor.html(), "<ul><li>a</li><li>b</li></ul>");
}

#[test]
fn test_mark_toggle_twice_restores() {
    let (mut editor, changes) = session("<p>a <em>b</em> c</p>");
    editor.select(0..5).unwrap();
    editor.click(ToolbarAction::Mark(MarkType::Underlined));
    editor.click(ToolbarAction::Mark(MarkType::Underlined));

    let changes = changes.borrow();
    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0], "<p><u>a </u><u><em>b</em></u><u> c</u></p>");
    assert_eq!(changes[1], "<p>a <em>b</em> c</p>");
}

#[test]
fn test_paste_url_over_selection() {
    let (mut editor, changes) = session("<p>click here</p>");
    editor.select(6..10).unwrap();

    let outcome = editor.on_paste(&ClipboardPayload::text("https://example.com"));

    assert_eq!(outcome, PasteOutcome::Handled);
    assert_eq!(
        changes.borrow().as_slice(),
        [r#"<p>click <a href="https://example.com">here</a></p>"#]
    );
}

#[test]
fn test_paste_url_replaces_existing_link() {
    let (mut editor, _) = session(r#"<p><a href="/old">here</a></p>"#);
    editor.select(0..4).unwrap();

    editor.on_paste(&ClipboardPayload::text("http://new.io"));

    assert_eq!(editor.html(), r#"<p><a href="http://new.io">here</a></p>"#);
}

#[test]
fn test_paste_url_at_cursor_inserts_link() {
    let (mut editor, _) = session("<p>go </p>");
    editor.select(3..3).unwrap();

    let outcome = editor.on_paste(&ClipboardPayload::text("http://e.co"));

    assert_eq!(outcome, PasteOutcome::Handled);
    assert_eq!(
        editor.html(),
        r#"<p>go <a href="http://e.co">http://e.co</a></p>"#
    );
}

#[test]
fn test_paste_other_content_is_deferred() {
    let (mut editor, changes) = session("<p>text</p>");
    editor.select(0..4).unwrap();

    assert_eq!(
        editor.on_paste(&ClipboardPayload::text("not a url")),
        PasteOutcome::Deferred
    );
    assert_eq!(
        editor.on_paste(&ClipboardPayload {
            kind: TransferKind::Files,
            text: "http://e.co".to_string(),
        }),
        PasteOutcome::Deferred
    );
    assert!(changes.borrow().is_empty());
}

#[test]
fn test_custom_url_detector() {
    let options = EditorOptions {
        url_detector: |text| text.starts_with("mailto:"),
        ..Default::default()
    };
    let mut editor = RichTextEditor::with_options("<p>mail me</p>", |_: &str| {}, options);
    editor.select(0..4).unwrap();

    let outcome = editor.on_paste(&ClipboardPayload {
        kind: TransferKind::Html,
        text: "mailto:a@b.c".to_string(),
    });

    assert_eq!(outcome, PasteOutcome::Handled);
    assert_eq!(editor.html(), r#"<p><a href="mailto:a@b.c">mail</a> me</p>"#);
}

#[test]
fn test_selection_changes_never_notify() {
    let (mut editor, changes) = session("<p>abc</p><p>def</p>");
    editor.select(1..6).unwrap();
    editor.select(0..0).unwrap();
    editor.click(ToolbarAction::Mark(MarkType::Bold));

    assert!(changes.borrow().is_empty());
    assert!(editor.select(0..99).is_err());
}
