//! RichTextEditor - the toolbar session over an HTML string.

use richtext_core::{BlockType, Document, Editor, InlineType, MarkType, Selection};
use tracing::debug;

use crate::options::EditorOptions;
use crate::toolbar::{Toolbar, ToolbarAction, ToolbarButton};
use crate::Result;

const URL_PROMPT: &str = "Enter the URL of the link:";
const TEXT_PROMPT: &str = "Enter the text for the link:";

/// Blocking text prompt. `None` means the user dismissed it.
pub trait Prompt {
    fn prompt(&mut self, message: &str) -> Option<String>;
}

impl<F> Prompt for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn prompt(&mut self, message: &str) -> Option<String> {
        self(message)
    }
}

/// Kind of data carried by a clipboard transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferKind {
    Text,
    Html,
    Rich,
    Fragment,
    Files,
    Unknown,
}

/// A classified clipboard transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardPayload {
    pub kind: TransferKind,
    pub text: String,
}

impl ClipboardPayload {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: TransferKind::Text,
            text: text.into(),
        }
    }
}

/// Whether a paste was consumed or left to default handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteOutcome {
    Handled,
    Deferred,
}

/// Rich-text editing session bound to an HTML string.
///
/// The caller is notified with the new HTML whenever a command changes the
/// document; selection-only changes are silent.
///
/// # Example
///
/// ```rust
/// use std::cell::RefCell;
/// use richtext::{RichTextEditor, ToolbarAction};
/// use richtext_core::MarkType;
///
/// let saved = RefCell::new(String::new());
/// let mut editor = RichTextEditor::new("<p>Hello World</p>", |html: &str| {
///     *saved.borrow_mut() = html.to_string();
/// });
///
/// editor.select(0..5).unwrap();
/// editor.click(ToolbarAction::Mark(MarkType::Bold));
///
/// assert!(editor.toolbar().is_active(ToolbarAction::Mark(MarkType::Bold)));
/// drop(editor);
/// assert_eq!(saved.into_inner(), "<p><strong>Hello</strong> World</p>");
/// ```
pub struct RichTextEditor<'a> {
    editor: Editor,
    options: EditorOptions,
    /// Document as last reported to the caller
    document: Document,
    on_change: Box<dyn FnMut(&str) + 'a>,
    prompt: Box<dyn Prompt + 'a>,
}

impl<'a> RichTextEditor<'a> {
    /// Create a session with default options
    pub fn new(html: &str, on_change: impl FnMut(&str) + 'a) -> Self {
        Self::with_options(html, on_change, EditorOptions::default())
    }

    pub fn with_options(
        html: &str,
        on_change: impl FnMut(&str) + 'a,
        options: EditorOptions,
    ) -> Self {
        let document = options.serializer.deserialize(html, options.default_block);
        debug!(len = document.len(), "loaded document");
        Self {
            editor: Editor::new(document.clone()).with_default_block(options.default_block),
            options,
            document,
            on_change: Box::new(on_change),
            prompt: Box::new(dismiss),
        }
    }

    /// Install the prompt used by the link button. Without one every prompt
    /// counts as dismissed.
    pub fn with_prompt(mut self, prompt: impl Prompt + 'a) -> Self {
        self.prompt = Box::new(prompt);
        self
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Current document as HTML
    pub fn html(&self) -> String {
        self.options.serializer.serialize(self.editor.document())
    }

    pub fn select(&mut self, selection: impl Into<Selection>) -> Result<()> {
        self.editor.select(selection)?;
        Ok(())
    }

    /// Run arbitrary engine commands, then report a document change
    pub fn change<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Editor),
    {
        f(&mut self.editor);
        self.on_change();
    }

    pub fn toolbar(&self) -> Toolbar {
        let buttons = ToolbarAction::ALL
            .iter()
            .map(|&action| ToolbarButton {
                action,
                icon: action.icon(),
                active: self.is_active(action),
            })
            .collect();
        Toolbar { buttons }
    }

    fn is_active(&self, action: ToolbarAction) -> bool {
        match action {
            ToolbarAction::Mark(ty) => self.editor.has_mark(ty),
            ToolbarAction::Block(ty) if ty.is_list() => {
                self.editor.has_block(BlockType::ListItem)
                    && self
                        .editor
                        .parent_of_first_block()
                        .is_some_and(|parent| parent.ty == ty)
            }
            ToolbarAction::Block(ty) => self.editor.has_block(ty),
            ToolbarAction::Link => self.editor.has_inline(InlineType::Link),
        }
    }

    /// Dispatch a toolbar button press
    pub fn click(&mut self, action: ToolbarAction) {
        debug!(%action, "toolbar click");
        match action {
            ToolbarAction::Mark(ty) => self.on_click_mark(ty),
            ToolbarAction::Block(ty) => self.on_click_block(ty),
            ToolbarAction::Link => self.on_click_link(),
        }
    }

    pub fn on_click_mark(&mut self, ty: MarkType) {
        self.editor.toggle_mark(ty);
        self.on_change();
    }

    pub fn on_click_block(&mut self, ty: BlockType) {
        let default_block = self.options.default_block;
        let is_list = self.editor.has_block(BlockType::ListItem);

        if !ty.is_list() {
            let target = if self.editor.has_block(ty) {
                default_block
            } else {
                ty
            };
            self.editor.set_blocks(target);
            if is_list {
                self.editor
                    .unwrap_block(BlockType::BulletedList)
                    .unwrap_block(BlockType::NumberedList);
            }
        } else if is_list && self.editor.has_ancestor(ty) {
            self.editor
                .set_blocks(default_block)
                .unwrap_block(BlockType::BulletedList)
                .unwrap_block(BlockType::NumberedList);
        } else if is_list {
            let other = if ty == BlockType::BulletedList {
                BlockType::NumberedList
            } else {
                BlockType::BulletedList
            };
            self.editor.unwrap_block(other).wrap_block(ty);
        } else {
            self.editor.set_blocks(BlockType::ListItem).wrap_block(ty);
        }
        self.on_change();
    }

    pub fn on_click_link(&mut self) {
        if self.editor.has_inline(InlineType::Link) {
            self.editor.unwrap_inline(InlineType::Link);
            self.on_change();
            return;
        }

        let Some(href) = self.prompt.prompt(URL_PROMPT) else {
            debug!("link prompt dismissed");
            return;
        };

        if self.editor.selection().is_expanded() {
            wrap_link(&mut self.editor, href);
        } else {
            let Some(text) = self.prompt.prompt(TEXT_PROMPT) else {
                debug!("link text prompt dismissed");
                return;
            };
            insert_link(&mut self.editor, &text, href);
        }
        self.on_change();
    }

    /// Turn a pasted URL into a link. Other payloads are left to the host.
    pub fn on_paste(&mut self, payload: &ClipboardPayload) -> PasteOutcome {
        if !matches!(payload.kind, TransferKind::Text | TransferKind::Html) {
            return PasteOutcome::Deferred;
        }
        if !(self.options.url_detector)(&payload.text) {
            return PasteOutcome::Deferred;
        }
        debug!(url = %payload.text, "pasting link");

        if self.editor.has_inline(InlineType::Link) {
            self.editor.unwrap_inline(InlineType::Link);
        }
        let href = payload.text.clone();
        if self.editor.selection().is_expanded() {
            wrap_link(&mut self.editor, href);
        } else {
            insert_link(&mut self.editor, &payload.text, href);
        }
        self.on_change();
        PasteOutcome::Handled
    }

    /// Notify the caller if the document differs from the last report
    fn on_change(&mut self) {
        if self.editor.document() == &self.document {
            return;
        }
        self.document = self.editor.document().clone();
        let html = self.options.serializer.serialize(&self.document);
        debug!(len = html.len(), "document changed");
        (self.on_change)(&html);
    }
}

fn dismiss(_message: &str) -> Option<String> {
    None
}

fn wrap_link(editor: &mut Editor, href: String) {
    editor
        .wrap_inline(InlineType::Link, Some(href))
        .move_to_end();
}

fn insert_link(editor: &mut Editor, text: &str, href: String) {
    if text.is_empty() {
        return;
    }
    editor
        .insert_text(text)
        .move_focus_backward(text.chars().count());
    wrap_link(editor, href);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session(html: &str) -> (RichTextEditor<'static>, Rc<RefCell<Vec<String>>>) {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        let editor = RichTextEditor::new(html, move |html: &str| {
            sink.borrow_mut().push(html.to_string())
        });
        (editor, changes)
    }

    #[test]
    fn test_mark_click_notifies() {
        let (mut editor, changes) = session("<p>Hello World</p>");
        editor.select(6..11).unwrap();
        editor.click(ToolbarAction::Mark(MarkType::Italic));

        assert_eq!(
            changes.borrow().as_slice(),
            ["<p>Hello <em>World</em></p>"]
        );
    }

    #[test]
    fn test_mark_click_on_cursor_is_silent() {
        let (mut editor, changes) = session("<p>Hello</p>");
        editor.click(ToolbarAction::Mark(MarkType::Bold));

        assert!(changes.borrow().is_empty());
        assert!(editor.toolbar().is_active(ToolbarAction::Mark(MarkType::Bold)));
    }

    #[test]
    fn test_heading_toggles() {
        let (mut editor, changes) = session("<p>Title</p>");
        editor.click(ToolbarAction::Block(BlockType::Heading));
        assert!(editor.toolbar().is_active(ToolbarAction::Block(BlockType::Heading)));

        editor.click(ToolbarAction::Block(BlockType::Heading));
        assert_eq!(
            changes.borrow().as_slice(),
            ["<h3>Title</h3>", "<p>Title</p>"]
        );
    }

    #[test]
    fn test_quote_inside_list_leaves_list() {
        let (mut editor, _) = session("<ul><li>a</li><li>b</li></ul>");
        editor.click(ToolbarAction::Block(BlockType::BlockQuote));

        assert_eq!(
            editor.html(),
            "<blockquote>a</blockquote><ul><li>b</li></ul>"
        );
    }

    #[test]
    fn test_list_button_state() {
        let (mut editor, _) = session("<ol><li>a</li></ol><p>b</p>");
        let toolbar = editor.toolbar();
        assert!(toolbar.is_active(ToolbarAction::Block(BlockType::NumberedList)));
        assert!(!toolbar.is_active(ToolbarAction::Block(BlockType::BulletedList)));

        editor.select(2..2).unwrap();
        assert!(editor.toolbar().active().is_empty());
    }

    #[test]
    fn test_link_click_unwraps_existing_link() {
        let (mut editor, changes) = session(r#"<p>see <a href="/x">here</a></p>"#);
        editor.select(6..6).unwrap();
        assert!(editor.toolbar().is_active(ToolbarAction::Link));

        editor.click(ToolbarAction::Link);
        assert_eq!(changes.borrow().as_slice(), ["<p>see here</p>"]);
    }

    #[test]
    fn test_link_without_prompt_is_aborted() {
        let (mut editor, changes) = session("<p>text</p>");
        editor.select(0..4).unwrap();
        editor.click(ToolbarAction::Link);

        assert!(changes.borrow().is_empty());
        assert_eq!(editor.html(), "<p>text</p>");
    }

    #[test]
    fn test_change_without_document_change_is_silent() {
        let (mut editor, changes) = session("<p>text</p>");
        editor.change(|e| {
            e.move_to(2);
        });
        assert!(changes.borrow().is_empty());

        editor.change(|e| {
            e.insert_text("x");
        });
        assert_eq!(changes.borrow().as_slice(), ["<p>texxt</p>"]);
    }
}
