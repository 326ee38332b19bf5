//! # richtext
//!
//! A rich-text toolbar session that keeps an HTML string in sync with an
//! editing engine.
//!
//! ## Design
//!
//! The HTML side and the document side meet in one declarative table: each
//! [`TagRule`] maps a tag name to exactly one block, mark or inline type and
//! back. Tags outside the table are unwrapped on the way in; node types
//! without a rule are rendered as their children on the way out.
//!
//! - **Plain-data toolbar**: [`RichTextEditor::toolbar`] returns buttons with
//!   an icon and an active flag, and the host feeds presses back through
//!   [`RichTextEditor::click`]
//! - **Change reporting**: the caller's callback receives the new HTML only
//!   when the document actually changed
//! - **Injected capabilities**: link prompts and URL detection are supplied
//!   by the host
//!
//! ## Example (codec)
//!
//! ```rust
//! # #[cfg(feature = "html")] {
//! use richtext::HtmlSerializer;
//! use richtext_core::BlockType;
//!
//! let serializer = HtmlSerializer::new();
//! let document = serializer.deserialize(r#"<p class="lead">Hello <b>World</b></p>"#, BlockType::Paragraph);
//!
//! assert_eq!(serializer.serialize(&document), r#"<p class="lead">Hello World</p>"#);
//! # }
//! ```
//!
//! ## Example (toolbar)
//!
//! ```rust
//! # #[cfg(feature = "html")] {
//! use richtext::{RichTextEditor, ToolbarAction};
//! use richtext_core::BlockType;
//!
//! let mut editor = RichTextEditor::new("<p>one</p>", |_: &str| {});
//! editor.click(ToolbarAction::Block(BlockType::BulletedList));
//!
//! assert_eq!(editor.html(), "<ul><li>one</li></ul>");
//! # }
//! ```

#[cfg(feature = "html")]
mod editor;
#[cfg(feature = "html")]
pub mod html;
pub mod markup;
mod options;
mod rules;
mod service;
mod toolbar;
mod utilities;

#[cfg(feature = "html")]
pub use editor::{ClipboardPayload, PasteOutcome, Prompt, RichTextEditor, TransferKind};
#[cfg(feature = "html")]
pub use html::parse_html;
pub use markup::{Element, MarkupNode};
pub use options::{EditorOptions, ToolbarStyle};
pub use rules::{standard_rules, TagRule, TagRules};
pub use service::HtmlSerializer;
pub use toolbar::{Toolbar, ToolbarAction, ToolbarButton};
pub use utilities::*;

use richtext_core::EditorError;

/// Error type for richtext operations
#[derive(Debug, thiserror::Error)]
pub enum RichTextError {
    #[error("Tag is already mapped: {0}")]
    DuplicateTag(String),

    #[error("Invalid tag name: {0:?}")]
    InvalidTag(String),

    #[error(transparent)]
    Editor(#[from] EditorError),
}

pub type Result<T> = std::result::Result<T, RichTextError>;
