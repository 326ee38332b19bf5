//! richtext-core - Document tree and editing engine
//!
//! This crate provides the typed document tree exchanged with the HTML codec
//! and the editing session that the toolbar commands drive. It is used by the
//! `richtext` crate, which adds HTML parsing, serialization and the toolbar
//! component.
//!
//! # Architecture
//!
//! ```text
//!                  from_nodes               commands
//! DocumentNode ──────────────▶ ┌──────────┐ ◀──────── Editor
//!     tree     ◀────────────── │ Document │
//!                  to_nodes    └──────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use richtext_core::{BlockType, Document, DocumentNode, Editor, MarkType};
//!
//! let document = Document::from_nodes(
//!     vec![DocumentNode::paragraph(vec![DocumentNode::text("Hello World")])],
//!     BlockType::Paragraph,
//! );
//!
//! let mut editor = Editor::new(document);
//! editor.select(0..5)?.toggle_mark(MarkType::Bold);
//!
//! assert_eq!(
//!     editor.document().to_nodes(),
//!     vec![DocumentNode::paragraph(vec![
//!         DocumentNode::mark(MarkType::Bold, vec![DocumentNode::text("Hello")]),
//!         DocumentNode::text(" World"),
//!     ])]
//! );
//! # Ok::<(), richtext_core::EditorError>(())
//! ```

mod ast;
mod editor;
mod selection;
mod transforms;
mod value;

pub use ast::{BlockType, DocumentNode, InlineType, MarkType, NodeKind};
pub use editor::Editor;
pub use selection::Selection;
pub use value::{Block, Document, Inline, LeafBlock, MarkSet, Node, Text, Value};

/// Errors raised by editing commands
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    #[error("Selection offset {offset} is outside the document (length {len})")]
    SelectionOutOfBounds { offset: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, EditorError>;
