//! Document node tree
//!
//! This module defines the typed tree exchanged with the HTML codec. Marks
//! appear here as wrapper nodes; the editing model in [`crate::value`] folds
//! them onto text leaves.

use std::fmt;

/// A structural node type occupying its own line(s)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockType {
    Paragraph,
    BlockQuote,
    Heading,
    BulletedList,
    NumberedList,
    ListItem,
}

impl BlockType {
    pub const ALL: [BlockType; 6] = [
        BlockType::Paragraph,
        BlockType::BlockQuote,
        BlockType::Heading,
        BlockType::BulletedList,
        BlockType::NumberedList,
        BlockType::ListItem,
    ];

    /// The semantic type name
    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Paragraph => "paragraph",
            BlockType::BlockQuote => "block-quote",
            BlockType::Heading => "heading",
            BlockType::BulletedList => "bulleted-list",
            BlockType::NumberedList => "numbered-list",
            BlockType::ListItem => "list-item",
        }
    }

    /// Whether this block wraps list items
    pub fn is_list(self) -> bool {
        matches!(self, BlockType::BulletedList | BlockType::NumberedList)
    }
}

/// A character-level formatting attribute
///
/// The derived ordering is the order marks are nested in when a text carries
/// several of them (first mark innermost).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MarkType {
    Bold,
    Italic,
    Underlined,
}

impl MarkType {
    pub const ALL: [MarkType; 3] = [MarkType::Bold, MarkType::Italic, MarkType::Underlined];

    pub fn as_str(self) -> &'static str {
        match self {
            MarkType::Bold => "bold",
            MarkType::Italic => "italic",
            MarkType::Underlined => "underlined",
        }
    }
}

/// A node embedded in the text flow that carries its own attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InlineType {
    Link,
}

impl InlineType {
    pub fn as_str(self) -> &'static str {
        match self {
            InlineType::Link => "link",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for MarkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for InlineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category and specific type of a non-text node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Block(BlockType),
    Mark(MarkType),
    Inline(InlineType),
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Block(ty) => write!(f, "block:{ty}"),
            NodeKind::Mark(ty) => write!(f, "mark:{ty}"),
            NodeKind::Inline(ty) => write!(f, "inline:{ty}"),
        }
    }
}

/// A node of the typed document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentNode {
    /// Structural block with its `class` attribute
    Block {
        ty: BlockType,
        class_name: Option<String>,
        children: Vec<DocumentNode>,
    },

    /// Formatting wrapper around inline content
    Mark {
        ty: MarkType,
        children: Vec<DocumentNode>,
    },

    /// Inline node with its `href` attribute
    Inline {
        ty: InlineType,
        href: Option<String>,
        children: Vec<DocumentNode>,
    },

    /// Text leaf, carried through unchanged
    Text(String),
}

impl DocumentNode {
    pub fn block(ty: BlockType, children: Vec<DocumentNode>) -> Self {
        DocumentNode::Block {
            ty,
            class_name: None,
            children,
        }
    }

    pub fn paragraph(children: Vec<DocumentNode>) -> Self {
        Self::block(BlockType::Paragraph, children)
    }

    pub fn mark(ty: MarkType, children: Vec<DocumentNode>) -> Self {
        DocumentNode::Mark { ty, children }
    }

    pub fn link(href: impl Into<String>, children: Vec<DocumentNode>) -> Self {
        DocumentNode::Inline {
            ty: InlineType::Link,
            href: Some(href.into()),
            children,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        DocumentNode::Text(content.into())
    }

    /// Category and type, `None` for text
    pub fn kind(&self) -> Option<NodeKind> {
        match self {
            DocumentNode::Block { ty, .. } => Some(NodeKind::Block(*ty)),
            DocumentNode::Mark { ty, .. } => Some(NodeKind::Mark(*ty)),
            DocumentNode::Inline { ty, .. } => Some(NodeKind::Inline(*ty)),
            DocumentNode::Text(_) => None,
        }
    }

    pub fn children(&self) -> &[DocumentNode] {
        match self {
            DocumentNode::Block { children, .. }
            | DocumentNode::Mark { children, .. }
            | DocumentNode::Inline { children, .. } => children,
            DocumentNode::Text(_) => &[],
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            DocumentNode::Text(content) => content.clone(),
            _ => self.children().iter().map(|c| c.text_content()).collect(),
        }
    }

    /// Check if this node holds no visible text
    pub fn is_blank(&self) -> bool {
        match self {
            DocumentNode::Text(content) => content.trim().is_empty(),
            _ => self.children().iter().all(|c| c.is_blank()),
        }
    }
}
