//! A single tag ↔ type mapping.

use richtext_core::{BlockType, DocumentNode, InlineType, MarkType, NodeKind};

use crate::markup::Element;
use crate::utilities::escape_attr;

/// Maps one markup tag to one semantic type, both ways
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRule {
    /// Tag name, lowercase
    pub tag: String,
    /// Category and type the tag stands for
    pub kind: NodeKind,
    /// Whether serialization re-emits the modeled attribute
    pub carries_attribute: bool,
}

impl TagRule {
    fn new(tag: &str, kind: NodeKind) -> Self {
        Self {
            tag: tag.to_lowercase(),
            kind,
            carries_attribute: false,
        }
    }

    /// Rule for a block tag
    pub fn block(tag: &str, ty: BlockType) -> Self {
        Self::new(tag, NodeKind::Block(ty))
    }

    /// Rule for a mark tag
    pub fn mark(tag: &str, ty: MarkType) -> Self {
        Self::new(tag, NodeKind::Mark(ty))
    }

    /// Rule for an inline tag
    pub fn inline(tag: &str, ty: InlineType) -> Self {
        Self::new(tag, NodeKind::Inline(ty))
    }

    /// Re-emit `class` (blocks) or `href` (inlines) when serializing
    pub fn carrying_attribute(mut self) -> Self {
        self.carries_attribute = true;
        self
    }

    /// Name of the attribute this rule's category models
    pub fn attribute_name(&self) -> Option<&'static str> {
        match self.kind {
            NodeKind::Block(_) => Some("class"),
            NodeKind::Inline(_) => Some("href"),
            NodeKind::Mark(_) => None,
        }
    }

    /// Build the node for a matched element. `children` are the element's
    /// already deserialized children.
    pub fn deserialize(&self, element: &Element, children: Vec<DocumentNode>) -> DocumentNode {
        let attribute = self
            .attribute_name()
            .and_then(|name| element.attr(name))
            .map(str::to_string);

        match self.kind {
            NodeKind::Block(ty) => DocumentNode::Block {
                ty,
                class_name: attribute,
                children,
            },
            NodeKind::Mark(ty) => DocumentNode::Mark { ty, children },
            NodeKind::Inline(ty) => DocumentNode::Inline {
                ty,
                href: attribute,
                children,
            },
        }
    }

    /// Wrap rendered children in this rule's tag
    pub fn serialize(&self, node: &DocumentNode, children: &str) -> String {
        let value = match node {
            DocumentNode::Block { class_name, .. } => class_name.as_deref(),
            DocumentNode::Inline { href, .. } => href.as_deref(),
            _ => None,
        };

        match (self.carries_attribute, self.attribute_name(), value) {
            (true, Some(name), Some(value)) => format!(
                "<{tag} {name}=\"{value}\">{children}</{tag}>",
                tag = self.tag,
                value = escape_attr(value),
            ),
            _ => format!("<{tag}>{children}</{tag}>", tag = self.tag),
        }
    }
}
