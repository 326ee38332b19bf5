//! Rule table for the HTML ⇄ document mapping.

mod rule;
mod standard;

pub use rule::TagRule;
pub use standard::standard_rules;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use richtext_core::{DocumentNode, NodeKind};
use tracing::{trace, warn};

use crate::markup::Element;
use crate::{RichTextError, Result};

static STANDARD: Lazy<TagRules> = Lazy::new(|| {
    TagRules::from_rules(standard_rules()).expect("built-in tag table has duplicate tags")
});

/// Collection of tag rules, looked up by tag name and by node kind
#[derive(Debug, Clone, Default)]
pub struct TagRules {
    /// Every registered tag, in registration order
    by_tag: IndexMap<String, TagRule>,
    /// First tag registered for each kind, used when serializing
    by_kind: IndexMap<NodeKind, String>,
}

impl TagRules {
    /// Create an empty table
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table: p, blockquote, h3, ul, ol, li, em, strong, u, a
    pub fn standard() -> Self {
        STANDARD.clone()
    }

    /// Build a table from rules, rejecting duplicate or invalid tags
    pub fn from_rules(rules: impl IntoIterator<Item = TagRule>) -> Result<Self> {
        let mut table = Self::empty();
        for rule in rules {
            table.add(rule)?;
        }
        Ok(table)
    }

    /// Register a rule. A tag may appear only once across all categories.
    pub fn add(&mut self, rule: TagRule) -> Result<&mut Self> {
        if !is_valid_tag(&rule.tag) {
            warn!(tag = %rule.tag, "rejecting invalid tag name");
            return Err(RichTextError::InvalidTag(rule.tag));
        }
        if self.by_tag.contains_key(&rule.tag) {
            warn!(tag = %rule.tag, "rejecting duplicate tag");
            return Err(RichTextError::DuplicateTag(rule.tag));
        }

        self.by_kind
            .entry(rule.kind)
            .or_insert_with(|| rule.tag.clone());
        self.by_tag.insert(rule.tag.clone(), rule);
        Ok(self)
    }

    /// Find the rule for a tag name, ignoring case
    pub fn for_tag(&self, tag: &str) -> Option<&TagRule> {
        self.by_tag.get(tag.to_lowercase().as_str())
    }

    /// Find the rule used to serialize a kind
    pub fn for_kind(&self, kind: NodeKind) -> Option<&TagRule> {
        self.by_kind.get(&kind).and_then(|tag| self.by_tag.get(tag))
    }

    /// Map an element to a document node. `None` when the tag is not in the
    /// table; the caller keeps the element's children instead.
    pub fn deserialize(
        &self,
        element: &Element,
        next: impl FnOnce(&Element) -> Vec<DocumentNode>,
    ) -> Option<DocumentNode> {
        let rule = self.for_tag(element.tag_name())?;
        trace!(tag = %rule.tag, kind = %rule.kind, "matched tag");
        Some(rule.deserialize(element, next(element)))
    }

    /// Render a node around its rendered children. `None` for text and for
    /// kinds without a rule.
    pub fn serialize(&self, node: &DocumentNode, children: &str) -> Option<String> {
        let rule = self.for_kind(node.kind()?)?;
        Some(rule.serialize(node, children))
    }

    /// Number of registered tags
    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    /// Check if no tag is registered
    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }

    /// Rules in registration order
    pub fn iter(&self) -> impl Iterator<Item = &TagRule> {
        self.by_tag.values()
    }
}

fn is_valid_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
