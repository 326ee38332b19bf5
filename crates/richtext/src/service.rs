//! HtmlSerializer - converts between HTML strings and documents.

use std::sync::Arc;

use once_cell::sync::Lazy;
#[cfg(feature = "html")]
use richtext_core::BlockType;
use richtext_core::{Document, DocumentNode};
use tracing::{debug, trace};

use crate::markup::{Element, MarkupNode};
use crate::rules::TagRules;
use crate::utilities::{escape_text, is_void};

static SHARED: Lazy<Arc<HtmlSerializer>> = Lazy::new(|| Arc::new(HtmlSerializer::new()));

/// Serializer driven by a [`TagRules`] table
#[derive(Debug, Clone)]
pub struct HtmlSerializer {
    rules: TagRules,
}

impl HtmlSerializer {
    /// Create a serializer with the standard rules
    pub fn new() -> Self {
        Self::with_rules(TagRules::standard())
    }

    /// Create a serializer with a custom rule table
    pub fn with_rules(rules: TagRules) -> Self {
        Self { rules }
    }

    /// The process-wide serializer with the standard rules
    pub fn shared() -> Arc<HtmlSerializer> {
        Arc::clone(&SHARED)
    }

    /// Get the rule table
    pub fn rules(&self) -> &TagRules {
        &self.rules
    }

    /// Parse an HTML fragment into document nodes
    #[cfg(feature = "html")]
    pub fn deserialize_nodes(&self, html: &str) -> Vec<DocumentNode> {
        self.deserialize_markup(&crate::html::parse_html(html))
    }

    /// Parse an HTML fragment into a normalized document
    #[cfg(feature = "html")]
    pub fn deserialize(&self, html: &str, default_block: BlockType) -> Document {
        Document::from_nodes(self.deserialize_nodes(html), default_block)
    }

    /// Map markup nodes through the rule table
    pub fn deserialize_markup(&self, nodes: &[MarkupNode]) -> Vec<DocumentNode> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            match node {
                MarkupNode::Text(text) => out.push(DocumentNode::Text(text.clone())),
                MarkupNode::Comment(_) => trace!("dropping comment"),
                MarkupNode::Element(element) => self.deserialize_element(element, &mut out),
            }
        }
        out
    }

    fn deserialize_element(&self, element: &Element, out: &mut Vec<DocumentNode>) {
        if is_void(element.tag_name()) {
            out.push(DocumentNode::text("\n"));
            return;
        }

        let next = |el: &Element| self.deserialize_markup(el.children());
        match self.rules.deserialize(element, next) {
            Some(node) => out.push(node),
            None => {
                debug!(tag = element.tag_name(), "no rule for tag, keeping children");
                out.extend(self.deserialize_markup(element.children()));
            }
        }
    }

    /// Render document nodes to HTML
    pub fn serialize_nodes(&self, nodes: &[DocumentNode]) -> String {
        nodes.iter().map(|node| self.serialize_node(node)).collect()
    }

    /// Render a document to HTML
    pub fn serialize(&self, document: &Document) -> String {
        self.serialize_nodes(&document.to_nodes())
    }

    fn serialize_node(&self, node: &DocumentNode) -> String {
        if let DocumentNode::Text(content) = node {
            return render_text(content);
        }

        let children = self.serialize_nodes(node.children());
        match self.rules.serialize(node, &children) {
            Some(markup) => markup,
            None => {
                trace!(kind = ?node.kind(), "no rule for node, rendering children");
                children
            }
        }
    }
}

impl Default for HtmlSerializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape text, rendering line breaks as `<br>`
fn render_text(content: &str) -> String {
    content
        .split('\n')
        .map(escape_text)
        .collect::<Vec<_>>()
        .join("<br>")
}

#[cfg(all(test, feature = "html"))]
mod tests {
    use super::*;
    use crate::rules::TagRule;
    use richtext_core::{InlineType, MarkType, NodeKind};

    #[test]
    fn test_every_tag_round_trips() {
        let serializer = HtmlSerializer::new();
        let cases = [
            (NodeKind::Block(BlockType::Paragraph), r#"<p class="lead">p</p>"#),
            (NodeKind::Block(BlockType::BlockQuote), "<blockquote>q</blockquote>"),
            (NodeKind::Block(BlockType::Heading), "<h3>h</h3>"),
            (NodeKind::Block(BlockType::BulletedList), "<ul><li>b</li></ul>"),
            (NodeKind::Block(BlockType::NumberedList), "<ol><li>n</li></ol>"),
            (NodeKind::Block(BlockType::ListItem), "<ul><li>i</li><li>j</li></ul>"),
            (NodeKind::Mark(MarkType::Bold), "<p><strong>b</strong></p>"),
            (NodeKind::Mark(MarkType::Italic), "<p><em>i</em></p>"),
            (NodeKind::Mark(MarkType::Underlined), "<p><u>u</u></p>"),
            (NodeKind::Inline(InlineType::Link), r#"<p><a href="/x">a</a></p>"#),
        ];
        assert_eq!(cases.len(), serializer.rules().len());

        let kinds = BlockType::ALL
            .into_iter()
            .map(NodeKind::Block)
            .chain(MarkType::ALL.into_iter().map(NodeKind::Mark))
            .chain([NodeKind::Inline(InlineType::Link)]);
        for kind in kinds {
            let (_, html) = cases
                .iter()
                .find(|(case, _)| *case == kind)
                .unwrap_or_else(|| panic!("no case for {kind}"));
            let tag = &serializer.rules().for_kind(kind).unwrap().tag;
            assert!(html.contains(&format!("<{tag}")), "{kind} case lacks <{tag}>");

            let nodes = serializer.deserialize_nodes(html);
            assert_eq!(serializer.serialize_nodes(&nodes), *html, "nodes for {kind}");

            let document = serializer.deserialize(html, BlockType::Paragraph);
            assert_eq!(serializer.serialize(&document), *html, "document for {kind}");
        }
    }

    #[test]
    fn test_paragraph_class_round_trip() {
        let serializer = HtmlSerializer::new();
        let nodes = serializer.deserialize_nodes(r#"<p class="x">hi</p>"#);

        assert_eq!(
            nodes,
            vec![DocumentNode::Block {
                ty: BlockType::Paragraph,
                class_name: Some("x".to_string()),
                children: vec![DocumentNode::text("hi")],
            }]
        );
        assert_eq!(serializer.serialize_nodes(&nodes), r#"<p class="x">hi</p>"#);
    }

    #[test]
    fn test_link_drops_other_attributes() {
        let serializer = HtmlSerializer::new();
        let nodes = serializer.deserialize_nodes(r#"<a href="/x" target="_blank">t</a>"#);

        assert_eq!(
            nodes,
            vec![DocumentNode::Inline {
                ty: InlineType::Link,
                href: Some("/x".to_string()),
                children: vec![DocumentNode::text("t")],
            }]
        );
        assert_eq!(serializer.serialize_nodes(&nodes), r#"<a href="/x">t</a>"#);
    }

    #[test]
    fn test_only_paragraph_keeps_class() {
        let serializer = HtmlSerializer::new();
        let nodes = serializer.deserialize_nodes(r#"<h3 class="title">T</h3>"#);

        assert_eq!(
            nodes,
            vec![DocumentNode::Block {
                ty: BlockType::Heading,
                class_name: Some("title".to_string()),
                children: vec![DocumentNode::text("T")],
            }]
        );
        assert_eq!(serializer.serialize_nodes(&nodes), "<h3>T</h3>");
    }

    #[test]
    fn test_unknown_tags_keep_children() {
        let serializer = HtmlSerializer::new();
        let nodes = serializer.deserialize_nodes("<div><span>a</span><!-- c --><em>b</em></div>");

        assert_eq!(
            nodes,
            vec![
                DocumentNode::text("a"),
                DocumentNode::mark(MarkType::Italic, vec![DocumentNode::text("b")]),
            ]
        );
    }

    #[test]
    fn test_unmapped_kind_renders_children() {
        let serializer = HtmlSerializer::with_rules(
            TagRules::from_rules(vec![TagRule::block("p", BlockType::Paragraph)]).unwrap(),
        );
        let nodes = vec![DocumentNode::paragraph(vec![
            DocumentNode::mark(MarkType::Bold, vec![DocumentNode::text("b")]),
            DocumentNode::link("/x", vec![DocumentNode::text("l")]),
        ])];

        assert_eq!(serializer.serialize_nodes(&nodes), "<p>bl</p>");
    }

    #[test]
    fn test_line_break_round_trip() {
        let serializer = HtmlSerializer::new();
        let document = serializer.deserialize("<p>a<br>b</p>", BlockType::Paragraph);

        assert_eq!(document.text(), "a\nb");
        assert_eq!(serializer.serialize(&document), "<p>a<br>b</p>");
    }

    #[test]
    fn test_text_is_escaped() {
        let serializer = HtmlSerializer::new();
        let document =
            serializer.deserialize("<p>1 &lt; 2 &amp;&amp; 3 &gt; 2</p>", BlockType::Paragraph);

        assert_eq!(document.text(), "1 < 2 && 3 > 2");
        assert_eq!(
            serializer.serialize(&document),
            "<p>1 &lt; 2 &amp;&amp; 3 &gt; 2</p>"
        );
    }

    #[test]
    fn test_stray_text_is_wrapped() {
        let serializer = HtmlSerializer::new();
        let document =
            serializer.deserialize("hello <strong>there</strong>", BlockType::Paragraph);

        assert_eq!(
            serializer.serialize(&document),
            "<p>hello <strong>there</strong></p>"
        );
    }

    #[test]
    fn test_nested_marks_and_lists() {
        let serializer = HtmlSerializer::new();
        let html = "<ul><li><em><strong>a</strong></em></li><li>b</li></ul><blockquote>q</blockquote>";
        let document = serializer.deserialize(html, BlockType::Paragraph);

        assert_eq!(serializer.serialize(&document), html);
    }

    #[test]
    fn test_shared_is_one_instance() {
        let a = HtmlSerializer::shared();
        let b = HtmlSerializer::shared();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.rules().len(), 10);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn paragraph_text_survives_round_trip(text in "[a-zA-Z0-9 <>&\"'\n]{0,24}") {
                let serializer = HtmlSerializer::new();
                let document = Document::from_nodes(
                    vec![DocumentNode::paragraph(vec![DocumentNode::text(text)])],
                    BlockType::Paragraph,
                );

                let html = serializer.serialize(&document);
                prop_assert_eq!(serializer.deserialize(&html, BlockType::Paragraph), document);
            }
        }
    }
}
