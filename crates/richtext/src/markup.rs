//! Markup tree consumed by the tag rules.
//!
//! Any HTML parser can convert its output to this structure; [`crate::parse_html`]
//! does so for `scraper`.

/// A node of a parsed HTML fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    Element(Element),
    Text(String),
    Comment(String),
}

impl MarkupNode {
    /// Create an element node without attributes
    pub fn element(tag_name: &str) -> Self {
        MarkupNode::Element(Element::new(tag_name))
    }

    /// Create a text node
    pub fn text(content: &str) -> Self {
        MarkupNode::Text(content.to_string())
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        matches!(self, MarkupNode::Element(_))
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        match self {
            MarkupNode::Element(element) => element.text_content(),
            MarkupNode::Text(content) => content.clone(),
            MarkupNode::Comment(_) => String::new(),
        }
    }
}

/// An element with its attributes in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name, lowercase
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<MarkupNode>,
}

impl Element {
    /// Create an element, lowercasing the tag name
    pub fn new(tag_name: &str) -> Self {
        Self {
            name: tag_name.to_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an element with attributes
    pub fn with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        Self {
            attributes: attrs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Self::new(tag_name)
        }
    }

    /// Get the tag name (lowercase)
    pub fn tag_name(&self) -> &str {
        &self.name
    }

    /// Get an attribute value by name, ignoring case
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Check if an attribute is present
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Attributes as name/value pairs
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Get child nodes
    pub fn children(&self) -> &[MarkupNode] {
        &self.children
    }

    /// Append a child node
    pub fn add_child(&mut self, child: MarkupNode) {
        self.children.push(child);
    }

    /// Builder form of [`Element::add_child`]
    pub fn child(mut self, child: MarkupNode) -> Self {
        self.children.push(child);
        self
    }

    /// Get all text content from descendants
    pub fn text_content(&self) -> String {
        self.children.iter().map(MarkupNode::text_content).collect()
    }
}

impl From<Element> for MarkupNode {
    fn from(element: Element) -> Self {
        MarkupNode::Element(element)
    }
}
