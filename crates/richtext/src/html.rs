//! HTML parsing support.
//!
//! This module parses HTML strings with `scraper` and converts them to the
//! [`MarkupNode`] tree the tag rules consume.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::markup::{Element, MarkupNode};

/// Parse an HTML fragment into its top-level markup nodes.
///
/// # Example
///
/// ```rust
/// use richtext::{parse_html, MarkupNode};
///
/// let nodes = parse_html("<p>Hello <em>World</em></p>");
/// assert_eq!(nodes.len(), 1);
/// assert_eq!(nodes[0].text_content(), "Hello World");
/// ```
pub fn parse_html(html: &str) -> Vec<MarkupNode> {
    let fragment = Html::parse_fragment(html);
    convert_children(fragment.root_element())
}

fn convert_children(element: ElementRef) -> Vec<MarkupNode> {
    let mut nodes = Vec::new();
    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => nodes.push(MarkupNode::Text(text.text.to_string())),
            ScraperNode::Comment(comment) => {
                nodes.push(MarkupNode::Comment(comment.comment.to_string()))
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    nodes.push(MarkupNode::Element(convert_element(child_element)));
                }
            }
            _ => {}
        }
    }
    nodes
}

/// Convert a scraper ElementRef to our Element structure
fn convert_element(element: ElementRef) -> Element {
    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();
    let mut converted = Element::with_attrs(element.value().name(), attrs);
    for child in convert_children(element) {
        converted.add_child(child);
    }
    converted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fragment_top_level() {
        let nodes = parse_html("<p>a</p><ul><li>b</li></ul>");
        assert_eq!(nodes.len(), 2);
        let MarkupNode::Element(list) = &nodes[1] else {
            panic!("expected element")
        };
        assert_eq!(list.tag_name(), "ul");
        assert_eq!(list.children().len(), 1);
    }

    #[test]
    fn test_parse_keeps_attributes_and_comments() {
        let nodes = parse_html(r#"<!-- c --><P CLASS="x">hi</P>"#);
        assert_eq!(nodes[0], MarkupNode::Comment(" c ".to_string()));
        let MarkupNode::Element(p) = &nodes[1] else {
            panic!("expected element")
        };
        assert_eq!(p.tag_name(), "p");
        assert_eq!(p.attr("class"), Some("x"));
    }

    #[test]
    fn test_parse_loose_text() {
        let nodes = parse_html("just text");
        assert_eq!(nodes, vec![MarkupNode::text("just text")]);
    }
}
