//! HTML parsing support.
//!
//! This module parses HTML strings into the [`Node`] tree butr works on.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::Node;

/// Parse a complete HTML document.
///
/// The returned node is a `#document` whose single child is the `<html>`
/// element; missing `<head>`/`<body>` are filled in by the parser.
///
/// # Example
///
/// ```rust
/// use butr::{parse_document, Filter};
///
/// let page = parse_document("<nav class=\"js-butr-nav\"></nav><h2>Intro</h2>");
/// assert!(page.query(&Filter::class("js-butr-nav")).is_some());
/// ```
pub fn parse_document(html: &str) -> Node {
    let document = Html::parse_document(html);
    let mut root = Node::document();
    root.add_child(scraper_to_node(document.root_element()));
    root
}

/// Parse an HTML fragment into a Node tree rooted at an `<html>` element.
pub fn parse_html(html: &str) -> Node {
    let document = Html::parse_fragment(html);
    scraper_to_node(document.root_element())
}

/// Convert a scraper ElementRef to our Node structure
fn scraper_to_node(element: ElementRef) -> Node {
    let tag = element.value().name();

    // Collect attributes
    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();

    let mut node = Node::element_with_attrs(tag, attrs);

    // Process children
    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                node.add_child(Node::text(&text.text));
            }
            ScraperNode::Comment(comment) => {
                node.add_child(Node::comment(&comment.comment));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(scraper_to_node(child_element));
                }
            }
            _ => {}
        }
    }

    node
}
