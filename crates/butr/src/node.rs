//! Owned DOM node tree.
//!
//! butr works on a page held as a tree of [`Node`]s: it reads headings out
//! of it, writes ids back, and appends the generated sidebar and marker.
//! Any parser can build this structure; the `html` feature provides one.

use indexmap::IndexMap;

use crate::utilities::{
    collapse_whitespace, escape_html_attr, escape_html_text, heading_level, is_void,
};

/// Node types matching DOM nodeType values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Element node (nodeType = 1)
    Element = 1,
    /// Text node (nodeType = 3)
    Text = 3,
    /// Comment node (nodeType = 8)
    Comment = 8,
    /// Document node (nodeType = 9)
    Document = 9,
}

/// A DOM node
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Node type
    pub node_type: NodeType,

    /// Lowercase tag name for elements, `#text`, `#comment` or `#document` otherwise
    pub node_name: String,

    /// Text content for text and comment nodes
    pub node_value: Option<String>,

    /// Attributes in source order
    pub attributes: IndexMap<String, String>,

    /// Child nodes
    pub children: Vec<Node>,
}

impl Node {
    fn new(node_type: NodeType, node_name: &str, node_value: Option<&str>) -> Self {
        Self {
            node_type,
            node_name: node_name.to_string(),
            node_value: node_value.map(str::to_string),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self::new(NodeType::Element, &tag_name.to_lowercase(), None)
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let mut node = Self::element(tag_name);
        for (name, value) in attrs {
            node.set_attr(name, value);
        }
        node
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self::new(NodeType::Text, "#text", Some(content))
    }

    /// Create a new comment node
    pub fn comment(content: &str) -> Self {
        Self::new(NodeType::Comment, "#comment", Some(content))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::new(NodeType::Document, "#document", None)
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Get the tag name (lowercase)
    pub fn tag_name(&self) -> &str {
        &self.node_name
    }

    /// Heading rank for `h2`..`h6` elements
    pub fn heading_level(&self) -> Option<u8> {
        if !self.is_element() {
            return None;
        }
        heading_level(&self.node_name)
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(&name.to_lowercase())
            .map(String::as_str)
    }

    /// Check if an attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(&name.to_lowercase())
    }

    /// Set an attribute, keeping its position if it already exists
    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes
            .insert(name.to_lowercase(), value.to_string());
    }

    /// Remove an attribute
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attributes.shift_remove(&name.to_lowercase())
    }

    /// The `id` attribute, if present and non-empty
    pub fn id(&self) -> Option<&str> {
        self.attr("id").filter(|id| !id.is_empty())
    }

    /// Classes from the `class` attribute
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Add a class unless it is empty or already present
    pub fn add_class(&mut self, class: &str) {
        let class = class.trim();
        if class.is_empty() || self.has_class(class) {
            return;
        }
        let value = match self.attr("class").map(str::trim) {
            Some(existing) if !existing.is_empty() => format!("{} {}", existing, class),
            _ => class.to_string(),
        };
        self.set_attr("class", &value);
    }

    pub fn remove_class(&mut self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let value = self
            .classes()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attr("class", &value);
    }

    /// Get an inline style property
    pub fn style(&self, property: &str) -> Option<&str> {
        self.style_declarations()
            .find(|(name, _)| name.eq_ignore_ascii_case(property))
            .map(|(_, value)| value)
    }

    /// Set an inline style property, replacing any previous value
    pub fn set_style(&mut self, property: &str, value: &str) {
        let mut declarations: IndexMap<String, String> = self
            .style_declarations()
            .map(|(name, value)| (name.to_lowercase(), value.to_string()))
            .collect();
        declarations.insert(property.to_lowercase(), value.to_string());

        let style = declarations
            .iter()
            .map(|(name, value)| format!("{}: {};", name, value))
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attr("style", &style);
    }

    fn style_declarations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attr("style")
            .unwrap_or_default()
            .split(';')
            .filter_map(|declaration| {
                let (name, value) = declaration.split_once(':')?;
                Some((name.trim(), value.trim()))
            })
    }

    /// Get all child nodes
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children().filter(|n| n.is_element())
    }

    /// Add a child node
    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        match self.node_type {
            NodeType::Text => self.node_value.clone().unwrap_or_default(),
            NodeType::Comment => String::new(),
            _ => self
                .children()
                .map(|child| child.text_content())
                .collect::<Vec<_>>()
                .join(""),
        }
    }

    /// Text as a reader sees it: whitespace collapsed and trimmed
    pub fn inner_text(&self) -> String {
        collapse_whitespace(&self.text_content())
    }

    /// Serialize this node and its descendants
    pub fn outer_html(&self) -> String {
        match self.node_type {
            NodeType::Text => escape_html_text(self.node_value.as_deref().unwrap_or_default()),
            NodeType::Comment => {
                format!("<!--{}-->", self.node_value.as_deref().unwrap_or_default())
            }
            NodeType::Element => {
                let tag = self.tag_name();
                let attrs = self.attributes_string();
                let open = if attrs.is_empty() {
                    format!("<{}>", tag)
                } else {
                    format!("<{} {}>", tag, attrs)
                };

                if is_void(tag) {
                    open
                } else {
                    format!("{}{}</{}>", open, self.inner_html(), tag)
                }
            }
            NodeType::Document => self.inner_html(),
        }
    }

    /// Serialize the children of this node
    pub fn inner_html(&self) -> String {
        self.children()
            .map(|child| child.outer_html())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Get attributes as a string for HTML output
    fn attributes_string(&self) -> String {
        self.attributes
            .iter()
            .map(|(name, value)| {
                if value.is_empty() {
                    name.clone()
                } else {
                    format!("{}=\"{}\"", name, escape_html_attr(value))
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_element() {
        let node = Node::element("DIV");
        assert!(node.is_element());
        assert_eq!(node.tag_name(), "div");
    }

    #[test]
    fn test_create_text() {
        let node = Node::text("Hello World");
        assert!(node.is_text());
        assert_eq!(node.text_content(), "Hello World");
    }

    #[test]
    fn test_attributes() {
        let mut node = Node::element_with_attrs("a", vec![("HREF", "#intro"), ("title", "Intro")]);
        assert_eq!(node.attr("href"), Some("#intro"));
        assert_eq!(node.attr("title"), Some("Intro"));
        assert_eq!(node.attr("class"), None);

        node.set_attr("href", "#usage");
        assert_eq!(node.outer_html(), "<a href=\"#usage\" title=\"Intro\"></a>");

        assert_eq!(node.remove_attr("title"), Some("Intro".to_string()));
        assert!(!node.has_attr("title"));
    }

    #[test]
    fn test_empty_id_is_none() {
        let node = Node::element_with_attrs("h2", vec![("id", "")]);
        assert_eq!(node.id(), None);
    }

    #[test]
    fn test_classes() {
        let mut node = Node::element_with_attrs("a", vec![("class", " js-butr-link ")]);
        assert!(node.has_class("js-butr-link"));

        node.add_class("js-butr-active");
        node.add_class("js-butr-active");
        node.add_class("");
        assert_eq!(node.attr("class"), Some("js-butr-link js-butr-active"));

        node.remove_class("js-butr-link");
        assert_eq!(node.attr("class"), Some("js-butr-active"));
        assert!(!node.has_class("js-butr-link"));
    }

    #[test]
    fn test_styles() {
        let mut node = Node::element_with_attrs("div", vec![("style", "height: 20px")]);
        node.set_style("transform", "translateY(10px)");
        node.set_style("height", "24px");

        assert_eq!(node.style("height"), Some("24px"));
        assert_eq!(node.style("transform"), Some("translateY(10px)"));
        assert_eq!(
            node.attr("style"),
            Some("height: 24px; transform: translateY(10px);")
        );
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(Node::element("h3").heading_level(), Some(3));
        assert_eq!(Node::element("h1").heading_level(), None);
        assert_eq!(Node::text("h2").heading_level(), None);
    }

    #[test]
    fn test_text_content() {
        let mut div = Node::element("div");
        div.add_child(Node::text("  Hello \n"));
        let mut span = Node::element("span");
        span.add_child(Node::text("World  "));
        div.add_child(span);
        div.add_child(Node::comment("ignored"));

        assert_eq!(div.text_content(), "  Hello \nWorld  ");
        assert_eq!(div.inner_text(), "Hello World");
    }

    #[test]
    fn test_outer_html_escapes() {
        let mut li = Node::element("li");
        li.add_child(Node::text("Fish & <Chips>"));
        assert_eq!(li.outer_html(), "<li>Fish &amp; &lt;Chips&gt;</li>");
    }

    #[test]
    fn test_void_element_html() {
        let br = Node::element("br");
        assert_eq!(br.outer_html(), "<br>");

        let img = Node::element_with_attrs("img", vec![("src", "test.png"), ("alt", "Test")]);
        assert_eq!(img.outer_html(), "<img src=\"test.png\" alt=\"Test\">");
    }

    #[test]
    fn test_children() {
        let mut parent = Node::element("div");
        parent.add_child(Node::text("Hello"));
        parent.add_child(Node::element("span"));
        parent.add_child(Node::comment("note"));

        assert_eq!(parent.children().count(), 3);
        assert_eq!(parent.element_children().count(), 1);
        assert_eq!(parent.outer_html(), "<div>Hello<span></span><!--note--></div>");
    }
}
