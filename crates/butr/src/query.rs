//! Element lookup in a [`Node`] tree.
//!
//! Matches are returned as index paths from the queried node so callers can
//! come back for a mutable borrow with [`Node::node_at_mut`] after the
//! read-only pass.

use crate::node::Node;
use crate::{ButrError, Result};

/// Child indices leading from a root node to one of its descendants
pub type NodePath = Vec<usize>;

/// A filter determines which elements a query matches
pub enum Filter {
    /// Match a single tag name
    TagName(String),
    /// Match any of multiple tag names
    TagNames(Vec<String>),
    /// Match elements carrying a class
    Class(String),
    /// Match the element with an id
    Id(String),
    /// Match elements that have an attribute
    Attribute(String),
    /// Match only if every filter matches
    All(Vec<Filter>),
    /// Match using a predicate function
    Predicate(Box<dyn Fn(&Node) -> bool + Send + Sync>),
}

impl Filter {
    /// Create a filter for a single tag
    pub fn tag(name: &str) -> Self {
        Filter::TagName(name.to_lowercase())
    }

    /// Create a filter for multiple tags
    pub fn tags(names: &[&str]) -> Self {
        Filter::TagNames(names.iter().map(|s| s.to_lowercase()).collect())
    }

    pub fn class(name: &str) -> Self {
        Filter::Class(name.to_string())
    }

    pub fn id(id: &str) -> Self {
        Filter::Id(id.to_string())
    }

    pub fn attr(name: &str) -> Self {
        Filter::Attribute(name.to_lowercase())
    }

    /// Create a filter with a predicate
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Node) -> bool + Send + Sync + 'static,
    {
        Filter::Predicate(Box::new(f))
    }

    /// Parse a simple compound selector such as `div`, `.js-butr-nav`,
    /// `#content` or `a[data-butr]`.
    ///
    /// Combinators, attribute values and pseudo classes are not supported.
    pub fn parse(selector: &str) -> Result<Self> {
        let invalid = || ButrError::InvalidSelector(selector.to_string());
        let selector = selector.trim();
        if selector.is_empty() {
            return Err(invalid());
        }

        let mut parts = Vec::new();
        let mut rest = selector;

        let tag_len = rest
            .find(|c: char| matches!(c, '.' | '#' | '['))
            .unwrap_or(rest.len());
        if tag_len > 0 {
            let tag = &rest[..tag_len];
            if !is_name(tag) {
                return Err(invalid());
            }
            parts.push(Filter::tag(tag));
            rest = &rest[tag_len..];
        }

        while let Some(marker) = rest.chars().next() {
            if !matches!(marker, '.' | '#' | '[') {
                return Err(invalid());
            }
            rest = &rest[1..];
            let (name, remaining) = if marker == '[' {
                let end = rest.find(']').ok_or_else(invalid)?;
                (&rest[..end], &rest[end + 1..])
            } else {
                let end = rest
                    .find(|c: char| matches!(c, '.' | '#' | '['))
                    .unwrap_or(rest.len());
                (&rest[..end], &rest[end..])
            };
            if !is_name(name) {
                return Err(invalid());
            }
            parts.push(match marker {
                '.' => Filter::class(name),
                '#' => Filter::id(name),
                _ => Filter::attr(name),
            });
            rest = remaining;
        }

        Ok(if parts.len() == 1 {
            parts.remove(0)
        } else {
            Filter::All(parts)
        })
    }

    /// Check if this filter matches a node; non-elements never match
    pub fn matches(&self, node: &Node) -> bool {
        if !node.is_element() {
            return false;
        }
        match self {
            Filter::TagName(t) => node.tag_name() == t,
            Filter::TagNames(tags) => tags.iter().any(|t| node.tag_name() == t),
            Filter::Class(class) => node.has_class(class),
            Filter::Id(id) => node.id() == Some(id.as_str()),
            Filter::Attribute(name) => node.has_attr(name),
            Filter::All(filters) => filters.iter().all(|f| f.matches(node)),
            Filter::Predicate(f) => f(node),
        }
    }
}

fn is_name(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

impl Node {
    /// Descendant at `path`; the empty path is the node itself
    pub fn node_at(&self, path: &[usize]) -> Option<&Node> {
        path.iter()
            .try_fold(self, |node, &index| node.children.get(index))
    }

    /// Mutable descendant at `path`
    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        path.iter()
            .try_fold(self, |node, &index| node.children.get_mut(index))
    }

    /// Path of the first descendant matching `filter`, in document order
    pub fn find_first(&self, filter: &Filter) -> Option<NodePath> {
        let mut path = Vec::new();
        find_first_in(self, filter, &mut path).then_some(path)
    }

    /// Paths of all descendants matching `filter`, in document order
    pub fn find_all(&self, filter: &Filter) -> Vec<NodePath> {
        let mut found = Vec::new();
        collect_matches(self, filter, &mut Vec::new(), &mut found);
        found
    }

    /// First descendant matching `filter`
    pub fn query(&self, filter: &Filter) -> Option<&Node> {
        self.find_first(filter)
            .and_then(|path| self.node_at(&path))
    }

    /// All descendants matching `filter`
    pub fn query_all(&self, filter: &Filter) -> Vec<&Node> {
        self.find_all(filter)
            .iter()
            .filter_map(|path| self.node_at(path))
            .collect()
    }
}

fn find_first_in(node: &Node, filter: &Filter, path: &mut NodePath) -> bool {
    for (index, child) in node.children.iter().enumerate() {
        path.push(index);
        if filter.matches(child) || find_first_in(child, filter, path) {
            return true;
        }
        path.pop();
    }
    false
}

fn collect_matches(node: &Node, filter: &Filter, path: &mut NodePath, found: &mut Vec<NodePath>) {
    for (index, child) in node.children.iter().enumerate() {
        path.push(index);
        if filter.matches(child) {
            found.push(path.clone());
        }
        collect_matches(child, filter, path, found);
        path.pop();
    }
}

/// Join a path found inside a subtree onto the path of that subtree
pub fn join_path(base: &[usize], relative: &[usize]) -> NodePath {
    base.iter().chain(relative).copied().collect()
}
