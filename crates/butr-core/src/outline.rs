//! Heading outline builder
//!
//! Turns the flat, document-ordered list of page headings into the nested
//! outline a sidebar is rendered from.

use std::collections::HashSet;

use tracing::debug;

use crate::slug::AnchorRegistry;

/// A heading as found in the page, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingNode {
    /// Heading rank taken from the tag (2 for `h2` ... 6 for `h6`)
    pub level: u8,

    /// Visible text of the heading
    pub text: String,

    /// Existing `id` attribute, if the heading has one
    pub id: Option<String>,
}

impl HeadingNode {
    /// Create a heading without an id
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            id: None,
        }
    }

    /// Attach an existing id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    fn existing_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// One entry of the generated outline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineItem {
    /// Heading text shown in the nav
    pub label: String,

    /// Fragment reference (`#id`) the nav link points at
    pub anchor: String,

    /// Nested headings
    pub children: Vec<OutlineItem>,
}

impl OutlineItem {
    /// The anchor without its leading `#`
    pub fn id(&self) -> &str {
        self.anchor.trim_start_matches('#')
    }
}

/// The nested outline built from a page's headings
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outline {
    items: Vec<OutlineItem>,
    ids: Vec<String>,
}

impl Outline {
    /// Top level items
    pub fn items(&self) -> &[OutlineItem] {
        &self.items
    }

    /// Consume the outline, returning the top level items
    pub fn into_items(self) -> Vec<OutlineItem> {
        self.items
    }

    /// The id used for each input heading, in input order.
    ///
    /// Headings that arrived without an id, or with an id already used by
    /// an earlier heading, need this value written back so the generated
    /// links resolve.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of items in the whole tree
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Pre-order traversal yielding `(depth, item)`; top level items have depth 0
    pub fn iter(&self) -> OutlineIter<'_> {
        OutlineIter {
            stack: self.items.iter().rev().map(|item| (0, item)).collect(),
        }
    }
}

/// Pre-order iterator over an [`Outline`]
pub struct OutlineIter<'a> {
    stack: Vec<(usize, &'a OutlineItem)>,
}

impl<'a> Iterator for OutlineIter<'a> {
    type Item = (usize, &'a OutlineItem);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, item) = self.stack.pop()?;
        self.stack
            .extend(item.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, item))
    }
}

/// Arena slot used while the tree is being built
struct Entry {
    label: String,
    anchor: String,
    children: Vec<usize>,
}

/// Build the nested outline for a sequence of headings.
///
/// Headings nest under the closest preceding heading of a shallower rank.
/// Skipped ranks (an `h2` followed directly by an `h4`) never produce empty
/// intermediate levels: the deeper heading becomes a direct child, and the
/// correction is carried until the next rank decrease so the tree unwinds
/// to the right depth.
///
/// ```rust
/// use butr_core::{build_outline, HeadingNode};
///
/// let outline = build_outline(&[
///     HeadingNode::new(2, "A"),
///     HeadingNode::new(4, "A1"),
///     HeadingNode::new(2, "B"),
/// ]);
///
/// let items = outline.items();
/// assert_eq!(items.len(), 2);
/// assert_eq!(items[0].children[0].label, "A1");
/// assert!(items[1].children.is_empty());
/// ```
pub fn build_outline(headings: &[HeadingNode]) -> Outline {
    let mut registry = AnchorRegistry::new();
    for id in headings.iter().filter_map(HeadingNode::existing_id) {
        registry.reserve(id);
    }

    let mut arena: Vec<Entry> = Vec::with_capacity(headings.len());
    let mut roots: Vec<usize> = Vec::new();
    let mut ids = Vec::with_capacity(headings.len());
    let mut claimed: HashSet<&str> = HashSet::new();

    // Insertion points; `None` is the top level of the outline
    let mut stack: Vec<Option<usize>> = vec![None];
    let mut offset: i32 = 0;

    for (index, heading) in headings.iter().enumerate() {
        let current = i32::from(heading.level) - offset;
        let next = headings
            .get(index + 1)
            .map(|next| i32::from(next.level) - offset);

        // A repeated page id only stays with its first heading
        let id = match heading.existing_id() {
            Some(id) if claimed.insert(id) => id.to_string(),
            Some(id) => {
                debug!(
                    id,
                    heading = %heading.text,
                    "duplicate heading id, generating a new one"
                );
                registry.generate(&heading.text)
            }
            None => registry.generate(&heading.text),
        };

        let slot = arena.len();
        arena.push(Entry {
            label: heading.text.clone(),
            anchor: format!("#{}", id),
            children: Vec::new(),
        });
        ids.push(id);

        match stack.last().copied().flatten() {
            Some(parent) => arena[parent].children.push(slot),
            None => roots.push(slot),
        }

        let Some(next) = next else {
            continue;
        };

        if next > current {
            let skipped = next - current - 1;
            if skipped > 0 {
                offset += skipped;
                debug!(
                    heading = %heading.text,
                    skipped,
                    offset,
                    "heading rank skips levels, nesting one level deeper"
                );
            }
            stack.push(Some(slot));
        } else if next < current {
            let target = next + offset;
            for _ in 0..(current - target) {
                if stack.len() > 1 {
                    stack.pop();
                }
            }
            offset = 0;
        }
    }

    Outline {
        items: materialize(arena, &roots),
        ids,
    }
}

/// Turn the index-linked arena into owned items.
///
/// Children are always pushed after their parent, so walking the arena
/// backwards finishes every child before its parent needs it.
fn materialize(arena: Vec<Entry>, roots: &[usize]) -> Vec<OutlineItem> {
    let mut built: Vec<Option<OutlineItem>> = (0..arena.len()).map(|_| None).collect();

    for (index, entry) in arena.into_iter().enumerate().rev() {
        let children = entry
            .children
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[index] = Some(OutlineItem {
            label: entry.label,
            anchor: entry.anchor,
            children,
        });
    }

    roots.iter().filter_map(|&root| built[root].take()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headings(levels: &[(u8, &str)]) -> Vec<HeadingNode> {
        levels
            .iter()
            .map(|(level, text)| HeadingNode::new(*level, *text))
            .collect()
    }

    fn labels(items: &[OutlineItem]) -> Vec<&str> {
        items.iter().map(|item| item.label.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        let outline = build_outline(&[]);
        assert!(outline.is_empty());
        assert!(outline.items().is_empty());
    }

    #[test]
    fn test_siblings_and_children() {
        let outline = build_outline(&headings(&[(2, "A"), (3, "A1"), (3, "A2"), (2, "B")]));
        let items = outline.items();

        assert_eq!(labels(items), ["A", "B"]);
        assert_eq!(labels(&items[0].children), ["A1", "A2"]);
        assert!(items[0].children.iter().all(|c| c.children.is_empty()));
        assert!(items[1].children.is_empty());
    }

    #[test]
    fn test_skipped_level_becomes_direct_child() {
        let outline = build_outline(&headings(&[(2, "A"), (4, "A1")]));
        let items = outline.items();

        assert_eq!(labels(items), ["A"]);
        assert_eq!(labels(&items[0].children), ["A1"]);
        assert!(items[0].children[0].children.is_empty());
    }

    #[test]
    fn test_skipped_level_unwinds_to_top() {
        let outline = build_outline(&headings(&[(2, "A"), (4, "A1"), (2, "B")]));
        let items = outline.items();

        assert_eq!(labels(items), ["A", "B"]);
        assert_eq!(labels(&items[0].children), ["A1"]);
    }

    #[test]
    fn test_repeated_skips_accumulate() {
        let outline = build_outline(&headings(&[
            (2, "A"),
            (4, "A1"),
            (6, "A1a"),
            (3, "A2"),
            (2, "B"),
        ]));
        let items = outline.items();

        assert_eq!(labels(items), ["A", "B"]);
        assert_eq!(labels(&items[0].children), ["A1", "A2"]);
        assert_eq!(labels(&items[0].children[0].children), ["A1a"]);
    }

    #[test]
    fn test_skip_then_deeper_by_one() {
        let outline = build_outline(&headings(&[(2, "A"), (4, "A1"), (5, "A1a"), (2, "B")]));
        let items = outline.items();

        assert_eq!(labels(items), ["A", "B"]);
        assert_eq!(labels(&items[0].children[0].children), ["A1a"]);
    }

    #[test]
    fn test_multi_level_decrease() {
        let outline = build_outline(&headings(&[(2, "A"), (3, "B"), (4, "C"), (2, "D")]));
        let items = outline.items();

        assert_eq!(labels(items), ["A", "D"]);
        assert_eq!(labels(&items[0].children), ["B"]);
        assert_eq!(labels(&items[0].children[0].children), ["C"]);
    }

    #[test]
    fn test_first_heading_deeper_than_rest() {
        let outline = build_outline(&headings(&[(3, "Intro"), (2, "A"), (2, "B")]));
        assert_eq!(labels(outline.items()), ["Intro", "A", "B"]);
    }

    #[test]
    fn test_pre_order_matches_input_order() {
        let input = headings(&[
            (2, "a"),
            (3, "b"),
            (4, "c"),
            (4, "d"),
            (3, "e"),
            (2, "f"),
            (3, "g"),
            (2, "h"),
        ]);
        let outline = build_outline(&input);

        let order: Vec<&str> = outline.iter().map(|(_, item)| item.label.as_str()).collect();
        assert_eq!(order, ["a", "b", "c", "d", "e", "f", "g", "h"]);

        let depths: Vec<usize> = outline.iter().map(|(depth, _)| depth).collect();
        assert_eq!(depths, [0, 1, 2, 2, 1, 0, 1, 0]);
        assert_eq!(outline.len(), input.len());
    }

    #[test]
    fn test_anchors_from_text_and_existing_ids() {
        let outline = build_outline(&[
            HeadingNode::new(2, "Getting Started!"),
            HeadingNode::new(3, "Install").with_id("setup"),
        ]);

        assert_eq!(outline.items()[0].anchor, "#getting-started");
        assert_eq!(outline.items()[0].children[0].anchor, "#setup");
        assert_eq!(outline.items()[0].children[0].id(), "setup");
        assert_eq!(outline.ids(), ["getting-started", "setup"]);
    }

    #[test]
    fn test_duplicate_labels_get_unique_anchors() {
        let outline = build_outline(&headings(&[(2, "Options"), (3, "Options"), (2, "Options")]));
        let anchors: Vec<&str> = outline.iter().map(|(_, item)| item.anchor.as_str()).collect();
        assert_eq!(anchors, ["#options", "#options-2", "#options-3"]);
    }

    #[test]
    fn test_generated_anchor_avoids_existing_id() {
        let outline = build_outline(&[
            HeadingNode::new(2, "Usage"),
            HeadingNode::new(2, "Other").with_id("usage"),
        ]);
        assert_eq!(outline.ids(), ["usage-2", "usage"]);
    }

    #[test]
    fn test_duplicate_existing_ids_get_unique_anchors() {
        let outline = build_outline(&[
            HeadingNode::new(2, "One").with_id("x"),
            HeadingNode::new(2, "Two").with_id("x"),
            HeadingNode::new(2, "X").with_id("x"),
        ]);

        assert_eq!(outline.ids(), ["x", "two", "x-2"]);
        let anchors: Vec<&str> = outline.iter().map(|(_, item)| item.anchor.as_str()).collect();
        assert_eq!(anchors, ["#x", "#two", "#x-2"]);
    }

    #[test]
    fn test_deep_skip_unwinds_to_top_at_end() {
        let outline = build_outline(&headings(&[(2, "A"), (4, "A1"), (6, "A1a"), (2, "B")]));

        let depths: Vec<(usize, &str)> = outline
            .iter()
            .map(|(depth, item)| (depth, item.label.as_str()))
            .collect();
        assert_eq!(depths, [(0, "A"), (1, "A1"), (2, "A1a"), (0, "B")]);
    }

    #[test]
    fn test_empty_existing_id_is_regenerated() {
        let outline = build_outline(&[HeadingNode::new(2, "Usage").with_id("")]);
        assert_eq!(outline.ids(), ["usage"]);
    }

    #[test]
    fn test_building_twice_is_identical() {
        let input = headings(&[(2, "A"), (4, "A1"), (3, "A2"), (2, "B")]);
        assert_eq!(build_outline(&input), build_outline(&input));
    }
}
