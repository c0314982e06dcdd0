//! Sidebar generation from page headings.

use butr_core::{build_outline, class, HeadingNode, Outline, SidebarOptions};
use tracing::debug;

use crate::node::Node;
use crate::query::{join_path, Filter, NodePath};
use crate::render::render_outline;
use crate::utilities::HEADING_TAGS;
use crate::{missing_element, Result};

/// Generate nav links from the headings in the page's content.
///
/// Looks for the `.js-butr-nav` element, the `.js-butr-container` element
/// and the `h2`-`h6` headings inside the container. Headings without an id
/// get one derived from their text, as do later headings repeating an id
/// already used by an earlier one. Then the nested list is appended to the
/// nav. If any of the required elements is missing nothing is changed.
///
/// ```rust
/// use butr::{auto_sidebar, parse_document, SidebarOptions};
///
/// let mut page = parse_document(concat!(
///     r#"<nav class="js-butr-nav"></nav>"#,
///     r#"<main class="js-butr-container"><h2>Intro</h2><h3>Details</h3></main>"#,
/// ));
///
/// let outline = auto_sidebar(&mut page, &SidebarOptions::default()).unwrap();
/// assert_eq!(outline.items()[0].children[0].anchor, "#details");
/// assert!(page.outer_html().contains(r#"<h2 id="intro">Intro</h2>"#));
/// ```
pub fn auto_sidebar(page: &mut Node, options: &SidebarOptions) -> Result<Outline> {
    let (nav_path, heading_paths) = required_elements(page)?;

    let headings: Vec<HeadingNode> = heading_paths
        .iter()
        .filter_map(|path| page.node_at(path))
        .filter_map(heading_node)
        .collect();

    let outline = build_outline(&headings);
    debug!(
        headings = headings.len(),
        top_level = outline.items().len(),
        "built sidebar outline"
    );

    for (path, id) in heading_paths.iter().zip(outline.ids()) {
        if let Some(heading) = page.node_at_mut(path) {
            if heading.id() != Some(id.as_str()) {
                heading.set_attr("id", id);
            }
        }
    }

    let list = render_outline(outline.items(), options);
    page.node_at_mut(&nav_path)
        .ok_or_else(|| missing_element("nav"))?
        .add_child(list);

    Ok(outline)
}

fn required_elements(page: &Node) -> Result<(NodePath, Vec<NodePath>)> {
    let nav = page.find_first(&Filter::class(class::NAV));
    let content = page.find_first(&Filter::class(class::CONTAINER));

    let (Some(nav), Some(content)) = (nav, content) else {
        return Err(missing_element("nav or content"));
    };

    let headings: Vec<NodePath> = page
        .node_at(&content)
        .map(|container| container.find_all(&Filter::tags(HEADING_TAGS)))
        .unwrap_or_default()
        .iter()
        .map(|relative| join_path(&content, relative))
        .collect();

    if headings.is_empty() {
        return Err(missing_element("headings"));
    }

    Ok((nav, headings))
}

fn heading_node(node: &Node) -> Option<HeadingNode> {
    let level = node.heading_level()?;
    Some(HeadingNode {
        level,
        text: node.inner_text(),
        id: node.id().map(str::to_string),
    })
}
