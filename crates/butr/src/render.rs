//! Render an outline as nested nav lists.

use butr_core::{class, OutlineItem, SidebarOptions};

use crate::node::Node;

/// Build an `<ol>` for a level of the outline, nesting child lists inside
/// their parent `<li>`.
///
/// ```rust
/// use butr::{render_outline, build_outline, HeadingNode, SidebarOptions};
///
/// let outline = build_outline(&[HeadingNode::new(2, "Intro")]);
/// let list = render_outline(outline.items(), &SidebarOptions::default());
///
/// assert_eq!(
///     list.outer_html(),
///     r##"<ol><li><a href="#intro" class="js-butr-link">Intro</a></li></ol>"##
/// );
/// ```
pub fn render_outline(items: &[OutlineItem], options: &SidebarOptions) -> Node {
    let mut list = Node::element("ol");
    list.add_class(&options.ol_class);

    for item in items {
        let mut li = render_item(item, options);
        if !item.children.is_empty() {
            li.add_child(render_outline(&item.children, options));
        }
        list.add_child(li);
    }

    list
}

fn render_item(item: &OutlineItem, options: &SidebarOptions) -> Node {
    let mut li = Node::element("li");
    li.add_class(&options.li_class);

    let mut link = Node::element_with_attrs("a", vec![("href", item.anchor.as_str())]);
    link.add_class(class::LINK);
    link.add_child(Node::text(&item.label));

    li.add_child(link);
    li
}
