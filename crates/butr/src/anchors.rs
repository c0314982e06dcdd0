//! Anchors opted into smooth scrolling with `data-butr`.

use butr_core::{class, ScrollOptions, ScrollTarget};
use tracing::debug;

use crate::node::Node;
use crate::query::Filter;
use crate::Result;

/// A link whose clicks should scroll smoothly instead of jumping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorLink {
    /// The link's `href`
    pub href: String,
}

impl AnchorLink {
    /// Where a click on this link scrolls to
    pub fn target(&self) -> Result<ScrollTarget> {
        ScrollTarget::parse(&self.href)
    }

    /// Scroll options a click on this link uses
    pub fn scroll_options(&self) -> Result<ScrollOptions> {
        Ok(ScrollOptions::to(self.target()?))
    }
}

/// Collect every `a[data-butr]` in the page.
///
/// Links without an `href` are skipped.
pub fn auto_anchors(page: &Node) -> Vec<AnchorLink> {
    let filter = Filter::All(vec![Filter::tag("a"), Filter::attr(class::DATA_ATTR)]);

    let links: Vec<AnchorLink> = page
        .query_all(&filter)
        .into_iter()
        .filter_map(|link| link.attr("href"))
        .map(|href| AnchorLink {
            href: href.to_string(),
        })
        .collect();

    if links.is_empty() {
        debug!("no data-butr anchors in page");
    }
    links
}
