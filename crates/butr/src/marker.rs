//! Animated marker showing the active nav link.

use butr_core::{
    class, marker_transform, marker_transition, ActiveChange, ActiveTracker, MarkerOptions,
    ScrollOptions, ScrollTarget,
};
use tracing::{debug, warn};

use crate::node::Node;
use crate::query::{join_path, Filter, NodePath};
use crate::utilities::HEADING_TAGS;
use crate::{missing_element, ButrError, Result};

/// Layout of a nav link, measured by the host
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinkGeometry {
    /// `offsetTop` of the link within the nav
    pub offset_top: f64,
    /// `offsetHeight` of the link
    pub height: f64,
}

/// A nav link tracked by the marker
#[derive(Debug, Clone)]
struct Link {
    path: NodePath,
    href: String,
}

/// The marker attached to a page's nav.
///
/// The host forwards scroll events to [`on_scroll`](Self::on_scroll),
/// requests a frame when it returns `true`, and in that frame passes the
/// scroll position and the offsets of [`sections`](Self::sections) to
/// [`on_frame`](Self::on_frame). The resulting change is written into the
/// page with [`apply`](Self::apply).
#[derive(Debug, Clone)]
pub struct Marker {
    tracker: ActiveTracker,
    links: Vec<Link>,
    marker: NodePath,
    duration: u32,
}

impl Marker {
    /// Create the marker element inside the nav and start tracking.
    ///
    /// Requires `.js-butr-nav` and at least one `.js-butr-link`. Sections
    /// are the headings with an id inside the configured container (the
    /// whole page by default).
    ///
    /// No link is active and the marker has no size until the first frame.
    /// Call [`on_frame`](Self::on_frame) once right after setup with the
    /// initial scroll position and [`apply`](Self::apply) the change.
    pub fn setup(page: &mut Node, options: &MarkerOptions, reduced_motion: bool) -> Result<Self> {
        let container = match options.container.as_deref() {
            Some(selector) => {
                let filter = Filter::parse(selector)?;
                page.find_first(&filter)
                    .ok_or_else(|| missing_element("container"))?
            }
            None => Vec::new(),
        };

        let nav = page.find_first(&Filter::class(class::NAV));
        let links: Vec<Link> = page
            .find_all(&Filter::class(class::LINK))
            .into_iter()
            .filter_map(|path| {
                let href = page.node_at(&path)?.attr("href")?.to_string();
                Some(Link { path, href })
            })
            .collect();

        let Some(nav) = nav.filter(|_| !links.is_empty()) else {
            return Err(missing_element("nav or links"));
        };

        let sections: Vec<String> = page
            .node_at(&container)
            .map(|root| root.query_all(&Filter::tags(HEADING_TAGS)))
            .unwrap_or_default()
            .into_iter()
            .filter_map(|heading| heading.id().map(str::to_string))
            .collect();

        let mut element = Node::element("div");
        element.add_class(class::MARKER);
        element.add_class(&options.marker_class);
        if !reduced_motion {
            element.set_style("transition", &marker_transition(options.duration));
        }

        let nav_node = page
            .node_at_mut(&nav)
            .ok_or_else(|| missing_element("nav"))?;
        let marker = join_path(&nav, &[nav_node.children.len()]);
        nav_node.add_child(element);

        debug!(
            links = links.len(),
            sections = sections.len(),
            "marker attached to nav"
        );

        Ok(Self {
            tracker: ActiveTracker::new(sections),
            links,
            marker,
            duration: options.duration,
        })
    }

    /// Section hashes, in the order their offsets are expected
    pub fn sections(&self) -> &[String] {
        self.tracker.sections()
    }

    /// Hrefs of the tracked links
    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(|link| link.href.as_str())
    }

    pub fn tracker(&self) -> &ActiveTracker {
        &self.tracker
    }

    /// Transition duration the marker was set up with, in ms
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Handle a scroll event. Returns `true` if a frame should be requested.
    pub fn on_scroll(&mut self) -> bool {
        self.tracker.on_scroll()
    }

    /// Handle the requested frame
    pub fn on_frame(&mut self, top: f64, offsets: &[f64]) -> Option<ActiveChange> {
        self.tracker.on_frame(top, offsets)
    }

    /// A tracked link was clicked.
    ///
    /// The link becomes active immediately and scroll events are ignored
    /// until [`scroll_finished`](Self::scroll_finished). Returns the change
    /// to apply and the scroll to start.
    pub fn click(&mut self, hash: &str) -> (ActiveChange, ScrollOptions) {
        let change = self.tracker.begin_navigation(hash);
        let options = ScrollOptions::to(ScrollTarget::Hash(change.current.clone()));
        (change, options)
    }

    /// The scroll started by [`click`](Self::click) has finished
    pub fn scroll_finished(&mut self) {
        self.tracker.end_navigation();
    }

    /// Write an active change into the page: move the active class between
    /// links and position the marker over the active link.
    pub fn apply(
        &self,
        page: &mut Node,
        change: &ActiveChange,
        geometry: LinkGeometry,
    ) -> Result<()> {
        let Some(current) = self.link(&change.current) else {
            warn!(hash = %change.current, "no nav link for active section");
            return Err(ButrError::MissingElement(format!("link {}", change.current)));
        };

        if change.changed() {
            if let Some(previous) = change.previous.as_deref().and_then(|hash| self.link(hash)) {
                if let Some(node) = page.node_at_mut(&previous.path) {
                    node.remove_class(class::ACTIVE);
                }
            }
            if let Some(node) = page.node_at_mut(&current.path) {
                node.add_class(class::ACTIVE);
            }
        }

        let marker = page
            .node_at_mut(&self.marker)
            .ok_or_else(|| missing_element("marker"))?;
        marker.set_style("height", &format!("{}px", geometry.height));
        marker.set_style("transform", &marker_transform(geometry.offset_top));

        Ok(())
    }

    fn link(&self, hash: &str) -> Option<&Link> {
        self.links.iter().find(|link| link.href == hash)
    }
}
