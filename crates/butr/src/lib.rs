//! # butr
//!
//! Smooth scrolling, an animated active-link marker and automatic sidebar
//! generation for HTML pages.
//!
//! ## Design
//!
//! butr works on an owned [`Node`] tree rather than a live browser DOM:
//!
//! - **Sidebar**: [`auto_sidebar`] reads the headings of the content
//!   container, builds a nested outline and appends it to the nav as
//!   `<ol>` lists, writing generated ids back onto the headings.
//! - **Anchors**: [`auto_anchors`] collects the `a[data-butr]` links whose
//!   clicks should scroll smoothly.
//! - **Marker**: [`Marker`] adds the marker element to the nav and tracks
//!   which section is in view.
//! - **Scrolling**: [`scroll_to`] drives a [`ScrollHost`] once per frame.
//!
//! Layout, scrolling and frame scheduling belong to the host; butr only
//! needs the numbers. The pure parts live in `butr-core` and are
//! re-exported here.
//!
//! ## Example
//!
//! ```rust
//! use butr::{auto_sidebar, parse_document, Filter, SidebarOptions};
//!
//! let mut page = parse_document(concat!(
//!     r#"<nav class="js-butr-nav"></nav>"#,
//!     r#"<article class="js-butr-container">"#,
//!     r#"<h2>Install</h2><h4>From source</h4><h2>Usage</h2>"#,
//!     r#"</article>"#,
//! ));
//!
//! let options = SidebarOptions {
//!     ol_class: "toc".to_string(),
//!     ..Default::default()
//! };
//! let outline = auto_sidebar(&mut page, &options).unwrap();
//!
//! assert_eq!(outline.items().len(), 2);
//! assert_eq!(page.query_all(&Filter::class("toc")).len(), 2);
//! ```

mod anchors;
#[cfg(feature = "html")]
pub mod html;
mod marker;
pub mod node;
pub mod query;
mod render;
mod sidebar;
mod utilities;

pub use anchors::{auto_anchors, AnchorLink};
#[cfg(feature = "html")]
pub use html::{parse_document, parse_html};
pub use marker::{LinkGeometry, Marker};
pub use node::{Node, NodeType};
pub use query::{Filter, NodePath};
pub use render::render_outline;
pub use sidebar::auto_sidebar;
pub use utilities::*;

pub use butr_core::{
    build_outline, class, ease_in_out_quad, marker_transform, marker_transition, scroll_to,
    slugify, ActiveChange, ActiveTracker, AnchorRegistry, ButrError, Direction, Frame,
    HeadingNode, MarkerOptions, Outline, OutlineItem, Result, ScrollAnimation, ScrollHost,
    ScrollOptions, ScrollTarget, SidebarOptions, FRAME_STEP_MS, MARKER_EASING,
};

/// Report a missing page element and abort the feature being set up
pub(crate) fn missing_element(what: &str) -> ButrError {
    tracing::error!(
        "Missing required element ({}). Aborted setup of butr.",
        what
    );
    ButrError::MissingElement(what.to_string())
}
