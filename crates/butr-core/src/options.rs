//! Configuration options for each butr feature

use crate::{ButrError, Result};

/// Time added to the scroll animation counter on every frame, in ms (~30 FPS)
pub const FRAME_STEP_MS: u32 = 33;

/// Easing used by the marker transition. Matches [`crate::ease_in_out_quad`].
pub const MARKER_EASING: &str = "cubic-bezier(0.455, 0.03, 0.515, 0.955)";

/// Class names and attributes butr looks for in the page
pub mod class {
    /// Nav element the sidebar and marker are attached to
    pub const NAV: &str = "js-butr-nav";
    /// Element whose headings are turned into the sidebar
    pub const CONTAINER: &str = "js-butr-container";
    /// Nav links tracked by the marker
    pub const LINK: &str = "js-butr-link";
    /// Added to the link of the section currently in view
    pub const ACTIVE: &str = "js-butr-active";
    /// The marker element itself
    pub const MARKER: &str = "js-butr-marker";
    /// Attribute that opts an anchor into smooth scrolling
    pub const DATA_ATTR: &str = "data-butr";
}

/// Scroll axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Horizontal (`scrollLeft` / `offsetLeft`)
    X,
    /// Vertical (`scrollTop` / `offsetTop`)
    #[default]
    Y,
}

/// Where a scroll should end up
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollTarget {
    /// Absolute scroll position in pixels
    Position(f64),
    /// Fragment reference (`#id`) to an element in the page
    Hash(String),
}

impl ScrollTarget {
    /// Parse a target as written in a link or option: `#id` or a number
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.starts_with('#') {
            return Ok(ScrollTarget::Hash(value.to_string()));
        }
        value
            .parse::<f64>()
            .ok()
            .filter(|position| position.is_finite())
            .map(ScrollTarget::Position)
            .ok_or_else(|| ButrError::InvalidTarget(value.to_string()))
    }

    /// The fragment, if this target is one
    pub fn hash(&self) -> Option<&str> {
        match self {
            ScrollTarget::Hash(hash) => Some(hash),
            ScrollTarget::Position(_) => None,
        }
    }
}

impl Default for ScrollTarget {
    fn default() -> Self {
        ScrollTarget::Position(0.0)
    }
}

/// Options for generating a sidebar from headings
#[derive(Debug, Clone, Default)]
pub struct SidebarOptions {
    /// Class added to every generated `<ol>`
    pub ol_class: String,

    /// Class added to every generated `<li>`
    pub li_class: String,
}

/// Options for the active-section marker
#[derive(Debug, Clone)]
pub struct MarkerOptions {
    /// Selector for the scrolling container; the whole page when unset
    pub container: Option<String>,

    /// Marker transition duration in ms
    pub duration: u32,

    /// Extra class added to the marker element
    pub marker_class: String,
}

impl Default for MarkerOptions {
    fn default() -> Self {
        Self {
            container: None,
            duration: 400,
            marker_class: String::new(),
        }
    }
}

/// Options for a single smooth scroll
#[derive(Debug, Clone)]
pub struct ScrollOptions {
    /// Selector for the element to scroll; the page's scrolling element when unset
    pub element: Option<String>,

    /// Where to scroll to
    pub target: ScrollTarget,

    /// Scroll axis
    pub direction: Direction,

    /// Animation length in ms
    pub duration: u32,

    /// Push a hash target onto the history
    pub keep_hash: bool,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            element: None,
            target: ScrollTarget::default(),
            direction: Direction::Y,
            duration: 800,
            keep_hash: true,
        }
    }
}

impl ScrollOptions {
    /// Default options scrolling to the given target
    pub fn to(target: ScrollTarget) -> Self {
        Self {
            target,
            ..Default::default()
        }
    }
}
