//! butr-core - heading outlines, slugs and scroll/marker state
//!
//! This crate holds everything in butr that does not need a page: the
//! heading outline builder used to generate sidebars, anchor slugs, the
//! configuration values for each feature, the smooth-scroll animation and
//! the active-section tracker behind the nav marker. The `butr` crate wires
//! these into an HTML node tree.
//!
//! # Architecture
//!
//! ```text
//!                ┌──────────────┐     ┌─────────────┐
//! HeadingNode ──▶│ build_outline│ ──▶ │   Outline   │ ──▶ nested <ol> (butr)
//!                └──────────────┘     └─────────────┘
//!
//! ScrollHost ◀── ScrollAnimation::tick (one step per frame)
//! scroll top ──▶ ActiveTracker ──▶ ActiveChange ──▶ marker position (butr)
//! ```
//!
//! # Example
//!
//! ```rust
//! use butr_core::{build_outline, HeadingNode};
//!
//! let outline = build_outline(&[
//!     HeadingNode::new(2, "Install"),
//!     HeadingNode::new(3, "From source"),
//!     HeadingNode::new(2, "Usage"),
//! ]);
//!
//! assert_eq!(outline.items().len(), 2);
//! assert_eq!(outline.items()[0].children[0].anchor, "#from-source");
//! ```

mod marker;
mod options;
mod outline;
mod scroll;
mod slug;

pub use marker::{marker_transform, marker_transition, ActiveChange, ActiveTracker};
pub use options::{
    class, Direction, MarkerOptions, ScrollOptions, ScrollTarget, SidebarOptions,
    FRAME_STEP_MS, MARKER_EASING,
};
pub use outline::{build_outline, HeadingNode, Outline, OutlineItem, OutlineIter};
pub use scroll::{ease_in_out_quad, scroll_to, Frame, ScrollAnimation, ScrollHost};
pub use slug::{slugify, AnchorRegistry};

/// Error type for butr operations
#[derive(Debug, thiserror::Error)]
pub enum ButrError {
    #[error("Missing required element: {0}")]
    MissingElement(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Invalid scroll target: {0}")]
    InvalidTarget(String),
}

pub type Result<T> = std::result::Result<T, ButrError>;
