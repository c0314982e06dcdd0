//! Active-section tracking for the nav marker
//!
//! Scroll events arrive far more often than frames. The tracker latches so
//! that at most one frame update is pending at a time, and ignores scroll
//! events entirely while a clicked link is being scrolled to.

use tracing::trace;

use crate::options::MARKER_EASING;

/// The active link changed (or was re-confirmed)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveChange {
    /// Previously active hash
    pub previous: Option<String>,
    /// Newly active hash
    pub current: String,
}

impl ActiveChange {
    /// Whether the active link is different from before
    pub fn changed(&self) -> bool {
        self.previous.as_deref() != Some(self.current.as_str())
    }
}

/// Tracks which section is in view
#[derive(Debug, Clone)]
pub struct ActiveTracker {
    sections: Vec<String>,
    active: Option<String>,
    safe_to_update: bool,
    ignore_scroll_events: bool,
}

impl ActiveTracker {
    /// Create a tracker over section ids, in document order.
    ///
    /// Ids may be given with or without their leading `#`.
    pub fn new<I, S>(sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            sections: sections.into_iter().map(|s| to_hash(s.as_ref())).collect(),
            active: None,
            safe_to_update: true,
            ignore_scroll_events: false,
        }
    }

    /// Section hashes (`#id`)
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// Currently active hash
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Whether a link click is being scrolled to
    pub fn is_navigating(&self) -> bool {
        self.ignore_scroll_events
    }

    /// Handle a scroll event. Returns `true` if a frame should be requested.
    pub fn on_scroll(&mut self) -> bool {
        if self.ignore_scroll_events {
            return false;
        }
        let schedule = self.safe_to_update;
        self.safe_to_update = false;
        schedule
    }

    /// Handle the requested frame: release the latch and recompute the
    /// active section from the scroll position and section offsets.
    pub fn on_frame(&mut self, top: f64, offsets: &[f64]) -> Option<ActiveChange> {
        self.safe_to_update = true;
        self.update(top, offsets)
    }

    /// Recompute the active section without touching the latch
    pub fn update(&mut self, top: f64, offsets: &[f64]) -> Option<ActiveChange> {
        let index = Self::section_at(top, offsets)?;
        let hash = self.sections.get(index)?.clone();
        Some(self.set_active(&hash))
    }

    /// Index of the section in view for a scroll position.
    ///
    /// That is the last section starting at or above `top`, or the first
    /// section when the page is scrolled above all of them.
    pub fn section_at(top: f64, offsets: &[f64]) -> Option<usize> {
        let mut found = None;
        for (index, offset) in offsets.iter().enumerate() {
            if *offset > top {
                return found.or(Some(index));
            }
            found = Some(index);
        }
        found
    }

    /// Make a hash active
    pub fn set_active(&mut self, hash: &str) -> ActiveChange {
        let current = to_hash(hash);
        let previous = self.active.replace(current.clone());
        trace!(?previous, %current, "active section");
        ActiveChange { previous, current }
    }

    /// A link was clicked: activate it now and ignore scroll events until
    /// [`end_navigation`](Self::end_navigation)
    pub fn begin_navigation(&mut self, hash: &str) -> ActiveChange {
        self.ignore_scroll_events = true;
        self.set_active(hash)
    }

    /// The scroll started by a click has finished
    pub fn end_navigation(&mut self) {
        self.ignore_scroll_events = false;
    }
}

fn to_hash(id: &str) -> String {
    if id.starts_with('#') {
        id.to_string()
    } else {
        format!("#{}", id)
    }
}

/// CSS `transition` value for the marker
pub fn marker_transition(duration: u32) -> String {
    format!("{}ms all {}", duration, MARKER_EASING)
}

/// CSS `transform` value placing the marker at a link's offset
pub fn marker_transform(offset_top: f64) -> String {
    format!("translateY({}px)", offset_top)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFFSETS: [f64; 3] = [100.0, 500.0, 900.0];

    fn tracker() -> ActiveTracker {
        ActiveTracker::new(["intro", "#usage", "api"])
    }

    #[test]
    fn test_sections_are_hashes() {
        assert_eq!(tracker().sections(), ["#intro", "#usage", "#api"]);
    }

    #[test]
    fn test_section_at() {
        assert_eq!(ActiveTracker::section_at(0.0, &OFFSETS), Some(0));
        assert_eq!(ActiveTracker::section_at(100.0, &OFFSETS), Some(0));
        assert_eq!(ActiveTracker::section_at(499.0, &OFFSETS), Some(0));
        assert_eq!(ActiveTracker::section_at(500.0, &OFFSETS), Some(1));
        assert_eq!(ActiveTracker::section_at(5000.0, &OFFSETS), Some(2));
        assert_eq!(ActiveTracker::section_at(10.0, &[]), None);
    }

    #[test]
    fn test_scroll_latch() {
        let mut tracker = tracker();
        assert!(tracker.on_scroll());
        assert!(!tracker.on_scroll());
        assert!(!tracker.on_scroll());

        let change = tracker.on_frame(600.0, &OFFSETS).unwrap();
        assert_eq!(change.current, "#usage");
        assert!(tracker.on_scroll());
    }

    #[test]
    fn test_change_detection() {
        let mut tracker = tracker();
        let first = tracker.update(0.0, &OFFSETS).unwrap();
        assert!(first.changed());
        assert_eq!(first.previous, None);

        let same = tracker.update(50.0, &OFFSETS).unwrap();
        assert!(!same.changed());

        let next = tracker.update(950.0, &OFFSETS).unwrap();
        assert_eq!(next.previous.as_deref(), Some("#intro"));
        assert_eq!(next.current, "#api");
        assert_eq!(tracker.active(), Some("#api"));
    }

    #[test]
    fn test_navigation_ignores_scroll() {
        let mut tracker = tracker();
        let change = tracker.begin_navigation("#api");
        assert_eq!(change.current, "#api");
        assert!(tracker.is_navigating());
        assert!(!tracker.on_scroll());

        tracker.end_navigation();
        assert!(!tracker.is_navigating());
        assert!(tracker.on_scroll());
    }

    #[test]
    fn test_style_values() {
        assert_eq!(
            marker_transition(400),
            "400ms all cubic-bezier(0.455, 0.03, 0.515, 0.955)"
        );
        assert_eq!(marker_transform(12.0), "translateY(12px)");
        assert_eq!(marker_transform(12.5), "translateY(12.5px)");
    }
}
