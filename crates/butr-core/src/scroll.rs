//! Smooth scrolling
//!
//! The animation itself is host independent: [`scroll_to`] reads the start
//! and target positions from a [`ScrollHost`] and returns a
//! [`ScrollAnimation`] that the host steps once per display frame.

use tracing::{debug, trace};

use crate::options::{Direction, ScrollOptions, ScrollTarget, FRAME_STEP_MS};
use crate::{ButrError, Result};

/// Browser primitives a scroll needs.
///
/// `element` is the selector from [`ScrollOptions::element`]; `None` means
/// the page's scrolling element.
pub trait ScrollHost {
    /// Current scroll offset, or `None` if `element` does not exist
    fn scroll_position(&self, element: Option<&str>, direction: Direction) -> Option<f64>;

    /// Move the scroll offset
    fn set_scroll_position(&mut self, element: Option<&str>, direction: Direction, position: f64);

    /// Offset of the element with the given id along `direction`
    fn element_offset(&self, id: &str, direction: Direction) -> Option<f64>;

    /// Record `hash` in the session history
    fn push_history(&mut self, hash: &str);

    /// Whether the user asked for reduced motion
    fn prefers_reduced_motion(&self) -> bool {
        false
    }
}

/// Quadratic ease in/out.
///
/// `t` is the elapsed time, `b` the start value, `c` the total change and
/// `d` the duration.
pub fn ease_in_out_quad(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let mut t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t * t + b;
    }
    t -= 1.0;
    -c / 2.0 * (t * (t - 2.0) - 1.0) + b
}

/// Result of advancing an animation by one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    /// Scroll to this position and request another frame
    Continue(f64),
    /// Scroll to this position; the animation is done
    Finished(f64),
}

impl Frame {
    pub fn position(&self) -> f64 {
        match self {
            Frame::Continue(position) | Frame::Finished(position) => *position,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Frame::Finished(_))
    }
}

/// An in-flight smooth scroll.
///
/// Starting a new animation while one is running simply replaces it; the
/// new one starts from wherever the old one left the scroll position.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollAnimation {
    element: Option<String>,
    direction: Direction,
    start: f64,
    distance: f64,
    counter: u32,
    step: u32,
    duration: u32,
}

impl ScrollAnimation {
    /// Vertical animation of the page from `start` to `target`
    pub fn new(start: f64, target: f64, duration: u32) -> Self {
        Self {
            element: None,
            direction: Direction::Y,
            start,
            distance: target - start,
            counter: 0,
            step: FRAME_STEP_MS,
            duration,
        }
    }

    /// Final scroll position
    pub fn target(&self) -> f64 {
        self.start + self.distance
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Time elapsed in ms
    pub fn elapsed(&self) -> u32 {
        self.counter
    }

    pub fn is_finished(&self) -> bool {
        self.counter >= self.duration
    }

    /// Advance by one frame.
    ///
    /// The counter never passes the duration, so the last frame lands on
    /// the target exactly.
    pub fn tick(&mut self) -> Frame {
        if self.duration == 0 {
            return Frame::Finished(self.target());
        }

        self.counter = self.counter.saturating_add(self.step).min(self.duration);
        let position = ease_in_out_quad(
            f64::from(self.counter),
            self.start,
            self.distance,
            f64::from(self.duration),
        );

        if self.counter < self.duration {
            Frame::Continue(position)
        } else {
            Frame::Finished(position)
        }
    }

    /// Advance by one frame and apply the new position to the host
    pub fn step_on<H: ScrollHost + ?Sized>(&mut self, host: &mut H) -> Frame {
        let frame = self.tick();
        trace!(position = frame.position(), elapsed = self.counter, "scroll frame");
        host.set_scroll_position(self.element.as_deref(), self.direction, frame.position());
        frame
    }

    /// Step the animation to completion, returning the number of frames used
    pub fn run_on<H: ScrollHost + ?Sized>(mut self, host: &mut H) -> usize {
        let mut frames = 0;
        loop {
            frames += 1;
            if self.step_on(host).is_finished() {
                return frames;
            }
        }
    }
}

/// Start a smooth scroll.
///
/// A hash target whose element is missing scrolls to `0`. With reduced
/// motion the host jumps straight to the target and no animation is
/// returned. Otherwise a hash target is pushed onto the history (when
/// `keep_hash` is set) and the animation is returned for the host to step.
pub fn scroll_to<H: ScrollHost + ?Sized>(
    host: &mut H,
    options: &ScrollOptions,
) -> Result<Option<ScrollAnimation>> {
    let element = options.element.as_deref();
    let direction = options.direction;

    let start = host.scroll_position(element, direction).ok_or_else(|| {
        ButrError::MissingElement(format!(
            "scroll element {}",
            element.unwrap_or("(document)")
        ))
    })?;

    let target = match &options.target {
        ScrollTarget::Position(position) => *position,
        ScrollTarget::Hash(hash) => {
            let id = hash.trim_start_matches('#');
            host.element_offset(id, direction).unwrap_or_else(|| {
                debug!(target = %hash, "scroll target not found, scrolling to top");
                0.0
            })
        }
    };

    if host.prefers_reduced_motion() {
        host.set_scroll_position(element, direction, target);
        return Ok(None);
    }

    if options.keep_hash {
        if let Some(hash) = options.target.hash() {
            host.push_history(hash);
        }
    }

    debug!(start, target, duration = options.duration, "starting smooth scroll");

    Ok(Some(ScrollAnimation {
        element: options.element.clone(),
        direction,
        start,
        distance: target - start,
        counter: 0,
        step: FRAME_STEP_MS,
        duration: options.duration,
    }))
}
