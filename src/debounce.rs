use core::cmp;

use crate::ScrollDirection;

/// Tracks whether a scroll gesture is in flight.
///
/// Boundary-crossing corrections are suppressed while `is_scrolling` is true;
/// the estimator is trusted during active scroll and the observer corrects
/// after it settles. There is no timer here: the host supplies `now_ms` to
/// [`Self::on_scroll`] and calls [`Self::tick`] periodically, which keeps the
/// debounce deterministic and trivially cancelable on teardown.
#[derive(Clone, Copy, Debug)]
pub struct ScrollDebouncer {
    quiet_delay_ms: u64,
    last_offset: u64,
    is_scrolling: bool,
    direction: Option<ScrollDirection>,
    last_event_ms: Option<u64>,
}

impl ScrollDebouncer {
    pub fn new(quiet_delay_ms: u64) -> Self {
        Self {
            quiet_delay_ms,
            last_offset: 0,
            is_scrolling: false,
            direction: None,
            last_event_ms: None,
        }
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn last_offset(&self) -> u64 {
        self.last_offset
    }

    pub fn direction(&self) -> Option<ScrollDirection> {
        self.direction
    }

    /// Records a scroll event and (re)starts the quiet interval.
    pub fn on_scroll(&mut self, offset: u64, now_ms: u64) {
        self.direction = match offset.cmp(&self.last_offset) {
            cmp::Ordering::Greater => Some(ScrollDirection::Forward),
            cmp::Ordering::Less => Some(ScrollDirection::Backward),
            cmp::Ordering::Equal => self.direction,
        };
        self.last_offset = offset;
        self.last_event_ms = Some(now_ms);
        self.is_scrolling = true;
    }

    /// Advances the debounce clock. Returns `true` exactly when the quiet
    /// interval elapsed and `is_scrolling` flipped to false on this call.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.is_scrolling {
            return false;
        }
        let Some(last) = self.last_event_ms else {
            return false;
        };
        if now_ms.saturating_sub(last) < self.quiet_delay_ms {
            return false;
        }
        self.settle();
        true
    }

    /// Clears the pending transition without reporting a settle. Used on
    /// teardown so no state flips after the host is gone.
    pub fn cancel(&mut self) {
        self.settle();
    }

    fn settle(&mut self) {
        self.is_scrolling = false;
        self.direction = None;
        self.last_event_ms = None;
    }
}
