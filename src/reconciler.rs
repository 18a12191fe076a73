use crate::VisibleRange;

/// Merges the two range signals into one committed [`VisibleRange`].
///
/// Policy (order matters, see the engine):
/// - the estimator *replaces* the range on every scroll tick, and may narrow
///   it;
/// - boundary crossings only *widen* it — narrowing on that path would
///   flicker items that the estimator still considers visible;
/// - every application clamps against the count passed in at that moment, so
///   a stale signal referencing a shrunk sequence degrades instead of
///   breaking the bounds invariant.
///
/// Each mutation reports whether the committed range actually changed, so the
/// engine re-renders only on real changes.
#[derive(Clone, Copy, Debug)]
pub struct RangeReconciler {
    range: VisibleRange,
}

impl RangeReconciler {
    /// Starts from the default window `[0, min(count, initial_window))`,
    /// used until real geometry arrives.
    pub fn new(initial_window: usize, count: usize) -> Self {
        Self {
            range: VisibleRange::new(0, initial_window.min(count)),
        }
    }

    /// The committed, geometrically visible range (no overscan).
    pub fn range(&self) -> VisibleRange {
        self.range
    }

    /// The overscan-expanded range actually handed to the renderer.
    pub fn rendered(&self, overscan: usize, count: usize) -> VisibleRange {
        self.range.expanded(overscan, count)
    }

    /// Estimator path: full replacement.
    pub fn replace(&mut self, range: VisibleRange, count: usize) -> bool {
        self.set(range.clamped(count))
    }

    /// Observer path: widen the range to include `index`, never narrowing.
    pub fn widen_to(&mut self, index: usize, count: usize) -> bool {
        if index >= count {
            return false;
        }
        let widened = VisibleRange {
            start: self.range.start.min(index),
            end: self.range.end.max(index + 1),
        };
        self.set(widened.clamped(count))
    }

    /// Count-change path: back to the default window.
    pub fn reset(&mut self, initial_window: usize, count: usize) -> bool {
        self.set(VisibleRange::new(0, initial_window.min(count)))
    }

    fn set(&mut self, range: VisibleRange) -> bool {
        if self.range == range {
            return false;
        }
        wtrace!(
            start = range.start,
            end = range.end,
            "visible range committed"
        );
        self.range = range;
        true
    }
}
