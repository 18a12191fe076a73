/// Alignment target for programmatic scrolling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}

/// How a programmatic scroll is performed by [`crate::Controller`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollBehavior {
    /// Jump to the target offset immediately.
    Auto,
    /// Animate to the target offset over time (tween-driven).
    Smooth,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// Item sizing strategy along the scroll axis.
///
/// `Fixed` needs no measurement at all: offsets are a single multiplication.
/// `Dynamic` starts from an estimate and is refined by per-index measurements
/// reported through [`crate::WindowEngine::measure_item`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizeMode {
    Fixed(u32),
    Dynamic { estimate: u32 },
}

impl SizeMode {
    /// The size assumed for an unmeasured item, clamped to a minimum of 1 so
    /// a zero/negative-ish misconfiguration degrades instead of dividing by
    /// zero.
    pub fn estimate(&self) -> u32 {
        match *self {
            Self::Fixed(s) => s.max(1),
            Self::Dynamic { estimate } => estimate.max(1),
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }
}

/// A half-open index window `[start, end)` over the item sequence.
///
/// Invariant (maintained by every producer in this crate):
/// `0 <= start <= end <= count`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start: usize,
    /// Exclusive.
    pub end: usize,
}

impl VisibleRange {
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    /// Clamps both edges against `count`, preserving `start <= end`.
    pub fn clamped(self, count: usize) -> Self {
        let start = self.start.min(count);
        let end = self.end.min(count).max(start);
        Self { start, end }
    }

    /// Expands both edges by `margin` items, clamped to `[0, count)`.
    ///
    /// This is the overscan expansion: the committed range stays geometric,
    /// the rendered set is this widened window.
    pub fn expanded(self, margin: usize, count: usize) -> Self {
        if self.is_empty() {
            return self.clamped(count);
        }
        Self {
            start: self.start.saturating_sub(margin),
            end: self.end.saturating_add(margin).min(count),
        }
    }
}

/// A renderable item: its virtual index plus its position along the scroll
/// axis, independent of whether the host has materialized it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualItem {
    pub index: usize,
    /// Start offset in the scroll axis.
    pub start: u64,
    /// Size in the scroll axis (excludes `gap`).
    pub size: u32,
}

impl VirtualItem {
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.size as u64)
    }
}

/// Configuration the host should apply to its platform visibility primitive
/// when observing rendered items (prefetch halo + enter threshold).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObserverConfig {
    /// Extension of the container's effective boundary, in scroll-axis units.
    pub margin: u32,
    /// Fraction of an element that must be visible to count as crossed in,
    /// in `0.0..=1.0`.
    pub threshold: f32,
}
