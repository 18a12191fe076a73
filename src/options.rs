use alloc::string::String;
use alloc::sync::Arc;

use crate::{SizeMode, VisibleRange};

/// Fired when the committed visible range changes.
///
/// The second argument is `is_scrolling` at commit time.
pub type RangeChangeCallback = Arc<dyn Fn(VisibleRange, bool) + Send + Sync>;

/// Fired for every accepted boundary-crossing event.
///
/// The second argument is `true` for a crossing-in, `false` for a
/// crossing-out.
pub type VisibilityCallback = Arc<dyn Fn(usize, bool) + Send + Sync>;

/// Configuration for [`crate::WindowEngine`].
///
/// Cheap to clone: callbacks are stored behind `Arc`s so hosts can tweak a
/// couple of fields and rebuild an engine without reallocating closures.
///
/// All numeric fields are validated by clamping at use sites, never by
/// rejection: a cosmetic misconfiguration must not break rendering.
pub struct WindowingOptions {
    /// Length of the item sequence.
    pub count: usize,
    /// Sizing strategy along the scroll axis.
    pub size_mode: SizeMode,
    /// Space between adjacent items.
    pub gap: u32,
    /// Extra items rendered beyond the geometrically visible range.
    pub overscan: usize,
    /// Boundary extension for crossing detection (prefetch halo), passed
    /// through to the host's visibility primitive.
    pub boundary_margin: u32,
    /// Fraction of an element that must be visible to count as crossed in.
    /// Clamped to `0.0..=1.0` when queried.
    pub crossing_threshold: f32,
    /// Orientation hint for the host: `true` virtualizes the horizontal axis.
    /// The engine's math is axis-agnostic; this only affects how the host
    /// maps events and positions.
    pub horizontal: bool,
    /// Quiet interval after the last scroll event before `is_scrolling`
    /// resets and boundary corrections apply again.
    pub quiet_delay_ms: u64,
    /// Default committed window used before any geometry arrives and after a
    /// count change resets the range.
    pub initial_window: usize,
    /// Identifies this view's size cache so diagnostics from simultaneous
    /// windowed views stay distinguishable.
    pub cache_namespace: String,
    /// Count deltas larger than this clear the whole size cache instead of
    /// attempting incremental repair.
    pub invalidation_threshold: usize,
    /// Collects [`crate::Metrics`] when set.
    pub enable_debug: bool,
    pub on_range_change: Option<RangeChangeCallback>,
    pub on_visibility_change: Option<VisibilityCallback>,
}

impl WindowingOptions {
    pub fn new(count: usize, size_mode: SizeMode) -> Self {
        Self {
            count,
            size_mode,
            gap: 0,
            overscan: 1,
            boundary_margin: 0,
            crossing_threshold: 0.0,
            horizontal: false,
            quiet_delay_ms: 150,
            initial_window: 50,
            cache_namespace: String::from("default"),
            invalidation_threshold: 100,
            enable_debug: false,
            on_range_change: None,
            on_visibility_change: None,
        }
    }

    pub fn with_gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_boundary_margin(mut self, boundary_margin: u32) -> Self {
        self.boundary_margin = boundary_margin;
        self
    }

    pub fn with_crossing_threshold(mut self, crossing_threshold: f32) -> Self {
        self.crossing_threshold = crossing_threshold;
        self
    }

    pub fn with_horizontal(mut self, horizontal: bool) -> Self {
        self.horizontal = horizontal;
        self
    }

    pub fn with_quiet_delay_ms(mut self, quiet_delay_ms: u64) -> Self {
        self.quiet_delay_ms = quiet_delay_ms;
        self
    }

    pub fn with_initial_window(mut self, initial_window: usize) -> Self {
        self.initial_window = initial_window;
        self
    }

    pub fn with_cache_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.cache_namespace = namespace.into();
        self
    }

    pub fn with_invalidation_threshold(mut self, threshold: usize) -> Self {
        self.invalidation_threshold = threshold;
        self
    }

    pub fn with_debug(mut self, enable_debug: bool) -> Self {
        self.enable_debug = enable_debug;
        self
    }

    pub fn with_on_range_change(
        mut self,
        f: Option<impl Fn(VisibleRange, bool) + Send + Sync + 'static>,
    ) -> Self {
        self.on_range_change = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_visibility_change(
        mut self,
        f: Option<impl Fn(usize, bool) + Send + Sync + 'static>,
    ) -> Self {
        self.on_visibility_change = f.map(|f| Arc::new(f) as _);
        self
    }
}

impl Clone for WindowingOptions {
    fn clone(&self) -> Self {
        Self {
            count: self.count,
            size_mode: self.size_mode,
            gap: self.gap,
            overscan: self.overscan,
            boundary_margin: self.boundary_margin,
            crossing_threshold: self.crossing_threshold,
            horizontal: self.horizontal,
            quiet_delay_ms: self.quiet_delay_ms,
            initial_window: self.initial_window,
            cache_namespace: self.cache_namespace.clone(),
            invalidation_threshold: self.invalidation_threshold,
            enable_debug: self.enable_debug,
            on_range_change: self.on_range_change.clone(),
            on_visibility_change: self.on_visibility_change.clone(),
        }
    }
}

impl core::fmt::Debug for WindowingOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowingOptions")
            .field("count", &self.count)
            .field("size_mode", &self.size_mode)
            .field("gap", &self.gap)
            .field("overscan", &self.overscan)
            .field("boundary_margin", &self.boundary_margin)
            .field("crossing_threshold", &self.crossing_threshold)
            .field("horizontal", &self.horizontal)
            .field("quiet_delay_ms", &self.quiet_delay_ms)
            .field("initial_window", &self.initial_window)
            .field("cache_namespace", &self.cache_namespace)
            .field("invalidation_threshold", &self.invalidation_threshold)
            .field("enable_debug", &self.enable_debug)
            .finish_non_exhaustive()
    }
}
