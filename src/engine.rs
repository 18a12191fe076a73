use alloc::vec::Vec;

use crate::estimator::estimate_range;
use crate::{
    Align, Metrics, ObservationRegistry, ObserverConfig, PositionModel, RangeReconciler,
    Registration, ScrollDebouncer, SizeCache, VirtualItem, VisibleRange, WindowingOptions,
};

/// The windowing engine: maintains a sliding visible range over an ordered
/// item sequence so the host renders a bounded slice instead of every item.
///
/// Two signals feed the committed range. Scroll events drive the estimator,
/// which fully replaces the range on every tick. Boundary-crossing
/// notifications from the host's visibility primitive widen it — but only
/// while no scroll gesture is in flight, so a rapid scroll cannot let stale
/// crossings grow the window unbounded. This reconciliation order is
/// deliberate: for a few frames after a fast scroll the range can be wider
/// than geometrically necessary, which costs a handful of extra rendered
/// items, never a broken render.
///
/// The engine is headless and event-driven: the host supplies viewport size,
/// scroll offsets and a monotonic `now_ms` clock, and reads back the rendered
/// slice via [`Self::for_each_visible_item`]. Nothing here touches a real
/// rendering surface, which is what keeps the whole thing testable.
#[derive(Clone, Debug)]
pub struct WindowEngine {
    options: WindowingOptions,
    positions: PositionModel,
    reconciler: RangeReconciler,
    debouncer: ScrollDebouncer,
    registry: ObservationRegistry,
    scroll_offset: u64,
    viewport_size: u32,
    metrics: Option<Metrics>,
    detached: bool,
}

impl WindowEngine {
    pub fn new(options: WindowingOptions) -> Self {
        wdebug!(
            count = options.count,
            overscan = options.overscan,
            namespace = %options.cache_namespace,
            "WindowEngine::new"
        );
        let cache = SizeCache::new(
            options.cache_namespace.clone(),
            options.count,
            options.invalidation_threshold,
        );
        let positions = PositionModel::new(options.size_mode, options.gap, cache);
        let reconciler = RangeReconciler::new(options.initial_window, options.count);
        let debouncer = ScrollDebouncer::new(options.quiet_delay_ms);
        let metrics = options.enable_debug.then(Metrics::default);
        Self {
            options,
            positions,
            reconciler,
            debouncer,
            registry: ObservationRegistry::new(),
            scroll_offset: 0,
            viewport_size: 0,
            metrics,
            detached: false,
        }
    }

    pub fn options(&self) -> &WindowingOptions {
        &self.options
    }

    pub fn count(&self) -> usize {
        self.positions.count()
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn viewport_size(&self) -> u32 {
        self.viewport_size
    }

    pub fn is_scrolling(&self) -> bool {
        self.debouncer.is_scrolling()
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    pub fn size_cache(&self) -> &SizeCache {
        self.positions.cache()
    }

    pub fn metrics(&self) -> Option<&Metrics> {
        self.metrics.as_ref()
    }

    /// What the host should configure its visibility primitive with.
    pub fn observer_config(&self) -> ObserverConfig {
        ObserverConfig {
            margin: self.options.boundary_margin,
            threshold: self.options.crossing_threshold.clamp(0.0, 1.0),
        }
    }

    /// The committed, geometrically visible range (no overscan).
    pub fn visible_range(&self) -> VisibleRange {
        self.reconciler.range()
    }

    /// The overscan-expanded range the host should actually render.
    pub fn rendered_range(&self) -> VisibleRange {
        self.reconciler.rendered(self.options.overscan, self.count())
    }

    /// Best-estimate total extent of the sequence along the scroll axis.
    pub fn total_size(&self) -> u64 {
        self.positions.total_size()
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.total_size().saturating_sub(self.viewport_size as u64)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    /// Leading/trailing filler extents that reserve scroll space for the
    /// items outside the rendered range.
    pub fn spacer_sizes(&self) -> (u64, u64) {
        let rendered = self.rendered_range();
        let total = self.total_size();
        let leading = self.positions.offset_of(rendered.start);
        let trailing = total.saturating_sub(self.positions.offset_of(rendered.end));
        (leading, trailing)
    }

    /// Applies a scroll event from the host (wheel/drag/programmatic bar).
    ///
    /// Marks the engine as scrolling and re-estimates; the estimate fully
    /// replaces the committed range, overwriting any stale boundary-driven
    /// widening.
    pub fn apply_scroll_event(&mut self, offset: u64, now_ms: u64) {
        if self.detached {
            return;
        }
        let offset = self.clamp_scroll_offset(offset);
        wtrace!(offset, now_ms, "apply_scroll_event");
        self.scroll_offset = offset;
        self.debouncer.on_scroll(offset, now_ms);
        self.re_estimate();
    }

    pub fn set_viewport_size(&mut self, size: u32) {
        if self.detached || self.viewport_size == size {
            return;
        }
        self.viewport_size = size;
        self.re_estimate();
    }

    /// Handles a container resize: invalidates the current estimate and
    /// recomputes from the current scroll offset even if the size is
    /// unchanged.
    pub fn apply_viewport_resize(&mut self, size: u32) {
        if self.detached {
            return;
        }
        self.viewport_size = size;
        self.scroll_offset = self.clamp_scroll_offset(self.scroll_offset);
        self.re_estimate();
    }

    /// Advances the quiet-interval clock. Returns `true` when scrolling
    /// settled on this call; from that point boundary corrections apply
    /// again.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.detached {
            return false;
        }
        if !self.debouncer.tick(now_ms) {
            return false;
        }
        wtrace!(now_ms, "scroll settled");
        self.re_estimate();
        true
    }

    /// Registers a rendered item with the observation registry.
    ///
    /// Returns `None` when the index is out of bounds, already observed, or
    /// the engine is torn down. Only currently rendered items should ever be
    /// registered.
    pub fn register_item(&mut self, index: usize) -> Option<Registration> {
        if self.detached || index >= self.count() {
            return None;
        }
        self.registry.register(index)
    }

    /// Releases an observation handle. Stale handles are a silent no-op.
    pub fn release_item(&mut self, registration: Registration) -> bool {
        self.registry.release(registration)
    }

    pub fn observed_len(&self) -> usize {
        self.registry.len()
    }

    /// Delivers a boundary-crossing event from the host's visibility
    /// primitive.
    ///
    /// Dropped without effect when the engine is torn down, the index is not
    /// registered (stale callbacks are expected), the index is out of bounds,
    /// or a scroll is in flight. An accepted crossing-in widens the committed
    /// range to include `index`; crossing-out never narrows it — narrowing
    /// only happens through a fresh estimate.
    pub fn notify_crossing(&mut self, index: usize, entering: bool) {
        if self.detached {
            return;
        }
        if !self.registry.is_observed(index) || index >= self.count() || self.is_scrolling() {
            wtrace!(index, entering, "crossing ignored");
            if let Some(m) = &mut self.metrics {
                m.crossings_ignored += 1;
            }
            return;
        }
        if let Some(m) = &mut self.metrics {
            m.crossings_applied += 1;
        }
        if let Some(cb) = &self.options.on_visibility_change {
            cb(index, entering);
        }
        if entering {
            let changed = self.reconciler.widen_to(index, self.count());
            self.commit(changed);
        }
    }

    /// Records a measured size for a dynamically sized item.
    ///
    /// No-op in fixed mode, for out-of-range indexes, and for re-measurements
    /// that match the cached value. A real change invalidates memoized
    /// offsets past `index` and re-estimates.
    pub fn measure_item(&mut self, index: usize, size: u32) {
        if self.detached {
            return;
        }
        if !self.positions.measure(index, size) {
            return;
        }
        wtrace!(index, size, "measured");
        if let Some(m) = &mut self.metrics {
            m.measurements += 1;
        }
        self.re_estimate();
    }

    /// Applies an item-count change (insert/remove in the source sequence).
    ///
    /// Resets the committed range to the default window and applies the size
    /// cache's wholesale-invalidation policy for large deltas.
    pub fn set_count(&mut self, count: usize) {
        if self.detached || self.count() == count {
            return;
        }
        wdebug!(prev = self.count(), count, "set_count");
        self.options.count = count;
        if self.positions.set_count(count) {
            if let Some(m) = &mut self.metrics {
                m.cache_invalidations += 1;
            }
        }
        let changed = self.reconciler.reset(self.options.initial_window, count);
        self.commit(changed);
    }

    /// Scrolls so that item `index` aligns per `align`, without marking the
    /// engine as scrolling. Returns the applied (clamped) offset.
    pub fn scroll_to_item(&mut self, index: usize, align: Align) -> u64 {
        if self.detached {
            return self.scroll_offset;
        }
        let offset = self.scroll_to_item_offset(index, align);
        self.scroll_offset = offset;
        self.re_estimate();
        offset
    }

    /// Computes the clamped target offset for [`Self::scroll_to_item`]
    /// without applying it (used by tween drivers).
    pub fn scroll_to_item_offset(&self, index: usize, align: Align) -> u64 {
        let count = self.count();
        if count == 0 {
            return 0;
        }
        let index = index.min(count - 1);
        let start = self.positions.offset_of(index);
        let end = start.saturating_add(self.positions.size_of(index) as u64);
        let view = self.viewport_size as u64;

        let target = match align {
            Align::Start => start,
            Align::End => end.saturating_sub(view),
            Align::Center => {
                let center = start.saturating_add((end - start) / 2);
                center.saturating_sub(view / 2)
            }
            Align::Auto => {
                let cur = self.scroll_offset;
                let cur_end = cur.saturating_add(view);
                if start >= cur && end <= cur_end {
                    cur
                } else if start < cur {
                    start
                } else {
                    end.saturating_sub(view)
                }
            }
        };
        self.clamp_scroll_offset(target)
    }

    /// Iterates the rendered (overscanned) slice with per-item virtual
    /// offsets, allocation-free.
    pub fn for_each_visible_item(&self, mut f: impl FnMut(VirtualItem)) {
        let rendered = self.rendered_range();
        if rendered.is_empty() {
            return;
        }
        let count = self.count();
        let gap = self.options.gap as u64;
        let mut start = self.positions.offset_of(rendered.start);
        for index in rendered.start..rendered.end {
            let size = self.positions.size_of(index);
            f(VirtualItem { index, start, size });
            start = start.saturating_add(size as u64);
            if gap > 0 && index + 1 < count {
                start = start.saturating_add(gap);
            }
        }
    }

    /// Collects the rendered slice into `out` (clears `out` first).
    pub fn collect_visible_items(&self, out: &mut Vec<VirtualItem>) {
        out.clear();
        self.for_each_visible_item(|item| out.push(item));
    }

    /// Disconnects the engine from its host: clears the observation registry,
    /// cancels the quiet-interval transition, and turns every later event
    /// delivery into a no-op. Leaked callbacks after this point mutate
    /// nothing observable.
    pub fn teardown(&mut self) {
        if self.detached {
            return;
        }
        wdebug!(observed = self.registry.len(), "teardown");
        self.registry.clear();
        self.debouncer.cancel();
        self.detached = true;
    }

    fn re_estimate(&mut self) {
        let range = estimate_range(self.scroll_offset, self.viewport_size, &self.positions);
        if let Some(m) = &mut self.metrics {
            m.estimates += 1;
        }
        let changed = self.reconciler.replace(range, self.count());
        self.commit(changed);
    }

    fn commit(&mut self, changed: bool) {
        if !changed {
            return;
        }
        let range = self.reconciler.range();
        let rendered_len = self
            .reconciler
            .rendered(self.options.overscan, self.count())
            .len();
        if let Some(m) = &mut self.metrics {
            m.range_commits += 1;
            m.last_visible = range.len();
            m.last_rendered = rendered_len;
        }
        if let Some(cb) = &self.options.on_range_change {
            cb(range, self.debouncer.is_scrolling());
        }
    }
}
