use crate::{Align, Registration, VirtualItem, VisibleRange, WindowEngine, WindowingOptions};

/// Row-major regrouping of a flat item sequence into fixed-width rows.
///
/// Windowing a grid virtualizes **rows**, not items: row `r` holds
/// `items[r*columns .. r*columns+columns]` (the last row may be ragged), and a
/// visible row range expands back to item indexes by plain multiplication.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridLayout {
    columns: usize,
    count: usize,
}

impl GridLayout {
    /// `columns` is clamped to at least 1.
    pub fn new(columns: usize, count: usize) -> Self {
        Self {
            columns: columns.max(1),
            count,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn row_count(&self) -> usize {
        self.count.div_ceil(self.columns)
    }

    pub fn row_of(&self, index: usize) -> usize {
        index / self.columns
    }

    /// Item indexes in row `r` (the final row may hold fewer than `columns`).
    pub fn items_in_row(&self, row: usize) -> VisibleRange {
        self.item_range(VisibleRange::new(row, row + 1))
    }

    /// Expands a visible row range to its item range:
    /// `[r0*c, min(count, r1*c))`.
    pub fn item_range(&self, rows: VisibleRange) -> VisibleRange {
        let start = rows.start.saturating_mul(self.columns).min(self.count);
        let end = rows.end.saturating_mul(self.columns).min(self.count);
        VisibleRange::new(start, end)
    }

    fn with_count(self, count: usize) -> Self {
        Self { count, ..self }
    }
}

/// A windowed grid: feeds rows through a [`WindowEngine`] and expands the
/// visible row range back into item indexes.
///
/// The wrapped engine's unit is the row, so `size_mode` in the passed options
/// describes the row height; `gap` becomes the inter-row gap. Everything else
/// (overscan, debouncing, boundary crossings, measurement) works exactly as
/// in the flat case — crossings and measurements are reported per **row**.
#[derive(Clone, Debug)]
pub struct GridWindow {
    layout: GridLayout,
    engine: WindowEngine,
}

impl GridWindow {
    pub fn new(item_count: usize, columns: usize, mut options: WindowingOptions) -> Self {
        let layout = GridLayout::new(columns, item_count);
        options.count = layout.row_count();
        Self {
            layout,
            engine: WindowEngine::new(options),
        }
    }

    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    pub fn engine(&self) -> &WindowEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut WindowEngine {
        &mut self.engine
    }

    pub fn item_count(&self) -> usize {
        self.layout.count()
    }

    /// Item indexes covered by the committed visible row range.
    pub fn visible_item_range(&self) -> VisibleRange {
        self.layout.item_range(self.engine.visible_range())
    }

    /// Item indexes covered by the rendered (overscanned) row range.
    pub fn rendered_item_range(&self) -> VisibleRange {
        self.layout.item_range(self.engine.rendered_range())
    }

    /// Iterates rendered rows: each row's virtual position plus the item
    /// indexes it holds.
    pub fn for_each_visible_row(&self, mut f: impl FnMut(VirtualItem, VisibleRange)) {
        self.engine.for_each_visible_item(|row| {
            f(row, self.layout.items_in_row(row.index));
        });
    }

    pub fn apply_scroll_event(&mut self, offset: u64, now_ms: u64) {
        self.engine.apply_scroll_event(offset, now_ms);
    }

    pub fn set_viewport_size(&mut self, size: u32) {
        self.engine.set_viewport_size(size);
    }

    pub fn apply_viewport_resize(&mut self, size: u32) {
        self.engine.apply_viewport_resize(size);
    }

    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.engine.tick(now_ms)
    }

    pub fn total_size(&self) -> u64 {
        self.engine.total_size()
    }

    /// Registers the rendered row holding `item_index` for observation.
    pub fn register_row_of(&mut self, item_index: usize) -> Option<Registration> {
        self.engine.register_item(self.layout.row_of(item_index))
    }

    pub fn release_row(&mut self, registration: Registration) -> bool {
        self.engine.release_item(registration)
    }

    pub fn notify_row_crossing(&mut self, row: usize, entering: bool) {
        self.engine.notify_crossing(row, entering);
    }

    /// Records the measured height of row `row`.
    pub fn measure_row(&mut self, row: usize, size: u32) {
        self.engine.measure_item(row, size);
    }

    /// Scrolls so the row holding `item_index` aligns per `align`.
    pub fn scroll_to_item(&mut self, item_index: usize, align: Align) -> u64 {
        self.engine.scroll_to_item(self.layout.row_of(item_index), align)
    }

    /// Applies an item-count change: the row count is re-derived and fed
    /// through the engine's reset/invalidation policy.
    pub fn set_item_count(&mut self, item_count: usize) {
        self.layout = self.layout.with_count(item_count);
        self.engine.set_count(self.layout.row_count());
    }

    pub fn teardown(&mut self) {
        self.engine.teardown();
    }
}
