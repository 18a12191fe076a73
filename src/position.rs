use alloc::vec::Vec;
use core::cell::RefCell;

use crate::SizeCache;
use crate::SizeMode;

/// Maps indexes to cumulative offsets and sizes along the scroll axis.
///
/// `offset(i)` is the sum of all sizes (plus `gap`s) before `i`. Fixed-size
/// mode needs no state at all: offsets are a single multiplication. Dynamic
/// mode memoizes cumulative offsets in a prefix vector that is lazily
/// re-extended after a measurement invalidates it; the [`SizeCache`] stays
/// the source of truth for sizes.
#[derive(Clone, Debug)]
pub struct PositionModel {
    mode: SizeMode,
    gap: u32,
    count: usize,
    cache: SizeCache,
    /// Realized prefix of cumulative offsets: `offsets[i]` is the start of
    /// item `i`, and once fully realized `offsets[count]` is the total size.
    /// Only the current `len()` entries are valid.
    offsets: RefCell<Vec<u64>>,
}

impl PositionModel {
    pub fn new(mode: SizeMode, gap: u32, cache: SizeCache) -> Self {
        let count = cache.count();
        let mut offsets = Vec::with_capacity(count.saturating_add(1));
        offsets.push(0);
        Self {
            mode,
            gap,
            count,
            cache,
            offsets: RefCell::new(offsets),
        }
    }

    pub fn mode(&self) -> SizeMode {
        self.mode
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn cache(&self) -> &SizeCache {
        &self.cache
    }

    /// Size of item `index`: the measurement when one exists, the estimate
    /// otherwise. Never zero.
    pub fn size_of(&self, index: usize) -> u32 {
        match self.mode {
            SizeMode::Fixed(_) => self.mode.estimate(),
            SizeMode::Dynamic { .. } => self
                .cache
                .get(index)
                .map(|s| s.max(1))
                .unwrap_or_else(|| self.mode.estimate()),
        }
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.mode.is_fixed() || self.cache.is_measured(index)
    }

    /// Scroll-axis extent one item occupies including its trailing gap.
    fn span(&self, index: usize) -> u64 {
        let mut span = self.size_of(index) as u64;
        if self.gap > 0 && index + 1 < self.count {
            span = span.saturating_add(self.gap as u64);
        }
        span
    }

    /// Start offset of item `index`; `offset_of(count)` is the total size.
    pub fn offset_of(&self, index: usize) -> u64 {
        let index = index.min(self.count);
        if self.mode.is_fixed() {
            let unit = self.mode.estimate() as u64 + self.gap as u64;
            let off = index as u64 * unit;
            // The trailing gap of the last item does not exist.
            if index == self.count && self.gap > 0 && self.count > 0 {
                return off - self.gap as u64;
            }
            return off;
        }
        self.realize_to(index);
        self.offsets.borrow()[index]
    }

    pub fn total_size(&self) -> u64 {
        self.offset_of(self.count)
    }

    /// Index of the item whose span (including its trailing gap) contains
    /// `offset`. Clamped to the last item; 0 when the sequence is empty.
    pub fn index_at(&self, offset: u64) -> usize {
        if self.count == 0 {
            return 0;
        }
        if self.mode.is_fixed() {
            let unit = self.mode.estimate() as u64 + self.gap as u64;
            return ((offset / unit) as usize).min(self.count - 1);
        }
        self.realize_to(self.count);
        let offsets = self.offsets.borrow();
        // Number of items starting at or before `offset`, minus one.
        let starts_before = offsets[..=self.count].partition_point(|&o| o <= offset);
        starts_before.saturating_sub(1).min(self.count - 1)
    }

    /// Records a measurement. Returns `true` when the size changed, which
    /// invalidates memoized offsets past `index`.
    pub fn measure(&mut self, index: usize, size: u32) -> bool {
        if self.mode.is_fixed() || index >= self.count {
            return false;
        }
        if !self.cache.store(index, size) {
            return false;
        }
        // Starts up to and including `index` are unaffected by its new size.
        let mut offsets = self.offsets.borrow_mut();
        offsets.truncate(index + 1);
        true
    }

    /// Applies a count change. Returns `true` when the size cache was cleared
    /// wholesale (delta over the invalidation threshold).
    pub fn set_count(&mut self, count: usize) -> bool {
        let prev = self.count;
        if prev == count {
            return false;
        }
        self.count = count;
        let cleared = self.cache.set_count(count);
        let mut offsets = self.offsets.borrow_mut();
        if cleared {
            offsets.truncate(1);
        } else {
            // The old last item's trailing-gap rule changes too, so keep only
            // starts strictly before both old and new ends.
            offsets.truncate(prev.min(count).max(1));
        }
        cleared
    }

    pub fn clear_measurements(&mut self) {
        self.cache.clear();
        self.offsets.borrow_mut().truncate(1);
    }

    fn realize_to(&self, index: usize) {
        let mut offsets = self.offsets.borrow_mut();
        while offsets.len() <= index {
            let i = offsets.len() - 1;
            let next = offsets[i].saturating_add(self.span(i));
            offsets.push(next);
        }
    }
}
