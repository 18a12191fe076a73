use alloc::string::String;
use alloc::vec::Vec;

/// Per-index measured-size store for dynamically sized items.
///
/// Entries are created lazily on first measurement and read back as
/// `Some(size)`; an unmeasured index is `None` and callers fall back to the
/// estimate. The cache is owned by exactly one windowed view and carries that
/// view's `namespace` so diagnostics from simultaneous views do not blur
/// together.
///
/// Count changes apply a wholesale policy: a delta larger than
/// `invalidation_threshold` clears everything, because a structural change of
/// that magnitude invalidates most cached positions anyway; a small delta
/// preserves entries (truncated at the new count).
#[derive(Clone, Debug)]
pub struct SizeCache {
    namespace: String,
    invalidation_threshold: usize,
    sizes: Vec<Option<u32>>,
    measured: usize,
}

impl SizeCache {
    pub fn new(namespace: String, count: usize, invalidation_threshold: usize) -> Self {
        Self {
            namespace,
            invalidation_threshold,
            sizes: alloc::vec![None; count],
            measured: 0,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    /// Number of indexes holding a measured size.
    pub fn measured_len(&self) -> usize {
        self.measured
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.sizes.get(index).copied().flatten()
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Stores a measurement. Returns `true` when the stored value changed
    /// (first measurement, or a re-measurement with a different size).
    ///
    /// Out-of-range indexes are ignored: a measurement can arrive for an item
    /// that was removed while its render was in flight.
    pub fn store(&mut self, index: usize, size: u32) -> bool {
        let Some(slot) = self.sizes.get_mut(index) else {
            wwarn!(
                namespace = %self.namespace,
                index,
                "measurement for out-of-range index ignored"
            );
            return false;
        };
        match *slot {
            Some(cur) if cur == size => false,
            cur => {
                if cur.is_none() {
                    self.measured += 1;
                }
                *slot = Some(size);
                true
            }
        }
    }

    /// Applies the count-change policy. Returns `true` when the cache was
    /// cleared wholesale.
    pub fn set_count(&mut self, count: usize) -> bool {
        let prev = self.sizes.len();
        if prev == count {
            return false;
        }
        let delta = prev.abs_diff(count);
        if delta > self.invalidation_threshold {
            wdebug!(
                namespace = %self.namespace,
                prev,
                count,
                delta,
                "count delta over threshold, clearing size cache"
            );
            self.sizes.clear();
            self.sizes.resize(count, None);
            self.measured = 0;
            return true;
        }
        if count < prev {
            self.measured -= self.sizes[count..].iter().filter(|s| s.is_some()).count();
        }
        self.sizes.resize(count, None);
        false
    }

    pub fn clear(&mut self) {
        let count = self.sizes.len();
        self.sizes.clear();
        self.sizes.resize(count, None);
        self.measured = 0;
    }
}
