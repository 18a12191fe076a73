/// Diagnostic counters, collected only when `enable_debug` is set.
///
/// These exist for tuning overscan/boundary-margin choices; nothing in the
/// engine reads them back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    /// Committed visible-range changes (each one implies a re-render).
    pub range_commits: u64,
    /// Estimator runs.
    pub estimates: u64,
    /// Boundary crossings that widened or confirmed the range.
    pub crossings_applied: u64,
    /// Boundary crossings dropped (scroll in flight, unregistered index,
    /// out of bounds, or torn down).
    pub crossings_ignored: u64,
    /// Measurements that changed a cached size.
    pub measurements: u64,
    /// Wholesale size-cache invalidations from large count deltas.
    pub cache_invalidations: u64,
    /// Width of the committed range at the last commit.
    pub last_visible: usize,
    /// Width of the rendered (overscanned) range at the last commit.
    pub last_rendered: usize,
}
