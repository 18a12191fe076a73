use crate::{PositionModel, VisibleRange};

/// Computes the approximate window of items intersecting the viewport.
///
/// This is a pure function of its inputs: fixed-size mode is two divisions,
/// dynamic mode searches the model's cumulative offsets (falling back to the
/// estimate for unmeasured indexes). The scroll offset is clamped against the
/// model's current extent at application time, so a stale offset from a
/// shrunk sequence degrades to the last window instead of erroring.
pub fn estimate_range(
    scroll_offset: u64,
    viewport_size: u32,
    positions: &PositionModel,
) -> VisibleRange {
    let count = positions.count();
    if count == 0 || viewport_size == 0 {
        return VisibleRange::EMPTY;
    }

    let view = viewport_size as u64;
    let total = positions.total_size();
    let max_scroll = total.saturating_sub(view);
    let offset = scroll_offset.min(max_scroll);
    let last_visible = offset.saturating_add(view).saturating_sub(1);

    let start = positions.index_at(offset);
    let end = positions.index_at(last_visible.max(offset)) + 1;

    VisibleRange::new(start.min(count), end.min(count))
}
