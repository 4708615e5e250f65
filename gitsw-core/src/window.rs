use std::ops::Range;

/// Recompute the first visible row so that `selected` stays inside a
/// viewport of `window_size` rows over `item_count` items.
///
/// The window never starts before 0 and never scrolls past the end of the
/// list; when everything fits it is pinned to the top.
pub fn reconcile(
    selected: usize,
    window_start: usize,
    window_size: usize,
    item_count: usize,
) -> usize {
    let window_size = window_size.max(1);
    if item_count <= window_size {
        return 0;
    }

    let window_start = if selected < window_start {
        selected
    } else if selected >= window_start + window_size {
        selected + 1 - window_size
    } else {
        window_start
    };

    window_start.min(item_count - window_size)
}

/// Indices of the rows currently on screen.
pub fn visible_range(window_start: usize, window_size: usize, item_count: usize) -> Range<usize> {
    let start = window_start.min(item_count);
    let end = window_start.saturating_add(window_size).min(item_count);
    start..end
}
