use crate::{ItemSizes, RenderRange, VisibleRange};

/// Computes the items intersecting `[scroll_offset, scroll_offset + viewport_length)`.
///
/// Both scans walk from index 0 and accumulate lengths, so mixed measured/estimated lengths
/// are always honored. Returns `None` for an empty list.
pub fn visible_range<S: ItemSizes + ?Sized>(
    scroll_offset: f64,
    viewport_length: f64,
    sizes: &S,
    item_count: usize,
) -> Option<VisibleRange> {
    if item_count == 0 {
        return None;
    }
    let last_index = item_count - 1;
    let scroll_offset = if scroll_offset.is_finite() {
        scroll_offset.max(0.0)
    } else {
        0.0
    };

    let mut first = 0usize;
    let mut cumulative = 0.0f64;
    while first < last_index {
        let length = sizes.item_length(first);
        if cumulative + length > scroll_offset {
            break;
        }
        cumulative += length;
        first += 1;
    }

    // Only the part of `first` past the scroll offset counts toward the viewport.
    let mut last = first;
    let mut accumulated = cumulative + sizes.item_length(first) - scroll_offset;
    while accumulated < viewport_length && last < last_index {
        last += 1;
        accumulated += sizes.item_length(last);
    }

    Some(VisibleRange { first, last })
}

/// Maps scroll position and viewport onto the padded index range the render window should
/// cover.
///
/// The visible range is padded by `round((window_size - 1) / 2)` items on each side and
/// clamped to `[0, item_count - 1]`.
/// Items added on each side of the visible range: `round((window_size - 1) / 2)`.
pub(crate) fn window_padding(window_size: usize) -> usize {
    window_size.saturating_sub(1).div_ceil(2)
}

pub fn calculate_render_range<S: ItemSizes + ?Sized>(
    scroll_offset: f64,
    viewport_length: f64,
    sizes: &S,
    item_count: usize,
    window_size: usize,
) -> Option<RenderRange> {
    let visible = visible_range(scroll_offset, viewport_length, sizes, item_count)?;
    let padding = window_padding(window_size);
    let last_index = item_count - 1;
    Some(RenderRange {
        start: visible.first.saturating_sub(padding),
        end: visible.last.saturating_add(padding).min(last_index),
        visible,
    })
}
