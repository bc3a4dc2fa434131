use alloc::string::String;
use alloc::vec::Vec;

use crate::{ItemSizes, visible_range};

/// Decides which items count as viewable for `on_viewable_items_changed`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct ViewabilityConfig {
    /// Percentage (0-100) of an item's own length that must be inside the viewport.
    ///
    /// With `0.0`, any item with a non-empty visible portion is viewable.
    pub item_visible_percent_threshold: f64,
}

impl Default for ViewabilityConfig {
    fn default() -> Self {
        Self {
            item_visible_percent_threshold: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewToken {
    pub index: usize,
    pub key: String,
    pub is_viewable: bool,
}

/// Payload of `on_viewable_items_changed`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewableItemsChanged {
    /// Every currently viewable item, ascending by index.
    pub viewable_items: Vec<ViewToken>,
    /// Items whose viewability flipped since the last report, ascending by index.
    pub changed: Vec<ViewToken>,
}

/// Tracks the viewable set between scroll events and reports differences.
#[derive(Clone, Debug, Default)]
pub struct ViewabilityTracker {
    viewable: Vec<usize>,
}

impl ViewabilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indices reported viewable by the last update, ascending.
    pub fn viewable(&self) -> &[usize] {
        &self.viewable
    }

    /// Forgets the viewable set. Every previously viewable item is reported as no longer
    /// viewable; `None` when nothing was viewable.
    pub fn clear(&mut self, key_for: impl Fn(usize) -> String) -> Option<ViewableItemsChanged> {
        if self.viewable.is_empty() {
            return None;
        }
        let changed = self
            .viewable
            .iter()
            .map(|&i| token(i, false, &key_for))
            .collect();
        self.viewable.clear();
        Some(ViewableItemsChanged {
            viewable_items: Vec::new(),
            changed,
        })
    }

    /// Recomputes the viewable set. Returns a change report when the set differs from the
    /// previous one.
    pub fn update<S: ItemSizes + ?Sized>(
        &mut self,
        config: &ViewabilityConfig,
        scroll_offset: f64,
        viewport_length: f64,
        sizes: &S,
        item_count: usize,
        key_for: impl Fn(usize) -> String,
    ) -> Option<ViewableItemsChanged> {
        let next = compute_viewable(config, scroll_offset, viewport_length, sizes, item_count);
        if next == self.viewable {
            return None;
        }

        let mut changed = Vec::new();
        let (mut a, mut b) = (0usize, 0usize);
        while a < self.viewable.len() || b < next.len() {
            let old = self.viewable.get(a).copied();
            let new = next.get(b).copied();
            match (old, new) {
                (Some(o), Some(n)) if o == n => {
                    a += 1;
                    b += 1;
                }
                (Some(o), Some(n)) if o < n => {
                    changed.push(token(o, false, &key_for));
                    a += 1;
                }
                (Some(o), None) => {
                    changed.push(token(o, false, &key_for));
                    a += 1;
                }
                (_, Some(n)) => {
                    changed.push(token(n, true, &key_for));
                    b += 1;
                }
                (None, None) => break,
            }
        }

        let viewable_items = next.iter().map(|&i| token(i, true, &key_for)).collect();
        self.viewable = next;
        Some(ViewableItemsChanged {
            viewable_items,
            changed,
        })
    }
}

fn token(index: usize, is_viewable: bool, key_for: &impl Fn(usize) -> String) -> ViewToken {
    ViewToken {
        index,
        key: key_for(index),
        is_viewable,
    }
}

fn compute_viewable<S: ItemSizes + ?Sized>(
    config: &ViewabilityConfig,
    scroll_offset: f64,
    viewport_length: f64,
    sizes: &S,
    item_count: usize,
) -> Vec<usize> {
    let mut out = Vec::new();
    if viewport_length.is_nan() || viewport_length <= 0.0 {
        return out;
    }
    let Some(visible) = visible_range(scroll_offset, viewport_length, sizes, item_count) else {
        return out;
    };

    let view_start = scroll_offset.max(0.0);
    let view_end = view_start + viewport_length;
    let threshold = config.item_visible_percent_threshold.clamp(0.0, 100.0);
    let mut start = sizes.length_sum(0..visible.first);
    for index in visible.first..=visible.last {
        let length = sizes.item_length(index);
        let end = start + length;
        let shown = end.min(view_end) - start.max(view_start);
        let viewable = if length > 0.0 {
            shown > 0.0 && shown / length * 100.0 >= threshold
        } else {
            start >= view_start && start < view_end
        };
        if viewable {
            out.push(index);
        }
        start = end;
    }
    out
}
