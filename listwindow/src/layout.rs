use core::ops::Range;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::{Axis, ItemLayout, ItemLengthFn};

#[cfg(feature = "std")]
type LayoutMap = HashMap<usize, ItemLayout>;
#[cfg(not(feature = "std"))]
type LayoutMap = BTreeMap<usize, ItemLayout>;

/// Length lookup along the scroll axis.
///
/// [`crate::calculate_render_range`] is generic over this so it can run against the live
/// layout cache or a plain slice of lengths.
pub trait ItemSizes {
    fn item_length(&self, index: usize) -> f64;

    /// Sum of lengths for `range`, scanned linearly.
    fn length_sum(&self, range: Range<usize>) -> f64 {
        range.map(|i| self.item_length(i)).sum()
    }
}

impl ItemSizes for [f64] {
    fn item_length(&self, index: usize) -> f64 {
        self.get(index).copied().unwrap_or(0.0)
    }
}

/// Sparse index → layout mapping, filled by native measurements.
///
/// There is no eviction. The owner clears it wholesale when the data source identity
/// changes.
#[derive(Clone, Debug, Default)]
pub struct ItemLayoutCache {
    entries: LayoutMap,
}

impl ItemLayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<ItemLayout> {
        self.entries.get(&index).copied()
    }

    /// Records a measured layout. Returns `true` when the stored length changed.
    ///
    /// Non-finite or negative lengths are rejected.
    pub fn insert(&mut self, layout: ItemLayout) -> bool {
        if !is_usable_length(layout.length) {
            lwarn!(
                index = layout.index,
                length = layout.length,
                "ItemLayoutCache: rejected unusable length"
            );
            return false;
        }
        let prev = self.entries.insert(layout.index, layout);
        prev.is_none_or(|p| p.length != layout.length)
    }

    pub fn remove(&mut self, index: usize) -> Option<ItemLayout> {
        self.entries.remove(&index)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drops entries at or past `count`.
    pub fn truncate(&mut self, count: usize) {
        self.entries.retain(|&i, _| i < count);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }
}

/// Resolves item lengths from, in order: the cache, the caller's `get_item_length`, the
/// static `item_length`, then the per-axis default.
#[derive(Clone, Copy)]
pub struct LayoutResolver<'a> {
    cache: &'a ItemLayoutCache,
    get_item_length: Option<&'a ItemLengthFn>,
    item_length: Option<f64>,
    axis: Axis,
}

impl<'a> LayoutResolver<'a> {
    pub fn new(
        cache: &'a ItemLayoutCache,
        get_item_length: Option<&'a ItemLengthFn>,
        item_length: Option<f64>,
        axis: Axis,
    ) -> Self {
        Self {
            cache,
            get_item_length,
            item_length,
            axis,
        }
    }

    /// Start offset of `index`: the sum of lengths of `[0, index)`.
    pub fn offset_of(&self, index: usize) -> f64 {
        self.length_sum(0..index)
    }

    pub fn layout(&self, index: usize) -> ItemLayout {
        ItemLayout {
            length: self.item_length(index),
            offset: self.offset_of(index),
            index,
        }
    }

    pub fn total_length(&self, item_count: usize) -> f64 {
        self.length_sum(0..item_count)
    }
}

impl ItemSizes for LayoutResolver<'_> {
    fn item_length(&self, index: usize) -> f64 {
        if let Some(layout) = self.cache.get(index) {
            return layout.length;
        }
        if let Some(length) = self
            .get_item_length
            .and_then(|f| f(index))
            .filter(|&l| is_usable_length(l))
        {
            return length;
        }
        match self.item_length.filter(|&l| is_usable_length(l)) {
            Some(length) => length,
            None => self.axis.default_item_length(),
        }
    }
}

impl core::fmt::Debug for LayoutResolver<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LayoutResolver")
            .field("cached", &self.cache.len())
            .field("has_get_item_length", &self.get_item_length.is_some())
            .field("item_length", &self.item_length)
            .field("axis", &self.axis)
            .finish()
    }
}

fn is_usable_length(length: f64) -> bool {
    length.is_finite() && length >= 0.0
}
