use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::command::{ScrollContainer, ScrollPosition, ScrollToIndexParams};
use crate::controller::{RenderWindowController, WindowUpdate};
use crate::layout::{ItemLayoutCache, ItemSizes, LayoutResolver};
use crate::viewability::ViewabilityTracker;
use crate::{
    ItemLayout, ListMetrics, ListOptions, Point, RenderWindow, ScrollTelemetry, VirtualChild,
    VirtualItem, WindowConfig,
};

/// A virtualized list: layout cache, render window controller, and child assembly.
///
/// This type holds no UI objects. The host:
/// - forwards native scroll events to [`Self::on_scroll`] and measurements to
///   [`Self::on_item_layout`],
/// - calls [`Self::tick`] whenever [`Self::next_deadline`] elapses,
/// - calls [`Self::render`] when an update reports `needs_render()` and reconciles the
///   returned children by key.
#[derive(Clone, Debug)]
pub struct VirtualizedList {
    options: ListOptions,
    cache: ItemLayoutCache,
    controller: RenderWindowController,
    viewability: ViewabilityTracker,
}

fn resolver<'a>(cache: &'a ItemLayoutCache, options: &'a ListOptions) -> LayoutResolver<'a> {
    LayoutResolver::new(
        cache,
        options.get_item_length.as_ref(),
        options.config.item_length,
        options.config.axis,
    )
}

impl VirtualizedList {
    pub fn new(options: ListOptions) -> Self {
        ldebug!(
            item_count = options.item_count,
            window_size = options.config.window_size,
            "VirtualizedList::new"
        );
        Self {
            controller: RenderWindowController::new(options.config, options.item_count),
            options,
            cache: ItemLayoutCache::new(),
            viewability: ViewabilityTracker::new(),
        }
    }

    /// Starts idle expansion. Call once the list is attached to its scroll container.
    pub fn mount(&mut self, now_ms: u64) {
        self.controller.mount(now_ms);
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    pub fn config(&self) -> &WindowConfig {
        &self.options.config
    }

    pub fn controller(&self) -> &RenderWindowController {
        &self.controller
    }

    pub fn layout_cache(&self) -> &ItemLayoutCache {
        &self.cache
    }

    pub fn layouts(&self) -> LayoutResolver<'_> {
        resolver(&self.cache, &self.options)
    }

    pub fn item_count(&self) -> usize {
        self.options.item_count
    }

    pub fn window(&self) -> Option<RenderWindow> {
        self.controller.window()
    }

    pub fn is_scrolling(&self) -> bool {
        self.controller.is_scrolling()
    }

    pub fn scroll_offset(&self) -> f64 {
        self.controller.scroll_offset()
    }

    pub fn viewport_length(&self) -> f64 {
        self.controller.viewport_length()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.controller.next_deadline()
    }

    /// Indices reported viewable by the last scroll event.
    pub fn viewable_indices(&self) -> &[usize] {
        self.viewability.viewable()
    }

    /// Resolved length of `index`, or `None` when out of range.
    pub fn item_length(&self, index: usize) -> Option<f64> {
        (index < self.options.item_count).then(|| self.layouts().item_length(index))
    }

    /// Resolved layout of `index`, or `None` when out of range.
    pub fn item_layout(&self, index: usize) -> Option<ItemLayout> {
        (index < self.options.item_count).then(|| self.layouts().layout(index))
    }

    /// Best estimate of the total content length along the scroll axis.
    pub fn content_length(&self) -> f64 {
        self.layouts().total_length(self.options.item_count)
    }

    /// Reconciliation key for `index`; out-of-range indices get a synthetic key.
    pub fn key_for(&self, index: usize) -> String {
        if index >= self.options.item_count {
            ltrace!(index, item_count = self.options.item_count, "key_for: out of range");
            return format!("invalid_{index}");
        }
        (self.options.key_extractor)(index)
    }

    /// Handles a native scroll event.
    ///
    /// Telemetry without a usable offset is ignored and reports no change.
    pub fn on_scroll(&mut self, telemetry: &ScrollTelemetry, now_ms: u64) -> WindowUpdate {
        let layouts = resolver(&self.cache, &self.options);
        let Some(outcome) = self.controller.on_scroll(telemetry, now_ms, &layouts) else {
            return WindowUpdate::NONE;
        };

        if let Some(cb) = &self.options.on_scroll {
            cb(telemetry);
        }
        if let Some(cb) = &self.options.on_metrics {
            cb(ListMetrics {
                content_length: outcome.content_length,
                visible_length: self.controller.viewport_length(),
                offset: self.controller.scroll_offset(),
                velocity: self.controller.velocity(),
            });
        }
        if let (Some(end), Some(cb)) = (outcome.end_reached, &self.options.on_end_reached) {
            cb(end);
        }
        self.update_viewability();
        outcome.update
    }

    fn update_viewability(&mut self) {
        let layouts = resolver(&self.cache, &self.options);
        let key_extractor = &self.options.key_extractor;
        let changed = self.viewability.update(
            &self.options.config.viewability,
            self.controller.scroll_offset(),
            self.controller.viewport_length(),
            &layouts,
            self.options.item_count,
            |i| key_extractor(i),
        );
        if let (Some(changed), Some(cb)) = (changed, &self.options.on_viewable_items_changed) {
            cb(&changed);
        }
    }

    /// Sets the viewport length reported by container layout (no scroll event).
    pub fn set_viewport_length(&mut self, viewport_length: f64) {
        self.controller.set_viewport_length(viewport_length);
        self.update_viewability();
    }

    /// Runs scheduled idle checks and expansion ticks due at `now_ms`.
    pub fn tick(&mut self, now_ms: u64) -> WindowUpdate {
        self.controller.tick(now_ms)
    }

    /// Records a native measurement for `index`.
    pub fn on_item_layout(&mut self, index: usize, offset: f64, length: f64) -> WindowUpdate {
        if index >= self.options.item_count {
            ltrace!(index, "on_item_layout: out of range");
            return WindowUpdate::NONE;
        }
        let changed = self.cache.insert(ItemLayout {
            length,
            offset,
            index,
        });
        WindowUpdate {
            layout_changed: changed,
            ..WindowUpdate::NONE
        }
    }

    /// Adopts a new item count for the same data source; cached layouts are kept.
    pub fn set_item_count(&mut self, item_count: usize, now_ms: u64) -> WindowUpdate {
        if self.options.item_count == item_count {
            return WindowUpdate::NONE;
        }
        self.options.item_count = item_count;
        self.cache.truncate(item_count);
        self.controller.set_item_count(item_count, now_ms)
    }

    /// Switches to a new data source: every cached layout is invalidated.
    pub fn replace_data(&mut self, item_count: usize, now_ms: u64) -> WindowUpdate {
        ldebug!(item_count, cached = self.cache.len(), "replace_data");
        self.cache.clear();
        self.retire_viewable();
        self.controller.reset_end_reached();
        self.options.item_count = item_count;
        let update = self.controller.set_item_count(item_count, now_ms);
        self.update_viewability();
        WindowUpdate {
            layout_changed: true,
            ..update
        }
    }

    /// Reports every viewable item of the outgoing data as no longer viewable.
    fn retire_viewable(&mut self) {
        let key_extractor = &self.options.key_extractor;
        let cleared = self.viewability.clear(|i| key_extractor(i));
        if let (Some(cleared), Some(cb)) = (cleared, &self.options.on_viewable_items_changed) {
            cb(&cleared);
        }
    }

    /// Replaces the options wholesale, treating them as a new data source.
    pub fn set_options(&mut self, options: ListOptions, now_ms: u64) -> WindowUpdate {
        let item_count = options.item_count;
        self.retire_viewable();
        self.controller.set_config(options.config, now_ms);
        self.options = options;
        self.replace_data(item_count, now_ms)
    }

    pub fn set_config(&mut self, config: WindowConfig, now_ms: u64) {
        self.options.config = config;
        self.controller.set_config(config, now_ms);
    }

    /// Spacer lengths around the current window, or `None` for an empty list.
    pub fn spacer_lengths(&self) -> Option<(f64, f64)> {
        let window = self.controller.window()?;
        let layouts = self.layouts();
        let before = layouts.length_sum(0..window.first);
        let after = layouts.length_sum(window.last.saturating_add(1)..self.options.item_count);
        Some((before, after))
    }

    /// Assembles the container's children for the current window.
    ///
    /// Order: header, spacer before, items `first..=last` (each optionally followed by an
    /// inline separator, except the last item of the list), spacer after, footer. An empty
    /// list yields only [`VirtualChild::Empty`] when an empty component is configured, and no
    /// children otherwise.
    pub fn render(&self) -> Vec<VirtualChild> {
        let count = self.options.item_count;
        let window = match self.controller.window() {
            Some(window) if count > 0 => window,
            _ => {
                return if self.options.has_empty_component {
                    alloc::vec![VirtualChild::Empty]
                } else {
                    Vec::new()
                };
            }
        };

        let layouts = self.layouts();
        let last = window.last.min(count - 1);
        let mut out = Vec::with_capacity(window.len() * 2 + 4);
        if self.options.has_header {
            out.push(VirtualChild::Header);
        }

        let mut offset = layouts.length_sum(0..window.first);
        out.push(VirtualChild::SpacerBefore { length: offset });
        for index in window.first..=last {
            let length = layouts.item_length(index);
            let key = (self.options.key_extractor)(index);
            let separator = (self.options.inline_separators && index + 1 < count)
                .then(|| format!("{key}_separator"));
            out.push(VirtualChild::Item(VirtualItem {
                key,
                index,
                offset,
                length,
            }));
            if let Some(key) = separator {
                out.push(VirtualChild::Separator { after: index, key });
            }
            offset += length;
        }
        out.push(VirtualChild::SpacerAfter {
            length: layouts.length_sum(last + 1..count),
        });

        if self.options.has_footer {
            out.push(VirtualChild::Footer);
        }
        out
    }

    /// Offset `scroll_to_index` would request, or `None` for an empty list.
    ///
    /// The item start is the sum of resolved lengths before it, so accuracy depends on how
    /// much of the layout cache is populated. Indices past the end clamp to the last item.
    pub fn scroll_to_index_offset(&self, params: ScrollToIndexParams) -> Option<f64> {
        let count = self.options.item_count;
        if count == 0 {
            return None;
        }
        let layout = self.layouts().layout(params.index.min(count - 1));
        let viewport = self.controller.viewport_length();
        let view_position = if params.view_position.is_finite() {
            params.view_position
        } else {
            0.0
        };
        let view_offset = if params.view_offset.is_finite() {
            params.view_offset
        } else {
            0.0
        };
        let offset = layout.offset - view_position * (viewport - layout.length) - view_offset;
        Some(offset.max(0.0))
    }

    /// Requests a scroll that brings `params.index` into view.
    ///
    /// Returns the requested offset; empty lists issue no command.
    pub fn scroll_to_index<C: ScrollContainer + ?Sized>(
        &self,
        params: ScrollToIndexParams,
        container: &mut C,
    ) -> Option<f64> {
        let offset = self.scroll_to_index_offset(params)?;
        ltrace!(index = params.index, offset, "scroll_to_index");
        self.scroll_to_offset(offset, params.animated, container);
        Some(offset)
    }

    pub fn scroll_to_offset<C: ScrollContainer + ?Sized>(
        &self,
        offset: f64,
        animated: bool,
        container: &mut C,
    ) {
        let offset = if offset.is_finite() { offset.max(0.0) } else { 0.0 };
        let point = Point::on_axis(self.options.config.axis, offset);
        container.scroll_to_position(ScrollPosition::new(point, animated));
    }

    /// Requests a scroll to the end of the content. Returns the requested offset.
    pub fn scroll_to_end<C: ScrollContainer + ?Sized>(
        &self,
        animated: bool,
        container: &mut C,
    ) -> Option<f64> {
        if self.options.item_count == 0 {
            return None;
        }
        let offset = (self.content_length() - self.controller.viewport_length()).max(0.0);
        self.scroll_to_offset(offset, animated, container);
        Some(offset)
    }

    pub fn flash_scroll_indicators<C: ScrollContainer + ?Sized>(&self, container: &mut C) {
        container.flash_scroll_indicators();
    }
}
