use alloc::string::{String, ToString};
use alloc::sync::Arc;

use crate::{Axis, EndReached, ListMetrics, ScrollTelemetry, ViewabilityConfig, ViewableItemsChanged};

/// Caller-supplied item length lookup, consulted when no measurement is cached.
///
/// Returning `None` falls through to the static `item_length` or the per-axis default.
pub type ItemLengthFn = Arc<dyn Fn(usize) -> Option<f64> + Send + Sync>;

/// Produces the stable reconciliation key for an index.
pub type KeyExtractor = Arc<dyn Fn(usize) -> String + Send + Sync>;

/// Fired when the viewport comes within `on_end_reached_threshold` of the content end.
pub type OnEndReachedCallback = Arc<dyn Fn(EndReached) + Send + Sync>;

pub type OnViewableItemsChangedCallback = Arc<dyn Fn(&ViewableItemsChanged) + Send + Sync>;

/// Receives every accepted scroll telemetry snapshot.
pub type OnScrollCallback = Arc<dyn Fn(&ScrollTelemetry) + Send + Sync>;

pub type OnMetricsCallback = Arc<dyn Fn(ListMetrics) + Send + Sync>;

pub const DEFAULT_INITIAL_NUM_TO_RENDER: usize = 10;
pub const DEFAULT_WINDOW_SIZE: usize = 21;
pub const DEFAULT_MAX_TO_RENDER_PER_BATCH: usize = 10;
pub const DEFAULT_UPDATE_CELLS_BATCHING_PERIOD_MS: u64 = 50;
pub const DEFAULT_SCROLL_IDLE_TIMEOUT_MS: u64 = 100;
pub const DEFAULT_ON_END_REACHED_THRESHOLD: f64 = 0.1;

/// Virtualization tunables.
///
/// This is plain data: it can be shared between lists and, with `feature = "serde"`,
/// loaded from a host configuration payload.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct WindowConfig {
    pub axis: Axis,
    /// Items mounted before the first scroll event.
    pub initial_num_to_render: usize,
    /// Items kept around the visible range; `(window_size - 1) / 2` (rounded) on each side.
    pub window_size: usize,
    /// Window movement threshold for scroll-driven jumps, and growth per idle tick.
    pub max_to_render_per_batch: usize,
    /// Delay between idle expansion ticks.
    pub update_cells_batching_period_ms: u64,
    /// Quiet period after the last scroll event before the list counts as idle.
    pub scroll_idle_timeout_ms: u64,
    /// End-reached distance as a fraction of the viewport length.
    pub on_end_reached_threshold: f64,
    /// Static item length used when neither the cache nor `get_item_length` resolves one.
    pub item_length: Option<f64>,
    pub viewability: ViewabilityConfig,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Vertical,
            initial_num_to_render: DEFAULT_INITIAL_NUM_TO_RENDER,
            window_size: DEFAULT_WINDOW_SIZE,
            max_to_render_per_batch: DEFAULT_MAX_TO_RENDER_PER_BATCH,
            update_cells_batching_period_ms: DEFAULT_UPDATE_CELLS_BATCHING_PERIOD_MS,
            scroll_idle_timeout_ms: DEFAULT_SCROLL_IDLE_TIMEOUT_MS,
            on_end_reached_threshold: DEFAULT_ON_END_REACHED_THRESHOLD,
            item_length: None,
            viewability: ViewabilityConfig::default(),
        }
    }
}

impl WindowConfig {
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_initial_num_to_render(mut self, initial_num_to_render: usize) -> Self {
        self.initial_num_to_render = initial_num_to_render;
        self
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_max_to_render_per_batch(mut self, max_to_render_per_batch: usize) -> Self {
        self.max_to_render_per_batch = max_to_render_per_batch;
        self
    }

    pub fn with_update_cells_batching_period_ms(mut self, period_ms: u64) -> Self {
        self.update_cells_batching_period_ms = period_ms;
        self
    }

    pub fn with_scroll_idle_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.scroll_idle_timeout_ms = timeout_ms;
        self
    }

    /// Sets the end-reached threshold, clamped to `0.0..=1.0`.
    pub fn with_on_end_reached_threshold(mut self, threshold: f64) -> Self {
        self.on_end_reached_threshold = if threshold.is_finite() {
            threshold.clamp(0.0, 1.0)
        } else {
            DEFAULT_ON_END_REACHED_THRESHOLD
        };
        self
    }

    pub fn with_item_length(mut self, item_length: Option<f64>) -> Self {
        self.item_length = item_length;
        self
    }

    pub fn with_viewability(mut self, viewability: ViewabilityConfig) -> Self {
        self.viewability = viewability;
        self
    }

    /// Items added on each side of the visible range.
    pub fn window_padding(&self) -> usize {
        crate::range::window_padding(self.window_size)
    }

    /// Batch size with a floor of one so expansion always makes progress.
    pub fn batch(&self) -> usize {
        self.max_to_render_per_batch.max(1)
    }
}

/// Configuration for [`crate::VirtualizedList`].
///
/// Cheap to clone: closures are stored in `Arc`s so adapters can rebuild options on data
/// changes without reallocating callbacks.
pub struct ListOptions {
    pub item_count: usize,
    pub config: WindowConfig,
    pub get_item_length: Option<ItemLengthFn>,
    pub key_extractor: KeyExtractor,

    pub has_header: bool,
    pub has_footer: bool,
    /// When set, an empty list renders [`crate::VirtualChild::Empty`].
    pub has_empty_component: bool,
    /// Emit a [`crate::VirtualChild::Separator`] after every item but the last.
    pub inline_separators: bool,

    pub on_end_reached: Option<OnEndReachedCallback>,
    pub on_viewable_items_changed: Option<OnViewableItemsChangedCallback>,
    pub on_scroll: Option<OnScrollCallback>,
    pub on_metrics: Option<OnMetricsCallback>,
}

impl Clone for ListOptions {
    fn clone(&self) -> Self {
        Self {
            item_count: self.item_count,
            config: self.config,
            get_item_length: self.get_item_length.clone(),
            key_extractor: Arc::clone(&self.key_extractor),
            has_header: self.has_header,
            has_footer: self.has_footer,
            has_empty_component: self.has_empty_component,
            inline_separators: self.inline_separators,
            on_end_reached: self.on_end_reached.clone(),
            on_viewable_items_changed: self.on_viewable_items_changed.clone(),
            on_scroll: self.on_scroll.clone(),
            on_metrics: self.on_metrics.clone(),
        }
    }
}

impl ListOptions {
    /// Creates options for a list keyed by index.
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count,
            config: WindowConfig::default(),
            get_item_length: None,
            key_extractor: Arc::new(|i| i.to_string()),
            has_header: false,
            has_footer: false,
            has_empty_component: false,
            inline_separators: false,
            on_end_reached: None,
            on_viewable_items_changed: None,
            on_scroll: None,
            on_metrics: None,
        }
    }

    pub fn with_config(mut self, config: WindowConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_get_item_length(
        mut self,
        get_item_length: impl Fn(usize) -> Option<f64> + Send + Sync + 'static,
    ) -> Self {
        self.get_item_length = Some(Arc::new(get_item_length));
        self
    }

    /// Shorthand for a static item length.
    pub fn with_item_length(mut self, item_length: f64) -> Self {
        self.config.item_length = Some(item_length);
        self
    }

    pub fn with_key_extractor(
        mut self,
        key_extractor: impl Fn(usize) -> String + Send + Sync + 'static,
    ) -> Self {
        self.key_extractor = Arc::new(key_extractor);
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_footer(mut self, has_footer: bool) -> Self {
        self.has_footer = has_footer;
        self
    }

    pub fn with_empty_component(mut self, has_empty_component: bool) -> Self {
        self.has_empty_component = has_empty_component;
        self
    }

    pub fn with_inline_separators(mut self, inline_separators: bool) -> Self {
        self.inline_separators = inline_separators;
        self
    }

    pub fn with_on_end_reached(
        mut self,
        on_end_reached: Option<impl Fn(EndReached) + Send + Sync + 'static>,
    ) -> Self {
        self.on_end_reached = on_end_reached.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_viewable_items_changed(
        mut self,
        f: Option<impl Fn(&ViewableItemsChanged) + Send + Sync + 'static>,
    ) -> Self {
        self.on_viewable_items_changed = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_scroll(
        mut self,
        on_scroll: Option<impl Fn(&ScrollTelemetry) + Send + Sync + 'static>,
    ) -> Self {
        self.on_scroll = on_scroll.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_metrics(
        mut self,
        on_metrics: Option<impl Fn(ListMetrics) + Send + Sync + 'static>,
    ) -> Self {
        self.on_metrics = on_metrics.map(|f| Arc::new(f) as _);
        self
    }
}

impl core::fmt::Debug for ListOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListOptions")
            .field("item_count", &self.item_count)
            .field("config", &self.config)
            .field("has_header", &self.has_header)
            .field("has_footer", &self.has_footer)
            .field("has_empty_component", &self.has_empty_component)
            .field("inline_separators", &self.inline_separators)
            .finish_non_exhaustive()
    }
}
