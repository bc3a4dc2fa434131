use alloc::string::String;
use alloc::sync::Arc;

use listwindow::{
    EndReached, ListMetrics, ListOptions, OnEndReachedCallback, OnMetricsCallback,
    OnScrollCallback, OnViewableItemsChangedCallback, ScrollTelemetry, ViewableItemsChanged,
};

/// Length of a data item, given the item and its index within its list or section.
pub type ItemLengthOf<T> = Arc<dyn Fn(&T, usize) -> f64 + Send + Sync>;

/// Reconciliation key of a data item, given the item and its index within its list or section.
pub type ItemKeyOf<T> = Arc<dyn Fn(&T, usize) -> String + Send + Sync>;

/// Length of a section header or footer.
pub type SectionLengthFn = Arc<dyn Fn(usize, SectionPart) -> f64 + Send + Sync>;

pub const DEFAULT_HEADER_LENGTH: f64 = 50.0;
pub const DEFAULT_SECTION_HEADER_LENGTH: f64 = 44.0;
pub const DEFAULT_SEPARATOR_LENGTH: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SectionPart {
    Header,
    Footer,
}

/// Lengths used for decoration slots when nothing more specific is known.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct SlotLengths {
    pub header: f64,
    pub footer: f64,
    pub section_header: f64,
    pub section_footer: f64,
    pub separator: f64,
}

impl Default for SlotLengths {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER_LENGTH,
            footer: DEFAULT_HEADER_LENGTH,
            section_header: DEFAULT_SECTION_HEADER_LENGTH,
            section_footer: DEFAULT_SECTION_HEADER_LENGTH,
            separator: DEFAULT_SEPARATOR_LENGTH,
        }
    }
}

/// Event callbacks forwarded to the underlying [`listwindow::VirtualizedList`].
///
/// Indices reported through viewability tokens are virtual indices of the flattened space.
#[derive(Clone, Default)]
pub struct ListCallbacks {
    pub on_end_reached: Option<OnEndReachedCallback>,
    pub on_viewable_items_changed: Option<OnViewableItemsChangedCallback>,
    pub on_scroll: Option<OnScrollCallback>,
    pub on_metrics: Option<OnMetricsCallback>,
}

impl ListCallbacks {
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

    pub(crate) fn apply(&self, mut options: ListOptions) -> ListOptions {
        options.on_end_reached = self.on_end_reached.clone();
        options.on_viewable_items_changed = self.on_viewable_items_changed.clone();
        options.on_scroll = self.on_scroll.clone();
        options.on_metrics = self.on_metrics.clone();
        options
    }
}

impl core::fmt::Debug for ListCallbacks {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListCallbacks")
            .field("on_end_reached", &self.on_end_reached.is_some())
            .field(
                "on_viewable_items_changed",
                &self.on_viewable_items_changed.is_some(),
            )
            .field("on_scroll", &self.on_scroll.is_some())
            .field("on_metrics", &self.on_metrics.is_some())
            .finish()
    }
}
