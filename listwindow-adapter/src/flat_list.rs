use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use listwindow::{
    ListOptions, ScrollContainer, ScrollTelemetry, ScrollToIndexParams, VirtualChild,
    VirtualItem, VirtualizedList, WindowConfig, WindowUpdate,
};

use crate::child::{ListChild, SlotInfo, insert_empty};
use crate::flatten::{FlatIndexSpace, FlatSlot};
use crate::props::{ItemKeyOf, ItemLengthOf, ListCallbacks, SlotLengths};
use crate::source::DataSource;

/// Configuration of a [`FlatList`].
pub struct FlatListProps<T> {
    pub config: WindowConfig,
    pub has_header: bool,
    pub has_footer: bool,
    pub has_separators: bool,
    pub has_empty_component: bool,
    pub lengths: SlotLengths,
    pub item_length: Option<ItemLengthOf<T>>,
    pub key_extractor: Option<ItemKeyOf<T>>,
    pub callbacks: ListCallbacks,
}

impl<T> Default for FlatListProps<T> {
    fn default() -> Self {
        Self {
            config: WindowConfig::default(),
            has_header: false,
            has_footer: false,
            has_separators: false,
            has_empty_component: false,
            lengths: SlotLengths::default(),
            item_length: None,
            key_extractor: None,
            callbacks: ListCallbacks::default(),
        }
    }
}

impl<T> Clone for FlatListProps<T> {
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            has_header: self.has_header,
            has_footer: self.has_footer,
            has_separators: self.has_separators,
            has_empty_component: self.has_empty_component,
            lengths: self.lengths,
            item_length: self.item_length.clone(),
            key_extractor: self.key_extractor.clone(),
            callbacks: self.callbacks.clone(),
        }
    }
}

impl<T> FlatListProps<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: WindowConfig) -> Self {
        self.config = config;
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

    pub fn with_separators(mut self, has_separators: bool) -> Self {
        self.has_separators = has_separators;
        self
    }

    pub fn with_empty_component(mut self, has_empty_component: bool) -> Self {
        self.has_empty_component = has_empty_component;
        self
    }

    pub fn with_lengths(mut self, lengths: SlotLengths) -> Self {
        self.lengths = lengths;
        self
    }

    pub fn with_item_length(mut self, f: impl Fn(&T, usize) -> f64 + Send + Sync + 'static) -> Self {
        self.item_length = Some(Arc::new(f));
        self
    }

    pub fn with_key_extractor(
        mut self,
        f: impl Fn(&T, usize) -> String + Send + Sync + 'static,
    ) -> Self {
        self.key_extractor = Some(Arc::new(f));
        self
    }

    pub fn with_callbacks(mut self, callbacks: ListCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    fn index_space(&self, item_count: usize) -> FlatIndexSpace {
        FlatIndexSpace::new(item_count)
            .with_header(self.has_header)
            .with_footer(self.has_footer)
            .with_separators(self.has_separators)
    }
}

impl<T> core::fmt::Debug for FlatListProps<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatListProps")
            .field("config", &self.config)
            .field("has_header", &self.has_header)
            .field("has_footer", &self.has_footer)
            .field("has_separators", &self.has_separators)
            .field("has_empty_component", &self.has_empty_component)
            .field("lengths", &self.lengths)
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}

struct FlatShared<D: DataSource> {
    data: Arc<D>,
    space: FlatIndexSpace,
    lengths: SlotLengths,
    item_length: Option<ItemLengthOf<D::Item>>,
    key_extractor: Option<ItemKeyOf<D::Item>>,
}

impl<D: DataSource> FlatShared<D> {
    fn slot_length(&self, index: usize) -> Option<f64> {
        match self.space.classify(index)? {
            FlatSlot::Header => Some(self.lengths.header),
            FlatSlot::Footer => Some(self.lengths.footer),
            FlatSlot::Separator(_) => Some(self.lengths.separator),
            FlatSlot::Item(i) => {
                let f = self.item_length.as_ref()?;
                Some(f(self.data.get(i)?, i))
            }
        }
    }

    fn key(&self, index: usize) -> String {
        if let (Some(FlatSlot::Item(i)), Some(f)) = (self.space.classify(index), &self.key_extractor) {
            if let Some(item) = self.data.get(i) {
                return f(item, i);
            }
        }
        self.space.key(index)
    }

    fn child(&self, v: VirtualItem) -> Option<ListChild<'_, D::Item>> {
        let kind = self.space.classify(v.index)?;
        let slot = SlotInfo {
            key: v.key,
            index: v.index,
            offset: v.offset,
            length: v.length,
        };
        Some(match kind {
            FlatSlot::Header => ListChild::Header(slot),
            FlatSlot::Footer => ListChild::Footer(slot),
            FlatSlot::Separator(after) => ListChild::ItemSeparator {
                section: 0,
                after,
                slot,
            },
            FlatSlot::Item(index) => ListChild::Item {
                item: self.data.get(index)?,
                section: 0,
                index,
                slot,
            },
        })
    }
}

/// A single-section list: optional header and footer plus separators between items,
/// flattened into one virtual index space and windowed by a [`VirtualizedList`].
pub struct FlatList<D: DataSource> {
    shared: Arc<FlatShared<D>>,
    props: FlatListProps<D::Item>,
    list: VirtualizedList,
}

impl<D> FlatList<D>
where
    D: DataSource + Send + Sync + 'static,
    D::Item: 'static,
{
    pub fn new(data: D, props: FlatListProps<D::Item>) -> Self {
        let shared = Self::share(Arc::new(data), &props);
        let list = VirtualizedList::new(Self::list_options(&shared, &props));
        Self {
            shared,
            props,
            list,
        }
    }

    fn share(data: Arc<D>, props: &FlatListProps<D::Item>) -> Arc<FlatShared<D>> {
        Arc::new(FlatShared {
            space: props.index_space(data.len()),
            data,
            lengths: props.lengths,
            item_length: props.item_length.clone(),
            key_extractor: props.key_extractor.clone(),
        })
    }

    fn list_options(shared: &Arc<FlatShared<D>>, props: &FlatListProps<D::Item>) -> ListOptions {
        let lengths = Arc::clone(shared);
        let keys = Arc::clone(shared);
        let options = ListOptions::new(shared.space.total_count())
            .with_config(props.config)
            .with_get_item_length(move |index| lengths.slot_length(index))
            .with_key_extractor(move |index| keys.key(index))
            .with_empty_component(props.has_empty_component);
        props.callbacks.apply(options)
    }

    pub fn mount(&mut self, now_ms: u64) {
        self.list.mount(now_ms);
    }

    pub fn data(&self) -> &D {
        &self.shared.data
    }

    pub fn props(&self) -> &FlatListProps<D::Item> {
        &self.props
    }

    pub fn index_space(&self) -> FlatIndexSpace {
        self.shared.space
    }

    /// The underlying windowed list, addressed by virtual index.
    pub fn list(&self) -> &VirtualizedList {
        &self.list
    }

    pub fn classify(&self, index: usize) -> Option<FlatSlot> {
        self.shared.space.classify(index)
    }

    pub fn key_for(&self, index: usize) -> String {
        self.shared.key(index)
    }

    /// Caller-supplied or default length of virtual slot `index`.
    pub fn slot_length(&self, index: usize) -> Option<f64> {
        self.shared.slot_length(index)
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.list.next_deadline()
    }

    pub fn on_scroll(&mut self, telemetry: &ScrollTelemetry, now_ms: u64) -> WindowUpdate {
        self.list.on_scroll(telemetry, now_ms)
    }

    pub fn tick(&mut self, now_ms: u64) -> WindowUpdate {
        self.list.tick(now_ms)
    }

    pub fn on_item_layout(&mut self, index: usize, offset: f64, length: f64) -> WindowUpdate {
        self.list.on_item_layout(index, offset, length)
    }

    /// Replaces the data source. Measurements and window state are discarded.
    pub fn set_data(&mut self, data: D, now_ms: u64) -> WindowUpdate {
        adebug!(len = data.len(), "FlatList::set_data");
        self.shared = Self::share(Arc::new(data), &self.props);
        let options = Self::list_options(&self.shared, &self.props);
        self.list.set_options(options, now_ms)
    }

    /// Replaces the props, keeping the data. Treated like a new data source.
    pub fn set_props(&mut self, props: FlatListProps<D::Item>, now_ms: u64) -> WindowUpdate {
        self.shared = Self::share(Arc::clone(&self.shared.data), &props);
        self.props = props;
        let options = Self::list_options(&self.shared, &self.props);
        self.list.set_options(options, now_ms)
    }

    /// Resolves one virtual index to its typed child, mounted or not.
    pub fn render_item(&self, index: usize) -> Option<ListChild<'_, D::Item>> {
        let layout = self.list.item_layout(index)?;
        self.shared.child(VirtualItem {
            key: self.shared.key(index),
            index,
            offset: layout.offset,
            length: layout.length,
        })
    }

    pub fn render(&self) -> Vec<ListChild<'_, D::Item>> {
        let shared = &*self.shared;
        let mut out = Vec::new();
        for child in self.list.render() {
            match child {
                VirtualChild::SpacerBefore { length } => {
                    out.push(ListChild::SpacerBefore { length });
                }
                VirtualChild::SpacerAfter { length } => out.push(ListChild::SpacerAfter { length }),
                VirtualChild::Empty => out.push(ListChild::Empty),
                VirtualChild::Item(item) => out.extend(shared.child(item)),
                VirtualChild::Header | VirtualChild::Footer | VirtualChild::Separator { .. } => {}
            }
        }
        if shared.data.is_empty() && self.props.has_empty_component {
            insert_empty(&mut out);
        }
        out
    }

    /// Scrolls to data item `params.index`, clamped to the last item.
    pub fn scroll_to_index<C: ScrollContainer + ?Sized>(
        &self,
        params: ScrollToIndexParams,
        container: &mut C,
    ) -> Option<f64> {
        let len = self.shared.data.len();
        let data_index = params.index.min(len.checked_sub(1)?);
        let index = self.shared.space.index_of_item(data_index)?;
        self.list
            .scroll_to_index(ScrollToIndexParams { index, ..params }, container)
    }

    /// Scrolls to the first data item matching `predicate`.
    pub fn scroll_to_item<C: ScrollContainer + ?Sized>(
        &self,
        mut predicate: impl FnMut(&D::Item) -> bool,
        animated: bool,
        container: &mut C,
    ) -> Option<f64> {
        let data = &self.shared.data;
        let index = (0..data.len()).find(|&i| data.get(i).is_some_and(&mut predicate))?;
        self.scroll_to_index(
            ScrollToIndexParams::new(index).with_animated(animated),
            container,
        )
    }

    pub fn scroll_to_offset<C: ScrollContainer + ?Sized>(
        &self,
        offset: f64,
        animated: bool,
        container: &mut C,
    ) {
        self.list.scroll_to_offset(offset, animated, container);
    }

    pub fn scroll_to_end<C: ScrollContainer + ?Sized>(
        &self,
        animated: bool,
        container: &mut C,
    ) -> Option<f64> {
        self.list.scroll_to_end(animated, container)
    }

    pub fn flash_scroll_indicators<C: ScrollContainer + ?Sized>(&self, container: &mut C) {
        self.list.flash_scroll_indicators(container);
    }
}

impl<D: DataSource> core::fmt::Debug for FlatList<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatList")
            .field("item_count", &self.shared.data.len())
            .field("space", &self.shared.space)
            .field("props", &self.props)
            .field("list", &self.list)
            .finish()
    }
}
