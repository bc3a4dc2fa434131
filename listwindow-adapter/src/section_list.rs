use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use listwindow::{
    ListOptions, ScrollContainer, ScrollTelemetry, ScrollToIndexParams, VirtualChild,
    VirtualItem, VirtualizedList, WindowConfig, WindowUpdate,
};

use crate::child::{ListChild, SlotInfo, insert_empty};
use crate::flatten::{SectionDecorations, SectionIndexSpace, SectionSlot};
use crate::props::{
    ItemKeyOf, ItemLengthOf, ListCallbacks, SectionLengthFn, SectionPart, SlotLengths,
};

/// A group of items rendered under one section header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section<T> {
    pub data: Vec<T>,
}

impl<T> Section<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T> From<Vec<T>> for Section<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

/// Parameters for [`SectionList::scroll_to_location`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct ScrollToLocationParams {
    pub section: usize,
    pub item: usize,
    pub animated: bool,
    pub view_position: f64,
    pub view_offset: f64,
}

impl Default for ScrollToLocationParams {
    fn default() -> Self {
        Self {
            section: 0,
            item: 0,
            animated: true,
            view_position: 0.0,
            view_offset: 0.0,
        }
    }
}

impl ScrollToLocationParams {
    pub fn new(section: usize, item: usize) -> Self {
        Self {
            section,
            item,
            ..Self::default()
        }
    }

    pub fn with_animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    pub fn with_view_position(mut self, view_position: f64) -> Self {
        self.view_position = view_position;
        self
    }

    pub fn with_view_offset(mut self, view_offset: f64) -> Self {
        self.view_offset = view_offset;
        self
    }
}

/// Configuration of a [`SectionList`].
pub struct SectionListProps<T> {
    pub config: WindowConfig,
    pub decorations: SectionDecorations,
    pub has_empty_component: bool,
    pub lengths: SlotLengths,
    pub item_length: Option<ItemLengthOf<T>>,
    pub section_length: Option<SectionLengthFn>,
    pub key_extractor: Option<ItemKeyOf<T>>,
    pub callbacks: ListCallbacks,
}

impl<T> Default for SectionListProps<T> {
    fn default() -> Self {
        Self {
            config: WindowConfig::default(),
            decorations: SectionDecorations::default(),
            has_empty_component: false,
            lengths: SlotLengths::default(),
            item_length: None,
            section_length: None,
            key_extractor: None,
            callbacks: ListCallbacks::default(),
        }
    }
}

impl<T> Clone for SectionListProps<T> {
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            decorations: self.decorations,
            has_empty_component: self.has_empty_component,
            lengths: self.lengths,
            item_length: self.item_length.clone(),
            section_length: self.section_length.clone(),
            key_extractor: self.key_extractor.clone(),
            callbacks: self.callbacks.clone(),
        }
    }
}

impl<T> SectionListProps<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: WindowConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_decorations(mut self, decorations: SectionDecorations) -> Self {
        self.decorations = decorations;
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

    /// Length of section headers and footers, by section index.
    pub fn with_section_length(
        mut self,
        f: impl Fn(usize, SectionPart) -> f64 + Send + Sync + 'static,
    ) -> Self {
        self.section_length = Some(Arc::new(f));
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
}

impl<T> core::fmt::Debug for SectionListProps<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SectionListProps")
            .field("config", &self.config)
            .field("decorations", &self.decorations)
            .field("has_empty_component", &self.has_empty_component)
            .field("lengths", &self.lengths)
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}

struct SectionShared<T> {
    sections: Arc<[Section<T>]>,
    space: SectionIndexSpace,
    lengths: SlotLengths,
    item_length: Option<ItemLengthOf<T>>,
    section_length: Option<SectionLengthFn>,
    key_extractor: Option<ItemKeyOf<T>>,
}

impl<T> SectionShared<T> {
    fn new(sections: Arc<[Section<T>]>, props: &SectionListProps<T>) -> Self {
        Self {
            space: SectionIndexSpace::new(sections.iter().map(|s| s.data.len()), props.decorations),
            sections,
            lengths: props.lengths,
            item_length: props.item_length.clone(),
            section_length: props.section_length.clone(),
            key_extractor: props.key_extractor.clone(),
        }
    }

    fn item(&self, section: usize, item: usize) -> Option<&T> {
        self.sections.get(section)?.data.get(item)
    }

    fn section_part_length(&self, section: usize, part: SectionPart) -> f64 {
        match (&self.section_length, part) {
            (Some(f), _) => f(section, part),
            (None, SectionPart::Header) => self.lengths.section_header,
            (None, SectionPart::Footer) => self.lengths.section_footer,
        }
    }

    fn slot_length(&self, index: usize) -> Option<f64> {
        match self.space.classify(index)? {
            SectionSlot::Header => Some(self.lengths.header),
            SectionSlot::Footer => Some(self.lengths.footer),
            SectionSlot::SectionHeader(s) => Some(self.section_part_length(s, SectionPart::Header)),
            SectionSlot::SectionFooter(s) => Some(self.section_part_length(s, SectionPart::Footer)),
            SectionSlot::ItemSeparator { .. } | SectionSlot::SectionSeparator(_) => {
                Some(self.lengths.separator)
            }
            SectionSlot::Item { section, item } => {
                let f = self.item_length.as_ref()?;
                Some(f(self.item(section, item)?, item))
            }
        }
    }

    fn key(&self, index: usize) -> String {
        if let (Some(SectionSlot::Item { section, item }), Some(f)) =
            (self.space.classify(index), &self.key_extractor)
        {
            if let Some(value) = self.item(section, item) {
                return f(value, item);
            }
        }
        self.space.key(index)
    }

    fn child(&self, v: VirtualItem) -> Option<ListChild<'_, T>> {
        let kind = self.space.classify(v.index)?;
        let slot = SlotInfo {
            key: v.key,
            index: v.index,
            offset: v.offset,
            length: v.length,
        };
        Some(match kind {
            SectionSlot::Header => ListChild::Header(slot),
            SectionSlot::Footer => ListChild::Footer(slot),
            SectionSlot::SectionHeader(section) => ListChild::SectionHeader { section, slot },
            SectionSlot::SectionFooter(section) => ListChild::SectionFooter { section, slot },
            SectionSlot::SectionSeparator(after) => ListChild::SectionSeparator { after, slot },
            SectionSlot::ItemSeparator { section, item } => ListChild::ItemSeparator {
                section,
                after: item,
                slot,
            },
            SectionSlot::Item { section, item } => ListChild::Item {
                item: self.item(section, item)?,
                section,
                index: item,
                slot,
            },
        })
    }

    fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.data.is_empty())
    }
}

/// A sectioned list: list and section decorations plus separators, flattened into one
/// virtual index space and windowed by a [`VirtualizedList`].
pub struct SectionList<T> {
    shared: Arc<SectionShared<T>>,
    props: SectionListProps<T>,
    list: VirtualizedList,
}

impl<T> SectionList<T>
where
    T: Send + Sync + 'static,
{
    pub fn new(sections: Vec<Section<T>>, props: SectionListProps<T>) -> Self {
        let shared = Arc::new(SectionShared::new(sections.into(), &props));
        let list = VirtualizedList::new(Self::list_options(&shared, &props));
        Self {
            shared,
            props,
            list,
        }
    }

    fn list_options(shared: &Arc<SectionShared<T>>, props: &SectionListProps<T>) -> ListOptions {
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

    pub fn sections(&self) -> &[Section<T>] {
        &self.shared.sections
    }

    pub fn props(&self) -> &SectionListProps<T> {
        &self.props
    }

    pub fn index_space(&self) -> &SectionIndexSpace {
        &self.shared.space
    }

    /// The underlying windowed list, addressed by virtual index.
    pub fn list(&self) -> &VirtualizedList {
        &self.list
    }

    pub fn classify(&self, index: usize) -> Option<SectionSlot> {
        self.shared.space.classify(index)
    }

    pub fn key_for(&self, index: usize) -> String {
        self.shared.key(index)
    }

    pub fn slot_length(&self, index: usize) -> Option<f64> {
        self.shared.slot_length(index)
    }

    /// Virtual index of `item` in `section`.
    pub fn location_index(&self, section: usize, item: usize) -> Option<usize> {
        self.shared.space.index_of(section, item)
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

    /// Replaces the sections. Measurements and window state are discarded.
    pub fn set_sections(&mut self, sections: Vec<Section<T>>, now_ms: u64) -> WindowUpdate {
        adebug!(sections = sections.len(), "SectionList::set_sections");
        self.shared = Arc::new(SectionShared::new(sections.into(), &self.props));
        let options = Self::list_options(&self.shared, &self.props);
        self.list.set_options(options, now_ms)
    }

    /// Replaces the props, keeping the sections. Treated like a new data source.
    pub fn set_props(&mut self, props: SectionListProps<T>, now_ms: u64) -> WindowUpdate {
        self.shared = Arc::new(SectionShared::new(
            Arc::clone(&self.shared.sections),
            &props,
        ));
        self.props = props;
        let options = Self::list_options(&self.shared, &self.props);
        self.list.set_options(options, now_ms)
    }

    /// Resolves one virtual index to its typed child, mounted or not.
    pub fn render_item(&self, index: usize) -> Option<ListChild<'_, T>> {
        let layout = self.list.item_layout(index)?;
        self.shared.child(VirtualItem {
            key: self.shared.key(index),
            index,
            offset: layout.offset,
            length: layout.length,
        })
    }

    pub fn render(&self) -> Vec<ListChild<'_, T>> {
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
        if shared.is_empty() && self.props.has_empty_component {
            insert_empty(&mut out);
        }
        out
    }

    /// Scrolls to `params.item` within `params.section`. Unknown locations issue no command.
    pub fn scroll_to_location<C: ScrollContainer + ?Sized>(
        &self,
        params: ScrollToLocationParams,
        container: &mut C,
    ) -> Option<f64> {
        let index = self.location_index(params.section, params.item)?;
        let params = ScrollToIndexParams::new(index)
            .with_animated(params.animated)
            .with_view_position(params.view_position)
            .with_view_offset(params.view_offset);
        self.list.scroll_to_index(params, container)
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

impl<T> core::fmt::Debug for SectionList<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SectionList")
            .field("sections", &self.shared.sections.len())
            .field("space", &self.shared.space)
            .field("props", &self.props)
            .field("list", &self.list)
            .finish()
    }
}
