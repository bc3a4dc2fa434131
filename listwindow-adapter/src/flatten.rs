use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// What a flat-list virtual index refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlatSlot {
    Header,
    Item(usize),
    /// Separator following data item `.0`.
    Separator(usize),
    Footer,
}

/// Flattens `[header] item (separator item)* [footer]` into one contiguous index space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatIndexSpace {
    pub item_count: usize,
    pub has_header: bool,
    pub has_footer: bool,
    pub has_separators: bool,
}

impl FlatIndexSpace {
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count,
            ..Self::default()
        }
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

    fn item_region(&self) -> usize {
        if self.has_separators {
            (self.item_count * 2).saturating_sub(1)
        } else {
            self.item_count
        }
    }

    /// Number of virtual slots: items, interior separators, header and footer.
    pub fn total_count(&self) -> usize {
        usize::from(self.has_header) + self.item_region() + usize::from(self.has_footer)
    }

    pub fn classify(&self, index: usize) -> Option<FlatSlot> {
        let total = self.total_count();
        if index >= total {
            atrace!(index, total, "FlatIndexSpace::classify: out of range");
            return None;
        }
        if self.has_header && index == 0 {
            return Some(FlatSlot::Header);
        }
        if self.has_footer && index == total - 1 {
            return Some(FlatSlot::Footer);
        }
        let adjusted = index - usize::from(self.has_header);
        if !self.has_separators {
            return Some(FlatSlot::Item(adjusted));
        }
        Some(if adjusted % 2 == 0 {
            FlatSlot::Item(adjusted / 2)
        } else {
            FlatSlot::Separator(adjusted / 2)
        })
    }

    /// Virtual index of data item `item`.
    pub fn index_of_item(&self, item: usize) -> Option<usize> {
        if item >= self.item_count {
            return None;
        }
        let slot = if self.has_separators { item * 2 } else { item };
        Some(usize::from(self.has_header) + slot)
    }

    /// Stable reconciliation key; out-of-range indices get a synthetic key.
    pub fn key(&self, index: usize) -> String {
        match self.classify(index) {
            Some(FlatSlot::Header) => String::from("header"),
            Some(FlatSlot::Footer) => String::from("footer"),
            Some(FlatSlot::Item(i)) => format!("item_{i}"),
            Some(FlatSlot::Separator(i)) => format!("separator_{i}"),
            None => format!("invalid_{index}"),
        }
    }
}

/// What a section-list virtual index refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SectionSlot {
    Header,
    SectionHeader(usize),
    Item { section: usize, item: usize },
    /// Separator following `item` within `section`.
    ItemSeparator { section: usize, item: usize },
    SectionFooter(usize),
    /// Separator following section `.0`.
    SectionSeparator(usize),
    Footer,
}

/// Which optional slots a section list emits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct SectionDecorations {
    pub header: bool,
    pub footer: bool,
    pub section_header: bool,
    pub section_footer: bool,
    pub item_separator: bool,
    pub section_separator: bool,
}

/// Flattens sections into one index space.
///
/// Each section occupies `[section header] item (separator item)* [section footer]
/// [section separator]`, the separator only between sections. A per-section table of start
/// slots is precomputed so classification is a binary search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionIndexSpace {
    decorations: SectionDecorations,
    item_counts: Vec<usize>,
    starts: Vec<usize>,
    total: usize,
}

impl SectionIndexSpace {
    pub fn new(
        item_counts: impl IntoIterator<Item = usize>,
        decorations: SectionDecorations,
    ) -> Self {
        let item_counts: Vec<usize> = item_counts.into_iter().collect();
        let mut space = Self {
            decorations,
            starts: Vec::with_capacity(item_counts.len()),
            item_counts,
            total: 0,
        };
        let mut cursor = usize::from(decorations.header);
        for section in 0..space.item_counts.len() {
            space.starts.push(cursor);
            cursor += space.section_slot_count(section);
        }
        space.total = cursor + usize::from(decorations.footer);
        space
    }

    pub fn decorations(&self) -> SectionDecorations {
        self.decorations
    }

    pub fn section_count(&self) -> usize {
        self.item_counts.len()
    }

    pub fn item_count(&self, section: usize) -> Option<usize> {
        self.item_counts.get(section).copied()
    }

    pub fn total_count(&self) -> usize {
        self.total
    }

    fn item_region(&self, items: usize) -> usize {
        if self.decorations.item_separator {
            (items * 2).saturating_sub(1)
        } else {
            items
        }
    }

    /// Slots taken by `section`: header, items, separators, footer, trailing section
    /// separator.
    pub fn section_slot_count(&self, section: usize) -> usize {
        let Some(&items) = self.item_counts.get(section) else {
            return 0;
        };
        let d = self.decorations;
        let trailing = d.section_separator && section + 1 < self.item_counts.len();
        usize::from(d.section_header)
            + self.item_region(items)
            + usize::from(d.section_footer)
            + usize::from(trailing)
    }

    pub fn classify(&self, index: usize) -> Option<SectionSlot> {
        if index >= self.total {
            atrace!(index, total = self.total, "SectionIndexSpace::classify: out of range");
            return None;
        }
        let d = self.decorations;
        if d.header && index == 0 {
            return Some(SectionSlot::Header);
        }
        if d.footer && index == self.total - 1 {
            return Some(SectionSlot::Footer);
        }

        let section = self.starts.partition_point(|&s| s <= index).checked_sub(1)?;
        let mut local = index - self.starts[section];

        if d.section_header {
            if local == 0 {
                return Some(SectionSlot::SectionHeader(section));
            }
            local -= 1;
        }

        let region = self.item_region(self.item_counts[section]);
        if local < region {
            if !d.item_separator {
                return Some(SectionSlot::Item {
                    section,
                    item: local,
                });
            }
            let item = local / 2;
            return Some(if local % 2 == 0 {
                SectionSlot::Item { section, item }
            } else {
                SectionSlot::ItemSeparator { section, item }
            });
        }
        local -= region;

        if d.section_footer {
            if local == 0 {
                return Some(SectionSlot::SectionFooter(section));
            }
            local -= 1;
        }
        (d.section_separator && local == 0).then_some(SectionSlot::SectionSeparator(section))
    }

    /// Virtual index of `item` in `section`, found by walking the slot counts of every
    /// preceding section.
    pub fn index_of(&self, section: usize, item: usize) -> Option<usize> {
        let items = self.item_count(section)?;
        if item >= items {
            return None;
        }
        let mut index = usize::from(self.decorations.header);
        for preceding in 0..section {
            index += self.section_slot_count(preceding);
        }
        debug_assert_eq!(index, self.starts[section], "section start table out of sync");
        index += usize::from(self.decorations.section_header);
        index += if self.decorations.item_separator {
            item * 2
        } else {
            item
        };
        Some(index)
    }

    /// Virtual index of the first slot of `section`.
    pub fn section_start(&self, section: usize) -> Option<usize> {
        self.starts.get(section).copied()
    }

    /// Stable reconciliation key; out-of-range indices get a synthetic key.
    pub fn key(&self, index: usize) -> String {
        match self.classify(index) {
            Some(SectionSlot::Header) => String::from("header"),
            Some(SectionSlot::Footer) => String::from("footer"),
            Some(SectionSlot::SectionHeader(s)) => format!("section_header_{s}"),
            Some(SectionSlot::SectionFooter(s)) => format!("section_footer_{s}"),
            Some(SectionSlot::Item { section, item }) => format!("item_{section}_{item}"),
            Some(SectionSlot::ItemSeparator { section, item }) => {
                format!("item_separator_{section}_{item}")
            }
            Some(SectionSlot::SectionSeparator(s)) => format!("section_separator_{s}"),
            None => format!("invalid_{index}"),
        }
    }
}
