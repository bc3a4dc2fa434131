use alloc::string::String;

/// Position of a mounted slot in the flattened index space.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotInfo {
    pub key: String,
    /// Virtual index.
    pub index: usize,
    pub offset: f64,
    pub length: f64,
}

/// A child of the scroll container, in render order.
#[derive(Clone, Debug, PartialEq)]
pub enum ListChild<'a, T> {
    SpacerBefore {
        length: f64,
    },
    Header(SlotInfo),
    SectionHeader {
        section: usize,
        slot: SlotInfo,
    },
    Item {
        item: &'a T,
        section: usize,
        index: usize,
        slot: SlotInfo,
    },
    /// Separator after item `after` of `section`.
    ItemSeparator {
        section: usize,
        after: usize,
        slot: SlotInfo,
    },
    SectionFooter {
        section: usize,
        slot: SlotInfo,
    },
    /// Separator after section `after`.
    SectionSeparator {
        after: usize,
        slot: SlotInfo,
    },
    Footer(SlotInfo),
    SpacerAfter {
        length: f64,
    },
    /// Stand-in shown when the data source is empty.
    Empty,
}

impl<T> ListChild<'_, T> {
    pub fn slot(&self) -> Option<&SlotInfo> {
        match self {
            Self::Header(slot) | Self::Footer(slot) => Some(slot),
            Self::SectionHeader { slot, .. }
            | Self::Item { slot, .. }
            | Self::ItemSeparator { slot, .. }
            | Self::SectionFooter { slot, .. }
            | Self::SectionSeparator { slot, .. } => Some(slot),
            Self::SpacerBefore { .. } | Self::SpacerAfter { .. } | Self::Empty => None,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::SpacerBefore { .. } => "spacer_before",
            Self::SpacerAfter { .. } => "spacer_after",
            Self::Empty => "empty",
            other => other.slot().map_or("", |slot| slot.key.as_str()),
        }
    }

    /// Main-axis length this child occupies in the content.
    pub fn length(&self) -> f64 {
        match self {
            Self::SpacerBefore { length } | Self::SpacerAfter { length } => *length,
            Self::Empty => 0.0,
            other => other.slot().map_or(0.0, |slot| slot.length),
        }
    }

    pub fn item(&self) -> Option<&T> {
        match self {
            Self::Item { item, .. } => Some(*item),
            _ => None,
        }
    }
}

/// Places [`ListChild::Empty`] before the list footer (or the trailing spacer) unless the
/// core already emitted one.
pub(crate) fn insert_empty<T>(children: &mut alloc::vec::Vec<ListChild<'_, T>>) {
    if children.iter().any(|c| matches!(c, ListChild::Empty)) {
        return;
    }
    let at = children
        .iter()
        .position(|c| matches!(c, ListChild::Footer(_) | ListChild::SpacerAfter { .. }))
        .unwrap_or(children.len());
    children.insert(at, ListChild::Empty);
}
