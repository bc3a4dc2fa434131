use alloc::string::String;

/// The scroll axis of a list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

impl Axis {
    /// Item length used when neither the cache nor the caller knows better.
    pub fn default_item_length(self) -> f64 {
        match self {
            Self::Vertical => 50.0,
            Self::Horizontal => 100.0,
        }
    }
}

/// Known extent of one item along the scroll axis.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemLayout {
    pub length: f64,
    pub offset: f64,
    pub index: usize,
}

impl ItemLayout {
    pub fn end(&self) -> f64 {
        self.offset + self.length
    }
}

/// Inclusive bounds of the items currently kept mounted.
///
/// An empty list has no window; APIs model that as `Option<RenderWindow>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderWindow {
    pub first: usize,
    pub last: usize,
}

impl RenderWindow {
    pub fn len(&self) -> usize {
        self.last.saturating_sub(self.first) + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        self.first <= index && index <= self.last
    }

    pub fn covers(&self, range: RenderRange) -> bool {
        self.first <= range.start && range.end <= self.last
    }

    /// `true` when the window spans every index of a list with `item_count` items.
    pub fn is_full(&self, item_count: usize) -> bool {
        self.first == 0 && self.last.saturating_add(1) >= item_count
    }
}

/// Inclusive index span of the items intersecting the viewport, before padding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub first: usize,
    pub last: usize,
}

/// Inclusive index span the window should cover: the visible range padded by
/// `window_size`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderRange {
    pub start: usize,
    pub end: usize,
    pub visible: VisibleRange,
}

impl RenderRange {
    pub fn contains_visible(&self) -> bool {
        self.start <= self.visible.first && self.visible.last <= self.end
    }
}

/// A mounted item slot in the render output.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualItem {
    pub key: String,
    pub index: usize,
    /// Start offset along the scroll axis.
    pub offset: f64,
    /// Fixed length along the scroll axis.
    pub length: f64,
}

impl VirtualItem {
    pub fn end(&self) -> f64 {
        self.offset + self.length
    }
}

/// One child of the assembled list container, in render order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VirtualChild {
    Header,
    SpacerBefore { length: f64 },
    Item(VirtualItem),
    /// Inline separator rendered inside the cell of item `after`.
    Separator { after: usize, key: String },
    SpacerAfter { length: f64 },
    Footer,
    Empty,
}

impl VirtualChild {
    /// Length this child contributes along the scroll axis.
    pub fn length(&self) -> f64 {
        match self {
            Self::SpacerBefore { length } | Self::SpacerAfter { length } => *length,
            Self::Item(item) => item.length,
            _ => 0.0,
        }
    }
}
