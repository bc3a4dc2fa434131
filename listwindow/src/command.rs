use alloc::vec::Vec;

use crate::Point;

/// Target of an outbound scroll request.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollPosition {
    pub x: f64,
    pub y: f64,
    pub animated: bool,
}

impl ScrollPosition {
    pub fn new(point: Point, animated: bool) -> Self {
        Self {
            x: point.x,
            y: point.y,
            animated,
        }
    }
}

/// The native scroll container as seen by the list: it only accepts commands.
pub trait ScrollContainer {
    fn scroll_to_position(&mut self, position: ScrollPosition);
    fn flash_scroll_indicators(&mut self);
}

/// A recorded outbound command.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollCommand {
    ScrollTo(ScrollPosition),
    FlashScrollIndicators,
}

/// Collects commands for hosts that forward them in batches (and for tests).
impl ScrollContainer for Vec<ScrollCommand> {
    fn scroll_to_position(&mut self, position: ScrollPosition) {
        self.push(ScrollCommand::ScrollTo(position));
    }

    fn flash_scroll_indicators(&mut self) {
        self.push(ScrollCommand::FlashScrollIndicators);
    }
}

/// Parameters for `scroll_to_index`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct ScrollToIndexParams {
    pub index: usize,
    pub animated: bool,
    /// Where the item lands in the viewport: `0.0` start, `0.5` middle, `1.0` end.
    pub view_position: f64,
    /// Extra distance subtracted from the computed offset.
    pub view_offset: f64,
}

impl Default for ScrollToIndexParams {
    fn default() -> Self {
        Self {
            index: 0,
            animated: true,
            view_position: 0.0,
            view_offset: 0.0,
        }
    }
}

impl ScrollToIndexParams {
    pub fn new(index: usize) -> Self {
        Self {
            index,
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
