//! A headless render-window engine for virtualized native lists.
//!
//! For flat and sectioned list facades (headers, footers, separators, sections), see the
//! `listwindow-adapter` crate.
//!
//! This crate keeps a sliding window of mounted items over a data source of arbitrary size:
//! it tracks item lengths with partial knowledge, turns scroll telemetry into window
//! decisions, backfills the window while the list is idle, and assembles the container's
//! children (spacers plus mounted items) so content length stays correct.
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - scroll telemetry from the native scroll container
//! - the current time in milliseconds, and a timer that calls `tick` at `next_deadline`
//! - item measurements once native layout completes (optional)
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod command;
mod controller;
mod layout;
mod list;
mod options;
mod range;
mod schedule;
mod state;
mod types;
mod viewability;


pub use command::{ScrollCommand, ScrollContainer, ScrollPosition, ScrollToIndexParams};
pub use controller::{RenderWindowController, ScrollOutcome, WindowUpdate};
pub use layout::{ItemLayoutCache, ItemSizes, LayoutResolver};
pub use list::VirtualizedList;
pub use options::{
    DEFAULT_INITIAL_NUM_TO_RENDER, DEFAULT_MAX_TO_RENDER_PER_BATCH,
    DEFAULT_ON_END_REACHED_THRESHOLD, DEFAULT_SCROLL_IDLE_TIMEOUT_MS,
    DEFAULT_UPDATE_CELLS_BATCHING_PERIOD_MS, DEFAULT_WINDOW_SIZE, ItemLengthFn, KeyExtractor,
    ListOptions, OnEndReachedCallback, OnMetricsCallback, OnScrollCallback,
    OnViewableItemsChangedCallback, WindowConfig,
};
pub use range::{calculate_render_range, visible_range};
pub use schedule::{ScheduledTask, TaskKind, TaskQueue};
pub use state::{EndReached, ListMetrics, Point, ScrollTelemetry, Size};
pub use types::{
    Axis, ItemLayout, RenderRange, RenderWindow, VirtualChild, VirtualItem, VisibleRange,
};
pub use viewability::{ViewToken, ViewabilityConfig, ViewabilityTracker, ViewableItemsChanged};
