use crate::schedule::{TaskKind, TaskQueue};
use crate::{
    EndReached, ItemSizes, RenderRange, RenderWindow, ScrollTelemetry, WindowConfig,
    calculate_render_range,
};

/// What a controller operation changed.
///
/// Hosts re-render when [`WindowUpdate::needs_render`] is `true`.
#[must_use]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowUpdate {
    pub window_changed: bool,
    pub scrolling_changed: bool,
    pub layout_changed: bool,
}

impl WindowUpdate {
    pub const NONE: Self = Self {
        window_changed: false,
        scrolling_changed: false,
        layout_changed: false,
    };

    pub fn needs_render(&self) -> bool {
        self.window_changed || self.layout_changed
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            window_changed: self.window_changed || other.window_changed,
            scrolling_changed: self.scrolling_changed || other.scrolling_changed,
            layout_changed: self.layout_changed || other.layout_changed,
        }
    }
}

/// Result of an accepted scroll event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollOutcome {
    pub update: WindowUpdate,
    /// The padded range computed for this event.
    pub range: Option<RenderRange>,
    /// Set when this event crossed into the end-reached zone.
    pub end_reached: Option<EndReached>,
    /// Content length used for the end-reached check.
    pub content_length: f64,
}

/// Owns the render window and the scrolling state machine.
///
/// Two writers move the window: scroll events (a jump to the freshly computed range when it
/// moved by at least `max_to_render_per_batch` on either end) and idle expansion ticks (one
/// batch on each end per `update_cells_batching_period_ms` while not scrolling). Both run
/// on the caller's thread; a scroll event always wins because expansion ticks re-check
/// `is_scrolling` when they fire.
///
/// Time is supplied by the host (`now_ms`). Call [`Self::tick`] when
/// [`Self::next_deadline`] elapses.
#[derive(Clone, Debug)]
pub struct RenderWindowController {
    config: WindowConfig,
    item_count: usize,
    window: Option<RenderWindow>,

    scroll_offset: f64,
    viewport_length: f64,
    velocity: f64,
    scrolling: bool,
    last_scroll_ms: Option<u64>,

    tasks: TaskQueue,
    end_reached_sent_for: Option<f64>,
}

impl RenderWindowController {
    /// Creates a controller whose window covers the first `initial_num_to_render` items.
    pub fn new(config: WindowConfig, item_count: usize) -> Self {
        Self {
            window: initial_window(&config, item_count),
            config,
            item_count,
            scroll_offset: 0.0,
            viewport_length: 0.0,
            velocity: 0.0,
            scrolling: false,
            last_scroll_ms: None,
            tasks: TaskQueue::new(),
            end_reached_sent_for: None,
        }
    }

    /// Starts the low-priority fill. Call once the list is attached to its container.
    pub fn mount(&mut self, now_ms: u64) {
        ldebug!(item_count = self.item_count, window = ?self.window, "mount");
        self.schedule_expansion(now_ms);
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: WindowConfig, now_ms: u64) {
        self.config = config;
        self.schedule_expansion(now_ms);
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn window(&self) -> Option<RenderWindow> {
        self.window
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn viewport_length(&self) -> f64 {
        self.viewport_length
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    pub fn last_scroll_ms(&self) -> Option<u64> {
        self.last_scroll_ms
    }

    /// Deadline of the earliest pending task.
    pub fn next_deadline(&self) -> Option<u64> {
        self.tasks.next_deadline()
    }

    pub fn tasks(&self) -> &TaskQueue {
        &self.tasks
    }

    /// Sets the viewport length without a scroll event (e.g. on container layout).
    pub fn set_viewport_length(&mut self, viewport_length: f64) {
        if viewport_length.is_finite() && viewport_length >= 0.0 {
            self.viewport_length = viewport_length;
        }
    }

    /// Handles one scroll tick.
    ///
    /// Returns `None` when the telemetry carries no usable offset; such events change
    /// nothing.
    pub fn on_scroll<S: ItemSizes + ?Sized>(
        &mut self,
        telemetry: &ScrollTelemetry,
        now_ms: u64,
        sizes: &S,
    ) -> Option<ScrollOutcome> {
        let axis = self.config.axis;
        let Some(offset) = telemetry
            .content_offset
            .map(|p| p.along(axis))
            .filter(|o| o.is_finite())
        else {
            lwarn!(now_ms, "on_scroll: telemetry without a usable offset ignored");
            return None;
        };

        self.scroll_offset = offset.max(0.0);
        if let Some(viewport) = telemetry
            .layout_measurement
            .map(|s| s.along(axis))
            .filter(|l| l.is_finite() && *l >= 0.0)
        {
            self.viewport_length = viewport;
        }
        if let Some(velocity) = telemetry.velocity.filter(|v| v.is_finite()) {
            self.velocity = velocity;
        }

        let mut update = WindowUpdate::NONE;
        if !self.scrolling {
            self.scrolling = true;
            update.scrolling_changed = true;
        }
        self.last_scroll_ms = Some(now_ms);
        let idle_due = now_ms.saturating_add(self.config.scroll_idle_timeout_ms);
        self.tasks.schedule_once(idle_due, TaskKind::IdleCheck);

        let range = calculate_render_range(
            self.scroll_offset,
            self.viewport_length,
            sizes,
            self.item_count,
            self.config.window_size,
        );
        if let Some(range) = range {
            update.window_changed = self.apply_range(range);
        }

        let content_length = telemetry
            .content_size
            .map(|s| s.along(axis))
            .filter(|l| l.is_finite() && *l > 0.0)
            .unwrap_or_else(|| sizes.length_sum(0..self.item_count));
        let end_reached = self.check_end_reached(content_length);

        Some(ScrollOutcome {
            update,
            range,
            end_reached,
            content_length,
        })
    }

    fn apply_range(&mut self, range: RenderRange) -> bool {
        let next = RenderWindow {
            first: range.start,
            last: range.end,
        };
        let Some(cur) = self.window else {
            self.window = Some(next);
            return true;
        };
        let batch = self.config.max_to_render_per_batch;
        let moved_enough =
            cur.first.abs_diff(range.start) >= batch || cur.last.abs_diff(range.end) >= batch;
        // Visible items are always mounted, even if the move is below the batch threshold.
        let visible_outside = range.visible.first < cur.first || range.visible.last > cur.last;
        if (!moved_enough && !visible_outside) || cur == next {
            return false;
        }
        ltrace!(
            from_first = cur.first,
            from_last = cur.last,
            to_first = next.first,
            to_last = next.last,
            "window jump"
        );
        self.window = Some(next);
        true
    }

    fn check_end_reached(&mut self, content_length: f64) -> Option<EndReached> {
        if self.viewport_length <= 0.0 {
            return None;
        }
        let distance_from_end = content_length - (self.scroll_offset + self.viewport_length);
        let threshold = self.viewport_length * self.config.on_end_reached_threshold;
        if distance_from_end > threshold {
            self.end_reached_sent_for = None;
            return None;
        }
        if self.end_reached_sent_for == Some(content_length) {
            return None;
        }
        self.end_reached_sent_for = Some(content_length);
        ldebug!(distance_from_end, content_length, "end reached");
        Some(EndReached { distance_from_end })
    }

    /// Runs every task due at or before `now_ms`.
    pub fn tick(&mut self, now_ms: u64) -> WindowUpdate {
        let mut update = WindowUpdate::NONE;
        while let Some(task) = self.tasks.pop_due(now_ms) {
            update = update.merge(match task.kind {
                TaskKind::IdleCheck => self.on_idle_check(now_ms),
                TaskKind::ExpandWindow => self.on_expand_tick(now_ms),
            });
        }
        update
    }

    fn on_idle_check(&mut self, now_ms: u64) -> WindowUpdate {
        if !self.scrolling {
            return WindowUpdate::NONE;
        }
        let timeout = self.config.scroll_idle_timeout_ms;
        let last = self.last_scroll_ms.unwrap_or(0);
        if now_ms.saturating_sub(last) < timeout {
            // A newer scroll event arrived; check again when its timeout lapses.
            let due = last.saturating_add(timeout).max(now_ms.saturating_add(1));
            self.tasks.schedule(due, TaskKind::IdleCheck);
            return WindowUpdate::NONE;
        }
        ldebug!(now_ms, "scroll idle");
        self.scrolling = false;
        self.schedule_expansion(now_ms);
        WindowUpdate {
            scrolling_changed: true,
            ..WindowUpdate::NONE
        }
    }

    fn on_expand_tick(&mut self, now_ms: u64) -> WindowUpdate {
        if self.scrolling {
            return WindowUpdate::NONE;
        }
        let Some(cur) = self.window else {
            return WindowUpdate::NONE;
        };
        if cur.is_full(self.item_count) {
            return WindowUpdate::NONE;
        }
        let batch = self.config.batch();
        let next = RenderWindow {
            first: cur.first.saturating_sub(batch),
            last: cur.last.saturating_add(batch).min(self.item_count - 1),
        };
        ltrace!(first = next.first, last = next.last, "idle expansion");
        self.window = Some(next);
        self.schedule_expansion(now_ms);
        WindowUpdate {
            window_changed: next != cur,
            ..WindowUpdate::NONE
        }
    }

    fn schedule_expansion(&mut self, now_ms: u64) {
        if self.scrolling {
            return;
        }
        let Some(window) = self.window else {
            return;
        };
        if window.is_full(self.item_count) {
            return;
        }
        let period = self.config.update_cells_batching_period_ms.max(1);
        self.tasks
            .schedule_once(now_ms.saturating_add(period), TaskKind::ExpandWindow);
    }

    /// Adopts a new item count for the same data source.
    pub fn set_item_count(&mut self, item_count: usize, now_ms: u64) -> WindowUpdate {
        if self.item_count == item_count {
            return WindowUpdate::NONE;
        }
        self.item_count = item_count;
        let prev = self.window;
        self.window = match prev {
            _ if item_count == 0 => None,
            None => initial_window(&self.config, item_count),
            Some(w) => {
                let last_index = item_count - 1;
                Some(RenderWindow {
                    first: w.first.min(last_index),
                    last: w.last.min(last_index),
                })
            }
        };
        self.schedule_expansion(now_ms);
        WindowUpdate {
            window_changed: prev != self.window,
            ..WindowUpdate::NONE
        }
    }

    /// Re-arms the end-reached guard, e.g. after the data source was replaced.
    pub fn reset_end_reached(&mut self) {
        self.end_reached_sent_for = None;
    }
}

fn initial_window(config: &WindowConfig, item_count: usize) -> Option<RenderWindow> {
    if item_count == 0 {
        return None;
    }
    let initial = config.initial_num_to_render.clamp(1, item_count);
    Some(RenderWindow {
        first: 0,
        last: initial - 1,
    })
}
