use alloc::vec::Vec;

/// Deferred work owned by a [`crate::RenderWindowController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TaskKind {
    /// Flip `scrolling` back to `false` once the idle timeout has elapsed.
    IdleCheck,
    /// Grow the render window by one batch if the list is idle.
    ExpandWindow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduledTask {
    pub due_ms: u64,
    pub kind: TaskKind,
}

/// A fire-and-forget timer queue driven by the host's clock.
///
/// Tasks are never cancelled. Each task re-reads controller state when it runs, so a task
/// made stale by a later event simply does nothing.
#[derive(Clone, Debug, Default)]
pub struct TaskQueue {
    tasks: Vec<ScheduledTask>, // sorted by due_ms, FIFO among equal deadlines
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: u64, kind: TaskKind) {
        let at = self.tasks.partition_point(|t| t.due_ms <= due_ms);
        self.tasks.insert(at, ScheduledTask { due_ms, kind });
    }

    /// Schedules `kind` unless a task of the same kind is already pending.
    ///
    /// Returns `true` if a task was added.
    pub fn schedule_once(&mut self, due_ms: u64, kind: TaskKind) -> bool {
        if self.has_pending(kind) {
            return false;
        }
        self.schedule(due_ms, kind);
        true
    }

    pub fn has_pending(&self, kind: TaskKind) -> bool {
        self.tasks.iter().any(|t| t.kind == kind)
    }

    /// Earliest deadline; hosts arm their platform timer with this.
    pub fn next_deadline(&self) -> Option<u64> {
        self.tasks.first().map(|t| t.due_ms)
    }

    /// Removes and returns the earliest task due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<ScheduledTask> {
        match self.tasks.first() {
            Some(t) if t.due_ms <= now_ms => Some(self.tasks.remove(0)),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledTask> {
        self.tasks.iter()
    }
}
