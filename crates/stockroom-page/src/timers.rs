//! Timer APIs
//!
//! One-shot timeouts on a virtual clock. The clock only moves through
//! [`TimerManager::advance`], which keeps delayed behaviors deterministic.

use std::collections::BTreeMap;

/// Timer handle returned by `set_timeout`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u32);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// Work a timer performs when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Close every dismissible alert present at fire time
    DismissAlerts,
}

/// Timer entry
#[derive(Debug, Clone)]
pub struct Timer {
    pub id: TimerId,
    pub task: TimerTask,
    pub delay_ms: u64,
    pub due_ms: u64,
}

/// Timer manager
#[derive(Debug, Default)]
pub struct TimerManager {
    timers: BTreeMap<TimerId, Timer>,
    next_id: u32,
    now_ms: u64,
}

impl TimerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Add a timeout
    pub fn set_timeout(&mut self, task: TimerTask, delay_ms: u64) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.insert(
            id,
            Timer {
                id,
                task,
                delay_ms,
                due_ms: self.now_ms.saturating_add(delay_ms),
            },
        );
        id
    }

    /// Clear a timer; returns whether it was still pending
    pub fn clear(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    /// Check if there are pending timers
    pub fn has_pending(&self) -> bool {
        !self.timers.is_empty()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Time until the next timer fires
    pub fn time_until_next(&self) -> Option<u64> {
        self.timers
            .values()
            .map(|t| t.due_ms.saturating_sub(self.now_ms))
            .min()
    }

    /// Remove and return the earliest timer due at or before `until`,
    /// moving the clock to its due time
    ///
    /// Ties on due time go to the lower id.
    pub fn pop_due(&mut self, until: u64) -> Option<Timer> {
        let id = self
            .timers
            .values()
            .filter(|t| t.due_ms <= until)
            .min_by_key(|t| (t.due_ms, t.id))
            .map(|t| t.id)?;
        let timer = self.timers.remove(&id)?;
        self.now_ms = self.now_ms.max(timer.due_ms);
        Some(timer)
    }

    /// Move the clock forward without firing anything
    pub fn advance_clock(&mut self, to_ms: u64) {
        self.now_ms = self.now_ms.max(to_ms);
    }
}
