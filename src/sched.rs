//! Cooperative delayed-callback queue.
//!
//! Time is virtual milliseconds supplied by the caller. Nothing here sleeps;
//! the binary maps wall-clock time onto `advance_to`, tests drive it by hand.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Slot {
    due_ms: u64,
    seq: u64,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_seq: u64,
    pending: BTreeMap<Slot, T>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            pending: BTreeMap::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Queues `task` to fire `delay_ms` after the current time. Returns the
    /// due time. Scheduled work cannot be withdrawn.
    pub fn schedule(&mut self, delay_ms: u64, task: T) -> u64 {
        let due_ms = self.now_ms.saturating_add(delay_ms);
        let slot = Slot {
            due_ms,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.pending.insert(slot, task);
        due_ms
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn next_due(&self) -> Option<u64> {
        self.pending.keys().next().map(|s| s.due_ms)
    }

    /// Moves the clock forward (never back) and returns every task whose due
    /// time has passed, earliest first, ties in scheduling order.
    pub fn advance_to(&mut self, now_ms: u64) -> Vec<T> {
        self.now_ms = self.now_ms.max(now_ms);
        let mut fired = Vec::new();
        while let Some(entry) = self.pending.first_entry() {
            if entry.key().due_ms > self.now_ms {
                break;
            }
            fired.push(entry.remove());
        }
        fired
    }

    /// Pops only the earliest task, moving the clock to its due time. Used to
    /// run completions one at a time so follow-up work lands in order.
    pub fn fire_next(&mut self) -> Option<T> {
        let entry = self.pending.first_entry()?;
        self.now_ms = self.now_ms.max(entry.key().due_ms);
        Some(entry.remove())
    }
}
