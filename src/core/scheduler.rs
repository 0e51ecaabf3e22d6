//! Virtual-time timer queue.
//!
//! All delayed work (the session clock, match resolution, plant growth)
//! is a one-shot task in a `Scheduler`. Time only moves when the owner
//! drains due tasks, so every callback runs on the caller's thread, one at
//! a time, and tests can step time precisely.
//!
//! ```
//! use garden_match::core::Scheduler;
//!
//! let mut timers = Scheduler::new();
//! let late = timers.schedule("late", 500);
//! timers.schedule("early", 100);
//! timers.cancel(late);
//!
//! let fired = timers.drain_until(1_000);
//! assert_eq!(fired.len(), 1);
//! assert_eq!(fired[0].key, "early");
//! assert_eq!(timers.now_ms(), 1_000);
//! ```
//!
//! Handlers that reschedule while draining should use [`Scheduler::pop_due`]
//! in a loop so newly scheduled tasks inside the window also fire.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Handle to a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl TimerId {
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// A task that came due.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<K> {
    pub id: TimerId,
    pub key: K,
    /// Virtual time the task was due at.
    pub due_ms: u64,
}

/// Cancelable one-shot timers over virtual milliseconds.
///
/// Tasks due at the same instant fire in scheduling order.
#[derive(Clone, Debug)]
pub struct Scheduler<K> {
    now_ms: u64,
    next_id: u64,
    /// (due, id). Entries whose id is missing from `tasks` were cancelled.
    queue: BinaryHeap<Reverse<(u64, TimerId)>>,
    tasks: FxHashMap<TimerId, K>,
}

impl<K> Default for Scheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Scheduler<K> {
    /// Create an empty scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            queue: BinaryHeap::new(),
            tasks: FxHashMap::default(),
        }
    }

    /// Current virtual time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of live (not yet fired, not cancelled) tasks.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Schedule `key` to fire `delay_ms` after the current time.
    pub fn schedule(&mut self, key: K, delay_ms: u64) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        let due = self.now_ms.saturating_add(delay_ms);
        self.queue.push(Reverse((due, id)));
        self.tasks.insert(id, key);
        id
    }

    /// Cancel a task. Returns its key if it had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<K> {
        self.tasks.remove(&id)
    }

    /// Cancel every task whose key matches. Returns how many were cancelled.
    pub fn cancel_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&K) -> bool,
    {
        let before = self.tasks.len();
        self.tasks.retain(|_, key| !predicate(key));
        before - self.tasks.len()
    }

    /// Pop the earliest task due at or before `deadline_ms`.
    ///
    /// Moves virtual time forward to the task's due time. Returns `None`
    /// once nothing else is due; call [`Scheduler::advance_to`] afterwards
    /// to settle the clock at the deadline.
    pub fn pop_due(&mut self, deadline_ms: u64) -> Option<Fired<K>> {
        while let Some(&Reverse((due, id))) = self.queue.peek() {
            if due > deadline_ms {
                return None;
            }
            self.queue.pop();

            // Cancelled tasks leave a stale heap entry behind.
            if let Some(key) = self.tasks.remove(&id) {
                self.now_ms = self.now_ms.max(due);
                return Some(Fired { id, key, due_ms: due });
            }
        }
        None
    }

    /// Move virtual time forward without firing anything.
    ///
    /// Time never moves backwards.
    pub fn advance_to(&mut self, deadline_ms: u64) {
        self.now_ms = self.now_ms.max(deadline_ms);
    }

    /// Let `elapsed_ms` pass and return what fired, in due order.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<Fired<K>> {
        self.drain_until(self.now_ms.saturating_add(elapsed_ms))
    }

    /// Fire everything due up to `deadline_ms` and settle the clock there.
    pub fn drain_until(&mut self, deadline_ms: u64) -> Vec<Fired<K>> {
        let mut fired = Vec::new();
        while let Some(task) = self.pop_due(deadline_ms) {
            fired.push(task);
        }
        self.advance_to(deadline_ms);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut timers = Scheduler::new();
        timers.schedule('c', 300);
        timers.schedule('a', 100);
        timers.schedule('b', 200);

        let keys: Vec<_> = timers.drain_until(1_000).into_iter().map(|f| f.key).collect();
        assert_eq!(keys, vec!['a', 'b', 'c']);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_same_instant_keeps_insertion_order() {
        let mut timers = Scheduler::new();
        timers.schedule(1, 50);
        timers.schedule(2, 50);
        timers.schedule(3, 50);

        let keys: Vec<_> = timers.drain_until(50).into_iter().map(|f| f.key).collect();
        assert_eq!(keys, vec![1, 2, 3]);
    }

    #[test]
    fn test_not_due_yet() {
        let mut timers = Scheduler::new();
        timers.schedule("x", 1_000);

        assert!(timers.drain_until(999).is_empty());
        assert_eq!(timers.pending(), 1);
        assert_eq!(timers.now_ms(), 999);

        let fired = timers.drain_until(1_000);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].due_ms, 1_000);
    }

    #[test]
    fn test_delay_is_relative_to_now() {
        let mut timers = Scheduler::new();
        timers.advance_to(5_000);
        timers.schedule("x", 100);

        assert!(timers.drain_until(5_099).is_empty());
        assert_eq!(timers.drain_until(5_100).len(), 1);
    }

    #[test]
    fn test_cancel() {
        let mut timers = Scheduler::new();
        let id = timers.schedule("x", 10);

        assert_eq!(timers.cancel(id), Some("x"));
        assert_eq!(timers.cancel(id), None);
        assert!(timers.drain_until(100).is_empty());
    }

    #[test]
    fn test_cancel_where() {
        let mut timers = Scheduler::new();
        for i in 0..6 {
            timers.schedule(i, 10 * i as u64);
        }

        let cancelled = timers.cancel_where(|k| k % 2 == 0);
        assert_eq!(cancelled, 3);

        let keys: Vec<_> = timers.drain_until(100).into_iter().map(|f| f.key).collect();
        assert_eq!(keys, vec![1, 3, 5]);
    }

    #[test]
    fn test_pop_due_sees_tasks_scheduled_while_draining() {
        let mut timers = Scheduler::new();
        timers.schedule(0u32, 1_000);

        let mut ticks = 0;
        while let Some(fired) = timers.pop_due(3_500) {
            ticks += 1;
            timers.schedule(fired.key + 1, 1_000);
        }
        timers.advance_to(3_500);

        assert_eq!(ticks, 3);
        assert_eq!(timers.pending(), 1);
        assert_eq!(timers.now_ms(), 3_500);
    }

    #[test]
    fn test_advance_is_relative() {
        let mut timers = Scheduler::new();
        timers.schedule("a", 1_500);
        timers.schedule("b", 2_500);

        assert!(timers.advance(1_000).is_empty());
        let fired = timers.advance(1_000);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].key, "a");
        assert_eq!(timers.now_ms(), 2_000);
    }

    #[test]
    fn test_time_never_goes_backwards() {
        let mut timers: Scheduler<()> = Scheduler::new();
        timers.advance_to(500);
        timers.advance_to(100);
        assert_eq!(timers.now_ms(), 500);
    }
}
