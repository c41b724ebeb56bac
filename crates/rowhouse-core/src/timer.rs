//! Cooperative one-shot timer manager.
//!
//! Provides deferred state transitions for the engine's single-threaded
//! event model. Each timer carries a payload; the owner schedules a timer
//! with a delay, then periodically polls [`TimerManager::drain_expired`] to
//! collect the payloads of timers that have come due.
//!
//! Nothing here spawns threads or sleeps: firing happens only when the owner
//! polls, which keeps deferred work deterministic and directly testable.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use slotmap::{SlotMap, new_key_type};

use crate::error::TimerError;

new_key_type! {
    /// A unique identifier for a scheduled timer.
    pub struct TimerId;
}

/// Internal timer data.
struct TimerData<T> {
    /// When this timer should fire.
    fire_at: Instant,
    /// The payload handed back when the timer fires.
    payload: T,
}

/// An entry in the timer queue (min-heap by fire time).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_at: Instant,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other.fire_at.cmp(&self.fire_at)
    }
}

/// Manages one-shot timers with payloads.
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
/// use rowhouse_core::TimerManager;
///
/// let mut timers = TimerManager::new();
/// timers.schedule(Duration::ZERO, "clear-selection");
///
/// let fired = timers.drain_expired(Instant::now());
/// assert_eq!(fired, vec!["clear-selection"]);
/// ```
pub struct TimerManager<T> {
    /// All pending timers.
    timers: SlotMap<TimerId, TimerData<T>>,
    /// Priority queue of pending fires (min-heap by fire time).
    queue: BinaryHeap<TimerQueueEntry>,
}

impl<T> TimerManager<T> {
    /// Create a new timer manager with no pending timers.
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
        }
    }

    /// Schedule a one-shot timer that fires after `delay`.
    ///
    /// Returns the timer ID that can be used to cancel the timer before it
    /// fires.
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TimerId {
        let fire_at = Instant::now() + delay;
        let id = self.timers.insert(TimerData { fire_at, payload });
        self.queue.push(TimerQueueEntry { id, fire_at });
        tracing::trace!(target: "rowhouse_core::timer", ?id, ?delay, "timer scheduled");
        id
    }

    /// Cancel a pending timer, returning its payload.
    ///
    /// Returns an error if the timer has already fired or was cancelled.
    /// Stale queue entries are cleaned up lazily by `drain_expired`.
    pub fn cancel(&mut self, id: TimerId) -> Result<T, TimerError> {
        match self.timers.remove(id) {
            Some(data) => Ok(data.payload),
            None => Err(TimerError::InvalidTimerId),
        }
    }

    /// Check if a timer is still pending.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Get the duration from `now` until the next timer fires, if any.
    ///
    /// Returns `Duration::ZERO` for overdue timers and `None` when nothing
    /// is pending.
    pub fn time_until_next(&mut self, now: Instant) -> Option<Duration> {
        // Drop cancelled entries from the front of the queue.
        while let Some(entry) = self.queue.peek() {
            if self.timers.contains_key(entry.id) {
                break;
            }
            self.queue.pop();
        }

        self.queue
            .peek()
            .map(|entry| entry.fire_at.saturating_duration_since(now))
    }

    /// Collect the payloads of all timers due at `now`, in fire order.
    pub fn drain_expired(&mut self, now: Instant) -> Vec<T> {
        let mut fired = Vec::new();

        while let Some(entry) = self.queue.peek() {
            if entry.fire_at > now {
                break;
            }

            let entry = *entry;
            self.queue.pop();

            // Skip entries whose timer was cancelled.
            let Some(data) = self.timers.remove(entry.id) else {
                continue;
            };

            tracing::trace!(target: "rowhouse_core::timer", id = ?entry.id, "timer fired");
            fired.push(data.payload);
        }

        fired
    }

    /// Get the number of pending timers.
    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }
}

impl<T> Default for TimerManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immediate_fire() {
        let mut timers = TimerManager::new();
        timers.schedule(Duration::ZERO, 1u32);
        timers.schedule(Duration::ZERO, 2u32);

        let fired = timers.drain_expired(Instant::now());
        assert_eq!(fired, vec![1, 2]);
        assert_eq!(timers.pending_count(), 0);
    }

    #[test]
    fn test_future_timer_does_not_fire_early() {
        let mut timers = TimerManager::new();
        let id = timers.schedule(Duration::from_secs(60), "later");

        assert!(timers.drain_expired(Instant::now()).is_empty());
        assert!(timers.is_pending(id));
    }

    #[test]
    fn test_cancel_returns_payload() {
        let mut timers = TimerManager::new();
        let id = timers.schedule(Duration::from_secs(60), 42u8);

        assert_eq!(timers.cancel(id), Ok(42));
        assert_eq!(timers.cancel(id), Err(TimerError::InvalidTimerId));
        assert!(timers.drain_expired(Instant::now() + Duration::from_secs(120)).is_empty());
    }

    #[test]
    fn test_fire_order_by_deadline() {
        let mut timers = TimerManager::new();
        timers.schedule(Duration::from_millis(20), "second");
        timers.schedule(Duration::from_millis(10), "first");

        let fired = timers.drain_expired(Instant::now() + Duration::from_millis(50));
        assert_eq!(fired, vec!["first", "second"]);
    }

    #[test]
    fn test_time_until_next_skips_cancelled() {
        let mut timers = TimerManager::new();
        let now = Instant::now();
        let soon = timers.schedule(Duration::from_millis(10), "soon");
        timers.schedule(Duration::from_secs(60), "later");

        timers.cancel(soon).unwrap();
        let until = timers.time_until_next(now).unwrap();
        assert!(until > Duration::from_secs(30));
    }
}
