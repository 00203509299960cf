//! Frame-driven timer abstraction.
//!
//! Activation delays and measurement debounce run against the same
//! clock the host drives `tick` with, so tests and headless hosts can
//! script time without a platform timer API.

use smallvec::SmallVec;

pub type TimerId = u64;

#[derive(Debug)]
struct TimerEntry<T> {
    id: TimerId,
    deadline_ms: f64,
    purpose: T,
}

/// Cancellable one-shot timers fired by [`TickScheduler::advance`].
#[derive(Debug)]
pub struct TickScheduler<T> {
    next_id: TimerId,
    pending: SmallVec<[TimerEntry<T>; 4]>,
}

impl<T> Default for TickScheduler<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            pending: SmallVec::new(),
        }
    }
}

impl<T> TickScheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `purpose` to fire once `delay_ms` after `now_ms`.
    pub fn schedule_after(&mut self, now_ms: f64, delay_ms: f64, purpose: T) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push(TimerEntry {
            id,
            deadline_ms: now_ms + delay_ms.max(0.0),
            purpose,
        });
        id
    }

    /// Cancels a pending timer. Returns false if it already fired.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|entry| entry.id != id);
        self.pending.len() != before
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|entry| entry.id == id)
    }

    /// Removes and returns every timer due at `now_ms`, in deadline
    /// order.
    pub fn advance(&mut self, now_ms: f64) -> SmallVec<[(TimerId, T); 4]> {
        let mut due: SmallVec<[TimerEntry<T>; 4]> = SmallVec::new();
        let mut index = 0;
        while index < self.pending.len() {
            if self.pending[index].deadline_ms <= now_ms {
                due.push(self.pending.remove(index));
            } else {
                index += 1;
            }
        }
        due.sort_by(|a, b| {
            a.deadline_ms
                .total_cmp(&b.deadline_ms)
                .then(a.id.cmp(&b.id))
        });
        due.into_iter()
            .map(|entry| (entry.id, entry.purpose))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_schedule_order_when_due() {
        let mut scheduler: TickScheduler<&str> = TickScheduler::new();
        scheduler.schedule_after(0.0, 100.0, "slow");
        scheduler.schedule_after(0.0, 50.0, "fast");

        assert!(scheduler.advance(49.0).is_empty());
        let fired = scheduler.advance(100.0);
        let purposes: Vec<&str> = fired.iter().map(|(_, purpose)| *purpose).collect();
        assert_eq!(purposes, vec!["fast", "slow"]);
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let mut scheduler: TickScheduler<&str> = TickScheduler::new();
        let id = scheduler.schedule_after(0.0, 50.0, "cancelled");
        assert!(scheduler.cancel(id));
        assert!(!scheduler.is_pending(id));
        assert!(scheduler.advance(100.0).is_empty());
        assert!(!scheduler.cancel(id));
    }
}
