//! Cooperative scheduler for the widget's timers.
//!
//! All timers of the widget (countdown ticks, blink and alert cycles, the
//! eye-care tick) run on a single thread. Instead of holding closures, the
//! scheduler stores plain events that the owner dispatches when they come due:
//!
//! ```text
//! schedule(delay, event) ──▶ queue (deadline, seq) ──▶ pop_due(now) ──▶ dispatch
//!            │                      ▲
//!            └── CancelToken ───────┘ cancel(token) removes the entry
//! ```
//!
//! Time is virtual: `now` only moves when the driver calls [`Scheduler::pop_due`]
//! or [`Scheduler::advance_to`]. The terminal runtime maps it onto a real clock,
//! tests move it by hand.

use std::collections::BTreeMap;
use std::time::Duration;

/// Handle for a scheduled event, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CancelToken {
    deadline: Duration,
    seq: u64,
}

impl CancelToken {
    /// Returns the virtual time at which the event fires.
    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

/// Single-threaded timer queue on virtual time.
#[derive(Debug)]
pub struct Scheduler<E> {
    now: Duration,
    next_seq: u64,
    queue: BTreeMap<(Duration, u64), E>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    /// Creates an empty scheduler at virtual time zero.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            queue: BTreeMap::new(),
        }
    }

    /// Returns the current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedules `event` to fire `delay` after the current virtual time.
    pub fn schedule(&mut self, delay: Duration, event: E) -> CancelToken {
        let token = CancelToken {
            deadline: self.now.saturating_add(delay),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.queue.insert((token.deadline, token.seq), event);
        token
    }

    /// Cancels a scheduled event.
    ///
    /// Returns false if the event already fired or was cancelled before.
    pub fn cancel(&mut self, token: CancelToken) -> bool {
        self.queue.remove(&(token.deadline, token.seq)).is_some()
    }

    /// Returns true if the event behind `token` has not fired yet.
    pub fn is_pending(&self, token: CancelToken) -> bool {
        self.queue.contains_key(&(token.deadline, token.seq))
    }

    /// Returns the number of scheduled events.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Returns the deadline of the earliest scheduled event.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Removes the earliest event due at or before `until`.
    ///
    /// The clock moves to the event's deadline, so events scheduled while
    /// handling it are relative to when it was due, not to when it was popped.
    pub fn pop_due(&mut self, until: Duration) -> Option<(CancelToken, E)> {
        let (&(deadline, seq), _) = self.queue.iter().next()?;
        if deadline > until {
            return None;
        }
        let event = self.queue.remove(&(deadline, seq))?;
        self.now = self.now.max(deadline);
        Some((CancelToken { deadline, seq }, event))
    }

    /// Moves the clock forward to `until`. Never moves backwards.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}
