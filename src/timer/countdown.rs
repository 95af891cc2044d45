//! Countdown engine for the main focus timer.
//!
//! The engine owns the remaining seconds and the token of its next tick.
//! Every transition that stops counting cancels that token, so a tick can
//! never fire after a pause or reset.

use std::time::Duration;

use tracing::debug;

use crate::scheduler::{CancelToken, Scheduler};
use crate::types::Wakeup;

/// State of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountdownState {
    #[default]
    Idle,
    Running,
    Paused,
    Expired,
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown was not running; nothing changed
    Ignored,
    /// One second elapsed
    Counting {
        /// Remaining seconds
        remaining: u32,
    },
    /// The countdown just reached zero
    Expired,
}

/// Remaining-seconds state of the main timer.
#[derive(Debug)]
pub struct CountdownEngine {
    state: CountdownState,
    remaining: u32,
    tick_period: Duration,
    tick_token: Option<CancelToken>,
}

impl CountdownEngine {
    /// Creates an idle engine holding `duration_seconds`.
    pub fn new(duration_seconds: u32, tick_period: Duration) -> Self {
        Self {
            state: CountdownState::Idle,
            remaining: duration_seconds,
            tick_period,
            tick_token: None,
        }
    }

    /// Starts counting down from `duration_seconds`.
    ///
    /// A zero duration expires at once and returns `TickOutcome::Expired`
    /// without scheduling a tick.
    pub fn start(&mut self, duration_seconds: u32, scheduler: &mut Scheduler<Wakeup>) -> TickOutcome {
        self.cancel_tick(scheduler);
        self.remaining = duration_seconds;
        if duration_seconds == 0 {
            self.state = CountdownState::Expired;
            debug!("Countdown started at zero, expired");
            return TickOutcome::Expired;
        }

        self.state = CountdownState::Running;
        self.schedule_tick(scheduler);
        TickOutcome::Counting {
            remaining: duration_seconds,
        }
    }

    /// Advances the countdown by one second.
    ///
    /// Returns `TickOutcome::Expired` exactly once, on the tick that reaches
    /// zero. Ticks while not running are ignored.
    pub fn tick(&mut self, scheduler: &mut Scheduler<Wakeup>) -> TickOutcome {
        // A direct call while a tick is pending replaces it.
        self.cancel_tick(scheduler);

        if self.state != CountdownState::Running {
            return TickOutcome::Ignored;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = CountdownState::Expired;
            debug!("Countdown expired");
            return TickOutcome::Expired;
        }

        self.schedule_tick(scheduler);
        TickOutcome::Counting {
            remaining: self.remaining,
        }
    }

    /// Pauses a running countdown, keeping the remaining time.
    ///
    /// Returns false if the countdown was not running.
    pub fn pause(&mut self, scheduler: &mut Scheduler<Wakeup>) -> bool {
        if self.state != CountdownState::Running {
            return false;
        }
        self.cancel_tick(scheduler);
        self.state = CountdownState::Paused;
        true
    }

    /// Stops counting without changing the remaining time.
    pub fn halt(&mut self, scheduler: &mut Scheduler<Wakeup>) {
        self.cancel_tick(scheduler);
        if self.state == CountdownState::Running {
            self.state = CountdownState::Paused;
        }
    }

    /// Returns to idle holding `duration_seconds`.
    pub fn reset(&mut self, duration_seconds: u32, scheduler: &mut Scheduler<Wakeup>) {
        self.cancel_tick(scheduler);
        self.remaining = duration_seconds;
        self.state = CountdownState::Idle;
    }

    /// Returns the current state.
    pub fn state(&self) -> CountdownState {
        self.state
    }

    /// Returns the remaining seconds.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Returns true while counting down.
    pub fn is_running(&self) -> bool {
        self.state == CountdownState::Running
    }

    /// Returns true if a tick is scheduled.
    pub fn has_pending_tick(&self) -> bool {
        self.tick_token.is_some()
    }

    fn schedule_tick(&mut self, scheduler: &mut Scheduler<Wakeup>) {
        self.tick_token = Some(scheduler.schedule(self.tick_period, Wakeup::CountdownTick));
    }

    fn cancel_tick(&mut self, scheduler: &mut Scheduler<Wakeup>) {
        if let Some(token) = self.tick_token.take() {
            scheduler.cancel(token);
        }
    }
}
