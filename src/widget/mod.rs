//! The focus widget.
//!
//! `FocusWidget` owns the scheduler, the timer controller and the eye-care
//! engine. It routes user actions and fired scheduler events to them:
//!
//! ```text
//! ┌──────────┐  WidgetAction  ┌─────────────┐ ──▶ TimerController ──▶ AlertPresenter
//! │ keys.rs  │───────────────▶│ FocusWidget │
//! └──────────┘                └──────┬──────┘ ──▶ EyeCareEngine
//!                                    │ run_due(now)
//!                              Scheduler<Wakeup>
//! ```
//!
//! The terminal runtime lives in [`terminal`]; drawing in [`render`].

pub mod keys;
pub mod render;
pub mod terminal;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use crate::alert::{AlertPresenter, OverlayHost};
use crate::eyecare::EyeCareEngine;
use crate::scheduler::Scheduler;
use crate::sound::{alert_sound, SoundDispatcher, SoundPlayer};
use crate::timer::{FieldEdit, TimerController, TimerEvent};
use crate::types::{TimerState, Wakeup, WidgetConfig};

// ============================================================================
// Focus
// ============================================================================

/// Which text field has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    None,
    Task,
    Duration,
}

impl Focus {
    /// Returns the next focus in Tab order: none → task → duration → none.
    pub fn next(self) -> Self {
        match self {
            Focus::None => Focus::Task,
            Focus::Task => Focus::Duration,
            Focus::Duration => Focus::None,
        }
    }

    /// Returns true if a text field has focus.
    pub fn is_field(self) -> bool {
        self != Focus::None
    }
}

// ============================================================================
// WidgetAction
// ============================================================================

/// Actions the user can trigger with keys or clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetAction {
    /// Start or pause the timer
    Toggle,
    /// Finish the run early
    CompleteEarly,
    /// Back to idle with the default duration
    Reset,
    /// Close the widget
    Close,
    /// Move focus to the next field
    FocusNext,
    /// Remove focus from the fields
    Blur,
    /// Focus a specific field
    FocusField(Focus),
    /// Edit the focused field
    Edit(FieldEdit),
}

impl fmt::Display for WidgetAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetAction::Toggle => write!(f, "toggle"),
            WidgetAction::CompleteEarly => write!(f, "complete"),
            WidgetAction::Reset => write!(f, "reset"),
            WidgetAction::Close => write!(f, "close"),
            WidgetAction::FocusNext => write!(f, "focus-next"),
            WidgetAction::Blur => write!(f, "blur"),
            WidgetAction::FocusField(focus) => write!(f, "focus-{:?}", focus),
            WidgetAction::Edit(_) => write!(f, "edit"),
        }
    }
}

// ============================================================================
// SessionSummary
// ============================================================================

/// Final state of a widget, reported after it closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub state: TimerState,
    pub remaining_seconds: u32,
    pub task_name: Option<String>,
}

// ============================================================================
// FocusWidget
// ============================================================================

/// One focus widget: countdown, task label and eye-care reminder.
#[derive(Debug)]
pub struct FocusWidget<H: OverlayHost> {
    scheduler: Scheduler<Wakeup>,
    controller: TimerController<H>,
    eye_care: Option<EyeCareEngine>,
    focus: Focus,
    closed: bool,
}

impl<H: OverlayHost> FocusWidget<H> {
    /// Creates the widget and starts the eye-care cycle (if enabled).
    ///
    /// `player` plays the alert tone and rings the eye-care signal.
    pub fn new(
        config: WidgetConfig,
        host: H,
        player: Arc<dyn SoundPlayer>,
        event_tx: Option<mpsc::UnboundedSender<TimerEvent>>,
    ) -> Self {
        let mut scheduler = Scheduler::new();

        let alert = AlertPresenter::new(
            host,
            SoundDispatcher::new(Arc::clone(&player)),
            alert_sound(&config),
            config.alert_cycle_period,
        );

        let eye_care = config.eye_care_enabled.then(|| {
            let mut engine = EyeCareEngine::new(&config, player);
            engine.start(&mut scheduler);
            engine
        });

        Self {
            scheduler,
            controller: TimerController::new(config, alert, event_tx),
            eye_care,
            focus: Focus::None,
            closed: false,
        }
    }

    /// Applies a user action. Returns false if it was ignored.
    pub fn handle(&mut self, action: WidgetAction) -> bool {
        if self.closed {
            return false;
        }
        debug!(action = %action, focus = ?self.focus, "Handling action");

        let handled = match action {
            WidgetAction::Toggle => {
                let handled = self.controller.toggle(&mut self.scheduler);
                if self.controller.state() == TimerState::Running {
                    self.focus = Focus::None;
                }
                handled
            }
            WidgetAction::CompleteEarly => self.controller.complete_early(&mut self.scheduler),
            WidgetAction::Reset => {
                self.controller.reset(&mut self.scheduler);
                true
            }
            WidgetAction::Close => {
                self.shutdown();
                self.closed = true;
                true
            }
            WidgetAction::FocusNext => self.set_focus(self.focus.next()),
            WidgetAction::Blur => {
                self.focus = Focus::None;
                true
            }
            WidgetAction::FocusField(focus) => self.set_focus(focus),
            WidgetAction::Edit(edit) => match self.focus {
                Focus::Task => self.controller.edit_task(edit),
                Focus::Duration => self.controller.edit_duration(edit),
                Focus::None => false,
            },
        };

        self.release_focus_if_disabled();
        handled
    }

    /// Dispatches every scheduled event due at or before `until`, then moves
    /// the clock to `until`.
    pub fn run_due(&mut self, until: Duration) {
        while let Some((_, wakeup)) = self.scheduler.pop_due(until) {
            self.dispatch(wakeup);
        }
        self.scheduler.advance_to(until);
        self.release_focus_if_disabled();
    }

    /// Returns the virtual time of the next scheduled event.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    /// Cancels every scheduled event of the widget.
    pub fn shutdown(&mut self) {
        self.controller.shutdown(&mut self.scheduler);
        if let Some(engine) = self.eye_care.as_mut() {
            engine.shutdown(&mut self.scheduler);
        }
        debug!(pending = self.scheduler.pending(), "Widget shut down");
    }

    fn dispatch(&mut self, wakeup: Wakeup) {
        match wakeup {
            Wakeup::CountdownTick => self.controller.on_tick(&mut self.scheduler),
            Wakeup::TextBlink => self.controller.on_blink(&mut self.scheduler),
            Wakeup::AlertCycle { session } => {
                self.controller.on_alert_cycle(session, &mut self.scheduler)
            }
            Wakeup::EyeCareTick => {
                if let Some(engine) = self.eye_care.as_mut() {
                    engine.tick(&mut self.scheduler);
                }
            }
        }
    }

    fn set_focus(&mut self, focus: Focus) -> bool {
        if !self.controller.state().inputs_enabled() {
            return false;
        }
        self.focus = focus;
        true
    }

    fn release_focus_if_disabled(&mut self) {
        if !self.controller.state().inputs_enabled() {
            self.focus = Focus::None;
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Returns the current timer state as a summary.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            state: self.controller.state(),
            remaining_seconds: self.controller.remaining(),
            task_name: self.controller.task().value().map(str::to_string),
        }
    }

    /// Returns the field with keyboard focus.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Returns true once the widget was closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns the current virtual time.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Returns the scheduler.
    pub fn scheduler(&self) -> &Scheduler<Wakeup> {
        &self.scheduler
    }

    /// Returns the timer controller.
    pub fn controller(&self) -> &TimerController<H> {
        &self.controller
    }

    /// Returns the timer controller mutably.
    pub fn controller_mut(&mut self) -> &mut TimerController<H> {
        &mut self.controller
    }

    /// Returns the eye-care engine, if enabled.
    pub fn eye_care(&self) -> Option<&EyeCareEngine> {
        self.eye_care.as_ref()
    }

    /// Returns the overlay host.
    pub fn overlay_host(&self) -> &H {
        self.controller.alert().host()
    }

    /// Returns the overlay host mutably.
    pub fn overlay_host_mut(&mut self) -> &mut H {
        self.controller.alert_mut().host_mut()
    }
}

// ============================================================================
// Tests
// ============================================================================
