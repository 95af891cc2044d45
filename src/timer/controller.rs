//! Timer controller: the widget's state machine.
//!
//! The controller wires user actions to the countdown and the alert:
//!
//! ```text
//!            toggle                 tick → 0
//!   Idle ───────────▶ Running ─────────────────▶ Alarmed
//!    ▲  ◀── toggle ──┐  │ ▲                         │
//!    │            Paused │ │ toggle                  │ complete_early
//!    │                   │ complete_early            ▼
//!    └──── reset ──── Completed ◀────────────────────┘
//! ```
//!
//! Reset is accepted from every state and returns to Idle with the default
//! duration. While Alarmed or Completed the inputs are disabled and toggle is
//! ignored.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::countdown::{CountdownEngine, TickOutcome};
use super::field::{FieldEdit, TaskLabel};
use super::input::{format_clock, parse_duration};
use crate::alert::{AlertPresenter, OverlayHost};
use crate::scheduler::{CancelToken, Scheduler};
use crate::types::{Rgb, TimerState, Wakeup, WidgetConfig};

// ============================================================================
// TimerEvent
// ============================================================================

/// Events published by the controller for observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// Countdown started or resumed
    Started {
        /// Seconds counted down from
        duration_seconds: u32,
        /// Task label (if any)
        task_name: Option<String>,
    },
    /// Countdown paused
    Paused {
        /// Remaining seconds
        remaining_seconds: u32,
    },
    /// One second elapsed
    Tick {
        /// Remaining seconds
        remaining_seconds: u32,
    },
    /// Countdown reached zero
    Expired {
        /// Task label (if any)
        task_name: Option<String>,
    },
    /// Finished early by the user
    Completed {
        /// Remaining seconds when completed
        remaining_seconds: u32,
        /// Task label (if any)
        task_name: Option<String>,
    },
    /// Back to idle with the default duration
    Reset,
    /// Duration input could not be parsed and was discarded
    InputRejected {
        /// The discarded text
        input: String,
    },
}

// ============================================================================
// StartGlyph
// ============================================================================

/// Glyph of the start/pause button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartGlyph {
    /// Idle or paused: pressing starts the countdown
    Play,
    /// Running: pressing pauses
    Pause,
    /// Alarmed or completed: the button is inert until reset
    Stop,
}

impl StartGlyph {
    /// Returns the character drawn on the button.
    pub fn as_str(&self) -> &'static str {
        match self {
            StartGlyph::Play => "▶",
            StartGlyph::Pause => "⏸",
            StartGlyph::Stop => "■",
        }
    }
}

// ============================================================================
// TimerController
// ============================================================================

/// Orchestrates the countdown, the alert and the input fields.
#[derive(Debug)]
pub struct TimerController<H: OverlayHost> {
    config: WidgetConfig,
    state: TimerState,
    countdown: CountdownEngine,
    alert: AlertPresenter<H>,
    /// Duration of the current run; guards complete_early before progress
    configured_seconds: u32,
    duration_input: String,
    task: TaskLabel,
    blink_color: Rgb,
    blink_token: Option<CancelToken>,
    event_tx: Option<mpsc::UnboundedSender<TimerEvent>>,
}

impl<H: OverlayHost> TimerController<H> {
    /// Creates an idle controller holding the default duration.
    pub fn new(
        config: WidgetConfig,
        alert: AlertPresenter<H>,
        event_tx: Option<mpsc::UnboundedSender<TimerEvent>>,
    ) -> Self {
        let default_seconds = config.default_duration_seconds;
        Self {
            state: TimerState::Idle,
            countdown: CountdownEngine::new(default_seconds, config.tick_period),
            alert,
            configured_seconds: default_seconds,
            duration_input: format_clock(default_seconds),
            task: TaskLabel::new(config.task_placeholder.clone(), config.fallback_task_width),
            blink_color: config.palette.danger,
            blink_token: None,
            event_tx,
            config,
        }
    }

    // ------------------------------------------------------------------------
    // User actions
    // ------------------------------------------------------------------------

    /// Starts or pauses the countdown.
    ///
    /// Returns false when ignored (Alarmed or Completed).
    pub fn toggle(&mut self, scheduler: &mut Scheduler<Wakeup>) -> bool {
        match self.state {
            TimerState::Alarmed | TimerState::Completed => {
                debug!(state = %self.state, "Toggle ignored while inputs are disabled");
                false
            }
            TimerState::Running => {
                self.countdown.pause(scheduler);
                self.state = TimerState::Paused;
                info!(remaining = self.countdown.remaining(), "タイマーを一時停止しました");
                self.emit(TimerEvent::Paused {
                    remaining_seconds: self.countdown.remaining(),
                });
                true
            }
            TimerState::Idle | TimerState::Paused => {
                let seconds = self.apply_duration_input();
                self.alert.stop(scheduler);
                let outcome = self.countdown.start(seconds, scheduler);
                self.state = TimerState::Running;
                info!(seconds, task = ?self.task.value(), "タイマーを開始しました");
                self.emit(TimerEvent::Started {
                    duration_seconds: seconds,
                    task_name: self.task_name(),
                });
                if outcome == TickOutcome::Expired {
                    self.enter_alarmed(scheduler);
                }
                true
            }
        }
    }

    /// Finishes the run early (also acknowledges an alarm).
    ///
    /// Returns false when ignored: already completed, or not started yet.
    pub fn complete_early(&mut self, scheduler: &mut Scheduler<Wakeup>) -> bool {
        match self.state {
            TimerState::Completed => return false,
            TimerState::Idle | TimerState::Paused
                if self.countdown.remaining() == self.configured_seconds =>
            {
                debug!("Complete ignored: countdown has not progressed");
                return false;
            }
            _ => {}
        }

        self.countdown.halt(scheduler);
        self.cancel_blink(scheduler);
        self.alert.stop(scheduler);
        self.state = TimerState::Completed;

        let remaining_seconds = self.countdown.remaining();
        info!(remaining = remaining_seconds, task = ?self.task.value(), "タイマーを完了しました");
        self.emit(TimerEvent::Completed {
            remaining_seconds,
            task_name: self.task_name(),
        });
        true
    }

    /// Returns to idle with the default duration, from any state.
    pub fn reset(&mut self, scheduler: &mut Scheduler<Wakeup>) {
        self.alert.stop(scheduler);
        self.cancel_blink(scheduler);

        let default_seconds = self.config.default_duration_seconds;
        self.countdown.reset(default_seconds, scheduler);
        self.configured_seconds = default_seconds;
        self.duration_input = format_clock(default_seconds);
        self.task.clear();
        self.state = TimerState::Idle;

        info!("タイマーをリセットしました");
        self.emit(TimerEvent::Reset);
    }

    /// Edits the duration field. Rejected while running or disabled.
    pub fn edit_duration(&mut self, edit: FieldEdit) -> bool {
        if !self.duration_editable() {
            return false;
        }
        edit.apply_to(&mut self.duration_input);
        true
    }

    /// Edits the task field. Rejected while disabled or when overflowing.
    pub fn edit_task(&mut self, edit: FieldEdit) -> bool {
        if !self.state.inputs_enabled() {
            return false;
        }
        self.task.apply(edit)
    }

    // ------------------------------------------------------------------------
    // Scheduled events
    // ------------------------------------------------------------------------

    /// Handles a countdown tick.
    pub fn on_tick(&mut self, scheduler: &mut Scheduler<Wakeup>) {
        match self.countdown.tick(scheduler) {
            TickOutcome::Ignored => {}
            TickOutcome::Counting { remaining } => {
                self.duration_input = format_clock(remaining);
                self.emit(TimerEvent::Tick {
                    remaining_seconds: remaining,
                });
            }
            TickOutcome::Expired => {
                self.duration_input = format_clock(0);
                self.emit(TimerEvent::Tick {
                    remaining_seconds: 0,
                });
                self.enter_alarmed(scheduler);
            }
        }
    }

    /// Handles a text blink while alarmed.
    pub fn on_blink(&mut self, scheduler: &mut Scheduler<Wakeup>) {
        self.blink_token = None;
        if self.state != TimerState::Alarmed {
            return;
        }

        let palette = &self.config.palette;
        self.blink_color = if self.blink_color == palette.danger {
            palette.white
        } else {
            palette.danger
        };
        self.blink_token = Some(scheduler.schedule(self.config.blink_period, Wakeup::TextBlink));
    }

    /// Forwards an alert cycle event; stale ones are ignored.
    pub fn on_alert_cycle(&mut self, session: u64, scheduler: &mut Scheduler<Wakeup>) {
        match self.alert.on_cycle(session, scheduler) {
            Ok(()) => {}
            Err(e) if e.is_stale() => debug!("Ignoring alert cycle: {}", e),
            Err(e) => warn!("{}", e),
        }
    }

    /// Cancels everything the controller has scheduled.
    pub fn shutdown(&mut self, scheduler: &mut Scheduler<Wakeup>) {
        self.alert.stop(scheduler);
        self.cancel_blink(scheduler);
        self.countdown.halt(scheduler);
    }

    fn enter_alarmed(&mut self, scheduler: &mut Scheduler<Wakeup>) {
        self.state = TimerState::Alarmed;
        self.alert.show(self.config.palette.danger, scheduler);

        self.cancel_blink(scheduler);
        self.blink_color = self.config.palette.danger;
        self.blink_token = Some(scheduler.schedule(self.config.blink_period, Wakeup::TextBlink));

        info!(task = ?self.task.value(), "時間になりました");
        self.emit(TimerEvent::Expired {
            task_name: self.task_name(),
        });
    }

    /// Parses the duration field; on failure keeps the previous remaining
    /// time. The field always shows the applied value afterwards.
    fn apply_duration_input(&mut self) -> u32 {
        let previous = self.countdown.remaining();
        let seconds = match parse_duration(&self.duration_input) {
            Ok(seconds) => {
                if self.state == TimerState::Idle || seconds != previous {
                    self.configured_seconds = seconds;
                }
                seconds
            }
            Err(e) => {
                warn!("{} ({})", e, e.suggestion());
                self.emit(TimerEvent::InputRejected {
                    input: e.input().to_string(),
                });
                previous
            }
        };
        self.duration_input = format_clock(seconds);
        seconds
    }

    fn cancel_blink(&mut self, scheduler: &mut Scheduler<Wakeup>) {
        if let Some(token) = self.blink_token.take() {
            scheduler.cancel(token);
        }
    }

    fn task_name(&self) -> Option<String> {
        self.task.value().map(str::to_string)
    }

    fn emit(&self, event: TimerEvent) {
        if let Some(tx) = &self.event_tx {
            if tx.send(event).is_err() {
                debug!("Timer event receiver dropped");
            }
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Returns the current state.
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Returns the remaining seconds.
    pub fn remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    /// Returns the duration of the current run.
    pub fn configured_seconds(&self) -> u32 {
        self.configured_seconds
    }

    /// Returns the text of the duration field.
    pub fn duration_input(&self) -> &str {
        &self.duration_input
    }

    /// Returns true if the duration field accepts edits.
    pub fn duration_editable(&self) -> bool {
        self.state.inputs_enabled() && self.state != TimerState::Running
    }

    /// Returns the task label.
    pub fn task(&self) -> &TaskLabel {
        &self.task
    }

    /// Returns the task label mutably (for layout updates).
    pub fn task_mut(&mut self) -> &mut TaskLabel {
        &mut self.task
    }

    /// Returns the glyph of the start/pause button.
    pub fn start_glyph(&self) -> StartGlyph {
        match self.state {
            TimerState::Running => StartGlyph::Pause,
            TimerState::Alarmed => StartGlyph::Stop,
            TimerState::Idle | TimerState::Paused | TimerState::Completed => StartGlyph::Play,
        }
    }

    /// Returns the color of the duration text.
    pub fn time_color(&self) -> Rgb {
        let palette = &self.config.palette;
        match self.state {
            TimerState::Alarmed => self.blink_color,
            TimerState::Completed => palette.success,
            TimerState::Paused => palette.accent,
            TimerState::Idle | TimerState::Running => palette.text_main,
        }
    }

    /// Returns the color of the task text.
    pub fn task_color(&self, focused: bool) -> Rgb {
        let palette = &self.config.palette;
        match self.state {
            TimerState::Alarmed => self.blink_color,
            TimerState::Completed => palette.success,
            _ if self.task.shows_placeholder(focused) => palette.text_meta,
            _ => palette.text_main,
        }
    }

    /// Returns true while the blink cycle is scheduled.
    pub fn is_blinking(&self) -> bool {
        self.blink_token.is_some()
    }

    /// Returns the alert presenter.
    pub fn alert(&self) -> &AlertPresenter<H> {
        &self.alert
    }

    /// Returns the alert presenter mutably.
    pub fn alert_mut(&mut self) -> &mut AlertPresenter<H> {
        &mut self.alert
    }

    /// Returns the configuration.
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::MockOverlayHost;
    use crate::sound::{MockSoundPlayer, SoundDispatcher, SoundPlayer, SoundSource};
    use std::sync::Arc;
    use std::time::Duration;

    type Controller = TimerController<MockOverlayHost>;

    fn create_controller() -> (
        Controller,
        Scheduler<Wakeup>,
        mpsc::UnboundedReceiver<TimerEvent>,
    ) {
        create_controller_with_config(WidgetConfig::default())
    }

    fn create_controller_with_config(
        config: WidgetConfig,
    ) -> (
        Controller,
        Scheduler<Wakeup>,
        mpsc::UnboundedReceiver<TimerEvent>,
    ) {
        let mock = Arc::new(MockSoundPlayer::new());
        mock.disable();
        let alert = AlertPresenter::new(
            MockOverlayHost::new(),
            SoundDispatcher::new(mock),
            SoundSource::tone(1000, Duration::from_millis(200)),
            config.alert_cycle_period,
        );
        let (tx, rx) = mpsc::unbounded_channel();
        (TimerController::new(config, alert, Some(tx)), Scheduler::new(), rx)
    }

    fn set_duration(controller: &mut Controller, text: &str) {
        controller.edit_duration(FieldEdit::Clear);
        for c in text.chars() {
            controller.edit_duration(FieldEdit::Insert(c));
        }
    }

    /// Dispatches due events the way the widget does.
    fn run_for(controller: &mut Controller, scheduler: &mut Scheduler<Wakeup>, elapsed: Duration) {
        let until = scheduler.now() + elapsed;
        while let Some((_, wakeup)) = scheduler.pop_due(until) {
            match wakeup {
                Wakeup::CountdownTick => controller.on_tick(scheduler),
                Wakeup::TextBlink => controller.on_blink(scheduler),
                Wakeup::AlertCycle { session } => controller.on_alert_cycle(session, scheduler),
                Wakeup::EyeCareTick => {}
            }
        }
        scheduler.advance_to(until);
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<TimerEvent>) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    mod toggle_tests {
        use super::*;

        #[test]
        fn test_initial_state() {
            let (controller, _, _) = create_controller();
            assert_eq!(controller.state(), TimerState::Idle);
            assert_eq!(controller.remaining(), 5400);
            assert_eq!(controller.duration_input(), "90:00");
            assert_eq!(controller.start_glyph(), StartGlyph::Play);
        }

        #[test]
        fn test_start_parses_input() {
            let (mut controller, mut scheduler, mut rx) = create_controller();
            set_duration(&mut controller, "25");

            assert!(controller.toggle(&mut scheduler));

            assert_eq!(controller.state(), TimerState::Running);
            assert_eq!(controller.remaining(), 1500);
            assert_eq!(controller.duration_input(), "25:00");
            assert_eq!(controller.start_glyph(), StartGlyph::Pause);
            assert_eq!(
                drain(&mut rx),
                vec![TimerEvent::Started {
                    duration_seconds: 1500,
                    task_name: None
                }]
            );
        }

        #[test]
        fn test_invalid_input_keeps_previous_duration() {
            let (mut controller, mut scheduler, mut rx) = create_controller();
            set_duration(&mut controller, "abc");

            controller.toggle(&mut scheduler);

            assert_eq!(controller.remaining(), 5400);
            assert_eq!(controller.duration_input(), "90:00");
            let events = drain(&mut rx);
            assert_eq!(
                events[0],
                TimerEvent::InputRejected {
                    input: "abc".to_string()
                }
            );
        }

        #[test]
        fn test_toggle_toggle_keeps_remaining() {
            let (mut controller, mut scheduler, _rx) = create_controller();
            controller.toggle(&mut scheduler);
            controller.toggle(&mut scheduler);

            assert_eq!(controller.state(), TimerState::Paused);
            assert_eq!(controller.remaining(), 5400);
            assert_eq!(scheduler.pending(), 0);
            assert_eq!(controller.start_glyph(), StartGlyph::Play);
        }

        #[test]
        fn test_resume_continues_from_remaining() {
            let (mut controller, mut scheduler, _rx) = create_controller();
            set_duration(&mut controller, "1:00");
            controller.toggle(&mut scheduler);
            run_for(&mut controller, &mut scheduler, Duration::from_secs(10));
            controller.toggle(&mut scheduler);
            assert_eq!(controller.duration_input(), "00:50");

            controller.toggle(&mut scheduler);
            assert_eq!(controller.state(), TimerState::Running);
            assert_eq!(controller.remaining(), 50);
            assert_eq!(controller.configured_seconds(), 60);
        }

        #[test]
        fn test_duration_locked_while_running() {
            let (mut controller, mut scheduler, _rx) = create_controller();
            controller.toggle(&mut scheduler);

            assert!(!controller.edit_duration(FieldEdit::Insert('5')));
            assert!(controller.edit_task(FieldEdit::Insert('x')));
        }

        #[test]
        fn test_paused_time_in_accent() {
            let (mut controller, mut scheduler, _rx) = create_controller();
            controller.toggle(&mut scheduler);
            controller.toggle(&mut scheduler);
            assert_eq!(controller.time_color(), controller.config().palette.accent);
        }
    }

    mod expiry_tests {
        use super::*;

        #[test]
        fn test_expiry_enters_alarmed_once() {
            let (mut controller, mut scheduler, mut rx) = create_controller();
            set_duration(&mut controller, "0:05");
            controller.toggle(&mut scheduler);

            run_for(&mut controller, &mut scheduler, Duration::from_secs(5));

            assert_eq!(controller.state(), TimerState::Alarmed);
            assert_eq!(controller.remaining(), 0);
            assert_eq!(controller.duration_input(), "00:00");
            assert_eq!(controller.start_glyph(), StartGlyph::Stop);
            assert!(controller.alert().is_active());
            assert!(controller.is_blinking());

            let expired = drain(&mut rx)
                .into_iter()
                .filter(|e| matches!(e, TimerEvent::Expired { .. }))
                .count();
            assert_eq!(expired, 1);

            run_for(&mut controller, &mut scheduler, Duration::from_secs(30));
            assert!(drain(&mut rx).is_empty());
        }

        #[test]
        fn test_zero_duration_alarms_on_start() {
            let (mut controller, mut scheduler, mut rx) = create_controller();
            set_duration(&mut controller, "0");

            assert!(controller.toggle(&mut scheduler));

            assert_eq!(controller.state(), TimerState::Alarmed);
            assert_eq!(controller.remaining(), 0);
            assert!(controller.alert().is_active());
            assert!(controller.is_blinking());
            assert_eq!(
                drain(&mut rx),
                vec![
                    TimerEvent::Started {
                        duration_seconds: 0,
                        task_name: None
                    },
                    TimerEvent::Expired { task_name: None },
                ]
            );
        }

        #[test]
        fn test_alarmed_ignores_toggle_and_edits() {
            let (mut controller, mut scheduler, _rx) = create_controller();
            set_duration(&mut controller, "0:01");
            controller.toggle(&mut scheduler);
            run_for(&mut controller, &mut scheduler, Duration::from_secs(1));

            assert!(!controller.toggle(&mut scheduler));
            assert!(!controller.edit_duration(FieldEdit::Insert('1')));
            assert!(!controller.edit_task(FieldEdit::Insert('x')));
            assert_eq!(controller.state(), TimerState::Alarmed);
        }

        #[test]
        fn test_blink_alternates_every_period() {
            let (mut controller, mut scheduler, _rx) = create_controller();
            let palette = controller.config().palette;
            set_duration(&mut controller, "0:01");
            controller.toggle(&mut scheduler);
            run_for(&mut controller, &mut scheduler, Duration::from_secs(1));

            assert_eq!(controller.time_color(), palette.danger);
            run_for(&mut controller, &mut scheduler, Duration::from_millis(600));
            assert_eq!(controller.time_color(), palette.white);
            run_for(&mut controller, &mut scheduler, Duration::from_millis(600));
            assert_eq!(controller.time_color(), palette.danger);
            assert_eq!(controller.task_color(false), palette.danger);
        }

        #[test]
        fn test_reset_from_alarmed() {
            let (mut controller, mut scheduler, _rx) = create_controller();
            set_duration(&mut controller, "0:01");
            controller.toggle(&mut scheduler);
            run_for(&mut controller, &mut scheduler, Duration::from_secs(1));

            controller.reset(&mut scheduler);

            assert_eq!(controller.state(), TimerState::Idle);
            assert_eq!(controller.remaining(), 5400);
            assert!(!controller.alert().is_active());
            assert!(!controller.is_blinking());
            assert_eq!(controller.alert().host().active_count(), 0);
            assert_eq!(scheduler.pending(), 0);
        }
    }

    mod complete_tests {
        use super::*;

        #[test]
        fn test_complete_ignored_before_start() {
            let (mut controller, mut scheduler, mut rx) = create_controller();
            assert!(!controller.complete_early(&mut scheduler));
            assert_eq!(controller.state(), TimerState::Idle);
            assert!(drain(&mut rx).is_empty());
        }

        #[test]
        fn test_complete_ignored_when_paused_before_first_tick() {
            let (mut controller, mut scheduler, _rx) = create_controller();
            controller.toggle(&mut scheduler);
            controller.toggle(&mut scheduler);
            assert!(!controller.complete_early(&mut scheduler));
            assert_eq!(controller.state(), TimerState::Paused);
        }

        #[test]
        fn test_complete_while_running() {
            let (mut controller, mut scheduler, mut rx) = create_controller();
            controller.edit_task(FieldEdit::Insert('A'));
            controller.toggle(&mut scheduler);
            run_for(&mut controller, &mut scheduler, Duration::from_secs(3));

            assert!(controller.complete_early(&mut scheduler));

            assert_eq!(controller.state(), TimerState::Completed);
            assert_eq!(controller.time_color(), controller.config().palette.success);
            assert_eq!(scheduler.pending(), 0);
            assert!(!controller.edit_task(FieldEdit::Insert('B')));
            assert!(drain(&mut rx).contains(&TimerEvent::Completed {
                remaining_seconds: 5397,
                task_name: Some("A".to_string()),
            }));

            assert!(!controller.toggle(&mut scheduler));
            assert!(!controller.complete_early(&mut scheduler));
        }

        #[test]
        fn test_complete_acknowledges_alarm() {
            let (mut controller, mut scheduler, _rx) = create_controller();
            set_duration(&mut controller, "0:01");
            controller.toggle(&mut scheduler);
            run_for(&mut controller, &mut scheduler, Duration::from_secs(1));

            assert!(controller.complete_early(&mut scheduler));

            assert_eq!(controller.state(), TimerState::Completed);
            assert!(!controller.alert().is_active());
            assert_eq!(scheduler.pending(), 0);
        }

        #[test]
        fn test_reset_from_completed() {
            let (mut controller, mut scheduler, _rx) = create_controller();
            controller.edit_task(FieldEdit::Insert('A'));
            controller.toggle(&mut scheduler);
            run_for(&mut controller, &mut scheduler, Duration::from_secs(2));
            controller.complete_early(&mut scheduler);

            controller.reset(&mut scheduler);

            assert_eq!(controller.state(), TimerState::Idle);
            assert_eq!(controller.duration_input(), "90:00");
            assert!(controller.task().is_empty());
            assert!(controller.edit_task(FieldEdit::Insert('B')));
            assert!(controller.edit_duration(FieldEdit::Insert('0')));
        }
    }

    mod reset_tests {
        use super::*;

        #[test]
        fn test_reset_while_running_stops_ticks() {
            let (mut controller, mut scheduler, mut rx) = create_controller();
            controller.toggle(&mut scheduler);
            run_for(&mut controller, &mut scheduler, Duration::from_secs(2));

            controller.reset(&mut scheduler);
            drain(&mut rx);

            run_for(&mut controller, &mut scheduler, Duration::from_secs(10));
            assert_eq!(controller.remaining(), 5400);
            assert!(drain(&mut rx).is_empty());
        }

        #[test]
        fn test_reset_restores_custom_default() {
            let config = WidgetConfig::default().with_default_duration(1500);
            let (mut controller, mut scheduler, _rx) = create_controller_with_config(config);
            set_duration(&mut controller, "5");
            controller.toggle(&mut scheduler);

            controller.reset(&mut scheduler);

            assert_eq!(controller.remaining(), 1500);
            assert_eq!(controller.configured_seconds(), 1500);
            assert_eq!(controller.duration_input(), "25:00");
        }

        #[test]
        fn test_shutdown_cancels_everything() {
            let (mut controller, mut scheduler, _rx) = create_controller();
            set_duration(&mut controller, "0:01");
            controller.toggle(&mut scheduler);
            run_for(&mut controller, &mut scheduler, Duration::from_secs(1));
            assert!(scheduler.pending() > 0);

            controller.shutdown(&mut scheduler);
            assert_eq!(scheduler.pending(), 0);
        }
    }
}
