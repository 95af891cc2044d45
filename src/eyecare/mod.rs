//! Eye-care reminder.
//!
//! An independent countdown alternating Work and Relax phases forever,
//! regardless of the main timer. Entering Relax rings the generic alert
//! signal once; the full-screen alert is reserved for the main timer.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::scheduler::{CancelToken, Scheduler};
use crate::sound::SoundPlayer;
use crate::timer::format_clock;
use crate::types::{EyeCarePhase, Palette, Rgb, Wakeup, WidgetConfig};

/// Work/Relax cycle driven by 1 Hz ticks.
pub struct EyeCareEngine {
    phase: EyeCarePhase,
    current_seconds: u32,
    work_seconds: u32,
    relax_seconds: u32,
    tick_period: Duration,
    tick_token: Option<CancelToken>,
    shut_down: bool,
    signal: Arc<dyn SoundPlayer>,
}

impl EyeCareEngine {
    /// Creates an engine at the start of a Work phase. Call
    /// [`EyeCareEngine::start`] to begin ticking.
    pub fn new(config: &WidgetConfig, signal: Arc<dyn SoundPlayer>) -> Self {
        Self {
            phase: EyeCarePhase::Work,
            current_seconds: config.eye_work_seconds,
            work_seconds: config.eye_work_seconds,
            relax_seconds: config.eye_relax_seconds,
            tick_period: config.tick_period,
            tick_token: None,
            shut_down: false,
            signal,
        }
    }

    /// Schedules the first tick.
    pub fn start(&mut self, scheduler: &mut Scheduler<Wakeup>) {
        self.cancel_tick(scheduler);
        self.shut_down = false;
        self.schedule_tick(scheduler);
        info!(work = self.work_seconds, relax = self.relax_seconds, "目の休憩タイマーを開始しました");
    }

    /// Advances the cycle by one second.
    ///
    /// Returns the new phase when this tick switched phases. After
    /// [`EyeCareEngine::shutdown`] ticks are ignored until the next start.
    pub fn tick(&mut self, scheduler: &mut Scheduler<Wakeup>) -> Option<EyeCarePhase> {
        self.cancel_tick(scheduler);
        if self.shut_down {
            debug!("Eye-care tick ignored after shutdown");
            return None;
        }
        self.current_seconds = self.current_seconds.saturating_sub(1);

        let switched = if self.current_seconds == 0 {
            self.phase = self.phase.next();
            self.current_seconds = self.phase_seconds(self.phase);
            if self.phase == EyeCarePhase::Relax {
                info!("目を休めましょう");
                self.signal.bell();
            } else {
                debug!("Eye-care relax finished");
            }
            Some(self.phase)
        } else {
            None
        };

        self.schedule_tick(scheduler);
        switched
    }

    /// Cancels the pending tick.
    pub fn shutdown(&mut self, scheduler: &mut Scheduler<Wakeup>) {
        self.cancel_tick(scheduler);
        self.shut_down = true;
    }

    /// Returns the current phase.
    pub fn phase(&self) -> EyeCarePhase {
        self.phase
    }

    /// Returns the seconds left in the current phase.
    pub fn current_seconds(&self) -> u32 {
        self.current_seconds
    }

    /// Returns true while a tick is scheduled.
    pub fn is_running(&self) -> bool {
        self.tick_token.is_some()
    }

    /// Returns the label color for the current phase.
    pub fn color(&self, palette: &Palette) -> Rgb {
        match self.phase {
            EyeCarePhase::Work => palette.text_meta,
            EyeCarePhase::Relax => palette.accent,
        }
    }

    /// Returns the label, e.g. `eye 19:59` or `relax 00:20`.
    pub fn label(&self) -> String {
        let prefix = match self.phase {
            EyeCarePhase::Work => "eye",
            EyeCarePhase::Relax => "relax",
        };
        format!("{} {}", prefix, format_clock(self.current_seconds))
    }

    fn phase_seconds(&self, phase: EyeCarePhase) -> u32 {
        match phase {
            EyeCarePhase::Work => self.work_seconds,
            EyeCarePhase::Relax => self.relax_seconds,
        }
    }

    fn schedule_tick(&mut self, scheduler: &mut Scheduler<Wakeup>) {
        self.tick_token = Some(scheduler.schedule(self.tick_period, Wakeup::EyeCareTick));
    }

    fn cancel_tick(&mut self, scheduler: &mut Scheduler<Wakeup>) {
        if let Some(token) = self.tick_token.take() {
            scheduler.cancel(token);
        }
    }
}

impl std::fmt::Debug for EyeCareEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EyeCareEngine")
            .field("phase", &self.phase)
            .field("current_seconds", &self.current_seconds)
            .field("running", &self.is_running())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::MockSoundPlayer;

    fn create_engine() -> (EyeCareEngine, Arc<MockSoundPlayer>, Scheduler<Wakeup>) {
        let mock = Arc::new(MockSoundPlayer::new());
        let engine = EyeCareEngine::new(&WidgetConfig::default(), mock.clone());
        (engine, mock, Scheduler::new())
    }

    fn tick_n(engine: &mut EyeCareEngine, scheduler: &mut Scheduler<Wakeup>, n: u32) -> Vec<EyeCarePhase> {
        (0..n).filter_map(|_| engine.tick(scheduler)).collect()
    }

    #[test]
    fn test_initial_work_phase() {
        let (engine, _, _) = create_engine();
        assert_eq!(engine.phase(), EyeCarePhase::Work);
        assert_eq!(engine.current_seconds(), 1200);
        assert_eq!(engine.label(), "eye 20:00");
        assert!(!engine.is_running());
    }

    #[test]
    fn test_work_then_relax_then_work() {
        let (mut engine, mock, mut scheduler) = create_engine();
        engine.start(&mut scheduler);

        assert!(tick_n(&mut engine, &mut scheduler, 1199).is_empty());
        assert_eq!(engine.current_seconds(), 1);

        assert_eq!(engine.tick(&mut scheduler), Some(EyeCarePhase::Relax));
        assert_eq!(engine.current_seconds(), 20);
        assert_eq!(engine.label(), "relax 00:20");
        assert_eq!(mock.bell_count(), 1);

        assert_eq!(tick_n(&mut engine, &mut scheduler, 20), vec![EyeCarePhase::Work]);
        assert_eq!(engine.current_seconds(), 1200);
        assert_eq!(mock.bell_count(), 1);
    }

    #[test]
    fn test_cycles_forever() {
        let (mut engine, mock, mut scheduler) = create_engine();
        engine.start(&mut scheduler);

        let switches = tick_n(&mut engine, &mut scheduler, 3 * 1220);
        assert_eq!(switches.len(), 6);
        assert_eq!(mock.bell_count(), 3);
        assert!(engine.is_running());
    }

    #[test]
    fn test_colors_follow_phase() {
        let config = WidgetConfig::default().with_eye_care(1, 1);
        let mock = Arc::new(MockSoundPlayer::new());
        let mut engine = EyeCareEngine::new(&config, mock);
        let mut scheduler = Scheduler::new();
        let palette = Palette::default();

        assert_eq!(engine.color(&palette), palette.text_meta);
        engine.tick(&mut scheduler);
        assert_eq!(engine.color(&palette), palette.accent);
        engine.tick(&mut scheduler);
        assert_eq!(engine.color(&palette), palette.text_meta);
    }

    #[test]
    fn test_shutdown_cancels_tick() {
        let (mut engine, _, mut scheduler) = create_engine();
        engine.start(&mut scheduler);
        assert_eq!(scheduler.pending(), 1);

        engine.shutdown(&mut scheduler);

        assert_eq!(scheduler.pending(), 0);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_tick_after_shutdown_does_not_restart() {
        let config = WidgetConfig::default().with_eye_care(1, 1);
        let mock = Arc::new(MockSoundPlayer::new());
        let mut engine = EyeCareEngine::new(&config, mock.clone());
        let mut scheduler = Scheduler::new();
        engine.start(&mut scheduler);

        engine.shutdown(&mut scheduler);

        assert_eq!(engine.tick(&mut scheduler), None);
        assert_eq!(engine.phase(), EyeCarePhase::Work);
        assert_eq!(engine.current_seconds(), 1);
        assert_eq!(scheduler.pending(), 0);
        assert!(!engine.is_running());
        assert_eq!(mock.bell_count(), 0);

        engine.start(&mut scheduler);
        assert_eq!(engine.tick(&mut scheduler), Some(EyeCarePhase::Relax));
        assert!(engine.is_running());
    }

    #[test]
    fn test_scheduled_ticks_advance_one_per_second() {
        let (mut engine, _, mut scheduler) = create_engine();
        engine.start(&mut scheduler);

        let until = Duration::from_secs(60);
        while let Some((_, wakeup)) = scheduler.pop_due(until) {
            assert_eq!(wakeup, Wakeup::EyeCareTick);
            engine.tick(&mut scheduler);
        }

        assert_eq!(engine.current_seconds(), 1140);
    }
}
