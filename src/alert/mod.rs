//! Full-screen expiry alert.
//!
//! [`AlertPresenter`] owns at most one [`AlertSession`]: a full-screen overlay
//! whose border blinks every cycle period, with a tone requested on every
//! transition into the visible phase.
//!
//! ```text
//! show(color) ──▶ stop() previous ──▶ create overlay ──▶ cycle (visible + tone)
//!                                                          │
//!                               AlertCycle { session } ◀───┘ every 600 ms
//! stop() ──▶ cancel cycle token ──▶ destroy overlay
//! ```

mod error;
mod overlay;

use std::time::Duration;

use tracing::{debug, info, warn};

pub use error::AlertError;
pub use overlay::{MockOverlayHost, OverlayHost, OverlayId, ScreenBorder, ScreenOverlay};

use crate::scheduler::{CancelToken, Scheduler};
use crate::sound::{Dispatch, SoundDispatcher, SoundSource};
use crate::types::{Rgb, Wakeup};

/// State of one active alert.
#[derive(Debug)]
pub struct AlertSession {
    id: u64,
    color: Rgb,
    overlay: Option<OverlayId>,
    border_visible: bool,
    cycle_token: Option<CancelToken>,
}

impl AlertSession {
    /// Returns the session identifier carried by its cycle events.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the border color.
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Returns false when the alert degraded to sound only.
    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Returns true during the visible half of the cycle.
    pub fn border_visible(&self) -> bool {
        self.border_visible
    }
}

/// Shows and tears down the expiry alert.
#[derive(Debug)]
pub struct AlertPresenter<H: OverlayHost> {
    host: H,
    sound: SoundDispatcher,
    tone: SoundSource,
    cycle_period: Duration,
    session: Option<AlertSession>,
    next_session: u64,
}

impl<H: OverlayHost> AlertPresenter<H> {
    /// Creates an idle presenter.
    pub fn new(host: H, sound: SoundDispatcher, tone: SoundSource, cycle_period: Duration) -> Self {
        Self {
            host,
            sound,
            tone,
            cycle_period,
            session: None,
            next_session: 0,
        }
    }

    /// Starts a new alert, replacing any active one.
    pub fn show(&mut self, color: Rgb, scheduler: &mut Scheduler<Wakeup>) {
        self.stop(scheduler);

        self.next_session += 1;
        let id = self.next_session;

        let overlay = match self.host.create(color) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                warn!(session = id, "アラートを音のみで表示します: {}", e);
                None
            }
        };

        info!(session = id, color = %color, "アラートを開始しました");
        self.session = Some(AlertSession {
            id,
            color,
            overlay,
            border_visible: false,
            cycle_token: None,
        });
        self.advance_cycle(scheduler);
    }

    /// Handles a cycle event.
    ///
    /// # Errors
    ///
    /// Returns `AlertError::StaleSession` if `session` is not the active one.
    pub fn on_cycle(&mut self, session: u64, scheduler: &mut Scheduler<Wakeup>) -> Result<(), AlertError> {
        let current = self.session.as_ref().is_some_and(|active| active.id == session);
        if !current {
            return Err(AlertError::StaleSession(session));
        }
        self.advance_cycle(scheduler);
        Ok(())
    }

    /// Stops the active alert. Does nothing when no alert is active.
    pub fn stop(&mut self, scheduler: &mut Scheduler<Wakeup>) {
        let Some(session) = self.session.take() else {
            return;
        };

        if let Some(token) = session.cycle_token {
            scheduler.cancel(token);
        }
        if let Some(overlay) = session.overlay {
            if let Err(e) = self.host.destroy(overlay) {
                debug!(session = session.id, "Overlay already gone: {}", e);
            }
        }
        info!(session = session.id, "アラートを停止しました");
    }

    /// Flips the border, requests a tone when it becomes visible, and
    /// schedules the next cycle.
    fn advance_cycle(&mut self, scheduler: &mut Scheduler<Wakeup>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        session.border_visible = !session.border_visible;
        if let Some(overlay) = session.overlay {
            if let Err(e) = self.host.set_border_visible(overlay, session.border_visible) {
                debug!(session = session.id, "Overlay vanished, continuing sound only: {}", e);
                session.overlay = None;
            }
        }

        if session.border_visible {
            match self.sound.request(&self.tone) {
                Dispatch::Dropped => debug!(session = session.id, "Alert tone dropped"),
                Dispatch::Spawned(_) | Dispatch::Disabled => {}
            }
        }

        session.cycle_token = Some(scheduler.schedule(
            self.cycle_period,
            Wakeup::AlertCycle {
                session: session.id,
            },
        ));
    }

    /// Returns true while an alert is shown.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Returns the active session.
    pub fn session(&self) -> Option<&AlertSession> {
        self.session.as_ref()
    }

    /// Returns the overlay host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns the overlay host mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Returns the sound dispatcher.
    pub fn sound(&self) -> &SoundDispatcher {
        &self.sound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::MockSoundPlayer;
    use std::sync::Arc;

    const RED: Rgb = Rgb::new(0xFF, 0x45, 0x3A);
    const CYCLE: Duration = Duration::from_millis(600);

    fn create_presenter() -> (AlertPresenter<MockOverlayHost>, Arc<MockSoundPlayer>) {
        let mock = Arc::new(MockSoundPlayer::new());
        let presenter = AlertPresenter::new(
            MockOverlayHost::new(),
            SoundDispatcher::new(mock.clone()),
            SoundSource::tone(1000, Duration::from_millis(200)),
            CYCLE,
        );
        (presenter, mock)
    }

    /// Runs every due cycle event up to `until`.
    fn run_until(
        presenter: &mut AlertPresenter<MockOverlayHost>,
        scheduler: &mut Scheduler<Wakeup>,
        until: Duration,
    ) -> usize {
        let mut fired = 0;
        while let Some((_, wakeup)) = scheduler.pop_due(until) {
            if let Wakeup::AlertCycle { session } = wakeup {
                let _ = presenter.on_cycle(session, scheduler);
                fired += 1;
            }
        }
        fired
    }

    /// Waits until the background tone thread has released the guard.
    fn wait_for_sound(presenter: &AlertPresenter<MockOverlayHost>) {
        for _ in 0..200 {
            if !presenter.sound().is_busy() {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("sound thread did not finish");
    }

    #[test]
    fn test_show_creates_visible_overlay() {
        let (mut presenter, _mock) = create_presenter();
        let mut scheduler = Scheduler::new();

        presenter.show(RED, &mut scheduler);

        assert!(presenter.is_active());
        assert_eq!(presenter.host().active_count(), 1);
        assert_eq!(presenter.host().border_visible(), Some(true));
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(presenter.session().unwrap().color(), RED);
    }

    #[test]
    fn test_show_twice_keeps_one_overlay() {
        let (mut presenter, _mock) = create_presenter();
        let mut scheduler = Scheduler::new();

        presenter.show(RED, &mut scheduler);
        presenter.show(RED, &mut scheduler);

        assert_eq!(presenter.host().active_count(), 1);
        assert_eq!(presenter.host().created_count(), 2);
        assert_eq!(presenter.host().destroyed_count(), 1);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_cycle_toggles_border() {
        let (mut presenter, _mock) = create_presenter();
        let mut scheduler = Scheduler::new();
        presenter.show(RED, &mut scheduler);

        run_until(&mut presenter, &mut scheduler, CYCLE);
        assert_eq!(presenter.host().border_visible(), Some(false));

        run_until(&mut presenter, &mut scheduler, CYCLE * 2);
        assert_eq!(presenter.host().border_visible(), Some(true));
    }

    #[test]
    fn test_tone_requested_on_visible_phase() {
        let (mut presenter, mock) = create_presenter();
        let mut scheduler = Scheduler::new();

        presenter.show(RED, &mut scheduler);
        wait_for_sound(&presenter);
        assert_eq!(mock.play_count(), 1);

        // Hidden phase: no tone
        run_until(&mut presenter, &mut scheduler, CYCLE);
        wait_for_sound(&presenter);
        assert_eq!(mock.play_count(), 1);

        // Visible again
        run_until(&mut presenter, &mut scheduler, CYCLE * 2);
        wait_for_sound(&presenter);
        assert_eq!(mock.play_count(), 2);
    }

    #[test]
    fn test_stop_cancels_cycle_and_destroys_overlay() {
        let (mut presenter, _mock) = create_presenter();
        let mut scheduler = Scheduler::new();
        presenter.show(RED, &mut scheduler);

        presenter.stop(&mut scheduler);

        assert!(!presenter.is_active());
        assert_eq!(presenter.host().active_count(), 0);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(run_until(&mut presenter, &mut scheduler, CYCLE * 10), 0);
    }

    #[test]
    fn test_stop_when_idle_is_noop() {
        let (mut presenter, _mock) = create_presenter();
        let mut scheduler = Scheduler::new();

        presenter.stop(&mut scheduler);
        presenter.stop(&mut scheduler);

        assert_eq!(presenter.host().destroyed_count(), 0);
    }

    #[test]
    fn test_stale_cycle_is_rejected() {
        let (mut presenter, _mock) = create_presenter();
        let mut scheduler = Scheduler::new();
        presenter.show(RED, &mut scheduler);
        let old = presenter.session().unwrap().id();
        presenter.show(RED, &mut scheduler);

        let result = presenter.on_cycle(old, &mut scheduler);
        assert_eq!(result, Err(AlertError::StaleSession(old)));
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_overlay_failure_degrades_to_sound_only() {
        let (mut presenter, mock) = create_presenter();
        presenter.host_mut().set_should_fail(true);
        let mut scheduler = Scheduler::new();

        presenter.show(RED, &mut scheduler);
        wait_for_sound(&presenter);

        let session = presenter.session().unwrap();
        assert!(!session.has_overlay());
        assert!(session.border_visible());
        assert_eq!(mock.play_count(), 1);
        assert_eq!(scheduler.pending(), 1);
    }
}
